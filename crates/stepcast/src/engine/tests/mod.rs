mod chaining;
mod failures;
mod properties;

use super::{Engine, Navigation, PlaybackPosition};
use crate::fixtures::{CURSOR, after_prev, click, deck, using, with_prev};
use crate::host::{AnimationId, HostEvent, RecordingHost};
use crate::model::{Point, Position, Presentation};

/// Start a session on a recording host and discard the start-up calls.
fn started(presentation: Presentation) -> Engine<RecordingHost> {
    let mut engine = Engine::start(presentation, RecordingHost::new()).unwrap();
    engine.host_mut().take_events();
    engine
}

fn events(engine: &mut Engine<RecordingHost>) -> Vec<HostEvent> {
    engine.host_mut().take_events()
}

/// Visibility calls only, in order.
fn visibility(events: &[HostEvent]) -> Vec<HostEvent> {
    events
        .iter()
        .filter(|e| matches!(e, HostEvent::Show(_) | HostEvent::Hide(_)))
        .cloned()
        .collect()
}

fn animations(events: &[HostEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, HostEvent::Animate { .. }))
        .count()
}

fn show(id: &str) -> HostEvent {
    HostEvent::Show(id.to_string())
}

fn hide(id: &str) -> HostEvent {
    HostEvent::Hide(id.to_string())
}

fn place(abs: f64, ord: f64) -> HostEvent {
    HostEvent::PlaceCursor {
        cursor: CURSOR.to_string(),
        at: Point::new(abs, ord),
    }
}

fn at(slide: usize, action: usize) -> Position {
    Position::new(slide, action)
}

fn position(slide: usize, action: usize, last_slide: usize) -> PlaybackPosition {
    PlaybackPosition {
        slide,
        action,
        last_slide,
    }
}
