//! Playback state machine.
//!
//! The engine owns the playback position and drives an [`AnimationHost`].
//! Explicit navigation (`advance` / `retreat`) and animation completions
//! (`finish`) are the only entry points; chained `withPrevious` /
//! `afterPrevious` actions are launched from an explicit work queue drained
//! inside those calls.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info, trace, warn};

use crate::cursor::CursorLocator;
use crate::error::{PlaybackError, PlaybackResult};
use crate::host::{AnimationHost, AnimationId, AnimationRequest, RecordingHost};
use crate::model::{Action, Position, Presentation, Trigger};
use crate::timeline::Timeline;
use crate::trigger::{self, Chain};

/// Mutable session state. Only the engine writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackPosition {
    pub slide: usize,
    pub action: usize,
    /// Slide that was visible before the latest transition.
    pub last_slide: usize,
}

impl PlaybackPosition {
    pub fn at(&self) -> Position {
        Position::new(self.slide, self.action)
    }
}

/// Outcome of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The `onClick` action at this position was dispatched.
    Played(Position),
    /// No `onClick` action remains; the cursor was refreshed.
    Finished,
    /// Moved back onto the `onClick` action at this position.
    Rewound(Position),
    /// Nothing earlier to rewind to; the cursor is at its bootstrap position.
    AtStart,
    /// An animation whose completion drives chaining is still outstanding.
    Busy,
}

/// Result of scanning forward for the next `onClick` action.
#[derive(Debug, Clone, Copy)]
enum Stop {
    Click(Position),
    /// No click is left; the position just past the last action.
    End(Position),
}

/// Engine state captured before a dispatch, restored if the host refuses it.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    position: PlaybackPosition,
    visible: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    flat: usize,
    /// The successor already started alongside this action, so this
    /// completion launches nothing.
    chains_forward: bool,
}

pub struct Engine<H> {
    presentation: Presentation,
    timeline: Timeline,
    host: H,
    position: PlaybackPosition,
    visible: Option<usize>,
    pending: BTreeMap<AnimationId, Pending>,
}

impl<H: AnimationHost> Engine<H> {
    /// Begin a playback session: every slide hidden except the first, cursor
    /// at the first action's destination.
    pub fn start(presentation: Presentation, host: H) -> PlaybackResult<Self> {
        let timeline = Timeline::new(&presentation);
        let mut engine = Self {
            presentation,
            timeline,
            host,
            position: PlaybackPosition::default(),
            visible: None,
            pending: BTreeMap::new(),
        };
        engine.restart()?;
        Ok(engine)
    }

    /// Reset to the initial position. Outstanding completions are forgotten.
    pub fn restart(&mut self) -> PlaybackResult<()> {
        let bootstrap = self.locator().bootstrap()?;
        self.pending.clear();
        self.position = PlaybackPosition::default();
        for slide in self.presentation.slides() {
            self.host.hide_object(&slide.primary_object().id);
        }
        let first = &self.presentation.slides()[0].primary_object().id;
        self.host.show_object(first);
        self.visible = Some(0);
        self.host.place_cursor(self.presentation.cursor_id(), bootstrap);
        info!(
            slides = self.presentation.slide_count(),
            actions = self.timeline.len(),
            "playback started"
        );
        Ok(())
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// End the session, returning the host. Pending completions are dropped.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Slide whose primary object is currently shown.
    pub fn visible_slide(&self) -> Option<usize> {
        self.visible
    }

    /// Number of dispatched animations not yet reported finished.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// `true` while navigation input must be ignored.
    pub fn is_busy(&self) -> bool {
        self.pending.values().any(|p| !p.chains_forward)
    }

    fn locator(&self) -> CursorLocator<'_> {
        CursorLocator::new(&self.presentation, &self.timeline)
    }

    /// Where a forward step from the current position lands.
    fn scan_forward(&self) -> Stop {
        let last = self.presentation.slide_count() - 1;
        let mut at = self.position.at();
        loop {
            let actions = &self.presentation.slides()[at.slide].actions;
            let rest = actions.get(at.action..).unwrap_or(&[]);
            if let Some(offset) = rest.iter().position(|a| a.trigger == Trigger::OnClick) {
                return Stop::Click(Position::new(at.slide, at.action + offset));
            }
            if at.slide < last {
                at = Position::new(at.slide + 1, 0);
            } else {
                at.action = actions.len();
                return Stop::End(at);
            }
        }
    }

    /// The `onClick` action the next `advance` would play.
    pub fn upcoming(&self) -> Option<Position> {
        match self.scan_forward() {
            Stop::Click(step) => Some(step),
            Stop::End(_) => None,
        }
    }

    /// Move onto the upcoming `onClick` action without playing it. `None`
    /// while busy or when no click is left.
    pub fn cue_next(&mut self) -> PlaybackResult<Option<Position>> {
        if self.is_busy() {
            return Ok(None);
        }
        let Some(step) = self.upcoming() else {
            return Ok(None);
        };
        self.move_onto(step)?;
        debug!(%step, "cued");
        Ok(Some(step))
    }

    /// Forward step: run the next `onClick` action, crossing slides as
    /// needed.
    pub fn advance(&mut self) -> PlaybackResult<Navigation> {
        if self.is_busy() {
            debug!(pending = self.pending.len(), "advance ignored while busy");
            return Ok(Navigation::Busy);
        }

        match self.scan_forward() {
            Stop::Click(step) => {
                resolve(&self.presentation, &self.host, step)?;
                let before = self.snapshot();
                self.move_onto(step)?;
                debug!(%step, "advance");
                self.play(self.timeline.flat(step), before)?;
                Ok(Navigation::Played(step))
            }
            Stop::End(at) => {
                self.move_onto(at)?;
                debug!(at = %self.position.at(), "advance reached the end");
                Ok(Navigation::Finished)
            }
        }
    }

    /// Backward step: reposition onto the previous `onClick` action without
    /// replaying anything.
    pub fn retreat(&mut self) -> PlaybackResult<Navigation> {
        if self.is_busy() {
            debug!(pending = self.pending.len(), "retreat ignored while busy");
            return Ok(Navigation::Busy);
        }

        let mut slide = self.position.slide;
        let mut probe = self.position.action.checked_sub(1);
        let found = loop {
            let actions = &self.presentation.slides()[slide].actions;
            while let Some(i) = probe {
                if actions.get(i).is_some_and(|a| a.trigger == Trigger::OnClick) {
                    break;
                }
                probe = i.checked_sub(1);
            }
            if let Some(i) = probe {
                break Some(Position::new(slide, i));
            }
            if slide == 0 {
                break None;
            }
            slide -= 1;
            probe = self.presentation.slides()[slide].actions.len().checked_sub(1);
        };

        match found {
            Some(step) => {
                self.move_onto(step)?;
                debug!(%step, "retreat");
                Ok(Navigation::Rewound(step))
            }
            None => {
                self.walk_to(0);
                self.position.action = 0;
                let bootstrap = self.locator().bootstrap()?;
                self.host.place_cursor(self.presentation.cursor_id(), bootstrap);
                debug!("retreat reached the start");
                Ok(Navigation::AtStart)
            }
        }
    }

    /// Completion notification from the host for a dispatched animation.
    ///
    /// Launches the `afterPrevious` successor, if any. Unknown or repeated ids
    /// are ignored.
    pub fn finish(&mut self, id: AnimationId) -> PlaybackResult<()> {
        let Some(done) = self.pending.remove(&id) else {
            warn!(%id, "completion for unknown animation ignored");
            return Ok(());
        };
        trace!(%id, flat = done.flat, "animation finished");
        if done.chains_forward {
            return Ok(());
        }

        let Some(next) = trigger::successor(&self.presentation, &self.timeline, done.flat) else {
            return Ok(());
        };
        if next.chain != Chain::After {
            return Ok(());
        }
        let here = self.timeline.flat(self.position.at());
        if here != next.flat {
            warn!(
                at = %self.position.at(),
                successor = %next.at,
                "playback moved on; chained action skipped"
            );
            return Ok(());
        }
        debug!(step = %next.at, "chain after previous");
        let before = self.snapshot();
        self.play(next.flat, before)
    }

    /// Dispatch the action at `flat` and everything that starts with it.
    ///
    /// A refused dispatch restores the state captured before the refused
    /// action was walked to: `origin` for the first action, the state after
    /// the previous dispatch for chained ones.
    fn play(&mut self, flat: usize, origin: Snapshot) -> PlaybackResult<()> {
        let mut queue = VecDeque::from([flat]);
        let mut before = origin;
        while let Some(flat) = queue.pop_front() {
            let at = self
                .timeline
                .cue(flat)
                .ok_or_else(|| PlaybackError::malformed(format!("no action at index {flat}")))?;
            let successor = trigger::successor(&self.presentation, &self.timeline, flat);
            let chains_forward = successor.is_some_and(|s| s.chain == Chain::With);

            let action = resolve(&self.presentation, &self.host, at)?.clone();
            self.walk_to(at.slide);

            let request = AnimationRequest {
                target: &action.target,
                executor: &action.executor,
                destination: action.destination,
                duration: action.duration,
            };
            let id = match self.host.run_animation(&request) {
                Ok(id) => id,
                Err(e) => {
                    self.rollback(before);
                    return Err(PlaybackError::unresolved(at.slide, at.action, e.to_string()));
                }
            };
            self.position.action = at.action + 1;
            self.pending.insert(
                id,
                Pending {
                    flat,
                    chains_forward,
                },
            );
            trace!(
                %id,
                %at,
                target = %action.target,
                executor = %action.executor,
                "animation dispatched"
            );

            if let Some(next) = successor.filter(|s| s.chain == Chain::With) {
                debug!(step = %next.at, "chain with previous");
                queue.push_back(next.flat);
            }
            before = self.snapshot();
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            visible: self.visible,
        }
    }

    /// Undo the slide walk and cursor placement made for an action the host
    /// refused.
    fn rollback(&mut self, to: Snapshot) {
        if let Some(slide) = to.visible {
            self.show_slide(slide);
        }
        let moved = self.position != to.position;
        self.position = to.position;
        if moved {
            if let Ok(point) = self.locator().locate(to.position.at()) {
                self.host.place_cursor(self.presentation.cursor_id(), point);
            }
        }
        debug!(at = %self.position.at(), "dispatch refused; position restored");
    }

    /// Walk to `at` and put the cursor where it stood before that action.
    fn move_onto(&mut self, at: Position) -> PlaybackResult<()> {
        self.walk_to(at.slide);
        self.position.action = at.action;
        self.place_cursor(at)
    }

    fn place_cursor(&mut self, at: Position) -> PlaybackResult<()> {
        let point = self.locator().locate(at)?;
        self.host.place_cursor(self.presentation.cursor_id(), point);
        Ok(())
    }

    /// Step slide by slide until `target` is current, toggling visibility on
    /// each transition.
    fn walk_to(&mut self, target: usize) {
        while self.position.slide < target {
            self.enter_slide(self.position.slide + 1);
        }
        while self.position.slide > target {
            self.enter_slide(self.position.slide - 1);
        }
    }

    fn enter_slide(&mut self, slide: usize) {
        self.position.last_slide = self.position.slide;
        self.position.slide = slide;
        self.position.action = 0;
        self.show_slide(slide);
        debug!(from = self.position.last_slide, to = slide, "slide transition");
    }

    /// Make `slide` the visible one. Idempotent.
    fn show_slide(&mut self, slide: usize) {
        if self.visible == Some(slide) {
            return;
        }
        if let Some(previous) = self.visible.and_then(|v| self.presentation.primary_object(v)) {
            self.host.hide_object(&previous.id);
        }
        if let Some(object) = self.presentation.primary_object(slide) {
            self.host.show_object(&object.id);
        }
        self.visible = Some(slide);
    }
}

impl Engine<RecordingHost> {
    /// Report every outstanding animation as finished, including those the
    /// completions themselves launch. Returns how many were completed.
    pub fn settle(&mut self) -> PlaybackResult<usize> {
        let mut completed = 0;
        loop {
            let ids = self.host.take_outstanding();
            if ids.is_empty() {
                return Ok(completed);
            }
            for id in ids {
                self.finish(id)?;
                completed += 1;
            }
        }
    }
}

/// Check that the action at `at` can be dispatched by `host`.
fn resolve<'p, H: AnimationHost>(
    presentation: &'p Presentation,
    host: &H,
    at: Position,
) -> PlaybackResult<&'p Action> {
    let action = presentation
        .action(at)
        .ok_or_else(|| PlaybackError::unresolved(at.slide, at.action, "no such action"))?;
    if !presentation.knows_target(&action.target) {
        return Err(PlaybackError::unresolved(
            at.slide,
            at.action,
            format!("unknown target `{}`", action.target),
        ));
    }
    if !host.supports_executor(&action.executor) {
        return Err(PlaybackError::unresolved(
            at.slide,
            at.action,
            format!("unknown executor `{}`", action.executor),
        ));
    }
    Ok(action)
}

#[cfg(test)]
mod tests;
