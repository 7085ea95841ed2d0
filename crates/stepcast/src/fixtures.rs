//! Presentation builders shared by unit tests.

use crate::model::{
    Action, DEFAULT_CURSOR_ID, Metadata, ObjectKind, Point, Presentation, Slide, SlideObject,
    Trigger,
};

pub(crate) const CURSOR: &str = DEFAULT_CURSOR_ID;

fn action(trigger: Trigger, target: &str, abs: f64, ord: f64) -> Action {
    Action {
        trigger,
        target: target.to_string(),
        executor: "move".to_string(),
        destination: Point::new(abs, ord),
        duration: None,
    }
}

pub(crate) fn click(target: &str, abs: f64, ord: f64) -> Action {
    action(Trigger::OnClick, target, abs, ord)
}

pub(crate) fn with_prev(target: &str, abs: f64, ord: f64) -> Action {
    action(Trigger::WithPrevious, target, abs, ord)
}

pub(crate) fn after_prev(target: &str, abs: f64, ord: f64) -> Action {
    action(Trigger::AfterPrevious, target, abs, ord)
}

/// Same action with another executor.
pub(crate) fn using(mut action: Action, executor: &str) -> Action {
    action.executor = executor.to_string();
    action
}

/// Slide `i` gets a single background object `s{i}-o0`.
pub(crate) fn deck(slides: Vec<Vec<Action>>) -> Presentation {
    let slides = slides
        .into_iter()
        .enumerate()
        .map(|(i, actions)| Slide {
            objects: vec![SlideObject {
                id: format!("s{i}-o0"),
                kind: ObjectKind::Background,
                image: None,
            }],
            actions,
        })
        .collect();
    Presentation::new(Metadata::default(), CURSOR.to_string(), slides)
        .expect("fixture presentation is well formed")
}

/// Deck where every action is a cursor click; only the shape matters.
pub(crate) fn shaped(actions_per_slide: &[usize]) -> Presentation {
    deck(
        actions_per_slide
            .iter()
            .map(|&n| (0..n).map(|_| click(CURSOR, 0.5, 0.5)).collect())
            .collect(),
    )
}
