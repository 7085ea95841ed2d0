use crate::model::{Action, Position, Presentation, Trigger};
use crate::timeline::Timeline;

/// How a successor action is launched by its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    /// Starts together with the predecessor.
    With,
    /// Starts once the predecessor completes.
    After,
}

/// The action immediately following another one in document order, when it
/// fires without user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    pub flat: usize,
    pub at: Position,
    pub chain: Chain,
}

pub fn fires_with_previous(action: &Action) -> bool {
    action.trigger == Trigger::WithPrevious
}

pub fn fires_after_previous(action: &Action) -> bool {
    action.trigger == Trigger::AfterPrevious
}

/// Chained successor of the action at `flat`, if any.
///
/// `None` when `flat` is the last action or its successor waits for a click.
pub fn successor(
    presentation: &Presentation,
    timeline: &Timeline,
    flat: usize,
) -> Option<Successor> {
    let at = timeline.next(flat)?;
    let action = presentation.action(at)?;
    let chain = if fires_with_previous(action) {
        Chain::With
    } else if fires_after_previous(action) {
        Chain::After
    } else {
        return None;
    };
    Some(Successor {
        flat: flat + 1,
        at,
        chain,
    })
}
