use crate::error::{PlaybackError, PlaybackResult};
use crate::model::{Point, Position, Presentation};
use crate::timeline::Timeline;

/// Derives where the cursor overlay sits before a given action runs.
///
/// The answer is the destination of the latest cursor action strictly before
/// the position, scanning back across slide boundaries. When no such action
/// exists the first action's destination is used as the bootstrap position.
#[derive(Debug, Clone, Copy)]
pub struct CursorLocator<'a> {
    presentation: &'a Presentation,
    timeline: &'a Timeline,
}

impl<'a> CursorLocator<'a> {
    pub fn new(presentation: &'a Presentation, timeline: &'a Timeline) -> Self {
        Self {
            presentation,
            timeline,
        }
    }

    /// Destination of the first action in document order.
    pub fn bootstrap(&self) -> PlaybackResult<Point> {
        self.timeline
            .action(self.presentation, 0)
            .map(|a| a.destination)
            .ok_or(PlaybackError::NoCursorHistory)
    }

    pub fn locate(&self, at: Position) -> PlaybackResult<Point> {
        let cursor = self.presentation.cursor_id();
        let end = self.timeline.flat(at);
        let recorded = (0..end)
            .rev()
            .filter_map(|flat| self.timeline.action(self.presentation, flat))
            .find(|a| a.target == cursor)
            .map(|a| a.destination);
        match recorded {
            Some(point) => Ok(point),
            None => self.bootstrap(),
        }
    }
}
