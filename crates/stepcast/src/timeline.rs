//! Flattened, read-only view of every action in document order.
//!
//! Slides partition the action list, but trigger chaining and cursor history
//! both treat the presentation as one continuous sequence. The timeline maps
//! between `(slide, action)` positions and flat indices so those rules can be
//! written without slide-boundary special cases.

use crate::model::{Action, Position, Presentation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Flat index of the first action of each slide.
    offsets: Vec<usize>,
    /// Slide/action pair for every flat index.
    cues: Vec<Position>,
}

impl Timeline {
    pub fn new(presentation: &Presentation) -> Self {
        let mut offsets = Vec::with_capacity(presentation.slide_count());
        let mut cues = Vec::with_capacity(presentation.action_count());
        for (s, slide) in presentation.slides().iter().enumerate() {
            offsets.push(cues.len());
            cues.extend((0..slide.actions.len()).map(|a| Position::new(s, a)));
        }
        Self { offsets, cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Flat index for `at`.
    ///
    /// A position past the end of a slide maps to the flat index of the next
    /// slide's first action (or `len()` after the last slide). Out-of-range
    /// slides clamp to `len()`.
    pub fn flat(&self, at: Position) -> usize {
        match self.offsets.get(at.slide) {
            Some(&offset) => {
                let end = self
                    .offsets
                    .get(at.slide + 1)
                    .copied()
                    .unwrap_or(self.cues.len());
                (offset + at.action).min(end)
            }
            None => self.cues.len(),
        }
    }

    /// Slide/action pair at a flat index.
    pub fn cue(&self, flat: usize) -> Option<Position> {
        self.cues.get(flat).copied()
    }

    /// The action following `flat` in document order, crossing slides.
    pub fn next(&self, flat: usize) -> Option<Position> {
        self.cue(flat.checked_add(1)?)
    }

    /// The action preceding `flat` in document order, crossing slides.
    pub fn previous(&self, flat: usize) -> Option<Position> {
        self.cue(flat.checked_sub(1)?)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Position> + '_ {
        self.cues.iter().copied()
    }

    /// Resolve a flat index to its action.
    pub fn action<'p>(&self, presentation: &'p Presentation, flat: usize) -> Option<&'p Action> {
        presentation.action(self.cue(flat)?)
    }
}
