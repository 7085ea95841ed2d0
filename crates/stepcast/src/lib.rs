//! Step-through playback for captured screencast presentations.
//!
//! A [`Presentation`] is a list of slides, each carrying an ordered list of
//! [`Action`]s that animate a target object (usually the synthetic mouse
//! cursor) to a destination. The [`Engine`] walks those actions in response
//! to explicit navigation and drives any [`AnimationHost`], chaining
//! `withPrevious` / `afterPrevious` actions on its own.

pub mod cursor;
pub mod engine;
pub mod error;
pub mod host;
pub mod model;
pub mod timeline;
pub mod trigger;

#[cfg(test)]
mod fixtures;

pub use engine::{Engine, Navigation, PlaybackPosition};
pub use error::{HostError, PlaybackError, PlaybackResult};
pub use host::{AnimationHost, AnimationId, AnimationRequest, HostEvent, RecordingHost};
pub use model::{Action, ObjectKind, Point, Position, Presentation, Slide, SlideObject, Trigger};
