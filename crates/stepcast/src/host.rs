//! The boundary between the playback engine and whatever draws the slides.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::HostError;
use crate::model::Point;

/// Executors understood by the bundled hosts.
pub const BUILTIN_EXECUTORS: &[&str] = &["move", "appear", "disappear"];

/// Handle for one dispatched animation. The host reports it back exactly
/// once through [`Engine::finish`](crate::engine::Engine::finish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest<'a> {
    pub target: &'a str,
    pub executor: &'a str,
    pub destination: Point,
    /// `None` lets the host pick its default length.
    pub duration: Option<Duration>,
}

/// Visual side of playback. Owns no slideshow state.
pub trait AnimationHost {
    fn show_object(&mut self, id: &str);

    fn hide_object(&mut self, id: &str);

    /// Move the cursor overlay without animating.
    fn place_cursor(&mut self, cursor: &str, at: Point);

    fn supports_executor(&self, executor: &str) -> bool;

    /// Start an animation. `Ok` is the dispatch acknowledgment; completion
    /// arrives later.
    fn run_animation(&mut self, request: &AnimationRequest<'_>) -> Result<AnimationId, HostError>;
}

/// One call made on a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Show(String),
    Hide(String),
    PlaceCursor {
        cursor: String,
        at: Point,
    },
    Animate {
        id: AnimationId,
        target: String,
        executor: String,
        destination: Point,
    },
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Show(id) => write!(f, "show {id}"),
            Self::Hide(id) => write!(f, "hide {id}"),
            Self::PlaceCursor { cursor, at } => write!(f, "place {cursor} at {at}"),
            Self::Animate {
                id,
                target,
                executor,
                destination,
            } => write!(f, "animate {id} {executor} {target} -> {destination}"),
        }
    }
}

/// Headless host that records every call and completes nothing on its own.
///
/// Dispatched ids stay outstanding until the driver collects them with
/// [`take_outstanding`](Self::take_outstanding) and hands them to the engine.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
    executors: HashSet<String>,
    refused: HashSet<String>,
    outstanding: Vec<AnimationId>,
    next_id: u64,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::with_executors(BUILTIN_EXECUTORS.iter().copied())
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executors<'a>(executors: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            events: Vec::new(),
            executors: executors.into_iter().map(str::to_string).collect(),
            refused: HashSet::new(),
            outstanding: Vec::new(),
            next_id: 0,
        }
    }

    /// Make future dispatches for `target` fail.
    pub fn refuse_target(&mut self, target: &str) {
        self.refused.insert(target.to_string());
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn outstanding(&self) -> &[AnimationId] {
        &self.outstanding
    }

    pub fn take_outstanding(&mut self) -> Vec<AnimationId> {
        std::mem::take(&mut self.outstanding)
    }

    /// Last placement of the cursor overlay, if any.
    pub fn cursor(&self) -> Option<Point> {
        self.events.iter().rev().find_map(|e| match e {
            HostEvent::PlaceCursor { at, .. } => Some(*at),
            _ => None,
        })
    }

    /// Targets animated so far, in dispatch order.
    pub fn animated_targets(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Animate { target, .. } => Some(target.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl AnimationHost for RecordingHost {
    fn show_object(&mut self, id: &str) {
        self.events.push(HostEvent::Show(id.to_string()));
    }

    fn hide_object(&mut self, id: &str) {
        self.events.push(HostEvent::Hide(id.to_string()));
    }

    fn place_cursor(&mut self, cursor: &str, at: Point) {
        self.events.push(HostEvent::PlaceCursor {
            cursor: cursor.to_string(),
            at,
        });
    }

    fn supports_executor(&self, executor: &str) -> bool {
        self.executors.contains(executor)
    }

    fn run_animation(&mut self, request: &AnimationRequest<'_>) -> Result<AnimationId, HostError> {
        if self.refused.contains(request.target) {
            return Err(HostError::Refused(format!("target `{}` is refused", request.target)));
        }
        if !self.supports_executor(request.executor) {
            return Err(HostError::UnknownExecutor(request.executor.to_string()));
        }
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.outstanding.push(id);
        self.events.push(HostEvent::Animate {
            id,
            target: request.target.to_string(),
            executor: request.executor.to_string(),
            destination: request.destination,
        });
        Ok(id)
    }
}
