pub mod schema;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, PlaybackResult};

use schema::{ActionEntry, Document, ObjectEntry, SlideEntry};

/// Identifier of the cursor overlay when the document does not name one.
pub const DEFAULT_CURSOR_ID: &str = "mouse-cursor";

#[derive(Debug, Clone)]
pub struct Presentation {
    metadata: Metadata,
    cursor_id: String,
    slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub objects: Vec<SlideObject>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideObject {
    pub id: String,
    pub kind: ObjectKind,
    /// Image path, relative to the document.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Background,
    Image,
    Tooltip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub trigger: Trigger,
    pub target: String,
    pub executor: String,
    pub destination: Point,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    OnClick,
    WithPrevious,
    AfterPrevious,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnClick => "onClick",
            Self::WithPrevious => "withPrevious",
            Self::AfterPrevious => "afterPrevious",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport-relative coordinate: both axes are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub abs: f64,
    pub ord: f64,
}

impl Point {
    pub fn new(abs: f64, ord: f64) -> Self {
        Self { abs, ord }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.abs, self.ord)
    }
}

/// A `(slide, action)` pointer into a presentation.
///
/// `action` may equal the slide's action count, meaning "past the last
/// action of this slide".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub slide: usize,
    pub action: usize,
}

impl Position {
    pub const START: Position = Position {
        slide: 0,
        action: 0,
    };

    pub fn new(slide: usize, action: usize) -> Self {
        Self { slide, action }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.slide, self.action)
    }
}

impl Slide {
    /// The object toggled when this slide becomes (in)visible.
    pub fn primary_object(&self) -> &SlideObject {
        // Non-empty objects are enforced on construction.
        &self.objects[0]
    }
}

impl Presentation {
    /// Parse and validate a JSON presentation document.
    pub fn from_json(content: &str) -> PlaybackResult<Self> {
        let document: Document = serde_json::from_str(content)
            .map_err(|e| PlaybackError::malformed(format!("invalid document: {e}")))?;
        Self::from_document(document)
    }

    /// Read a presentation document from disk.
    pub fn load(path: &Path) -> PlaybackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlaybackError::malformed(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    pub fn from_document(document: Document) -> PlaybackResult<Self> {
        let meta = document.metadata.unwrap_or_default();
        let cursor_id = meta
            .cursor
            .unwrap_or_else(|| DEFAULT_CURSOR_ID.to_string());
        let metadata = Metadata {
            title: meta.title,
            author: meta.author,
        };
        let slides = document
            .data
            .into_iter()
            .map(convert_slide)
            .collect::<Vec<_>>();
        Self::new(metadata, cursor_id, slides)
    }

    /// Build a presentation from already-converted slides, enforcing every
    /// structural invariant the playback engine relies on.
    pub fn new(metadata: Metadata, cursor_id: String, slides: Vec<Slide>) -> PlaybackResult<Self> {
        let presentation = Self {
            metadata,
            cursor_id,
            slides,
        };
        presentation.validate()?;
        Ok(presentation)
    }

    fn validate(&self) -> PlaybackResult<()> {
        if self.cursor_id.trim().is_empty() {
            return Err(PlaybackError::malformed("cursor identifier is empty"));
        }
        if self.slides.is_empty() {
            return Err(PlaybackError::malformed("presentation has no slides"));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (s, slide) in self.slides.iter().enumerate() {
            if slide.objects.is_empty() {
                return Err(PlaybackError::malformed(format!("slide {s} has no objects")));
            }
            for object in &slide.objects {
                if object.id.trim().is_empty() {
                    return Err(PlaybackError::malformed(format!(
                        "slide {s} has an object with an empty id"
                    )));
                }
                if object.id == self.cursor_id {
                    return Err(PlaybackError::malformed(format!(
                        "object id `{}` collides with the cursor id",
                        object.id
                    )));
                }
                if !seen.insert(object.id.as_str()) {
                    return Err(PlaybackError::malformed(format!(
                        "duplicate object id `{}`",
                        object.id
                    )));
                }
            }
            for (a, action) in slide.actions.iter().enumerate() {
                validate_action(s, a, action)?;
            }
        }

        match self.slides.iter().flat_map(|s| s.actions.iter()).next() {
            None => Err(PlaybackError::malformed("presentation has no actions")),
            Some(first) if first.trigger != Trigger::OnClick => Err(PlaybackError::malformed(
                format!(
                    "first action is `{}` but has no preceding action",
                    first.trigger
                ),
            )),
            Some(_) => Ok(()),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn cursor_id(&self) -> &str {
        &self.cursor_id
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn action(&self, at: Position) -> Option<&Action> {
        self.slides.get(at.slide)?.actions.get(at.action)
    }

    pub fn primary_object(&self, slide: usize) -> Option<&SlideObject> {
        self.slides.get(slide).map(Slide::primary_object)
    }

    pub fn action_count(&self) -> usize {
        self.slides.iter().map(|s| s.actions.len()).sum()
    }

    /// Number of explicit steps, i.e. actions that need a `next` to fire.
    pub fn onclick_count(&self) -> usize {
        self.slides
            .iter()
            .flat_map(|s| s.actions.iter())
            .filter(|a| a.trigger == Trigger::OnClick)
            .count()
    }

    /// `true` when `id` names a slide object or the cursor overlay.
    pub fn knows_target(&self, id: &str) -> bool {
        id == self.cursor_id
            || self
                .slides
                .iter()
                .flat_map(|s| s.objects.iter())
                .any(|o| o.id == id)
    }
}

fn validate_action(slide: usize, index: usize, action: &Action) -> PlaybackResult<()> {
    if action.target.trim().is_empty() {
        return Err(PlaybackError::malformed(format!(
            "slide {slide}, action {index}: missing target"
        )));
    }
    if action.executor.trim().is_empty() {
        return Err(PlaybackError::malformed(format!(
            "slide {slide}, action {index}: missing executor"
        )));
    }
    let axes = [
        ("finalAbs", action.destination.abs),
        ("finalOrd", action.destination.ord),
    ];
    for (axis, value) in axes {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(PlaybackError::malformed(format!(
                "slide {slide}, action {index}: {axis} {value} is outside [0, 1]"
            )));
        }
    }
    Ok(())
}

fn convert_slide(entry: SlideEntry) -> Slide {
    Slide {
        objects: entry.object.into_iter().map(convert_object).collect(),
        actions: entry.action.into_iter().map(convert_action).collect(),
    }
}

fn convert_object(entry: ObjectEntry) -> SlideObject {
    SlideObject {
        id: entry.id,
        kind: entry.kind,
        image: entry.img,
    }
}

fn convert_action(entry: ActionEntry) -> Action {
    Action {
        trigger: entry.trigger,
        target: entry.target,
        executor: entry.execute,
        destination: Point::new(entry.final_abs, entry.final_ord),
        duration: entry.duration.map(Duration::from_millis),
    }
}
