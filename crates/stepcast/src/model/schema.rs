//! Serialized shape of a captured presentation document.
//!
//! These types mirror the JSON written by the capture editor one-to-one.
//! Nothing here is validated; [`super::Presentation::from_document`] turns a
//! [`Document`] into the checked, immutable model.

use serde::{Deserialize, Serialize};

use super::{ObjectKind, Trigger};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMeta>,

    pub data: Vec<SlideEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Identifier of the synthetic cursor overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideEntry {
    pub object: Vec<ObjectEntry>,

    #[serde(default)]
    pub action: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub id: String,

    #[serde(default, rename = "type")]
    pub kind: ObjectKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub trigger: Trigger,

    pub target: String,

    #[serde(alias = "executor")]
    pub execute: String,

    pub final_abs: f64,

    pub final_ord: f64,

    /// Animation length in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}
