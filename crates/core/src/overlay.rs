//! Event overlay normalization.
//!
//! Overlays annotate dashboard charts with event markers. The same shape is
//! used for the overlays offered to viewers and for the overlays selected
//! by default.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::palette;

// ---------------------------------------------------------------------------
// Overlay types
// ---------------------------------------------------------------------------

/// Events matched by a free-text search over the event stream.
pub const OVERLAY_TYPE_EVENT_TIME_SERIES: &str = "eventTimeSeries";

/// Events raised by detectors.
pub const OVERLAY_TYPE_DETECTOR_EVENTS: &str = "detectorEvents";

/// All valid overlay type values.
pub const VALID_OVERLAY_TYPES: &[&str] =
    &[OVERLAY_TYPE_EVENT_TIME_SERIES, OVERLAY_TYPE_DETECTOR_EVENTS];

fn default_overlay_type() -> String {
    OVERLAY_TYPE_EVENT_TIME_SERIES.to_string()
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A source filter nested inside an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OverlaySourceDefinition {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub property: String,
    #[serde(default)]
    pub negated: bool,
    pub values: Vec<String>,
}

/// An event overlay as declared in a dashboard document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EventOverlayDefinition {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub signal: String,
    #[serde(rename = "type", default = "default_overlay_type")]
    pub overlay_type: String,
    #[serde(default)]
    pub line: bool,
    #[serde(default)]
    pub label: Option<String>,
    /// Palette colour name; see [`crate::palette`].
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub source: Vec<OverlaySourceDefinition>,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The search that selects an overlay's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSignal {
    pub event_search_text: String,
    pub event_type: String,
}

/// Wire form of an overlay source filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlaySource {
    pub property: String,
    #[serde(rename = "NOT")]
    pub not: bool,
    pub value: Vec<String>,
}

/// Wire form of an event overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOverlay {
    pub event_signal: EventSignal,
    pub event_line: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_color_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<OverlaySource>>,
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

fn normalize_source(source: &OverlaySourceDefinition) -> OverlaySource {
    OverlaySource {
        property: source.property.clone(),
        not: source.negated,
        value: source.values.clone(),
    }
}

/// Map an overlay definition onto its wire form.
///
/// A colour name missing from the palette is dropped without error, and
/// `sources` is only sent when at least one source is configured.
/// Acceptance rejects unknown colour names before a payload is built.
pub fn normalize_overlay(overlay: &EventOverlayDefinition) -> EventOverlay {
    let sources = (!overlay.source.is_empty())
        .then(|| overlay.source.iter().map(normalize_source).collect());

    EventOverlay {
        event_signal: EventSignal {
            event_search_text: overlay.signal.clone(),
            event_type: overlay.overlay_type.clone(),
        },
        event_line: overlay.line,
        label: overlay.label.clone(),
        event_color_index: overlay.color.as_deref().and_then(palette::color_index),
        sources,
    }
}

pub fn normalize_overlays(overlays: &[EventOverlayDefinition]) -> Vec<EventOverlay> {
    overlays.iter().map(normalize_overlay).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
