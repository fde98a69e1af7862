//! Dashboard payload assembly.
//!
//! Takes a resolved [`DashboardConfig`] and produces the request body sent
//! to the monitoring service. Optional top-level keys are left out when
//! their source collection is empty; the service treats a missing key and
//! an empty one differently.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::encode::encode_payload;
use crate::error::{CoreResult, PayloadOperation};
use crate::filters::{self, FilterDefinition, SourceFilter, Variable, VariableDefinition};
use crate::layout::{self, ChartPlacement, ColumnGroup, ExplicitChart, GridGroup};
use crate::overlay::{self, EventOverlay, EventOverlayDefinition};
use crate::time_window::{self, TimeFilter, TimeSpec};
use crate::types::{EpochSeconds, GroupId};

// ---------------------------------------------------------------------------
// Chart resolution
// ---------------------------------------------------------------------------

pub const RESOLUTION_DEFAULT: &str = "default";
pub const RESOLUTION_LOW: &str = "low";
pub const RESOLUTION_HIGH: &str = "high";
pub const RESOLUTION_HIGHEST: &str = "highest";

/// All valid chart resolution values.
pub const VALID_CHART_RESOLUTIONS: &[&str] = &[
    RESOLUTION_DEFAULT,
    RESOLUTION_LOW,
    RESOLUTION_HIGH,
    RESOLUTION_HIGHEST,
];

/// Resource label used in error messages.
const RESOURCE: &str = "dashboard";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A dashboard as declared by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub dashboard_group: GroupId,
    #[serde(default)]
    pub charts_resolution: Option<String>,

    /// Relative range such as `"-1h"`. Conflicts with `start_time`/`end_time`.
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    #[validate(range(
        min = -9_223_372_036_854_775i64,
        max = 9_223_372_036_854_775i64,
        message = "must fit in epoch milliseconds"
    ))]
    pub start_time: Option<EpochSeconds>,
    #[serde(default)]
    #[validate(range(
        min = -9_223_372_036_854_775i64,
        max = 9_223_372_036_854_775i64,
        message = "must fit in epoch milliseconds"
    ))]
    pub end_time: Option<EpochSeconds>,

    #[serde(default)]
    #[validate(nested)]
    pub chart: Vec<ExplicitChart>,
    #[serde(default)]
    #[validate(nested)]
    pub column: Vec<ColumnGroup>,
    #[serde(default)]
    #[validate(nested)]
    pub grid: Vec<GridGroup>,

    #[serde(default)]
    #[validate(nested)]
    pub variable: Vec<VariableDefinition>,
    #[serde(default)]
    #[validate(nested)]
    pub filter: Vec<FilterDefinition>,
    #[serde(default)]
    #[validate(nested)]
    pub event_overlay: Vec<EventOverlayDefinition>,
    #[serde(default)]
    #[validate(nested)]
    pub selected_event_overlay: Vec<EventOverlayDefinition>,
}

impl DashboardConfig {
    /// The raw time window fields.
    pub fn time_spec(&self) -> TimeSpec {
        TimeSpec {
            time_range: self.time_range.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The `filters` object of the dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeFilter>,
}

impl DashboardFilters {
    pub fn is_empty(&self) -> bool {
        self.sources.is_none() && self.variables.is_none() && self.time.is_none()
    }
}

/// Request body for creating or updating a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub name: String,
    pub description: String,
    pub group_id: GroupId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<DashboardFilters>,
    pub event_overlays: Vec<EventOverlay>,
    pub selected_event_overlays: Vec<EventOverlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<ChartPlacement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_density: Option<String>,
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

impl DashboardPayload {
    /// Assemble the payload: filters (sources, variables, time), overlays,
    /// charts, then density.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let filters = DashboardFilters {
            sources: non_empty(filters::normalize_filters(&config.filter)),
            variables: non_empty(filters::normalize_variables(&config.variable)),
            time: time_window::project_time(&config.time_spec()),
        };

        let event_overlays = overlay::normalize_overlays(&config.event_overlay);
        let selected_event_overlays = overlay::normalize_overlays(&config.selected_event_overlay);

        let charts = non_empty(layout::resolve_layout(
            &config.chart,
            &config.column,
            &config.grid,
        ));

        let chart_density = config
            .charts_resolution
            .as_deref()
            .map(str::to_uppercase);

        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            group_id: config.dashboard_group.clone(),
            filters: (!filters.is_empty()).then_some(filters),
            event_overlays,
            selected_event_overlays,
            charts,
            chart_density,
        }
    }
}

/// Build the encoded request body for a dashboard.
pub fn build_dashboard_payload(
    config: &DashboardConfig,
    operation: PayloadOperation,
) -> CoreResult<Vec<u8>> {
    let payload = DashboardPayload::from_config(config);
    tracing::debug!(
        %operation,
        name = %payload.name,
        charts = payload.charts.as_ref().map_or(0, Vec::len),
        event_overlays = payload.event_overlays.len(),
        selected_event_overlays = payload.selected_event_overlays.len(),
        has_filters = payload.filters.is_some(),
        "Building dashboard payload",
    );
    encode_payload(&payload, RESOURCE, operation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
