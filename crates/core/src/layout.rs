//! Chart layout resolution.
//!
//! Dashboards place charts with three kinds of layout group: explicit
//! per-chart coordinates, column stacks and auto-wrapping grids. All three
//! reduce to a flat list of [`ChartPlacement`]s, concatenated as
//! explicit, then column, then grid.
//!
//! No collision detection happens here. Overlapping placements from
//! different groups are an authoring concern.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{ChartId, GRID_COLUMNS};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default chart width: the full grid.
pub const DEFAULT_WIDTH: u32 = GRID_COLUMNS;

/// Default chart height in rows.
pub const DEFAULT_HEIGHT: u32 = 1;

/// Largest accepted row coordinate.
pub const MAX_ROW: u32 = 1_000_000;

/// Largest accepted chart height in rows.
pub const MAX_HEIGHT: u32 = 1_000;

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A chart placed at explicit coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ExplicitChart {
    pub chart_id: ChartId,
    #[validate(range(max = 1_000_000, message = "must be between 0 and 1000000"))]
    pub row: u32,
    #[validate(range(max = 11, message = "must be between 0 and 11"))]
    pub column: u32,
    #[serde(default = "default_width")]
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub width: u32,
    #[serde(default = "default_height")]
    #[validate(range(min = 1, max = 1_000, message = "must be between 1 and 1000"))]
    pub height: u32,
}

/// Charts stacked top to bottom in a single column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColumnGroup {
    pub chart_ids: Vec<ChartId>,
    /// Row of the first chart in the stack.
    #[serde(default)]
    #[validate(range(max = 1_000_000, message = "must be between 0 and 1000000"))]
    pub start_row: u32,
    #[serde(default)]
    #[validate(range(max = 11, message = "must be between 0 and 11"))]
    pub column: u32,
    #[serde(default = "default_width")]
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub width: u32,
    #[serde(default = "default_height")]
    #[validate(range(min = 1, max = 1_000, message = "must be between 1 and 1000"))]
    pub height: u32,
}

/// Charts packed left to right, wrapping back to `start_column`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GridGroup {
    pub chart_ids: Vec<ChartId>,
    #[serde(default)]
    #[validate(range(max = 1_000_000, message = "must be between 0 and 1000000"))]
    pub start_row: u32,
    #[serde(default)]
    #[validate(range(max = 11, message = "must be between 0 and 11"))]
    pub start_column: u32,
    #[serde(default = "default_width")]
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub width: u32,
    #[serde(default = "default_height")]
    #[validate(range(min = 1, max = 1_000, message = "must be between 1 and 1000"))]
    pub height: u32,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// One chart's resolved position on the dashboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPlacement {
    pub chart_id: ChartId,
    pub row: u32,
    pub column: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&ExplicitChart> for ChartPlacement {
    fn from(chart: &ExplicitChart) -> Self {
        Self {
            chart_id: chart.chart_id.clone(),
            row: chart.row,
            column: chart.column,
            width: chart.width,
            height: chart.height,
        }
    }
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Expand a column group into placements.
///
/// The column never changes; each chart starts `height` rows below the
/// previous one. Rows saturate at `u32::MAX` for groups that skipped
/// acceptance.
pub fn expand_column(group: &ColumnGroup) -> Vec<ChartPlacement> {
    let mut row = group.start_row;
    group
        .chart_ids
        .iter()
        .map(|chart_id| {
            let placement = ChartPlacement {
                chart_id: chart_id.clone(),
                row,
                column: group.column,
                width: group.width,
                height: group.height,
            };
            row = row.saturating_add(group.height);
            placement
        })
        .collect()
}

/// Expand a grid group into placements.
///
/// The wrap check runs before each chart is placed: when the chart would
/// cross the right edge the row advances by one and the column returns to
/// the group's `start_column`, not to 0. A chart too wide to fit even at
/// `start_column` is still placed there after the wrap, so its right edge
/// may exceed the grid. Rows saturate at `u32::MAX`.
pub fn expand_grid(group: &GridGroup) -> Vec<ChartPlacement> {
    let mut row = group.start_row;
    let mut column = group.start_column;
    let mut placements = Vec::with_capacity(group.chart_ids.len());

    for chart_id in &group.chart_ids {
        if column.saturating_add(group.width) > GRID_COLUMNS {
            row = row.saturating_add(1);
            column = group.start_column;
        }
        placements.push(ChartPlacement {
            chart_id: chart_id.clone(),
            row,
            column,
            width: group.width,
            height: group.height,
        });
        column = column.saturating_add(group.width);
    }

    placements
}

/// Resolve every layout group into one ordered placement list.
///
/// Order is explicit charts, then column groups, then grid groups, each in
/// the order given.
pub fn resolve_layout(
    charts: &[ExplicitChart],
    columns: &[ColumnGroup],
    grids: &[GridGroup],
) -> Vec<ChartPlacement> {
    let mut placements: Vec<ChartPlacement> = charts.iter().map(ChartPlacement::from).collect();
    placements.extend(columns.iter().flat_map(expand_column));
    placements.extend(grids.iter().flat_map(expand_grid));
    placements
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
