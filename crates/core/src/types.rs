/// Opaque chart identifier assigned by the monitoring service.
pub type ChartId = String;

/// Opaque dashboard group identifier.
pub type GroupId = String;

/// Seconds since the Unix epoch, as authored in configuration.
pub type EpochSeconds = i64;

/// Milliseconds since the Unix epoch, as expected on the wire.
pub type EpochMillis = i64;

/// Number of columns in the dashboard grid.
pub const GRID_COLUMNS: u32 = 12;
