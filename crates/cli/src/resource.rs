//! Resource file loading, acceptance and payload output.
//!
//! Each resource goes through the same steps: parse the JSON document into
//! its configuration type, run the acceptance checks, build the encoded
//! payload and write it out.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use signalsync_core::validation::{ensure_accepted, validate_dashboard, validate_integration};
use signalsync_core::{
    build_dashboard_payload, build_integration_payload, CoreError, CoreResult, DashboardConfig,
    IntegrationConfig, PayloadOperation,
};

use crate::args::ResourceArgs;
use crate::config::CliConfig;

/// Which kind of resource a file declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Dashboard,
    Integration,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Dashboard => "dashboard",
            ResourceKind::Integration => "integration",
        }
    }
}

/// Result of processing one accepted resource file. Rejected files surface
/// as a [`CoreError::Validation`] error instead.
#[derive(Debug)]
pub enum Outcome {
    /// Acceptance checks passed and no payload was requested.
    Accepted,
    /// The encoded payload.
    Built(Vec<u8>),
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn load_dashboard(path: &Path) -> anyhow::Result<DashboardConfig> {
    let text = read_document(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse dashboard in {}", path.display()))
}

pub fn load_integration(path: &Path) -> anyhow::Result<IntegrationConfig> {
    let text = read_document(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse integration in {}", path.display()))
}

fn finish<F>(
    kind: ResourceKind,
    messages: Vec<String>,
    check_only: bool,
    build: F,
) -> anyhow::Result<Outcome>
where
    F: FnOnce() -> CoreResult<Vec<u8>>,
{
    ensure_accepted(messages)
        .with_context(|| format!("{} configuration rejected", kind.label()))?;
    if check_only {
        return Ok(Outcome::Accepted);
    }
    Ok(Outcome::Built(build()?))
}

/// Load, check and (unless `check_only`) build the payload for a resource.
pub fn process(
    kind: ResourceKind,
    path: &Path,
    operation: PayloadOperation,
    check_only: bool,
) -> anyhow::Result<Outcome> {
    match kind {
        ResourceKind::Dashboard => {
            let config = load_dashboard(path)?;
            tracing::info!(name = %config.name, path = %path.display(), "Loaded dashboard");
            finish(kind, validate_dashboard(&config), check_only, || {
                build_dashboard_payload(&config, operation)
            })
        }
        ResourceKind::Integration => {
            let config = load_integration(path)?;
            tracing::info!(name = %config.name, path = %path.display(), "Loaded integration");
            finish(kind, validate_integration(&config), check_only, || {
                build_integration_payload(&config, operation)
            })
        }
    }
}

/// Re-encode a compact payload with indentation. Key order is preserved.
pub fn prettify(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let value: Value = serde_json::from_slice(bytes).context("Payload is not valid JSON")?;
    let mut pretty = serde_json::to_vec_pretty(&value).context("Failed to pretty-print payload")?;
    pretty.push(b'\n');
    Ok(pretty)
}

fn write_payload(bytes: &[u8], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write payload to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("Failed to write payload to stdout")
        }
    }
}

/// Run one CLI command end to end.
pub fn run(kind: ResourceKind, args: &ResourceArgs, config: &CliConfig) -> anyhow::Result<()> {
    let operation = PayloadOperation::from(args.operation);

    let outcome = process(kind, &args.file, operation, args.check).inspect_err(|err| {
        if let Some(CoreError::Validation(messages)) = err.downcast_ref::<CoreError>() {
            for message in messages {
                tracing::warn!(resource = kind.label(), %message, "Configuration rejected");
            }
        }
    })?;

    match outcome {
        Outcome::Accepted => {
            tracing::info!(resource = kind.label(), "Configuration accepted");
            Ok(())
        }
        Outcome::Built(bytes) => {
            let bytes = if config.pretty { prettify(&bytes)? } else { bytes };
            write_payload(&bytes, args.output.as_deref())?;
            tracing::info!(
                resource = kind.label(),
                %operation,
                bytes = bytes.len(),
                "Payload written",
            );
            Ok(())
        }
    }
}
