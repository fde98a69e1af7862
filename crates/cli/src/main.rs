//! `signalsync` -- builds monitoring service request bodies from
//! declarative resource files.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default | Description                        |
//! |-------------------------|----------|---------|------------------------------------|
//! | `SIGNALSYNC_LOG_FORMAT` | no       | `text`  | `text` or `json` log output        |
//! | `SIGNALSYNC_PRETTY`     | no       | off     | Pretty-print the encoded payload   |
//! | `RUST_LOG`              | no       | `signalsync_cli=info,signalsync_core=info` | Log filter |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signalsync_cli::args::{Cli, Command};
use signalsync_cli::config::{CliConfig, LogFormat};
use signalsync_cli::resource::{self, ResourceKind};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "signalsync_cli=info,signalsync_core=info".into());

    // Logs go to stderr so stdout carries only the payload.
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    init_tracing(config.log_format);

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Dashboard(args) => resource::run(ResourceKind::Dashboard, args, &config),
        Command::Integration(args) => resource::run(ResourceKind::Integration, args, &config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "signalsync failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
