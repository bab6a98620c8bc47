use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use evm_charts_cli::{build_view, load_settings, summary_lines, RequestArgs};
use evm_charts_config::{ConfigFormat, ConfigSerializer, EvmSettings};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "evm-charts")]
#[command(about = "Earned value charts from schedule and cost data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path
    #[arg(short, long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chart payload as JSON
    Chart {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Log the indicator table
    Summary {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Print the default settings
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
    Toml,
}

impl From<Format> for ConfigFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => ConfigFormat::Yaml,
            Format::Json => ConfigFormat::Json,
            Format::Toml => ConfigFormat::Toml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Chart { request } => {
            let settings = load_settings(cli.settings.as_deref())?;
            let view = build_view(&request, &settings, today)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Summary { request } => {
            let settings = load_settings(cli.settings.as_deref())?;
            let view = build_view(&request, &settings, today)?;
            match &view.indicators {
                Some(indicators) => {
                    for line in summary_lines(indicators) {
                        info!("{}", line);
                    }
                }
                None => warn!("Nothing scheduled in scope {:?}", view.scope),
            }
            for issue in &view.incomplete {
                info!(
                    "Incomplete #{} {} ({}%, due {:?})",
                    issue.id,
                    issue.subject,
                    issue.done_ratio,
                    issue.effective_due_date()
                );
            }
        }
        Commands::Defaults { format } => {
            let settings = EvmSettings::default();
            println!(
                "{}",
                ConfigSerializer::serialize_string(&settings, format.into())?
            );
        }
    }

    Ok(())
}
