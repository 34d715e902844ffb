mod check;
mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "presswatch")]
#[command(about = "Company media-monitoring and sentiment report generator")]
struct Cli {
    /// Tracing filter used when `RUST_LOG` is unset
    #[arg(long, global = true, env = "PRESSWATCH_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search, draft the report with the language model, and write the HTML page
    Run {
        /// Directory the report is written to (overrides `PRESSWATCH_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Recency window in days (overrides `PRESSWATCH_SEARCH_WINDOW_DAYS`)
        #[arg(long)]
        days: Option<u32>,

        /// Do not open the finished report in the browser
        #[arg(long)]
        no_open: bool,
    },
    /// Print the five search queries without contacting any service
    Plan {
        #[arg(long, env = "PRESSWATCH_PROFILE_PATH", default_value = "./config/company.yaml")]
        profile: PathBuf,

        #[arg(long, env = "TARGET_COMPANY")]
        company: Option<String>,
    },
    /// Report which API credentials are configured
    Check,
    /// Render an existing markdown report to HTML
    Render {
        /// Markdown report to render
        #[arg(long)]
        input: PathBuf,

        /// Output file (defaults to the timestamped name in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, env = "PRESSWATCH_PROFILE_PATH", default_value = "./config/company.yaml")]
        profile: PathBuf,

        #[arg(long, env = "TARGET_COMPANY")]
        company: Option<String>,

        /// Open the rendered page in the browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run {
            output_dir,
            days,
            no_open,
        }) => {
            let overrides = pipeline::RunOverrides {
                output_dir,
                window_days: days,
                open_browser: !no_open,
            };
            pipeline::run_report(overrides).await?;
        }
        Some(Commands::Plan { profile, company }) => {
            pipeline::run_plan(&profile, company.as_deref())?;
        }
        Some(Commands::Check) => {
            if !check::run_check(|key| std::env::var(key)) {
                anyhow::bail!("required API credentials are missing");
            }
        }
        Some(Commands::Render {
            input,
            output,
            profile,
            company,
            open,
        }) => {
            let args = pipeline::RenderArgs {
                input,
                output,
                profile,
                company,
                open,
            };
            pipeline::run_render(&args)?;
        }
        None => println!("presswatch ready; run `presswatch --help` for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
