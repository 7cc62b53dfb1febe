// dugout entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Run the pipeline: stat files, lineup page, projections, output document
// 4. Print the run summary

use dugout_app::config::{self, LoggingConfig};
use dugout_app::pipeline;

use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!(
        "dugout starting: season {}, ${} salary cap, {} roster slots, lineups from {}",
        config.season,
        config.contest.salary_cap,
        config.contest.roster.total(),
        config.lineups
    );

    // 3. Run the pipeline
    let summary = match pipeline::run(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("run failed: {:#}", e);
            return Err(e);
        }
    };

    // 4. Print the run summary
    println!("{summary}");
    info!("dugout finished");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("dugout.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
