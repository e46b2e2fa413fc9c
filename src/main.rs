use std::{path::PathBuf, process::ExitCode, time::Duration};

use blinkist_free_dl::{config, Config, Fetcher, Result};
use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use log::{error, LevelFilter};

/// Download the Blinkist free daily as markdown, tagged audio and cover art
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Content language of the free daily
    #[arg(short, long, default_value = config::DEFAULT_LOCALE)]
    locale: String,

    /// Directory that receives one folder per downloaded book
    #[arg(short, long, default_value = config::DEFAULT_DOWNLOAD_DIR)]
    download_dir: PathBuf,

    /// Attempts per request when blocked by a Cloudflare challenge
    #[arg(long, default_value_t = config::DEFAULT_CLOUDFLARE_MAX_ATTEMPTS)]
    cloudflare_max_attempts: u32,

    /// Seconds to wait between Cloudflare retries
    #[arg(long, default_value_t = config::DEFAULT_CLOUDFLARE_WAIT_TIME.as_secs())]
    cloudflare_wait_time: u64,

    /// Site root of the Blinkist API
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logger(level: LevelFilter) -> std::result::Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for("blinkist_free_dl", level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = Config {
        locale: args.locale,
        download_dir: args.download_dir,
        cloudflare_max_attempts: args.cloudflare_max_attempts,
        cloudflare_wait_time: Duration::from_secs(args.cloudflare_wait_time),
        ..Default::default()
    }
    .with_base_url(&args.base_url)?;

    Fetcher::new(config)?.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = setup_logger(level) {
        eprintln!("Failed to set up logging: {}", err);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
