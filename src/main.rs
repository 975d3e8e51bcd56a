use anyhow::Result;
use clap::Parser;
use gigwatch::checker::run_check;
use gigwatch::config::Config;
use gigwatch::event_source::HttpEventFetcher;
use gigwatch::known_events::KnownEventStore;
use gigwatch::notifier::SmtpNotifier;
use log::error;
use std::path::PathBuf;

/// Checks the event-discovery API for newly added concerts of a tracked
/// artist and emails a summary of anything not seen before. Intended to be
/// invoked periodically by an external scheduler.
#[derive(Parser, Debug)]
#[command(name = "gigwatch", version)]
struct Cli {
    /// Path of the known-event state file
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Attraction id to track (overrides ARTIST_ID)
    #[arg(long)]
    artist_id: Option<String>,

    /// Artist display name used in the email subject (overrides ARTIST_NAME)
    #[arg(long)]
    artist_name: Option<String>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logger(verbose: u8) -> Result<(), fern::InitError> {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    // API key presence is checked here, before any network or file I/O.
    let mut config = Config::from_env().map_err(|err| {
        error!("{}", err);
        err
    })?;

    if let Some(path) = cli.state_file {
        config.state_file = path;
    }
    if let Some(id) = cli.artist_id {
        config.artist_id = id;
    }
    if let Some(name) = cli.artist_name {
        config.artist_name = name;
    }

    let fetcher = HttpEventFetcher::new(config.api_key.clone());
    let notifier = SmtpNotifier::new(config.artist_name.clone(), config.mail.clone());
    let store = KnownEventStore::new(&config.state_file);

    run_check(&config, &fetcher, &notifier, &store).await.map_err(|err| {
        error!("Check failed: {}", err);
        err
    })?;

    Ok(())
}
