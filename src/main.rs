use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod cli;

use cli::{Cli, Commands};
use scrollfeed::config::Config;
use scrollfeed::domain::{PageRequest, User};
use scrollfeed::feed::{FeedLoader, FeedSettings, VisibilityGate};
use scrollfeed::source::{MockRecordSource, RandomUserClient, RecordSource};
use scrollfeed::tui::{self, TuiRunner};

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollfeed")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("scrollfeed.log");

    // Setup env_logger with file output; the terminal belongs to the UI
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_source(cli: &Cli, config: &Config) -> Result<Arc<dyn RecordSource>> {
    if cli.offline {
        info!("Using offline source");
        let delay = Duration::from_millis(config.feed.offline_delay_ms);
        return Ok(Arc::new(MockRecordSource::new().with_delay(delay)));
    }

    let client = RandomUserClient::new(config.client_config()).context("Failed to create HTTP client")?;
    info!("Using {}", client.base_url());
    Ok(Arc::new(client))
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let source = build_source(cli, config)?;

    match &cli.command {
        None => run_tui(source, config).await,
        Some(Commands::Page { page }) => handle_page_command(source, *page, config).await,
        Some(Commands::Crawl { pages, guarded }) => handle_crawl_command(source, *pages, *guarded, config).await,
    }
}

async fn run_tui(source: Arc<dyn RecordSource>, config: &Config) -> Result<()> {
    info!("Launching TUI mode");
    let loader = FeedLoader::new(source, config.feed_settings());

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = TuiRunner::new(terminal, loader, config.tui.tick_rate_ms);
    let result = runner.run().await;

    tui::restore_terminal().context("Failed to restore terminal")?;
    result
}

fn print_users(users: &[User], first_index: usize) {
    for (i, user) in users.iter().enumerate() {
        println!(
            "{:>4}  {:<26} {:<30} {}",
            (first_index + i + 1).to_string().dimmed(),
            user.display_name().bold(),
            user.location_line(),
            user.email.dimmed()
        );
    }
}

async fn handle_page_command(source: Arc<dyn RecordSource>, page: u32, config: &Config) -> Result<()> {
    info!("Fetching single page: {}", page);
    let settings = config.feed_settings();
    if page == 0 || page > settings.max_pages {
        eyre::bail!("page must be between 1 and {}", settings.max_pages);
    }

    let request = PageRequest::new(page)
        .with_results(settings.page_size)
        .with_seed(settings.seed.clone());
    let users = source
        .fetch_page(&request)
        .await
        .context(format!("Failed to fetch page {}", page))?;

    println!("{} {} ({} users)", "Page".green(), page, users.len());
    print_users(&users, (page as usize - 1) * settings.page_size as usize);
    Ok(())
}

/// Loader settings for a crawl; `--pages` is clamped to the configured maximum
fn crawl_settings(config: &Config, pages: Option<u32>, guarded: bool) -> FeedSettings {
    let mut settings = config.feed_settings();
    if let Some(pages) = pages {
        let max = settings.max_pages;
        settings = settings.with_max_pages(pages.clamp(1, max));
    }
    if guarded {
        settings = settings.with_gate(VisibilityGate::InFlight);
    }
    settings
}

async fn handle_crawl_command(
    source: Arc<dyn RecordSource>,
    pages: Option<u32>,
    guarded: bool,
    config: &Config,
) -> Result<()> {
    let settings = crawl_settings(config, pages, guarded);
    info!("Crawling up to {} pages from {}", settings.max_pages, source.name());

    let loader = FeedLoader::new(source, settings);
    let reader = loader.reader();

    let mut shown = 0;
    let mut next = loader.initial_page();
    while let Some(page) = next {
        if let Err(e) = loader.on_page_changed(page).await {
            println!(
                "{} page {} failed: {} ({} users kept)",
                "Error:".red(),
                page,
                e,
                reader.len()
            );
            return Err(e).context(format!("Crawl stopped at page {}", page));
        }

        let state = reader.snapshot();
        println!("{} {} ({} users total)", "Page".green(), page, state.records().len());
        print_users(&state.records()[shown..], shown);
        shown = state.records().len();

        // the sentinel comes into view once the new page is on screen
        next = loader.on_visibility_changed(true);
    }

    if reader.is_exhausted() {
        println!("{}", "✋, Take a breath.".cyan());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging
    setup_logging(&config, cli.is_verbose()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
