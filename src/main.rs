use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use headlines::cli::prompt::PROMPT_HELP;
use headlines::cli::{CacheAction, Cli, Commands, PromptAction};
use headlines::config::Config;
use headlines::domain::{Direction, RotationOutcome};
use headlines::errors::{HeadlinesError, HeadlinesResult};
use headlines::render::{FeedRenderer, SystemOpener, TerminalAnimator, ViewEvent};
use headlines::services::{FeedFetcher, RotationController, WeatherService};
use headlines::sources::{source_from_config, HttpWeatherSource};
use headlines::storage::{SqliteStorage, SqliteTitleCache};

type Controller = RotationController<FeedFetcher, SqliteTitleCache>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("headlines=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> HeadlinesResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;

    match cli.command {
        Commands::Show { html } => cmd_show(&config, storage, html),
        Commands::Next { html } => cmd_rotate(&config, storage, Direction::Next, html),
        Commands::Previous { html } => cmd_rotate(&config, storage, Direction::Previous, html),
        Commands::Interactive => cmd_interactive(&config, storage),
        Commands::Weather { city } => cmd_weather(&config, city),
        Commands::Cache { action } => cmd_cache(storage, action),
    }
}

fn build_controller(
    config: &Config,
    storage: SqliteStorage,
    animated: bool,
) -> HeadlinesResult<Controller> {
    let source = source_from_config(config)?;
    let fetcher = FeedFetcher::new(source, config.limits);
    let cache = SqliteTitleCache::new(storage);

    let mut renderer = FeedRenderer::new(Arc::new(SystemOpener), config.limits.max_articles);
    if animated {
        renderer = renderer.with_animator(Arc::new(TerminalAnimator::default()));
    }

    Ok(RotationController::new(fetcher, cache, renderer))
}

fn print_view(controller: &Controller, html: bool) {
    controller.with_view(|view| {
        if html {
            println!("{}", view.markup());
        } else {
            println!("{}", view.text());
        }
    });
}

fn report(controller: &Controller, outcome: &RotationOutcome, html: bool) {
    match outcome {
        RotationOutcome::Rendered(_) => print_view(controller, html),
        RotationOutcome::Exhausted | RotationOutcome::Failed(_) => {
            if controller.with_view(|view| view.is_empty()) {
                println!("No new headlines right now.");
            } else {
                println!("No new headlines; keeping the current set.");
            }
        }
        RotationOutcome::Busy => println!("A refresh is already running."),
    }
}

fn cmd_show(config: &Config, storage: SqliteStorage, html: bool) -> HeadlinesResult<()> {
    let controller = build_controller(config, storage, false)?;

    let outcome = controller.load_initial();
    report(&controller, &outcome, html);

    Ok(())
}

fn cmd_rotate(
    config: &Config,
    storage: SqliteStorage,
    direction: Direction,
    html: bool,
) -> HeadlinesResult<()> {
    let controller = build_controller(config, storage, false)?;

    let outcome = controller.rotate(direction);
    report(&controller, &outcome, html);

    Ok(())
}

fn cmd_interactive(config: &Config, storage: SqliteStorage) -> HeadlinesResult<()> {
    let controller = build_controller(config, storage, true)?;

    print_weather(config, &config.city);
    println!();

    let outcome = controller.load_initial();
    report(&controller, &outcome, false);
    println!("\n{}", PROMPT_HELP);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match PromptAction::parse(&input) {
            PromptAction::Rotate(direction) => {
                let outcome = controller.rotate(direction);
                report(&controller, &outcome, false);
            }
            PromptAction::Open(number) => {
                let event = ViewEvent::Click { index: number - 1 };
                if controller.activate(&event) {
                    println!("Opened article {}.", number);
                } else {
                    println!("Nothing to open at {}.", number);
                }
            }
            PromptAction::Weather => print_weather(config, &config.city),
            PromptAction::Help => println!("{}", PROMPT_HELP),
            PromptAction::Quit => break,
            PromptAction::Unknown(other) if other.is_empty() => {}
            PromptAction::Unknown(other) => {
                println!("Unknown command '{}'. {}", other, PROMPT_HELP);
            }
        }
    }

    Ok(())
}

/// Weather is decoration here: print it when available, stay quiet otherwise
fn print_weather(config: &Config, city: &str) {
    let Some(endpoint) = &config.weather_endpoint else {
        return;
    };

    match HttpWeatherSource::new(endpoint) {
        Ok(source) => {
            if let Some(readout) = WeatherService::new(source).readout(city) {
                println!("{}: {}", city, readout);
            }
        }
        Err(e) => tracing::warn!(error = %e, "invalid weather endpoint"),
    }
}

fn cmd_weather(config: &Config, city: Option<String>) -> HeadlinesResult<()> {
    let endpoint = config
        .weather_endpoint
        .as_deref()
        .ok_or(HeadlinesError::NoWeatherSource)?;
    let city = city.unwrap_or_else(|| config.city.clone());

    let service = WeatherService::new(HttpWeatherSource::new(endpoint)?);

    match service.readout(&city) {
        Some(readout) => println!("{}: {}", city, readout),
        None => println!("No weather available for {}.", city),
    }

    Ok(())
}

fn cmd_cache(storage: SqliteStorage, action: CacheAction) -> HeadlinesResult<()> {
    let cache = SqliteTitleCache::new(storage);

    match action {
        CacheAction::Show => {
            let titles = cache.try_load()?;
            if titles.is_empty() {
                println!("No titles remembered.");
                return Ok(());
            }

            println!("Remembered titles ({}):\n", titles.len());
            for title in titles {
                println!("  {}", title);
            }
        }
        CacheAction::Clear => {
            cache.try_clear()?;
            println!("Title cache cleared.");
        }
    }

    Ok(())
}
