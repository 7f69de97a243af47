//! TaskPanel - terminal client for a task scoring service
//!
//! CLI entry point: one-shot subcommands or the interactive panel.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use taskpanel::cli::{Cli, Command, OutputFormat, STDIN_PATH, generate_after_help, get_log_path};
use taskpanel::client::create_client;
use taskpanel::config::Config;
use taskpanel::dispatcher::{self, Dispatcher};
use taskpanel::domain::{DEFAULT_STRATEGY, KNOWN_STRATEGIES, Strategy};
use taskpanel::normalizer::{TaskForm, add_task};
use taskpanel::notice::Notice;
use taskpanel::render::{Results, present_plain};
use taskpanel::{TaskCollection, tui};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        debug!(%base_url, "main: base URL overridden from command line");
        config.scoring.base_url = base_url;
    }
    info!("TaskPanel loaded config: scoring={}", config.scoring.base_url);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Add {
            title,
            due_date,
            importance,
            estimated_hours,
            dependencies,
            collection,
        }) => {
            let form = TaskForm {
                title: title.unwrap_or_default(),
                due_date: due_date.unwrap_or_default(),
                importance: importance.unwrap_or_default(),
                estimated_hours: estimated_hours.unwrap_or_default(),
                dependencies: dependencies.unwrap_or_default(),
            };
            cmd_add(form, collection.as_deref())
        }
        Some(Command::Analyze {
            strategy,
            format,
            input,
        }) => {
            let strategy = strategy.unwrap_or_else(|| config.panel.default_strategy.clone());
            cmd_analyze(&config, &strategy, format, &input).await
        }
        Some(Command::Suggest {
            strategy,
            format,
            input,
        }) => {
            let strategy = strategy.unwrap_or_else(|| config.panel.default_strategy.clone());
            cmd_suggest(&config, &strategy, format, &input).await
        }
        Some(Command::Strategies) => cmd_strategies(),
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Read a collection from a file, or stdin for "-"
fn read_collection(path: &Path) -> Result<TaskCollection> {
    debug!(?path, "read_collection: called");
    let text = if path == Path::new(STDIN_PATH) {
        io::read_to_string(io::stdin()).context("Failed to read task list from stdin")?
    } else {
        fs::read_to_string(path).context(format!("Failed to read task list from {}", path.display()))?
    };
    Ok(TaskCollection::new(text))
}

/// Add a task and print the merged collection
fn cmd_add(mut form: TaskForm, collection: Option<&Path>) -> Result<()> {
    debug!(?form, ?collection, "cmd_add: called");
    let mut collection = match collection {
        Some(path) => read_collection(path)?,
        None => TaskCollection::default(),
    };

    add_task(&mut form, &mut collection).map_err(|e| eyre!("{}", Notice::from(&e)))?;

    println!("{}", collection.text());
    Ok(())
}

/// Score a collection once and print the cards
async fn cmd_analyze(config: &Config, strategy: &str, format: OutputFormat, input: &Path) -> Result<()> {
    debug!(%strategy, %format, ?input, "cmd_analyze: called");
    let collection = read_collection(input)?;
    let client = create_client(&config.scoring)?;
    let mut dispatcher = Dispatcher::new(client);

    let outcome = dispatcher.analyze(&collection, strategy).await;

    if let Some(notice) = outcome.notice.filter(|n| n.kind.is_error()) {
        if let Some(status) = &outcome.status {
            eprintln!("{}", status.bold());
        }
        return Err(eyre!("{}", notice));
    }

    match format {
        OutputFormat::Text => {
            if let Some(status) = &outcome.status {
                println!("{}", status.bold());
            }
            if let Some(results) = &outcome.results {
                println!();
                print!("{}", present_plain(results));
                if results.is_placeholder() {
                    println!();
                }
            }
        }
        OutputFormat::Json => {
            let cards = outcome.results.as_ref().map(Results::cards).unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
    }
    Ok(())
}

/// Print the service's top suggestions
async fn cmd_suggest(config: &Config, strategy: &str, format: OutputFormat, input: &Path) -> Result<()> {
    debug!(%strategy, %format, ?input, "cmd_suggest: called");
    let collection = read_collection(input)?;
    let client = create_client(&config.scoring)?;

    let response = dispatcher::suggest(client.as_ref(), &collection, strategy)
        .await
        .map_err(|e| eyre!("{}", Notice::from(&e)))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => {
            let today = response.today.map(|d| d.to_string()).unwrap_or_default();
            let strategy = response.strategy.as_deref().unwrap_or(strategy);
            println!("{} {} ({})", "Top suggestions".bold(), today, strategy.cyan());
            if response.suggestions.is_empty() {
                println!("  {}", "No suggestions returned.".dimmed());
            }
            for (idx, s) in response.suggestions.iter().enumerate() {
                println!(
                    "{}. {} (due {}) score {}",
                    idx + 1,
                    s.title.as_deref().unwrap_or("Untitled Task").bold(),
                    s.due_date.as_deref().unwrap_or("N/A"),
                    s.score.map(|v| v.to_string()).unwrap_or_default().yellow(),
                );
                if let Some(explanation) = &s.explanation {
                    println!("   {}", explanation.dimmed());
                }
            }
        }
    }
    Ok(())
}

/// List known strategy presets
fn cmd_strategies() -> Result<()> {
    debug!("cmd_strategies: called");
    for (name, label) in KNOWN_STRATEGIES {
        let marker = if *name == DEFAULT_STRATEGY { " (default)" } else { "" };
        println!("{:<16} {}{}", name.cyan(), label, marker);
    }
    Ok(())
}

/// Launch the interactive panel
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let client = create_client(&config.scoring)?;
    let strategy = Strategy::new(config.panel.default_strategy.clone());
    tui::run(client, strategy, Duration::from_millis(config.panel.tick_ms)).await
}
