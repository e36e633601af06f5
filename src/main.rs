use anyhow::Context;
use clap::{Parser, Subcommand};
use nhl_bot::bot::Bot;
use nhl_bot::config;
use nhl_bot::data_provider::{DataProvider, HttpClient};
use nhl_bot::host;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "nhl-bot")]
#[command(
    about = "NHL game summaries and playoff brackets for chat",
    long_about = "NHL game summaries and playoff brackets for chat\n\nIf no command is specified, chat lines are read from stdin."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Answer from built-in fixture data instead of the stats API
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Summarize a game: summary [<team>] [<date>]
    Summary {
        /// Team abbreviation or alias, and/or a date (YYYY-MM-DD, today, yesterday, ...)
        args: Vec<String>,
    },
    /// Display the current playoff round
    Playoffs,
    /// Answer chat commands read line by line from stdin
    Listen,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("request_timeout_secs: {} seconds", cfg.request_timeout_secs);
    println!("user_agent: {}", cfg.user_agent);
    println!("api_base_url: {}", cfg.api_base_url);
    println!("report_base_url: {}", cfg.report_base_url);
    println!("reference_timezone: {}", cfg.reference_timezone);
    println!("display_timezone: {}", cfg.display_timezone);
    match cfg.playoff_season {
        Some(season) => println!("playoff_season: {}", season),
        None => println!("playoff_season: (auto)"),
    }
    println!("irc_formatting: {}", cfg.irc_formatting);
    println!("highlight_officials: {:?}", cfg.highlight_officials);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn create_provider(cli: &Cli, config: &config::Config) -> anyhow::Result<Arc<dyn DataProvider>> {
    #[cfg(feature = "development")]
    if cli.mock {
        return Ok(Arc::new(nhl_bot::dev::mock_client::MockProvider::with_fixtures()));
    }
    #[cfg(not(feature = "development"))]
    let _ = cli;

    let client = HttpClient::new(
        Duration::from_secs(config.request_timeout_secs),
        &config.user_agent,
    )
    .context("Failed to create HTTP client")?;
    Ok(Arc::new(client))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Execute a CLI command by routing it to the bot
async fn execute_command(bot: Arc<Bot>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Summary { args } => {
            print_lines(&bot.handle(&format!("summary {}", args.join(" "))).await);
            Ok(())
        }
        Commands::Playoffs => {
            print_lines(&bot.handle("playoffs").await);
            Ok(())
        }
        Commands::Listen => {
            let stdin = BufReader::new(tokio::io::stdin());
            host::listen(bot, stdin, tokio::io::stdout()).await
        }
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // Without a subcommand, act as a chat host on stdin
    let command = cli.command.clone().unwrap_or(Commands::Listen);

    // Handle Config command separately (doesn't need a client)
    if let Commands::Config = command {
        handle_config_command(&config);
        return;
    }

    let provider = match create_provider(&cli, &config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let bot = Arc::new(Bot::with_provider(&config, provider));
    if let Err(e) = execute_command(bot, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
