//! Chat-facing entry point.
//!
//! A host hands each incoming command line to [`Bot::handle`] and relays the
//! returned lines. Every error ends here: a command either replies in full or
//! with a single error line, and fetch failures are only logged.

use crate::cache::ConditionalCache;
use crate::client::StatsClient;
use crate::commands::{playoffs, summary};
use crate::config::Config;
use crate::data_provider::DataProvider;
use crate::error::{NhlError, NhlResult};
use crate::formatting::Style;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Chat commands the bot answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary(String),
    Playoffs,
}

impl Command {
    /// Parse a chat line such as `!summary BOS yesterday`
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim().trim_start_matches('!');
        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (line, ""),
        };
        match name.to_ascii_lowercase().as_str() {
            "summary" => Some(Command::Summary(args.to_string())),
            "nhlplayoffs" | "playoffs" => Some(Command::Playoffs),
            _ => None,
        }
    }
}

/// User-facing line for an error, `None` when the error is only logged
pub fn reply_for_error(err: &NhlError) -> Option<String> {
    match err {
        NhlError::InvalidDateFormat(msg) => Some(format!("ERROR: {}", msg)),
        NhlError::NoGameFound { .. } => Some(err.to_string()),
        NhlError::UpstreamShape(_) => Some("Could not parse game data.".to_string()),
        NhlError::Usage(usage) => Some(usage.clone()),
        NhlError::Fetch { .. } => None,
    }
}

pub struct Bot {
    client: StatsClient,
    style: Style,
    display_timezone: Tz,
    playoff_season: Option<u32>,
    highlight_officials: Vec<String>,
}

impl Bot {
    pub fn new(config: &Config, client: StatsClient) -> Self {
        Self {
            client,
            style: Style {
                irc: config.irc_formatting,
            },
            display_timezone: config.display_timezone,
            playoff_season: config.playoff_season,
            highlight_officials: config.highlight_officials.clone(),
        }
    }

    /// Bot with its own cache over `provider`
    pub fn with_provider(config: &Config, provider: Arc<dyn DataProvider>) -> Self {
        let cache = Arc::new(ConditionalCache::new());
        Self::new(config, StatsClient::from_config(config, provider, cache))
    }

    pub fn client(&self) -> &StatsClient {
        &self.client
    }

    pub async fn summary(&self, args: &str) -> NhlResult<Vec<String>> {
        summary::run(&self.client, args, &self.highlight_officials, &self.style).await
    }

    pub async fn playoffs(&self) -> NhlResult<Vec<String>> {
        playoffs::run(&self.client, self.playoff_season, self.display_timezone).await
    }

    pub async fn execute(&self, command: &Command) -> NhlResult<Vec<String>> {
        match command {
            Command::Summary(args) => self.summary(args).await,
            Command::Playoffs => self.playoffs().await,
        }
    }

    /// Answer one chat line. Unknown commands get no reply.
    pub async fn handle(&self, line: &str) -> Vec<String> {
        let Some(command) = Command::parse(line) else {
            return Vec::new();
        };
        info!("Handling {:?}", command);

        match self.execute(&command).await {
            Ok(lines) => lines,
            Err(err) => {
                match &err {
                    NhlError::Fetch { .. } => error!("{:?} failed: {}", command, err),
                    _ => warn!("{:?} failed: {}", command, err),
                }
                reply_for_error(&err).into_iter().collect()
            }
        }
    }
}
