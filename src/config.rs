use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

pub const DEFAULT_API_BASE_URL: &str = "https://statsapi.web.nhl.com/api/v1";
pub const DEFAULT_REPORT_BASE_URL: &str = "http://www.nhl.com/scores/htmlreports";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:45.0) Gecko/20100101 Firefox/45.0";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Upper bound for every outbound request
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub api_base_url: String,
    pub report_base_url: String,
    /// Timezone that decides when "today" rolls over
    #[serde(deserialize_with = "deserialize_tz")]
    pub reference_timezone: Tz,
    /// Timezone used when printing game times
    #[serde(deserialize_with = "deserialize_tz")]
    pub display_timezone: Tz,
    /// Season for the playoffs command, e.g. 20162017; derived from today when unset
    pub playoff_season: Option<u32>,
    /// Emit IRC bold control codes
    pub irc_formatting: bool,
    /// Officials called out in the referees line
    pub highlight_officials: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            report_base_url: DEFAULT_REPORT_BASE_URL.to_string(),
            reference_timezone: chrono_tz::America::Los_Angeles,
            display_timezone: chrono_tz::America::New_York,
            playoff_season: None,
            irc_formatting: true,
            highlight_officials: Vec::new(),
        }
    }
}

/// Deserialize an IANA timezone name such as "America/Los_Angeles" or "US/Pacific"
fn deserialize_tz<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .parse::<Tz>()
        .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    parse(&content).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid config {}: {}", config_path.display(), e);
        Config::default()
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
