//! Stats API client.
//!
//! Builds endpoint URLs, routes today's schedule through the conditional
//! cache and decodes documents into the wire types.

use crate::cache::ConditionalCache;
use crate::config::Config;
use crate::data_provider::DataProvider;
use crate::dates::{format_date, DateResolver};
use crate::error::{NhlError, NhlResult};
use crate::team_abbrev::Team;
use crate::types::{GameFeed, GamePk, PlayoffTournament, Schedule};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

const SCHEDULE_EXPAND: &str = "schedule.teams,schedule.linescore,schedule.broadcasts.all,\
schedule.ticket,schedule.game.content.media.epg";

/// URL templates for the stats API and the game report site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    report_base: String,
}

impl Endpoints {
    pub fn new(api_base: &str, report_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            report_base: report_base.trim_end_matches('/').to_string(),
        }
    }

    /// Schedule for a single day
    pub fn schedule(&self, date: NaiveDate) -> String {
        let date = format_date(date);
        format!(
            "{}/schedule?startDate={}&endDate={}&expand={}&leaderCategories=&site=en_nhl&teamId=",
            self.api_base, date, date, SCHEDULE_EXPAND
        )
    }

    pub fn game_feed(&self, game_pk: GamePk) -> String {
        format!("{}/game/{}/feed/live", self.api_base, game_pk)
    }

    pub fn playoffs(&self, season: u32) -> String {
        format!(
            "{}/tournaments/playoffs?expand=round.series&season={}&site=en_nhl",
            self.api_base, season
        )
    }

    pub fn highlights(&self, game_pk: GamePk) -> String {
        format!(
            "{}/schedule?expand=schedule.game.content.media.epg&leaderCategories=&site=en_nhl&gamePk={}",
            self.api_base, game_pk
        )
    }

    /// Game summary report. The first four digits of a game id are the
    /// season's starting year, the rest is the game number.
    pub fn game_report(&self, game_pk: GamePk) -> NhlResult<String> {
        let id = game_pk.to_string();
        if id.len() <= 4 {
            return Err(NhlError::UpstreamShape(format!("unexpected game id {}", id)));
        }
        let (year, number) = id.split_at(4);
        let year: u32 = year
            .parse()
            .map_err(|_| NhlError::UpstreamShape(format!("unexpected game id {}", id)))?;
        Ok(format!(
            "{}/{}{}/GS{}.HTM",
            self.report_base,
            year,
            year + 1,
            number
        ))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_API_BASE_URL,
            crate::config::DEFAULT_REPORT_BASE_URL,
        )
    }
}

/// First game on the schedule involving `team`, home or away
pub fn find_game_in(schedule: &Schedule, team: &Team) -> Option<GamePk> {
    if schedule.total_games == 0 {
        return None;
    }
    schedule
        .dates
        .iter()
        .flat_map(|day| day.games.iter())
        .find(|game| {
            team.matches(&game.teams.home.team.abbreviation)
                || team.matches(&game.teams.away.team.abbreviation)
        })
        .map(|game| game.game_pk)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> NhlResult<T> {
    Ok(serde_json::from_slice(body)?)
}

pub struct StatsClient {
    provider: Arc<dyn DataProvider>,
    cache: Arc<ConditionalCache>,
    endpoints: Endpoints,
    resolver: DateResolver,
}

impl StatsClient {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        cache: Arc<ConditionalCache>,
        endpoints: Endpoints,
        resolver: DateResolver,
    ) -> Self {
        Self {
            provider,
            cache,
            endpoints,
            resolver,
        }
    }

    pub fn from_config(
        config: &Config,
        provider: Arc<dyn DataProvider>,
        cache: Arc<ConditionalCache>,
    ) -> Self {
        Self::new(
            provider,
            cache,
            Endpoints::new(&config.api_base_url, &config.report_base_url),
            DateResolver::new(config.reference_timezone),
        )
    }

    pub fn resolver(&self) -> &DateResolver {
        &self.resolver
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Schedule for `date`; only today's schedule goes through the cache
    pub async fn schedule(&self, date: NaiveDate) -> NhlResult<Schedule> {
        let url = self.endpoints.schedule(date);
        let use_cache = date == self.resolver.today();
        let body = self
            .cache
            .fetch(self.provider.as_ref(), &url, use_cache)
            .await?;
        decode(&body)
    }

    pub async fn find_game(&self, team: &Team, date: NaiveDate) -> NhlResult<GamePk> {
        let schedule = self.schedule(date).await?;
        let game_pk = find_game_in(&schedule, team).ok_or_else(|| NhlError::NoGameFound {
            team: team.to_string(),
            date: format_date(date),
        })?;
        debug!("{} on {} -> game {}", team, format_date(date), game_pk);
        Ok(game_pk)
    }

    pub async fn game_feed(&self, game_pk: GamePk) -> NhlResult<GameFeed> {
        let url = self.endpoints.game_feed(game_pk);
        let body = self.cache.fetch(self.provider.as_ref(), &url, false).await?;
        decode(&body)
    }

    pub async fn playoffs(&self, season: u32) -> NhlResult<PlayoffTournament> {
        let url = self.endpoints.playoffs(season);
        let body = self.cache.fetch(self.provider.as_ref(), &url, false).await?;
        decode(&body)
    }

    /// Raw HTML of the game summary report
    pub async fn game_report(&self, game_pk: GamePk) -> NhlResult<String> {
        let url = self.endpoints.game_report(game_pk)?;
        let body = self.cache.fetch(self.provider.as_ref(), &url, false).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockProvider;
    use crate::fixtures;

    fn fixture_date() -> NaiveDate {
        NaiveDate::parse_from_str(fixtures::FIXTURE_DATE, "%Y-%m-%d").unwrap()
    }

    fn client_with(provider: Arc<MockProvider>) -> StatsClient {
        StatsClient::new(
            provider,
            Arc::new(ConditionalCache::new()),
            Endpoints::default(),
            DateResolver::default(),
        )
    }

    #[test]
    fn test_schedule_url() {
        let url = Endpoints::new("https://stats.example/api/v1/", "http://reports.example")
            .schedule(fixture_date());
        assert!(url.starts_with(
            "https://stats.example/api/v1/schedule?startDate=2017-04-23&endDate=2017-04-23&expand="
        ));
    }

    #[test]
    fn test_game_report_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.game_report(2016030163).unwrap(),
            "http://www.nhl.com/scores/htmlreports/20162017/GS030163.HTM"
        );
        assert!(matches!(
            endpoints.game_report(123),
            Err(NhlError::UpstreamShape(_))
        ));
    }

    #[test]
    fn test_find_game_in_schedule() {
        let schedule: Schedule = serde_json::from_value(fixtures::schedule_json()).unwrap();
        assert_eq!(
            find_game_in(&schedule, &Team::parse("BOS")),
            Some(fixtures::BOS_OTT_GAME_PK)
        );
        assert_eq!(
            find_game_in(&schedule, &Team::parse("mtl")),
            Some(fixtures::NYR_MTL_GAME_PK)
        );
        assert_eq!(
            find_game_in(&schedule, &Team::All),
            Some(fixtures::BOS_OTT_GAME_PK)
        );
        assert_eq!(find_game_in(&schedule, &Team::parse("ZZZ")), None);
    }

    #[tokio::test]
    async fn test_find_game() {
        let provider = Arc::new(MockProvider::new());
        let endpoints = Endpoints::default();
        provider.insert_json(
            &endpoints.schedule(fixture_date()),
            &fixtures::schedule_json(),
            None,
        );
        let client = client_with(Arc::clone(&provider));

        let game = client.find_game(&Team::parse("BOS"), fixture_date()).await;
        assert_eq!(game, Ok(fixtures::BOS_OTT_GAME_PK));

        let missing = client.find_game(&Team::parse("ZZZ"), fixture_date()).await;
        assert_eq!(
            missing,
            Err(NhlError::NoGameFound {
                team: "ZZZ".to_string(),
                date: "2017-04-23".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_schedule_is_no_game() {
        let provider = Arc::new(MockProvider::new());
        provider.route_json("/schedule?", &fixtures::empty_schedule_json());
        let client = client_with(provider);

        let result = client.find_game(&Team::All, fixture_date()).await;
        assert!(matches!(result, Err(NhlError::NoGameFound { .. })));
    }

    #[tokio::test]
    async fn test_only_today_uses_cache() {
        let provider = Arc::new(MockProvider::new());
        let endpoints = Endpoints::default();
        let cache = Arc::new(ConditionalCache::new());
        let client = StatsClient::new(
            Arc::clone(&provider) as Arc<dyn DataProvider>,
            Arc::clone(&cache),
            endpoints.clone(),
            DateResolver::default(),
        );
        let today = client.resolver().today();
        provider.insert_json(&endpoints.schedule(today), &fixtures::schedule_json(), Some("lm"));
        provider.insert_json(
            &endpoints.schedule(fixture_date()),
            &fixtures::schedule_json(),
            Some("lm"),
        );

        client.schedule(fixture_date()).await.unwrap();
        assert!(cache.entry().await.is_none());

        client.schedule(today).await.unwrap();
        client.schedule(today).await.unwrap();
        assert_eq!(cache.entry().await.unwrap().url, endpoints.schedule(today));
        assert_eq!(provider.downloads(), 2);
    }

    #[tokio::test]
    async fn test_malformed_schedule_is_upstream_shape() {
        let provider = Arc::new(MockProvider::new());
        provider.route("/schedule?", b"{\"dates\": []}".to_vec());
        let client = client_with(provider);

        let result = client.schedule(fixture_date()).await;
        assert!(matches!(result, Err(NhlError::UpstreamShape(_))));
    }
}
