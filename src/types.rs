/// Wire types for the stats API
///
/// Only the fields the commands read are modelled. Anything the upstream
/// schema may legitimately omit is an `Option` so that a missing field on one
/// play or series does not fail the whole document.
use serde::Deserialize;

/// Game identifier used by the stats API, e.g. `2016030163`
pub type GamePk = i64;

// Schedule endpoint

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub total_games: u32,
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDate {
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: GamePk,
    pub teams: HomeAway<ScheduleTeamEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleTeamEntry {
    pub team: TeamRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    pub abbreviation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomeAway<T> {
    pub away: T,
    pub home: T,
}

// Game live feed endpoint

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFeed {
    pub game_data: GameData,
    pub live_data: LiveData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameData {
    pub status: GameStatus,
    pub teams: HomeAway<GameTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub detailed_state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameTeam {
    pub abbreviation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveData {
    pub plays: Plays,
    pub boxscore: Boxscore,
    #[serde(default)]
    pub decisions: Decisions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plays {
    #[serde(default)]
    pub all_plays: Vec<Play>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Play {
    pub result: PlayResult,
    pub about: Option<PlayAbout>,
    pub team: Option<PlayTeam>,
    #[serde(default)]
    pub players: Vec<PlayParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub event_type_id: String,
    pub strength: Option<Strength>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Strength {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAbout {
    pub ordinal_num: String,
    pub period_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayTeam {
    pub tri_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayParticipant {
    pub player: PersonRef,
    pub player_type: String,
    pub season_total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Boxscore {
    pub teams: HomeAway<BoxscoreTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    pub team_stats: TeamStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_skater_stats: TeamSkaterStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSkaterStats {
    pub goals: u32,
    pub pim: u32,
    pub shots: u32,
    pub power_play_goals: f64,
    pub power_play_opportunities: f64,
    pub face_off_win_percentage: String,
    pub blocked: u32,
    pub takeaways: u32,
    pub giveaways: u32,
    pub hits: u32,
}

/// Winning/losing goalies and three stars; absent until a game is decided
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decisions {
    pub winner: Option<PersonRef>,
    pub loser: Option<PersonRef>,
    pub first_star: Option<PersonRef>,
    pub second_star: Option<PersonRef>,
    pub third_star: Option<PersonRef>,
}

// Playoff tournament endpoint

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffTournament {
    pub default_round: usize,
    #[serde(default)]
    pub rounds: Vec<PlayoffRound>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayoffRound {
    pub names: RoundNames,
    #[serde(default)]
    pub series: Vec<PlayoffSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundNames {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffSeries {
    pub names: SeriesNames,
    pub current_game: Option<SeriesCurrentGame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesNames {
    pub matchup_short_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCurrentGame {
    pub series_summary: Option<SeriesSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub series_status: Option<String>,
    pub game_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_schedule_deserializes() {
        let schedule: Schedule = serde_json::from_value(fixtures::schedule_json()).unwrap();
        assert_eq!(schedule.total_games, 2);
        assert_eq!(schedule.dates[0].games.len(), 2);
        assert_eq!(schedule.dates[0].games[0].teams.home.team.abbreviation, "OTT");
    }

    #[test]
    fn test_game_feed_deserializes() {
        let feed: GameFeed = serde_json::from_value(fixtures::game_feed_json()).unwrap();
        assert_eq!(feed.game_data.teams.away.abbreviation, "BOS");
        let stats = &feed.live_data.boxscore.teams.home.team_stats.team_skater_stats;
        assert_eq!(stats.goals, 2);
        assert_eq!(stats.power_play_goals, 1.0);
        assert!(feed.live_data.decisions.first_star.is_some());
    }

    #[test]
    fn test_game_feed_without_decisions() {
        let mut json = fixtures::game_feed_json();
        json["liveData"]
            .as_object_mut()
            .unwrap()
            .remove("decisions");
        let feed: GameFeed = serde_json::from_value(json).unwrap();
        assert!(feed.live_data.decisions.winner.is_none());
    }

    #[test]
    fn test_missing_boxscore_is_an_error() {
        let mut json = fixtures::game_feed_json();
        json["liveData"].as_object_mut().unwrap().remove("boxscore");
        assert!(serde_json::from_value::<GameFeed>(json).is_err());
    }
}
