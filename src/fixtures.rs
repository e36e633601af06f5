/// Fixture documents for tests, benchmarks and the development mock transport
///
/// The documents mirror the stats API's JSON layout for a single playoff
/// night: Boston at Ottawa (final, three goals) and the Rangers at Montreal.
use serde_json::{json, Value};

pub const FIXTURE_DATE: &str = "2017-04-23";
pub const BOS_OTT_GAME_PK: i64 = 2016030163;
pub const NYR_MTL_GAME_PK: i64 = 2016030154;

/// Schedule for `FIXTURE_DATE` with two games
pub fn schedule_json() -> Value {
    json!({
        "totalGames": 2,
        "dates": [{
            "date": FIXTURE_DATE,
            "games": [
                schedule_game(BOS_OTT_GAME_PK, "BOS", "OTT"),
                schedule_game(NYR_MTL_GAME_PK, "NYR", "MTL"),
            ]
        }]
    })
}

pub fn empty_schedule_json() -> Value {
    json!({ "totalGames": 0, "dates": [] })
}

fn schedule_game(game_pk: i64, away: &str, home: &str) -> Value {
    json!({
        "gamePk": game_pk,
        "gameDate": "2017-04-23T23:00:00Z",
        "status": { "detailedState": "Final" },
        "teams": {
            "away": { "score": 1, "team": { "id": 1, "abbreviation": away } },
            "home": { "score": 2, "team": { "id": 2, "abbreviation": home } }
        }
    })
}

/// Live feed for the Boston at Ottawa game
pub fn game_feed_json() -> Value {
    json!({
        "gamePk": BOS_OTT_GAME_PK,
        "gameData": {
            "status": { "detailedState": "Final" },
            "teams": {
                "away": {
                    "abbreviation": "BOS",
                    "venue": { "name": "TD Garden", "city": "Boston" }
                },
                "home": {
                    "abbreviation": "OTT",
                    "venue": { "name": "Canadian Tire Centre", "city": "Ottawa" }
                }
            }
        },
        "liveData": {
            "plays": {
                "allPlays": [
                    {
                        "result": { "eventTypeId": "FACEOFF" },
                        "about": { "ordinalNum": "1st", "periodTime": "00:00" },
                        "team": { "triCode": "OTT" },
                        "players": []
                    },
                    goal_play("OTT", "1st", "05:12", "PPG", &[
                        ("Erik Karlsson", "Scorer", Some(2)),
                        ("Mark Stone", "Assist", Some(3)),
                        ("Kyle Turris", "Assist", Some(4)),
                        ("Tuukka Rask", "Goalie", None),
                    ]),
                    goal_play("BOS", "2nd", "10:01", "EVEN", &[
                        ("Brad Marchand", "Scorer", Some(1)),
                        ("Craig Anderson", "Goalie", None),
                    ]),
                    goal_play("OTT", "3rd", "18:40", "SHG", &[
                        ("Jean-Gabriel Pageau", "Scorer", Some(3)),
                        ("Marc Methot", "Assist", Some(1)),
                    ]),
                ]
            },
            "boxscore": {
                "teams": {
                    "away": team_stats(1, 8, 30, 0.0, 3.0, "48.1", 12, 5, 7, 25),
                    "home": team_stats(2, 6, 28, 1.0, 4.0, "51.9", 15, 6, 9, 31)
                }
            },
            "decisions": {
                "winner": { "fullName": "Craig Anderson" },
                "loser": { "fullName": "Tuukka Rask" },
                "firstStar": { "fullName": "Erik Karlsson" },
                "secondStar": { "fullName": "Jean-Gabriel Pageau" },
                "thirdStar": { "fullName": "Craig Anderson" }
            }
        }
    })
}

/// Build a GOAL play; participants are `(full name, player type, season total)`
pub fn goal_play(
    team: &str,
    ordinal: &str,
    time: &str,
    strength: &str,
    participants: &[(&str, &str, Option<u32>)],
) -> Value {
    let players: Vec<Value> = participants
        .iter()
        .map(|(name, kind, total)| {
            let mut player = json!({
                "player": { "fullName": name },
                "playerType": kind
            });
            if let Some(total) = total {
                player["seasonTotal"] = json!(total);
            }
            player
        })
        .collect();
    json!({
        "result": { "eventTypeId": "GOAL", "strength": { "code": strength } },
        "about": { "ordinalNum": ordinal, "periodTime": time },
        "team": { "triCode": team },
        "players": players
    })
}

#[allow(clippy::too_many_arguments)]
fn team_stats(
    goals: u32,
    pim: u32,
    shots: u32,
    ppg: f64,
    ppo: f64,
    faceoffs: &str,
    blocked: u32,
    takeaways: u32,
    giveaways: u32,
    hits: u32,
) -> Value {
    json!({
        "teamStats": {
            "teamSkaterStats": {
                "goals": goals,
                "pim": pim,
                "shots": shots,
                "powerPlayPercentage": "0.0",
                "powerPlayGoals": ppg,
                "powerPlayOpportunities": ppo,
                "faceOffWinPercentage": faceoffs,
                "blocked": blocked,
                "takeaways": takeaways,
                "giveaways": giveaways,
                "hits": hits
            }
        }
    })
}

/// Playoff bracket whose default round is the second one
pub fn playoffs_json() -> Value {
    json!({
        "id": 1,
        "name": "Playoffs",
        "season": "20162017",
        "defaultRound": 2,
        "rounds": [
            {
                "number": 1,
                "names": { "name": "First Round", "shortName": "R1" },
                "series": [series("BOS v OTT", "OTT wins 4-2", None)]
            },
            {
                "number": 2,
                "names": { "name": "Second Round", "shortName": "R2" },
                "series": [
                    series("BOS v OTT", "OTT leads 3-2", Some("2017-04-23T23:00:00Z")),
                    series("NYR v MTL", "Series tied 2-2", Some("2017-04-24T00:00:00Z")),
                ]
            }
        ]
    })
}

fn series(matchup: &str, status: &str, game_time: Option<&str>) -> Value {
    let mut summary = json!({ "seriesStatus": status });
    if let Some(game_time) = game_time {
        summary["gameTime"] = json!(game_time);
    }
    json!({
        "names": { "matchupShortName": matchup },
        "currentGame": { "seriesSummary": summary }
    })
}

/// Excerpt of a game summary report with attendance and officials
pub fn game_report_html() -> &'static str {
    r#"<html><body>
<table><tr><td align="center">Saturday, April 23, 2017</td></tr>
<tr><td align="center">Attendance 18,977 at Canadian Tire Centre</td></tr></table>
<table>
<tr><td align="center" class="bold">Referee</td><td align="center" class="bold">Linesmen</td></tr>
<tr><td><table border="0" cellpadding="0" cellspacing="0">
<tr><td align="left">#20 Tim Peel</td></tr>
<tr><td align="left">#7 Kevin Pollock</td></tr>
</table></td>
<td><table border="0" cellpadding="0" cellspacing="0">
<tr><td align="left">#59 Steve Barton</td></tr>
</table></td></tr>
</table>
</body></html>"#
}
