use crate::client::StatsClient;
use crate::dates::season_for;
use crate::error::{NhlError, NhlResult};
use crate::formatting::format_game_time;
use crate::types::{PlayoffSeries, PlayoffTournament, SeriesSummary};
use chrono_tz::Tz;

const MISSING: &str = "-";

struct Matchup<'a> {
    name: &'a str,
    record: &'a str,
    next: String,
}

fn summary_of(series: &PlayoffSeries) -> Option<&SeriesSummary> {
    series
        .current_game
        .as_ref()
        .and_then(|game| game.series_summary.as_ref())
}

/// Round name, then `MATCHUP | status | next game` per series with the
/// status column padded to the longest one
pub fn format_playoffs(tournament: &PlayoffTournament, display_tz: Tz) -> NhlResult<Vec<String>> {
    let round = tournament
        .default_round
        .checked_sub(1)
        .and_then(|index| tournament.rounds.get(index))
        .ok_or_else(|| {
            NhlError::UpstreamShape(format!(
                "default round {} not in bracket of {} rounds",
                tournament.default_round,
                tournament.rounds.len()
            ))
        })?;

    let matchups: Vec<Matchup> = round
        .series
        .iter()
        .map(|series| {
            let summary = summary_of(series);
            Matchup {
                name: &series.names.matchup_short_name,
                record: summary
                    .and_then(|s| s.series_status.as_deref())
                    .unwrap_or(MISSING),
                next: summary
                    .and_then(|s| s.game_time.as_deref())
                    .map(|time| format_game_time(time, display_tz))
                    .unwrap_or_else(|| MISSING.to_string()),
            }
        })
        .collect();
    let width = matchups
        .iter()
        .map(|m| m.record.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![round.names.name.clone()];
    lines.extend(matchups.iter().map(|m| {
        format!("{} | {:width$} | {}", m.name, m.record, m.next, width = width)
    }));
    Ok(lines)
}

pub async fn run(
    client: &StatsClient,
    season: Option<u32>,
    display_tz: Tz,
) -> NhlResult<Vec<String>> {
    let season = season.unwrap_or_else(|| season_for(client.resolver().today()));
    let tournament = client.playoffs(season).await?;
    format_playoffs(&tournament, display_tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn tournament() -> PlayoffTournament {
        serde_json::from_value(fixtures::playoffs_json()).unwrap()
    }

    #[test]
    fn test_format_playoffs_default_round() {
        let lines = format_playoffs(&tournament(), chrono_tz::America::New_York).unwrap();
        assert_eq!(
            lines,
            vec![
                "Second Round",
                "BOS v OTT | OTT leads 3-2   | Sunday 7:00 PM ET",
                "NYR v MTL | Series tied 2-2 | Sunday 8:00 PM ET",
            ]
        );
    }

    #[test]
    fn test_finished_series_has_no_next_game() {
        let mut tournament = tournament();
        tournament.default_round = 1;
        let lines = format_playoffs(&tournament, chrono_tz::America::New_York).unwrap();
        assert_eq!(lines, vec!["First Round", "BOS v OTT | OTT wins 4-2 | -"]);
    }

    #[test]
    fn test_default_round_out_of_range() {
        let mut tournament = tournament();
        tournament.default_round = 5;
        let err = format_playoffs(&tournament, chrono_tz::America::New_York).unwrap_err();
        assert!(matches!(err, NhlError::UpstreamShape(_)));

        tournament.default_round = 0;
        assert!(format_playoffs(&tournament, chrono_tz::America::New_York).is_err());
    }
}
