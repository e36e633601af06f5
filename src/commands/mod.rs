pub mod playoffs;
pub mod summary;

use crate::dates::DateResolver;
use crate::error::{NhlError, NhlResult};
use crate::team_abbrev::Team;
use chrono::NaiveDate;

pub const SUMMARY_USAGE: &str = "Usage: summary [<team>] [<date>]";

/// Split `summary` arguments into a team and a date.
///
/// A lone argument that reads as a date selects every team on that date;
/// otherwise it is the team. A missing or unrecognised date means today.
pub fn parse_summary_args(args: &str, resolver: &DateResolver) -> NhlResult<(Team, NaiveDate)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (team, date) = match tokens.as_slice() {
        [] => (Team::All, None),
        [single] => match resolver.resolve(Some(*single))? {
            Some(date) => (Team::All, Some(date)),
            None => (Team::parse(single), None),
        },
        [team, date] => (Team::parse(team), resolver.resolve(Some(*date))?),
        _ => return Err(NhlError::Usage(SUMMARY_USAGE.to_string())),
    };

    let date = match date {
        Some(date) => date,
        None => resolver.today(),
    };
    Ok((team, date))
}
