//! Date resolution for command arguments.
//!
//! The stats API files games under the day they start, so "today" is computed
//! in a single reference timezone. Using the west coast means the day only
//! advances once the whole continent is past midnight and games still in
//! progress on the east coast are not skipped.

use crate::error::{NhlError, NhlResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Canonical output format for resolved dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default timezone used to decide when "today" rolls over
pub const DEFAULT_REFERENCE_TZ: Tz = chrono_tz::America::Los_Angeles;

// ASCII digits only
static LITERAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern"));

/// Relative day keywords accepted in place of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    LastWeek,
    Yesterday,
    Today,
    Tonight,
    Tomorrow,
    NextWeek,
}

impl RelativeDay {
    pub const ALL: [RelativeDay; 6] = [
        RelativeDay::LastWeek,
        RelativeDay::Yesterday,
        RelativeDay::Today,
        RelativeDay::Tonight,
        RelativeDay::Tomorrow,
        RelativeDay::NextWeek,
    ];

    pub fn offset_days(self) -> i64 {
        match self {
            RelativeDay::LastWeek => -7,
            RelativeDay::Yesterday => -1,
            RelativeDay::Today | RelativeDay::Tonight => 0,
            RelativeDay::Tomorrow => 1,
            RelativeDay::NextWeek => 7,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            RelativeDay::LastWeek => "lastweek",
            RelativeDay::Yesterday => "yesterday",
            RelativeDay::Today => "today",
            RelativeDay::Tonight => "tonight",
            RelativeDay::Tomorrow => "tomorrow",
            RelativeDay::NextWeek => "nextweek",
        }
    }
}

impl FromStr for RelativeDay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        RelativeDay::ALL
            .into_iter()
            .find(|day| day.keyword() == lower)
            .ok_or(())
    }
}

/// Turns user date tokens into calendar dates in the reference timezone
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    tz: Tz,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_TZ)
    }
}

impl DateResolver {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// Resolve a token against the current time.
    ///
    /// Returns `Ok(Some(today))` for `None`, `Ok(None)` when the token is
    /// neither a keyword nor shaped like `YYYY-MM-DD`, and
    /// `InvalidDateFormat` when it has the right shape but is not a real date.
    pub fn resolve(&self, token: Option<&str>) -> NhlResult<Option<NaiveDate>> {
        self.resolve_at(token, Utc::now())
    }

    pub fn resolve_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> NhlResult<Option<NaiveDate>> {
        let Some(token) = token else {
            return Ok(Some(self.today_at(now)));
        };

        if let Ok(day) = token.parse::<RelativeDay>() {
            let date = self.today_at(now) + Duration::days(day.offset_days());
            return Ok(Some(date));
        }

        if LITERAL_DATE.is_match(token) {
            return NaiveDate::parse_from_str(token, DATE_FORMAT)
                .map(Some)
                .map_err(|_| {
                    NhlError::InvalidDateFormat(format!(
                        "Incorrect date '{}', should be YYYY-MM-DD",
                        token
                    ))
                });
        }

        Ok(None)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `2023-01-15` -> `20230115`
pub fn strip_separators(date: &str) -> String {
    date.replace('-', "")
}

/// Playoff season identifier for a date, e.g. `20162017` for 2017-04-20.
/// A new season starts in September.
pub fn season_for(date: NaiveDate) -> u32 {
    let year = date.year() as u32;
    if date.month() >= 9 {
        year * 10000 + year + 1
    } else {
        (year - 1) * 10000 + year
    }
}
