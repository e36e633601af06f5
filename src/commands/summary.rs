use crate::client::StatsClient;
use crate::commands::parse_summary_args;
use crate::error::{NhlError, NhlResult};
use crate::formatting::{short_name, Style};
use crate::types::{GameFeed, GamePk, PersonRef, Play, TeamSkaterStats};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::warn;

/// Goals listed on one line before the rest spill onto a second
const GOALS_PER_LINE: usize = 5;

const MISSING: &str = "-";
const UNKNOWN: &str = "n/a";

static ATTENDANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Attendance\s*(\d[\d,]*)").expect("static attendance pattern"));

/// Details scraped from the game summary report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameReport {
    pub attendance: Option<String>,
    pub referees: Vec<String>,
}

fn element_text(element: &ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

fn child_elements<'a>(
    element: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

fn is_referee_heading(cell: &ElementRef) -> bool {
    matches!(element_text(cell).to_lowercase().as_str(), "referee" | "referees")
}

/// Officials listed under the `Referee` heading.
///
/// The heading row names the officials' columns; the following row holds one
/// nested table per column with a name in each cell.
fn referee_names(document: &Html) -> Option<Vec<String>> {
    let cells = Selector::parse("td").expect("static cell selector");
    let heading = document.select(&cells).find(is_referee_heading)?;

    let heading_row = heading.parent().and_then(ElementRef::wrap)?;
    let column = child_elements(heading_row, "td").position(|cell| cell.id() == heading.id())?;
    let officials_row = heading_row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|row| row.value().name() == "tr")?;
    let officials = child_elements(officials_row, "td").nth(column)?;

    Some(
        officials
            .select(&cells)
            .map(|cell| element_text(&cell))
            .filter(|name| !name.is_empty())
            .collect(),
    )
}

pub fn parse_report(html: &str) -> GameReport {
    let document = Html::parse_document(html);
    let text = element_text(&document.root_element());

    GameReport {
        attendance: ATTENDANCE.captures(&text).map(|caps| caps[1].to_string()),
        referees: referee_names(&document).unwrap_or_default(),
    }
}

/// Links printed under the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLinks {
    pub report: String,
    pub highlights: String,
}

fn strength_suffix(play: &Play) -> &'static str {
    let code = play
        .result
        .strength
        .as_ref()
        .map(|strength| strength.code.as_str())
        .unwrap_or("");
    if code.contains("PPG") {
        " PP"
    } else if code.contains("SHG") {
        " SH"
    } else {
        ""
    }
}

/// One scoring play, e.g. `OTT E.Karlsson(2) (M.Stone, K.Turris) [1st/05:12 PP]`
fn format_goal(play: &Play, style: &Style) -> NhlResult<String> {
    let team = play
        .team
        .as_ref()
        .ok_or_else(|| NhlError::UpstreamShape("goal without a team".to_string()))?;
    let about = play
        .about
        .as_ref()
        .ok_or_else(|| NhlError::UpstreamShape("goal without a period time".to_string()))?;

    let names: Vec<String> = play
        .players
        .iter()
        .filter(|p| !p.player_type.contains("Goalie"))
        .map(|p| {
            let total = match (p.player_type.contains("Scorer"), p.season_total) {
                (true, Some(total)) => format!("({})", total),
                _ => String::new(),
            };
            format!("{}{}", short_name(&p.player.full_name), total)
        })
        .collect();
    let (scorer, assists) = names
        .split_first()
        .ok_or_else(|| NhlError::UpstreamShape("goal without a scorer".to_string()))?;

    let credited = if assists.is_empty() {
        style.bold(scorer)
    } else {
        format!("{} ({})", style.bold(scorer), assists.join(", "))
    };
    let time = format!(
        "[{}/{}{}]",
        about.ordinal_num,
        about.period_time,
        strength_suffix(play)
    );

    Ok(format!("{} {} {}", style.bold(&team.tri_code), credited, time))
}

/// Scoring summary, split over two lines past five goals; empty without goals
pub fn goal_summary(feed: &GameFeed, style: &Style) -> NhlResult<Vec<String>> {
    let goals = feed
        .live_data
        .plays
        .all_plays
        .iter()
        .filter(|play| play.result.event_type_id == "GOAL")
        .map(|play| format_goal(play, style))
        .collect::<NhlResult<Vec<_>>>()?;

    let label = style.bold("Goals");
    let (first, rest) = goals.split_at(goals.len().min(GOALS_PER_LINE));
    Ok([first, rest]
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}: {}", label, line.join(" | ")))
        .collect())
}

pub fn format_header(feed: &GameFeed, report: &GameReport, style: &Style) -> String {
    let teams = &feed.game_data.teams;
    let away: &TeamSkaterStats = &feed.live_data.boxscore.teams.away.team_stats.team_skater_stats;
    let home: &TeamSkaterStats = &feed.live_data.boxscore.teams.home.team_stats.team_skater_stats;

    let scoreline = format!(
        "{} {} {} {} {}",
        teams.away.abbreviation,
        away.goals,
        teams.home.abbreviation,
        home.goals,
        feed.game_data.status.detailed_state
    );

    // f64 Display drops a trailing ".0"
    format!(
        "{} [Att {}] | SOG {}-{} | BK {}-{} | HITS {}-{} | PP {}/{} {}PIMS - PP {}/{} {}PIMS | FO {}-{} | TK {}-{} | GV {}-{}",
        style.bold(&scoreline),
        report.attendance.as_deref().unwrap_or(UNKNOWN),
        away.shots,
        home.shots,
        away.blocked,
        home.blocked,
        away.hits,
        home.hits,
        away.power_play_goals,
        away.power_play_opportunities,
        away.pim,
        home.power_play_goals,
        home.power_play_opportunities,
        home.pim,
        away.face_off_win_percentage,
        home.face_off_win_percentage,
        away.takeaways,
        home.takeaways,
        away.giveaways,
        home.giveaways
    )
}

fn name_of(person: &Option<PersonRef>) -> &str {
    person
        .as_ref()
        .map(|p| p.full_name.as_str())
        .unwrap_or(MISSING)
}

pub fn format_decisions(feed: &GameFeed, style: &Style) -> String {
    let decisions = &feed.live_data.decisions;
    format!(
        "{}: 1.{} 2.{} 3.{}    [{} W: {} L: {}]",
        style.bold("Three Stars"),
        name_of(&decisions.first_star),
        name_of(&decisions.second_star),
        name_of(&decisions.third_star),
        style.bold("Goalies"),
        name_of(&decisions.winner),
        name_of(&decisions.loser)
    )
}

pub fn format_referees(report: &GameReport, highlight: &[String], style: &Style) -> String {
    let referees = if report.referees.is_empty() {
        UNKNOWN.to_string()
    } else {
        report
            .referees
            .iter()
            .map(|name| {
                if highlight.iter().any(|h| h.eq_ignore_ascii_case(name)) {
                    style.bold(&format!("-!- {} -!-", name))
                } else {
                    name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!("{}: {}", style.bold("Referees"), referees)
}

/// Every reply line for a game, in order
pub fn format_summary(
    feed: &GameFeed,
    report: &GameReport,
    links: &SummaryLinks,
    highlight: &[String],
    style: &Style,
) -> NhlResult<Vec<String>> {
    let mut lines = vec![format_header(feed, report, style)];
    lines.extend(goal_summary(feed, style)?);
    lines.push(format_decisions(feed, style));
    lines.push(format_referees(report, highlight, style));
    lines.push(format!(
        "{}: {} {}: {}",
        style.bold("HTML Report"),
        links.report,
        style.bold("Video Highlights"),
        links.highlights
    ));
    Ok(lines)
}

/// Attendance and officials are extras; a missing report does not fail the summary
async fn fetch_report(client: &StatsClient, game_pk: GamePk) -> GameReport {
    match client.game_report(game_pk).await {
        Ok(html) => parse_report(&html),
        Err(e) => {
            warn!("Game report for {} unavailable: {}", game_pk, e);
            GameReport::default()
        }
    }
}

pub async fn run(
    client: &StatsClient,
    args: &str,
    highlight: &[String],
    style: &Style,
) -> NhlResult<Vec<String>> {
    let (team, date) = parse_summary_args(args, client.resolver())?;
    let game_pk = client.find_game(&team, date).await?;

    let (feed, report) = tokio::join!(client.game_feed(game_pk), fetch_report(client, game_pk));
    let feed = feed?;

    let links = SummaryLinks {
        report: client.endpoints().game_report(game_pk)?,
        highlights: client.endpoints().highlights(game_pk),
    };
    format_summary(&feed, &report, &links, highlight, style)
}
