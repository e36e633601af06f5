use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nhl_bot::cache::ConditionalCache;
use nhl_bot::commands::playoffs::format_playoffs;
use nhl_bot::commands::summary::{format_summary, goal_summary, parse_report, SummaryLinks};
use nhl_bot::data_provider::{DataProvider, FetchOutcome};
use nhl_bot::dates::DateResolver;
use nhl_bot::error::NhlResult;
use nhl_bot::fixtures;
use nhl_bot::formatting::Style;
use nhl_bot::types::{GameFeed, PlayoffTournament};

const LAST_MODIFIED: &str = "Sun, 23 Apr 2017 23:00:00 GMT";

/// Always answers with the fixture schedule and honours If-Modified-Since
struct StaticProvider {
    body: Vec<u8>,
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn get(&self, _url: &str, if_modified_since: Option<&str>) -> NhlResult<FetchOutcome> {
        if if_modified_since == Some(LAST_MODIFIED) {
            return Ok(FetchOutcome::NotModified);
        }
        Ok(FetchOutcome::Fresh {
            body: self.body.clone(),
            last_modified: Some(LAST_MODIFIED.to_string()),
        })
    }
}

/// Benchmark date keyword and literal resolution
fn bench_date_resolution(c: &mut Criterion) {
    let resolver = DateResolver::default();
    let now = Utc.with_ymd_and_hms(2023, 1, 15, 6, 30, 0).unwrap();

    let mut group = c.benchmark_group("date_resolution");

    group.bench_function("keyword", |b| {
        b.iter(|| resolver.resolve_at(black_box(Some("yesterday")), now))
    });

    group.bench_function("literal", |b| {
        b.iter(|| resolver.resolve_at(black_box(Some("2017-04-23")), now))
    });

    group.bench_function("not_a_date", |b| {
        b.iter(|| resolver.resolve_at(black_box(Some("banana")), now))
    });

    group.finish();
}

/// Benchmark reply formatting from decoded fixtures
fn bench_formatting(c: &mut Criterion) {
    let feed: GameFeed = serde_json::from_value(fixtures::game_feed_json()).unwrap();
    let tournament: PlayoffTournament = serde_json::from_value(fixtures::playoffs_json()).unwrap();
    let report = parse_report(fixtures::game_report_html());
    let links = SummaryLinks {
        report: "http://www.nhl.com/scores/htmlreports/20162017/GS030163.HTM".to_string(),
        highlights: "https://statsapi.web.nhl.com/api/v1/schedule?gamePk=2016030163".to_string(),
    };
    let style = Style::irc();

    let mut group = c.benchmark_group("formatting");

    group.bench_function("goal_summary", |b| {
        b.iter(|| goal_summary(black_box(&feed), &style))
    });

    group.bench_function("full_summary", |b| {
        b.iter(|| format_summary(black_box(&feed), &report, &links, &[], &style))
    });

    group.bench_function("parse_report", |b| {
        b.iter(|| parse_report(black_box(fixtures::game_report_html())))
    });

    group.bench_function("playoffs", |b| {
        b.iter(|| format_playoffs(black_box(&tournament), chrono_tz::America::New_York))
    });

    group.finish();
}

/// Benchmark the conditional cache on a revalidated hit
fn bench_cache(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let provider = StaticProvider {
        body: serde_json::to_vec(&fixtures::schedule_json()).unwrap(),
    };
    let cache = ConditionalCache::new();
    let url = "https://statsapi.web.nhl.com/api/v1/schedule?startDate=2017-04-23";
    runtime.block_on(cache.fetch(&provider, url, true)).unwrap();

    let mut group = c.benchmark_group("cache");

    group.bench_function("not_modified_hit", |b| {
        b.iter(|| runtime.block_on(cache.fetch(&provider, black_box(url), true)))
    });

    group.finish();
}

criterion_group!(benches, bench_date_resolution, bench_formatting, bench_cache);
criterion_main!(benches);
