//! End-to-end filter scenarios: decode a catalog and a filter from JSON,
//! evaluate, and check which games come back.

use chrono::{NaiveDate, TimeZone, Utc};
use gamedex_filter::filter::{codec, Filter, FilterEvaluator, FilterKind, FrozenContext};
use gamedex_filter::{filter_tags_for, NamedFilter};
use gamedex_model::catalog::Catalog;
use gamedex_model::models::Platform;

const CATALOG: &str = r#"{
  "games": [
    {
      "id": "hk", "name": "Hollow Knight", "platform": "pc", "library_id": "steam",
      "critic_score": 87.0, "user_score": 91.0, "release_date": "2017-02-24",
      "created_at": "2024-06-10T08:00:00Z",
      "genre_ids": ["metroidvania"], "tag_ids": ["favorite"],
      "provider_data": [{"provider_id": "igdb", "provider_game_id": "14593"}],
      "file_tree": {"name": "Hollow Knight", "size": 9000000000, "children": [
        {"name": "hollow_knight.exe", "size": 650000},
        {"name": "hollow_knight_Data", "size": 8999350000}
      ]}
    },
    {
      "id": "bot", "name": "Botanicula", "platform": "mac", "library_id": "gog",
      "user_score": 75.0,
      "created_at": "2023-01-01T00:00:00Z",
      "genre_ids": ["adventure"]
    },
    {
      "id": "ff7", "name": "Final Fantasy VII", "platform": "ps1", "library_id": "roms",
      "critic_score": 92.0, "release_date": "1997-01-31",
      "excluded_providers": ["igdb"],
      "file_tree": {"name": "ff7", "size": 2100000000, "children": [
        {"name": "FF7_DISC1.iso", "size": 700000000},
        {"name": "FF7_DISC2.iso", "size": 700000000},
        {"name": "FF7_DISC3.iso", "size": 700000000}
      ]}
    }
  ]
}"#;

fn context() -> FrozenContext {
    FrozenContext::new(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())
        .with_provider("igdb", Platform::ALL)
}

fn matching_ids(filter: &Filter, catalog: &Catalog) -> Vec<String> {
    let ctx = context();
    FilterEvaluator::new(filter, &ctx)
        .filter_games(&catalog.games)
        .into_iter()
        .map(|g| g.id.clone())
        .collect()
}

fn negated_ids(filter: &Filter, catalog: &Catalog) -> Vec<String> {
    let ctx = context();
    FilterEvaluator::new(filter, &ctx)
        .filter_games_not(&catalog.games)
        .into_iter()
        .map(|g| g.id.clone())
        .collect()
}

#[test]
fn test_acclaimed_games() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = codec::from_json_str(r#"{"type": "criticScore", "target": 85}"#).unwrap();

    assert_eq!(matching_ids(&filter, &catalog), vec!["hk", "ff7"]);
    // Botanicula has no critic score, so it is not "below 85" either.
    assert!(negated_ids(&filter, &catalog).is_empty());
}

#[test]
fn test_unscored_games_via_zero_threshold() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = codec::from_json_str(
        r#"{"type": "not", "filter": {"type": "criticScore", "target": 0}}"#,
    )
    .unwrap();

    assert_eq!(matching_ids(&filter, &catalog), vec!["bot"]);
}

#[test]
fn test_disc_images_outside_pc() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = codec::from_json_str(
        r#"{"type": "and", "filters": [
            {"type": "fileName", "pattern": "(?i)\\.iso$"},
            {"type": "not", "filter": {"type": "platform", "platform": "pc"}}
        ]}"#,
    )
    .unwrap();

    assert_eq!(matching_ids(&filter, &catalog), vec!["ff7"]);
    assert!(filter.has_filter(FilterKind::Platform));
}

#[test]
fn test_provider_coverage() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = Filter::Provider("igdb".into());

    assert_eq!(matching_ids(&filter, &catalog), vec!["hk"]);
    // ff7 excluded igdb, so it is neither "has igdb data" nor "missing igdb data".
    assert_eq!(negated_ids(&filter, &catalog), vec!["bot"]);
}

#[test]
fn test_recently_added_or_undated() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = codec::from_json_str(
        r#"{"type": "or", "filters": [
            {"type": "periodCreateDate", "period": {"days": 30}},
            {"type": "nullReleaseDate"}
        ]}"#,
    )
    .unwrap();

    assert_eq!(matching_ids(&filter, &catalog), vec!["hk", "bot"]);
}

#[test]
fn test_large_installs() {
    let catalog = Catalog::from_json_str(CATALOG).unwrap();
    let filter = Filter::FileSize {
        bytes: 5_000_000_000,
    };

    assert_eq!(matching_ids(&filter, &catalog), vec!["hk"]);
    // Botanicula has never been scanned; default negation treats that as "not large".
    assert_eq!(negated_ids(&filter, &catalog), vec!["bot", "ff7"]);
}

#[test]
fn test_file_size_counts_children_of_unsized_dir() {
    let catalog = Catalog::from_json_str(
        r#"[{"id": "a", "name": "A", "platform": "pc", "library_id": "l",
             "file_tree": {"name": "A", "children": [{"name": "big.iso", "size": 5000}]}}]"#,
    )
    .unwrap();
    let filter = Filter::FileSize { bytes: 1000 };
    let ctx = context();

    assert!(filter.evaluate(&catalog.games[0], &ctx));
    assert!(!filter.evaluate_not(&catalog.games[0], &ctx));
}

#[test]
fn test_tag_filters_feed_filter_tag_rule() {
    let mut catalog = Catalog::from_json_str(CATALOG).unwrap();
    let ctx = context();
    let before_2000 = Filter::negate(Filter::TargetReleaseDate {
        date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    });
    let tag_filters = vec![
        NamedFilter::tag("classic", before_2000),
        NamedFilter::tag("indie", Filter::Library("steam".into())),
    ];

    for game in &mut catalog.games {
        game.filter_tag_ids = filter_tags_for(game, &tag_filters, &ctx);
    }

    assert_eq!(
        matching_ids(&Filter::FilterTag("classic".into()), &catalog),
        vec!["ff7"]
    );
    assert_eq!(
        matching_ids(&Filter::FilterTag("indie".into()), &catalog),
        vec!["hk"]
    );
}
