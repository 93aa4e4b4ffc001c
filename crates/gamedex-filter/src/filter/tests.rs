//! Tests for filter construction.

use super::*;
use chrono::{TimeZone, Utc};
use gamedex_model::models::Platform;

// ==================== Empty Filter ====================

#[test]
fn test_empty_is_true() {
    assert_eq!(Filter::empty(), Filter::True);
    assert_eq!(Filter::default(), Filter::True);
    assert!(Filter::True.is_empty());
}

#[test]
fn test_is_empty_only_recognizes_literal_true() {
    assert!(!Filter::And(vec![Filter::True]).is_empty());
    assert!(!Filter::negate(Filter::True).is_empty());
    assert!(!Filter::NullReleaseDate.is_empty());
}

// ==================== Combinators ====================

#[test]
fn test_and_or_negate_shapes() {
    let a = Filter::Tag("a".into());
    let b = Filter::Tag("b".into());

    assert_eq!(
        Filter::and(a.clone(), b.clone()),
        Filter::And(vec![a.clone(), b.clone()])
    );
    assert_eq!(
        Filter::or(a.clone(), b.clone()),
        Filter::Or(vec![a.clone(), b])
    );
    assert_eq!(Filter::negate(a.clone()), Filter::Not(Box::new(a.clone())));
    assert_eq!(!a.clone(), Filter::negate(a));
}

#[test]
fn test_and_does_not_flatten() {
    let nested = Filter::and(
        Filter::and(Filter::Tag("a".into()), Filter::Tag("b".into())),
        Filter::Tag("c".into()),
    );
    match nested {
        Filter::And(children) => {
            assert_eq!(children.len(), 2);
            assert_eq!(children[0].kind(), FilterKind::And);
        }
        other => panic!("expected And, got {other:?}"),
    }
}

#[test]
fn test_all_any_reject_empty() {
    assert_eq!(
        Filter::all(vec![]).unwrap_err(),
        FilterError::EmptyCompound { tag: "and" }
    );
    assert_eq!(
        Filter::any(vec![]).unwrap_err(),
        FilterError::EmptyCompound { tag: "or" }
    );
    assert_eq!(
        Filter::all(vec![Filter::True]).unwrap(),
        Filter::And(vec![Filter::True])
    );
}

#[test]
fn test_file_name_compiles_eagerly() {
    assert!(Filter::file_name(r"^setup.*\.exe$").is_ok());

    let err = Filter::file_name("(").unwrap_err();
    match err {
        FilterError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "("),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn test_file_name_pattern_equality_uses_source() {
    assert_eq!(
        FileNamePattern::new("a+").unwrap(),
        FileNamePattern::new("a+").unwrap()
    );
    assert_ne!(
        FileNamePattern::new("a+").unwrap(),
        FileNamePattern::new("a*").unwrap()
    );
}

// ==================== Kinds ====================

#[test]
fn test_kind_classification() {
    assert!(FilterKind::And.is_compound());
    assert!(FilterKind::Or.is_compound());
    assert!(!FilterKind::Not.is_compound());
    assert!(!FilterKind::Not.is_rule());
    assert!(!FilterKind::True.is_rule());
    assert!(FilterKind::Provider.is_rule());
    assert_eq!(FilterKind::ALL.iter().filter(|k| k.is_rule()).count(), 20);
}

#[test]
fn test_kind_of_nodes() {
    assert_eq!(Filter::Platform(Platform::Pc).kind(), FilterKind::Platform);
    assert_eq!(
        Filter::PeriodCreateDate {
            period: Period::days(1)
        }
        .kind(),
        FilterKind::PeriodCreateDate
    );
    assert_eq!(FilterKind::TargetReleaseDate.to_string(), "targetReleaseDate");
}

#[test]
fn test_children() {
    let leaf = Filter::NullReleaseDate;
    assert!(leaf.children().is_empty());
    let not = Filter::negate(leaf.clone());
    assert_eq!(not.children(), &[leaf]);
}

// ==================== Period ====================

#[test]
fn test_period_window_start() {
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap();
    assert_eq!(
        Period::months(1).window_start(now),
        Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap()
    );
    assert_eq!(
        Period::new(1, 0, 1).window_start(now),
        Utc.with_ymd_and_hms(2023, 3, 30, 10, 0, 0).unwrap()
    );
    assert_eq!(Period::default().window_start(now), now);
}

#[test]
fn test_period_display() {
    assert_eq!(Period::default().to_string(), "0d");
    assert_eq!(Period::new(2, 3, 0).to_string(), "2y 3m");
    assert_eq!(Period::days(10).to_string(), "10d");
}
