use std::fs;
use std::path::PathBuf;

use offball_radar::provider::{OffBallRunsPage, follow_pages, parse_off_ball_runs_json};
use offball_radar::run_types::RunType;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_paginated_response() {
    let raw = read_fixture("off_ball_runs_page1.json");
    let page = parse_off_ball_runs_json(&raw).expect("fixture should parse");
    assert_eq!(page.rows.len(), 3);
    assert!(page.next.as_deref().is_some_and(|n| n.contains("offset=3")));

    let ada = &page.rows[0];
    assert_eq!(ada.player_id, Some(11001));
    assert_eq!(ada.player_name, "Ada Striker");
    assert_eq!(ada.team_name, "Harbour FC");
    assert_eq!(ada.competition_id, Some(1));
    assert_eq!(ada.season_name, "2022/2023");
    assert_eq!(ada.position, "CF");
    assert_eq!(ada.count_match, Some(18));
    assert_eq!(ada.minutes_played_per_match, 90.0);
    assert_eq!(ada.count_per_match(RunType::InBehind), Some(2.0));
    assert_eq!(ada.count_per_match(RunType::CrossReceiver), Some(1.2));
    assert_eq!(ada.count_per_match(RunType::Overlap), Some(0.0));
}

#[test]
fn null_counts_stay_undefined() {
    let raw = read_fixture("off_ball_runs_page1.json");
    let page = parse_off_ball_runs_json(&raw).expect("fixture should parse");
    let cy = &page.rows[2];
    assert_eq!(cy.minutes_played_per_match, 62.5);
    assert_eq!(cy.count_per_match(RunType::AheadOfTheBall), None);
    assert_eq!(cy.count_per_match(RunType::PullingWide), Some(2.6));
}

#[test]
fn parses_bare_array_response() {
    let raw = read_fixture("off_ball_runs_rows.json");
    let page = parse_off_ball_runs_json(&raw).expect("fixture should parse");
    assert_eq!(page.rows.len(), 1);
    assert!(page.next.is_none());
    assert_eq!(page.rows[0].player_name, "Dee Nine");
    assert_eq!(page.rows[0].minutes_played_per_match, 45.0);
    assert_eq!(page.rows[0].count_per_match(RunType::InBehind), Some(6.0));
}

#[test]
fn missing_fields_default() {
    let page =
        parse_off_ball_runs_json(r#"[{"player_name":"Solo"}]"#).expect("sparse row should parse");
    let row = &page.rows[0];
    assert_eq!(row.player_name, "Solo");
    assert_eq!(row.team_name, "");
    assert_eq!(row.minutes_played_per_match, 0.0);
    assert!(RunType::ALL.iter().all(|rt| row.count_per_match(*rt).is_none()));
}

#[test]
fn null_and_empty_bodies_are_empty() {
    assert!(parse_off_ball_runs_json("null").unwrap().rows.is_empty());
    assert!(parse_off_ball_runs_json("  ").unwrap().rows.is_empty());
    assert!(parse_off_ball_runs_json("[]").unwrap().rows.is_empty());
}

#[test]
fn malformed_body_is_an_error() {
    assert!(parse_off_ball_runs_json(r#"{"detail":"Invalid token."}"#).is_err());
}

#[test]
fn next_links_are_followed_and_concatenated() {
    let first = parse_off_ball_runs_json(&read_fixture("off_ball_runs_page1.json")).unwrap();
    let mut requested = Vec::new();
    let rows = follow_pages(first, 10, |url| {
        requested.push(url.to_string());
        parse_off_ball_runs_json(&read_fixture("off_ball_runs_rows.json"))
    })
    .unwrap();

    assert_eq!(requested.len(), 1);
    assert!(requested[0].contains("offset=3"));
    let names: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
    assert_eq!(names, vec!["Ada Striker", "Bea Forward", "Cy Winger", "Dee Nine"]);
}

#[test]
fn page_linking_to_itself_is_rejected() {
    let first = parse_off_ball_runs_json(&read_fixture("off_ball_runs_page1.json")).unwrap();
    let err = follow_pages(first, 10, |_| {
        parse_off_ball_runs_json(&read_fixture("off_ball_runs_page1.json"))
    })
    .unwrap_err();
    assert!(err.to_string().contains("pagination loop"));
}

#[test]
fn page_count_is_bounded() {
    let first = OffBallRunsPage {
        rows: Vec::new(),
        next: Some("page-1".to_string()),
    };
    let mut calls = 0usize;
    let err = follow_pages(first, 3, |url| {
        calls += 1;
        Ok(OffBallRunsPage {
            rows: Vec::new(),
            next: Some(format!("{url}+")),
        })
    })
    .unwrap_err();
    assert_eq!(calls, 2);
    assert!(err.to_string().contains("exceeded 3 pages"));
}

#[test]
fn fetch_errors_name_the_page() {
    let first = OffBallRunsPage {
        rows: Vec::new(),
        next: Some("page-2".to_string()),
    };
    let err = follow_pages(first, 10, |_| Err(anyhow::anyhow!("http 502"))).unwrap_err();
    assert!(err.to_string().contains("page 2"));
    assert!(format!("{err:#}").contains("http 502"));
}
