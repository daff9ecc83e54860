//! Board-level scenarios: synchronization round trips, ordering, and the
//! fixed conversion cases.

use jiff::civil::date;
use proptest::prelude::*;
use zoneboard_core::{sync, ZoneBoard, ZoneKey};

fn board_with(zones: &[&str]) -> ZoneBoard {
    let mut board = ZoneBoard::new(date(2024, 1, 1));
    for z in zones {
        board.add_zone(z).unwrap();
    }
    board
}

#[test]
fn kolkata_utc_scenario() {
    // Kolkata 05:30 on 2024-01-01 is UTC midnight; 12:00 is UTC 06:30.
    let mut board = board_with(&["Asia/Kolkata", "UTC"]);
    let kolkata = ZoneKey::from_iana("Asia/Kolkata");
    let utc = ZoneKey::from_iana("UTC");

    board.edit_zone(&kolkata, 5 * 60 + 30).unwrap();
    assert_eq!(board.get(&utc).unwrap().minutes(), 0);

    board.edit_zone(&kolkata, 12 * 60).unwrap();
    assert_eq!(board.get(&utc).unwrap().minutes(), 6 * 60 + 30);
}

#[test]
fn editing_either_side_agrees() {
    let mut board = board_with(&["Asia/Kolkata", "UTC"]);
    let kolkata = ZoneKey::from_iana("Asia/Kolkata");
    let utc = ZoneKey::from_iana("UTC");

    board.edit_zone(&utc, 0).unwrap();
    assert_eq!(board.get(&kolkata).unwrap().minutes(), 330);

    board.edit_zone(&kolkata, 330).unwrap();
    assert_eq!(board.get(&utc).unwrap().minutes(), 0);
}

#[test]
fn add_then_remove_restores_prior_state() {
    let mut board = board_with(&["Asia/Kolkata", "UTC"]);
    let kolkata = ZoneKey::from_iana("Asia/Kolkata");
    board.edit_zone(&kolkata, 600).unwrap();

    let before: Vec<(String, u16)> = board
        .rows()
        .iter()
        .map(|r| (r.key().as_str().to_string(), r.minutes()))
        .collect();

    let lower = sync::current_minutes_in(&jiff::tz::TimeZone::get("America/New_York").unwrap());
    let key = board.add_zone("America/New_York").unwrap();
    let upper = sync::current_minutes_in(&jiff::tz::TimeZone::get("America/New_York").unwrap());

    // Appended at the end, holding the current instant's New York time.
    assert_eq!(board.position(&key), Some(2));
    let added = board.get(&key).unwrap().minutes();
    // The clock may tick across the midnight wrap between samples.
    if lower <= upper {
        assert!((lower..=upper).contains(&added));
    } else {
        assert!(added >= lower || added <= upper);
    }

    assert!(board.remove_zone(&key));
    let after: Vec<(String, u16)> = board
        .rows()
        .iter()
        .map(|r| (r.key().as_str().to_string(), r.minutes()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn reverse_twice_is_identity() {
    let board = board_with(&["Asia/Kolkata", "UTC", "Asia/Tokyo"]);
    let forward: Vec<&str> = board.display_rows(false).map(|r| r.key().as_str()).collect();
    let twice: Vec<&str> = {
        let once: Vec<&ZoneKey> = board.display_rows(true).map(|r| r.key()).collect();
        once.into_iter().rev().map(ZoneKey::as_str).collect()
    };
    assert_eq!(forward, twice);
}

// DST-free zones keep the round-trip arithmetic exact for every date.
const STABLE_ZONES: &[&str] = &["UTC", "Asia/Kolkata", "Asia/Tokyo", "America/Phoenix"];

proptest! {
    /// After any edit, every pair of rows denotes the same instant, modulo
    /// whole calendar days (displayed times carry no date).
    #[test]
    fn round_trip_consistency(
        edited in 0usize..4,
        observed in 0usize..4,
        minutes in 0u16..=1440,
        day in 0i64..364,
    ) {
        let reference = date(2024, 1, 1)
            .checked_add(jiff::Span::new().days(day))
            .unwrap();
        let mut board = ZoneBoard::new(reference);
        for z in STABLE_ZONES {
            board.add_zone(z).unwrap();
        }
        let edited_key = ZoneKey::from_iana(STABLE_ZONES[edited]);
        let observed_key = ZoneKey::from_iana(STABLE_ZONES[observed]);

        board.edit_zone(&edited_key, minutes).unwrap();

        let a = board.instant_for(&edited_key).unwrap().unwrap();
        let b = board.instant_for(&observed_key).unwrap().unwrap();
        let delta = (a.as_second() - b.as_second()).abs();
        prop_assert_eq!(delta % 86_400, 0, "instants differ by {} seconds", delta);
        prop_assert!(delta <= 86_400);
    }

    /// Reorder is exactly remove-at-`from` + reinsert-at-`to`.
    #[test]
    fn reorder_matches_remove_and_reinsert(from in 0usize..6, to in 0usize..6) {
        let zones = [
            "UTC",
            "Asia/Kolkata",
            "Asia/Tokyo",
            "Europe/London",
            "America/Phoenix",
            "Australia/Sydney",
        ];
        let mut board = ZoneBoard::new(date(2024, 1, 1));
        for z in zones {
            board.add_zone(z).unwrap();
        }

        let mut expected: Vec<String> = board
            .rows()
            .iter()
            .map(|r| r.key().as_str().to_string())
            .collect();
        let moved = expected.remove(from);
        expected.insert(to, moved);

        board.reorder(from, to);
        let got: Vec<String> = board
            .rows()
            .iter()
            .map(|r| r.key().as_str().to_string())
            .collect();
        prop_assert_eq!(got, expected);
    }
}
