#![forbid(unsafe_code)]

//! The tracked timezone set and its synchronized time board.
//!
//! `ZoneBoard` is one ordered structure holding what the UI observes as two
//! mappings in lockstep: zone-key → IANA identifier, and zone-key →
//! time-of-day. Insertion order is the display order (possibly reversed by
//! the presentation layer); reordering mutates the underlying order
//! directly.
//!
//! # Invariants
//!
//! 1. Zone-keys are unique; the key is the row identity.
//! 2. After [`ZoneBoard::edit_zone`] returns `Ok`, every row's time-of-day
//!    is the projection of one absolute instant on the reference date.
//! 3. [`ZoneBoard::set_reference_date`] keeps wall-clock times unchanged —
//!    instants are deliberately not re-anchored across date changes.
//! 4. Add/remove never disturb the relative order of other rows.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use tracing::debug;

use crate::sync;
use crate::zone::ZoneKey;
use crate::{Error, MINUTES_PER_DAY};

/// One tracked timezone row.
#[derive(Debug, Clone)]
pub struct ZoneRow {
    key: ZoneKey,
    iana: String,
    tz: TimeZone,
    minutes: u16,
}

impl ZoneRow {
    /// The row's zone-key.
    #[must_use]
    pub fn key(&self) -> &ZoneKey {
        &self.key
    }

    /// The IANA identifier this row tracks.
    #[must_use]
    pub fn iana(&self) -> &str {
        &self.iana
    }

    /// The resolved timezone.
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Displayed wall-clock time-of-day, minutes since midnight (0–1439).
    #[must_use]
    pub fn minutes(&self) -> u16 {
        self.minutes
    }
}

/// The ordered set of tracked timezones plus their synchronized times.
#[derive(Debug, Clone)]
pub struct ZoneBoard {
    rows: Vec<ZoneRow>,
    reference_date: Date,
}

impl ZoneBoard {
    /// An empty board for the given reference date.
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            rows: Vec::new(),
            reference_date,
        }
    }

    /// A board seeded with the default pair: the system locale zone
    /// (falling back to `Asia/Kolkata` when the system zone carries no IANA
    /// name) and `UTC`, each at the current instant's local time.
    #[must_use]
    pub fn with_default_zones(reference_date: Date) -> Self {
        let mut board = Self::new(reference_date);
        let system = TimeZone::system();
        // A system zone that is UTC (or unidentifiable) would collapse the
        // default pair into one row; fall back to the stock locale zone.
        let local = match system.iana_name() {
            Some(name) if name != "UTC" && name != "Etc/UTC" => name.to_string(),
            _ => "Asia/Kolkata".to_string(),
        };
        for name in [local.as_str(), "UTC"] {
            if let Err(e) = board.add_zone(name) {
                debug!(zone = name, error = %e, "default zone not resolvable, skipped");
            }
        }
        board
    }

    /// The shared reference date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Replace the reference date. Wall-clock times are kept as-is; the
    /// instants they denote shift with the date.
    pub fn set_reference_date(&mut self, date: Date) {
        self.reference_date = date;
    }

    /// Number of tracked zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no zones are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[ZoneRow] {
        &self.rows
    }

    /// Rows in display order: insertion order, or its reverse.
    pub fn display_rows(&self, reverse: bool) -> impl Iterator<Item = &ZoneRow> {
        let iter = self.rows.iter();
        if reverse {
            Box::new(iter.rev()) as Box<dyn Iterator<Item = &ZoneRow>>
        } else {
            Box::new(iter)
        }
    }

    /// Look up a row by key.
    #[must_use]
    pub fn get(&self, key: &ZoneKey) -> Option<&ZoneRow> {
        self.rows.iter().find(|r| r.key == *key)
    }

    /// Index of a row in insertion order.
    #[must_use]
    pub fn position(&self, key: &ZoneKey) -> Option<usize> {
        self.rows.iter().position(|r| r.key == *key)
    }

    /// Track a new timezone, appended at the end of the current order with
    /// the current instant's local time in that zone.
    ///
    /// Re-adding an identifier whose key is already present refreshes that
    /// row in place (time reset to now; position preserved).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownZone`] when the identifier does not resolve;
    /// the board is unchanged.
    pub fn add_zone(&mut self, iana: &str) -> Result<ZoneKey, Error> {
        let tz = TimeZone::get(iana).map_err(|source| Error::UnknownZone {
            name: iana.to_string(),
            source,
        })?;
        let key = ZoneKey::from_iana(iana);
        let minutes = sync::current_minutes_in(&tz);
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.iana = iana.to_string();
            row.tz = tz;
            row.minutes = minutes;
            debug!(key = %key, "zone already tracked, refreshed in place");
        } else {
            self.rows.push(ZoneRow {
                key: key.clone(),
                iana: iana.to_string(),
                tz,
                minutes,
            });
            debug!(key = %key, total = self.rows.len(), "zone added");
        }
        Ok(key)
    }

    /// Stop tracking a zone. Returns `false` (no-op) when the key is
    /// absent. Remaining rows keep their times; they are still mutually
    /// consistent.
    pub fn remove_zone(&mut self, key: &ZoneKey) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.rows.remove(idx);
                debug!(key = %key, total = self.rows.len(), "zone removed");
                true
            }
            None => false,
        }
    }

    /// Stable move of the row at `from` to position `to` in insertion
    /// order: equivalent to removing the element at `from` and reinserting
    /// it at `to`. Out-of-range `to` is clamped; `from == to` and
    /// out-of-range `from` are no-ops. Returns whether the order changed.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() {
            return false;
        }
        let to = to.min(self.rows.len() - 1);
        if from == to {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        debug!(from, to, "rows reordered");
        true
    }

    /// Apply a wall-clock edit to one zone and re-project every other row
    /// so all rows denote the same instant on the reference date.
    ///
    /// `minutes` may span the full slider range (0–1440 inclusive); the
    /// stored time-of-day is reduced modulo one day. An absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when the edit cannot be pinned to an
    /// instant (reference date at the edge of the representable range); the
    /// board is unchanged.
    pub fn edit_zone(&mut self, key: &ZoneKey, minutes: u16) -> Result<(), Error> {
        let Some(edited) = self.position(key) else {
            debug!(key = %key, "edit for untracked zone ignored");
            return Ok(());
        };
        let instant = sync::instant_at(self.reference_date, &self.rows[edited].tz, minutes)?;
        // Compute all projections before mutating anything.
        let mut updated = Vec::with_capacity(self.rows.len());
        for (idx, row) in self.rows.iter().enumerate() {
            if idx == edited {
                updated.push(minutes % MINUTES_PER_DAY);
            } else {
                updated.push(sync::minutes_of(instant.to_zoned(row.tz.clone()).time()));
            }
        }
        for (row, minutes) in self.rows.iter_mut().zip(updated) {
            row.minutes = minutes;
        }
        debug!(key = %key, minutes, "board synchronized");
        Ok(())
    }

    /// The instant a row's displayed time denotes on the reference date.
    ///
    /// `None` for untracked keys.
    pub fn instant_for(&self, key: &ZoneKey) -> Option<Result<Timestamp, Error>> {
        let row = self.get(key)?;
        Some(sync::instant_at(self.reference_date, &row.tz, row.minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn board_with(reference: Date, zones: &[&str]) -> ZoneBoard {
        let mut board = ZoneBoard::new(reference);
        for z in zones {
            board.add_zone(z).unwrap();
        }
        board
    }

    fn keys(board: &ZoneBoard) -> Vec<&str> {
        board.rows().iter().map(|r| r.key().as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC", "Europe/London"]);
        assert_eq!(keys(&board), ["Asia-Kolkata", "UTC", "Europe-London"]);
    }

    #[test]
    fn add_unknown_zone_leaves_board_unchanged() {
        let mut board = board_with(date(2024, 1, 1), &["UTC"]);
        let err = board.add_zone("Not/A_Zone").unwrap_err();
        assert!(matches!(err, Error::UnknownZone { .. }));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn duplicate_add_refreshes_in_place() {
        let mut board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC"]);
        let key = ZoneKey::from_iana("Asia/Kolkata");
        board.edit_zone(&key, 90).unwrap();
        board.add_zone("Asia/Kolkata").unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.position(&key), Some(0));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut board = board_with(date(2024, 1, 1), &["UTC"]);
        assert!(!board.remove_zone(&ZoneKey::from_iana("Europe/Paris")));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut board = board_with(
            date(2024, 1, 1),
            &["Asia/Kolkata", "UTC", "Europe/London", "Asia/Tokyo"],
        );
        board.remove_zone(&ZoneKey::from_iana("UTC"));
        assert_eq!(keys(&board), ["Asia-Kolkata", "Europe-London", "Asia-Tokyo"]);
    }

    #[test]
    fn reorder_is_a_stable_move() {
        let mut board = board_with(
            date(2024, 1, 1),
            &["Asia/Kolkata", "UTC", "Europe/London", "Asia/Tokyo"],
        );
        assert!(board.reorder(0, 2));
        assert_eq!(keys(&board), ["UTC", "Europe-London", "Asia-Kolkata", "Asia-Tokyo"]);
    }

    #[test]
    fn reorder_self_and_out_of_range_are_noops() {
        let mut board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC"]);
        assert!(!board.reorder(1, 1));
        assert!(!board.reorder(5, 0));
        assert_eq!(keys(&board), ["Asia-Kolkata", "UTC"]);
    }

    #[test]
    fn reorder_clamps_destination() {
        let mut board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC", "Asia/Tokyo"]);
        assert!(board.reorder(0, 99));
        assert_eq!(keys(&board), ["UTC", "Asia-Tokyo", "Asia-Kolkata"]);
    }

    #[test]
    fn edit_zone_synchronizes_all_rows() {
        let mut board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC"]);
        let kolkata = ZoneKey::from_iana("Asia/Kolkata");
        board.edit_zone(&kolkata, 330).unwrap();
        assert_eq!(board.get(&ZoneKey::from_iana("UTC")).unwrap().minutes(), 0);

        board.edit_zone(&kolkata, 720).unwrap();
        assert_eq!(
            board.get(&ZoneKey::from_iana("UTC")).unwrap().minutes(),
            390
        );
    }

    #[test]
    fn edit_zone_full_day_stores_midnight() {
        let mut board = board_with(date(2024, 1, 1), &["UTC", "Asia/Kolkata"]);
        let utc = ZoneKey::from_iana("UTC");
        board.edit_zone(&utc, 1440).unwrap();
        assert_eq!(board.get(&utc).unwrap().minutes(), 0);
        // Next-day midnight UTC is 05:30 in Kolkata.
        assert_eq!(
            board.get(&ZoneKey::from_iana("Asia/Kolkata")).unwrap().minutes(),
            330
        );
    }

    #[test]
    fn edit_untracked_zone_is_noop() {
        let mut board = board_with(date(2024, 1, 1), &["UTC"]);
        let before = board.get(&ZoneKey::from_iana("UTC")).unwrap().minutes();
        board
            .edit_zone(&ZoneKey::from_iana("Europe/Paris"), 600)
            .unwrap();
        assert_eq!(
            board.get(&ZoneKey::from_iana("UTC")).unwrap().minutes(),
            before
        );
    }

    #[test]
    fn date_change_keeps_wall_clock_times() {
        let mut board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC"]);
        let kolkata = ZoneKey::from_iana("Asia/Kolkata");
        board.edit_zone(&kolkata, 330).unwrap();
        let before: Vec<u16> = board.rows().iter().map(ZoneRow::minutes).collect();
        board.set_reference_date(date(2024, 6, 15));
        let after: Vec<u16> = board.rows().iter().map(ZoneRow::minutes).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn display_rows_reverse() {
        let board = board_with(date(2024, 1, 1), &["Asia/Kolkata", "UTC"]);
        let forward: Vec<&str> = board.display_rows(false).map(|r| r.key().as_str()).collect();
        let reversed: Vec<&str> = board.display_rows(true).map(|r| r.key().as_str()).collect();
        assert_eq!(forward, ["Asia-Kolkata", "UTC"]);
        assert_eq!(reversed, ["UTC", "Asia-Kolkata"]);
    }
}
