#![forbid(unsafe_code)]

//! Instant arithmetic for the time synchronization engine.
//!
//! The conversions all follow the same path the widget exposes: a
//! wall-clock time-of-day on the shared reference date, interpreted in one
//! zone, pinned to an absolute instant, then projected back into another
//! zone's wall clock. Disambiguation across DST gaps/folds uses jiff's
//! compatible mode (a gap resolves forward), matching how the original
//! interpreted ambiguous local times.

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};

use crate::Error;

/// Minutes since midnight for a civil time (seconds truncated).
#[must_use]
pub fn minutes_of(time: Time) -> u16 {
    time.hour() as u16 * 60 + time.minute() as u16
}

/// The zoned datetime at `date` midnight plus `minutes`, in `tz`.
///
/// `minutes` may be the full 1440, in which case the result is midnight of
/// the following civil day.
pub fn zoned_at(date: Date, tz: &TimeZone, minutes: u16) -> Result<Zoned, Error> {
    let dt = date
        .at(0, 0, 0, 0)
        .checked_add(Span::new().minutes(i64::from(minutes)))
        .map_err(Error::OutOfRange)?;
    tz.to_zoned(dt).map_err(Error::OutOfRange)
}

/// The absolute instant for a wall-clock edit in `tz`.
pub fn instant_at(date: Date, tz: &TimeZone, minutes: u16) -> Result<Timestamp, Error> {
    zoned_at(date, tz, minutes).map(|z| z.timestamp())
}

/// Project a wall-clock edit in `from` into `to`'s time-of-day.
pub fn project(date: Date, from: &TimeZone, minutes: u16, to: &TimeZone) -> Result<u16, Error> {
    let ts = instant_at(date, from, minutes)?;
    Ok(minutes_of(ts.to_zoned(to.clone()).time()))
}

/// The current instant's time-of-day in `tz`.
#[must_use]
pub fn current_minutes_in(tz: &TimeZone) -> u16 {
    minutes_of(Timestamp::now().to_zoned(tz.clone()).time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn tz(name: &str) -> TimeZone {
        TimeZone::get(name).unwrap()
    }

    #[test]
    fn minutes_of_truncates_seconds() {
        assert_eq!(minutes_of(Time::constant(5, 30, 59, 0)), 330);
        assert_eq!(minutes_of(Time::constant(0, 0, 0, 0)), 0);
        assert_eq!(minutes_of(Time::constant(23, 59, 0, 0)), 1439);
    }

    #[test]
    fn kolkata_to_utc() {
        // Kolkata is UTC+5:30, no DST.
        let d = date(2024, 1, 1);
        let got = project(d, &tz("Asia/Kolkata"), 330, &tz("UTC")).unwrap();
        assert_eq!(got, 0);
    }

    #[test]
    fn utc_to_kolkata() {
        let d = date(2024, 1, 1);
        let got = project(d, &tz("UTC"), 0, &tz("Asia/Kolkata")).unwrap();
        assert_eq!(got, 330);
    }

    #[test]
    fn projection_can_cross_midnight() {
        // 00:15 in Kolkata is 18:45 the previous day in UTC; only the
        // time-of-day is reported.
        let d = date(2024, 1, 1);
        let got = project(d, &tz("Asia/Kolkata"), 15, &tz("UTC")).unwrap();
        assert_eq!(got, 18 * 60 + 45);
    }

    #[test]
    fn full_day_rolls_to_next_midnight() {
        let d = date(2024, 1, 1);
        let z = zoned_at(d, &tz("UTC"), 1440).unwrap();
        assert_eq!(z.date(), date(2024, 1, 2));
        assert_eq!(minutes_of(z.time()), 0);
    }

    #[test]
    fn dst_gap_resolves_forward() {
        // US spring-forward 2024-03-10: 02:30 does not exist in New York.
        let d = date(2024, 3, 10);
        let z = zoned_at(d, &tz("America/New_York"), 150).unwrap();
        assert_eq!(z.hour(), 3);
    }

    #[test]
    fn same_zone_projection_is_identity_mod_day() {
        let d = date(2024, 6, 15);
        let z = tz("Asia/Tokyo");
        for minutes in [0u16, 1, 719, 720, 1439] {
            assert_eq!(project(d, &z, minutes, &z).unwrap(), minutes);
        }
    }
}
