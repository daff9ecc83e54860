#![forbid(unsafe_code)]

//! Display formatting helpers.
//!
//! The day label deliberately derives from the reference date plus a row's
//! own displayed minutes (rolling over only at the 1440 mark), not from the
//! synchronized instant. A projection that lands on the previous civil day
//! in some zone still shows the reference date there; this mirrors the
//! widget's documented behavior.

use jiff::civil::Date;
use jiff::Zoned;

use crate::MINUTES_PER_DAY;

/// 24-hour `HH:mm`.
#[must_use]
pub fn format_hm(minutes: u16) -> String {
    let m = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// 12-hour `h:mm AM/PM`.
#[must_use]
pub fn format_12h(minutes: u16) -> String {
    let m = minutes % MINUTES_PER_DAY;
    let hour24 = m / 60;
    let minute = m % 60;
    let (hour, suffix) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{hour}:{minute:02} {suffix}")
}

/// Parse 24-hour `H:mm`/`HH:mm` into minutes since midnight.
#[must_use]
pub fn parse_hm(input: &str) -> Option<u16> {
    let (h, m) = input.trim().split_once(':')?;
    let hour: u16 = h.parse().ok()?;
    let minute: u16 = m.parse().ok()?;
    if hour > 23 || minute > 59 || m.len() != 2 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Day label for a row: `Mon 1, January`, rolling to the next civil day
/// when the displayed minutes reach a full day.
#[must_use]
pub fn day_label(reference: Date, minutes: u16) -> String {
    let date = if minutes >= MINUTES_PER_DAY {
        reference.tomorrow().unwrap_or(reference)
    } else {
        reference
    };
    format!(
        "{} {}, {}",
        date.strftime("%a"),
        date.day(),
        date.strftime("%B")
    )
}

/// Timezone abbreviation at a zoned instant (`IST`, `EDT`, …).
#[must_use]
pub fn zone_abbreviation(zdt: &Zoned) -> String {
    zdt.strftime("%Z").to_string()
}

/// `GMT ±HH:MM` offset label at a zoned instant.
#[must_use]
pub fn gmt_offset_label(zdt: &Zoned) -> String {
    let seconds = zdt.offset().seconds();
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("GMT {}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use crate::sync;

    #[test]
    fn hm_formats_zero_padded() {
        assert_eq!(format_hm(0), "00:00");
        assert_eq!(format_hm(330), "05:30");
        assert_eq!(format_hm(1439), "23:59");
        assert_eq!(format_hm(1440), "00:00");
    }

    #[test]
    fn twelve_hour_edges() {
        assert_eq!(format_12h(0), "12:00 AM");
        assert_eq!(format_12h(45), "12:45 AM");
        assert_eq!(format_12h(720), "12:00 PM");
        assert_eq!(format_12h(765), "12:45 PM");
        assert_eq!(format_12h(1439), "11:59 PM");
    }

    #[test]
    fn parse_hm_accepts_valid() {
        assert_eq!(parse_hm("05:30"), Some(330));
        assert_eq!(parse_hm("0:00"), Some(0));
        assert_eq!(parse_hm(" 23:59 "), Some(1439));
    }

    #[test]
    fn parse_hm_rejects_invalid() {
        assert_eq!(parse_hm("24:00"), None);
        assert_eq!(parse_hm("12:60"), None);
        assert_eq!(parse_hm("12:5"), None);
        assert_eq!(parse_hm("noon"), None);
        assert_eq!(parse_hm(""), None);
    }

    #[test]
    fn day_label_plain_and_rollover() {
        let d = date(2024, 1, 1);
        assert_eq!(day_label(d, 0), "Mon 1, January");
        assert_eq!(day_label(d, 1439), "Mon 1, January");
        assert_eq!(day_label(d, 1440), "Tue 2, January");
    }

    #[test]
    fn abbreviation_and_offset_for_kolkata() {
        let tz = TimeZone::get("Asia/Kolkata").unwrap();
        let zdt = sync::zoned_at(date(2024, 1, 1), &tz, 330).unwrap();
        assert_eq!(zone_abbreviation(&zdt), "IST");
        assert_eq!(gmt_offset_label(&zdt), "GMT +05:30");
    }

    #[test]
    fn offset_label_negative() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let zdt = sync::zoned_at(date(2024, 1, 1), &tz, 0).unwrap();
        assert_eq!(gmt_offset_label(&zdt), "GMT -05:00");
    }

    #[test]
    fn offset_label_utc() {
        let tz = TimeZone::get("UTC").unwrap();
        let zdt = sync::zoned_at(date(2024, 1, 1), &tz, 0).unwrap();
        assert_eq!(gmt_offset_label(&zdt), "GMT +00:00");
    }
}
