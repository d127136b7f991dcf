//! Record filtering for report generation.
//!
//! Narrows fetched worksheet rows to one user, optionally to the current
//! calendar day. The date parse format is the store's *display* format
//! (`DD/MM/YYYY hh:mm:ss AM/PM`), not the format the write path emits — the
//! store reformats cells between write and read (see DESIGN.md).

use chrono::{NaiveDate, NaiveDateTime};

use crate::sheets::SheetRecord;

/// Store-native display format parsed when filtering by day.
pub const DATE_READ_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Report scope. Anything other than "today" means unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    All,
}

impl Period {
    pub fn parse(s: &str) -> Self {
        if s == "today" {
            Period::Today
        } else {
            Period::All
        }
    }
}

/// Select the records belonging to `user`, in their original order.
///
/// `User` match is exact and case-sensitive. With [`Period::Today`], a
/// record survives only if its `Date` cell parses under
/// [`DATE_READ_FORMAT`] *and* falls on `today`; missing or unparseable
/// dates are dropped, not counted as today. `today` is injected by the
/// caller (`Local::now().date_naive()` in production) so the logic stays
/// deterministic under test.
pub fn filter_records(
    records: &[SheetRecord],
    user: &str,
    period: Period,
    today: NaiveDate,
) -> Vec<SheetRecord> {
    records
        .iter()
        .filter(|r| r.get("User").map(String::as_str) == Some(user))
        .filter(|r| match period {
            Period::All => true,
            Period::Today => r
                .get("Date")
                .and_then(|d| NaiveDateTime::parse_from_str(d, DATE_READ_FORMAT).ok())
                .is_some_and(|dt| dt.date() == today),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: &str, date: Option<&str>) -> SheetRecord {
        let mut r = SheetRecord::new();
        r.insert("User".to_string(), user.to_string());
        r.insert("Message".to_string(), format!("{user}'s update"));
        if let Some(d) = date {
            r.insert("Date".to_string(), d.to_string());
        }
        r
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_parse_accepts_only_today() {
        assert_eq!(Period::parse("today"), Period::Today);
        assert_eq!(Period::parse("all"), Period::All);
        assert_eq!(Period::parse("week"), Period::All);
        assert_eq!(Period::parse("Today"), Period::All);
    }

    #[test]
    fn user_filter_is_exact_and_order_preserving() {
        let records = vec![
            record("Alice", None),
            record("Bob", None),
            record("alice", None),
            record("Alice", Some("ignored")),
        ];
        let out = filter_records(&records, "Alice", Period::All, day(2026, 8, 27));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], records[0]);
        assert_eq!(out[1], records[3]);
    }

    #[test]
    fn today_keeps_only_matching_calendar_day() {
        let today = day(2026, 8, 27);
        let records = vec![
            record("Alice", Some("27/08/2026 09:15:00 AM")),
            record("Alice", Some("26/08/2026 11:59:59 PM")),
            record("Alice", Some("27/08/2026 10:30:00 PM")),
        ];
        let out = filter_records(&records, "Alice", Period::Today, today);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], records[0]);
        assert_eq!(out[1], records[2]);
    }

    #[test]
    fn today_drops_unparseable_and_missing_dates() {
        let today = day(2026, 8, 27);
        let records = vec![
            // write-path format — does not parse under the read format
            record("Alice", Some("2026-08-27 09:15:00")),
            record("Alice", Some("not a date")),
            record("Alice", None),
        ];
        let out = filter_records(&records, "Alice", Period::Today, today);
        assert!(out.is_empty());
    }

    #[test]
    fn today_still_excludes_other_users() {
        let today = day(2026, 8, 27);
        let records = vec![record("Bob", Some("27/08/2026 08:00:00 AM"))];
        assert!(filter_records(&records, "Alice", Period::Today, today).is_empty());
    }
}
