use crate::prize::Cadence;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Pure calendar math on naive local time. Hourly/daily are fixed windows
/// from the last spin; weekly/monthly advance to the next calendar boundary
/// (next Monday 00:00, 1st of next month 00:00) computed from the last spin,
/// not from now. A spin late in a calendar window still unlocks at the
/// boundary, not a fixed 7/30 days later.
pub fn next_eligible_naive(last: NaiveDateTime, cadence: Cadence) -> NaiveDateTime {
    match cadence {
        Cadence::Hourly => last + Duration::hours(1),
        Cadence::Daily => last + Duration::hours(24),
        Cadence::Weekly => {
            let days_until_monday = 8 - i64::from(last.weekday().number_from_monday());
            let monday = last.date() + Duration::days(days_until_monday);
            midnight(monday)
        }
        Cadence::Monthly => {
            let (year, month) = if last.month() == 12 {
                (last.year() + 1, 1)
            } else {
                (last.year(), last.month() + 1)
            };
            // The 1st always exists.
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(last.date());
            midnight(first)
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Next moment the user may spin again, or `None` when they have never spun
/// (already eligible). Calendar boundaries are resolved in the machine's
/// local timezone.
pub fn next_eligible_at(last: Option<DateTime<Utc>>, cadence: Cadence) -> Option<DateTime<Utc>> {
    let last = last?;
    let local_last = last.with_timezone(&Local).naive_local();
    let next = next_eligible_naive(local_last, cadence);
    let resolved = Local
        .from_local_datetime(&next)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&next));
    Some(resolved.with_timezone(&Utc))
}

/// Locked while `now` is strictly before the next eligible moment; the
/// boundary itself is unlocked. Never spun means never locked.
pub fn is_locked(last: Option<DateTime<Utc>>, cadence: Cadence, now: DateTime<Utc>) -> bool {
    match next_eligible_at(last, cadence) {
        Some(next) => now < next,
        None => false,
    }
}

/// Zero-padded `HH:MM:SS`; anything non-positive renders as the zero value.
pub fn format_countdown(ms: i64) -> String {
    let total_seconds = (ms / 1000).max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Compact `"Xm Ys"` / `"Xs"` variant used next to the wheel.
pub fn format_countdown_compact(ms: i64) -> String {
    if ms <= 0 {
        return "0s".to_string();
    }
    let seconds = (ms + 999) / 1000;
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, rest)
    } else {
        format!("{}s", rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_hourly_and_daily_are_fixed_windows() {
        let last = naive(2024, 1, 3, 10, 30);
        assert_eq!(
            next_eligible_naive(last, Cadence::Hourly),
            naive(2024, 1, 3, 11, 30)
        );
        assert_eq!(
            next_eligible_naive(last, Cadence::Daily),
            naive(2024, 1, 4, 10, 30)
        );
    }

    #[test]
    fn test_weekly_advances_to_next_monday_midnight() {
        // 2024-01-03 is a Wednesday; the next Monday is 2024-01-08.
        let wednesday = naive(2024, 1, 3, 15, 45);
        assert_eq!(
            next_eligible_naive(wednesday, Cadence::Weekly),
            naive(2024, 1, 8, 0, 0)
        );
    }

    #[test]
    fn test_weekly_on_monday_waits_a_full_week() {
        // Spinning on Monday unlocks the following Monday, not the same day.
        let monday = naive(2024, 1, 1, 0, 0);
        assert_eq!(
            next_eligible_naive(monday, Cadence::Weekly),
            naive(2024, 1, 8, 0, 0)
        );
    }

    #[test]
    fn test_monthly_advances_to_first_of_next_month() {
        let mid_month = naive(2024, 4, 17, 9, 0);
        assert_eq!(
            next_eligible_naive(mid_month, Cadence::Monthly),
            naive(2024, 5, 1, 0, 0)
        );
    }

    #[test]
    fn test_monthly_rolls_over_december() {
        let december = naive(2023, 12, 31, 23, 59);
        assert_eq!(
            next_eligible_naive(december, Cadence::Monthly),
            naive(2024, 1, 1, 0, 0)
        );
    }

    #[test]
    fn test_never_spun_is_always_unlocked() {
        let now = Utc::now();
        assert!(!is_locked(None, Cadence::Hourly, now));
        assert_eq!(next_eligible_at(None, Cadence::Monthly), None);
    }

    #[test]
    fn test_lock_boundary_is_unlocked() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let boundary = last + Duration::hours(1);
        assert!(is_locked(Some(last), Cadence::Hourly, boundary - Duration::seconds(1)));
        assert!(!is_locked(Some(last), Cadence::Hourly, boundary));
        assert!(!is_locked(Some(last), Cadence::Hourly, boundary + Duration::seconds(1)));
    }

    #[test]
    fn test_daily_lock_window() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let next = next_eligible_at(Some(last), Cadence::Daily).unwrap();
        assert_eq!(next - last, Duration::hours(24));
    }

    #[test]
    fn test_format_countdown_pads_and_clamps() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(-5000), "00:00:00");
        assert_eq!(format_countdown(1000), "00:00:01");
        assert_eq!(format_countdown(3_661_000), "01:01:01");
        assert_eq!(format_countdown(90_000_000), "25:00:00");
    }

    #[test]
    fn test_format_countdown_compact() {
        assert_eq!(format_countdown_compact(0), "0s");
        assert_eq!(format_countdown_compact(-1), "0s");
        assert_eq!(format_countdown_compact(500), "1s");
        assert_eq!(format_countdown_compact(59_000), "59s");
        assert_eq!(format_countdown_compact(61_000), "1m 1s");
    }
}
