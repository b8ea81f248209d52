//! Time and date formatting for display.

use chrono::NaiveDate;

/// Format seconds as `HH:MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format fractional seconds as `HH:MM:SS`, rounding down.
pub fn format_clock_f64(seconds: f64) -> String {
    format_clock(seconds.max(0.0).floor() as u64)
}

/// Format a calendar date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date relative to today (e.g. "yesterday", "3 days ago").
pub fn format_relative_day(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();

    if days < 0 {
        return if days == -1 {
            "tomorrow".to_string()
        } else {
            format!("in {} days", -days)
        };
    }

    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=29 => format!("{} days ago", days),
        _ => {
            let months = days / 30;
            if months < 12 {
                if months == 1 {
                    "1 month ago".to_string()
                } else {
                    format!("{} months ago", months)
                }
            } else if months / 12 == 1 {
                "1 year ago".to_string()
            } else {
                format!("{} years ago", months / 12)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn clock_pads_fields() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(873), "00:14:33");
        assert_eq!(format_clock(3 * 3600 + 61), "03:01:01");
    }

    #[test]
    fn clock_from_average() {
        assert_eq!(format_clock_f64(872.6), "00:14:32");
        assert_eq!(format_clock_f64(-3.0), "00:00:00");
    }

    #[test]
    fn date_is_day_first() {
        assert_eq!(format_date(date(2024, 3, 1)), "01/03/2024");
    }

    #[test]
    fn relative_today_and_yesterday() {
        let today = date(2024, 3, 10);
        assert_eq!(format_relative_day(today, today), "today");
        assert_eq!(format_relative_day(date(2024, 3, 9), today), "yesterday");
    }

    #[test]
    fn relative_days() {
        assert_eq!(
            format_relative_day(date(2024, 3, 5), date(2024, 3, 10)),
            "5 days ago"
        );
    }

    #[test]
    fn relative_months_and_years() {
        let today = date(2024, 3, 10);
        assert_eq!(format_relative_day(date(2024, 2, 5), today), "1 month ago");
        assert_eq!(format_relative_day(date(2023, 12, 1), today), "3 months ago");
        assert_eq!(format_relative_day(date(2023, 1, 1), today), "1 year ago");
    }

    #[test]
    fn relative_future() {
        let today = date(2024, 3, 10);
        assert_eq!(format_relative_day(date(2024, 3, 11), today), "tomorrow");
        assert_eq!(format_relative_day(date(2024, 3, 14), today), "in 4 days");
    }
}
