use chrono::{Duration, Local, NaiveDate};

/// Number of selectable days, today included.
pub const WINDOW_DAYS: i64 = 7;

const DAY_FORMAT: &str = "%a %b %d %Y";

/// Supplies "today" for the date selector.
pub trait DateSource: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Device-local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDates;

impl DateSource for SystemDates {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Renders a day as e.g. `Mon Oct 19 2026`.
pub fn day_string(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Today followed by each of the preceding six days.
pub fn date_window(today: NaiveDate) -> Vec<String> {
    (0..WINDOW_DAYS)
        .map(|offset| day_string(today - Duration::days(offset)))
        .collect()
}
