use crate::domain::{TemporalKey, temporal_key};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Grid column order.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Short lowercase label shown above each grid cell.
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sun",
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
    }
}

/// The seven calendar days shown in the grid, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWeek {
    start: NaiveDate,
}

impl DisplayWeek {
    pub fn containing(date: NaiveDate) -> Self {
        let days_since_sunday = date.weekday().num_days_from_sunday() as i64;
        Self {
            start: date - Duration::days(days_since_sunday),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn date_of(&self, day: Weekday) -> NaiveDate {
        self.start + Duration::days(day.num_days_from_sunday() as i64)
    }

    pub fn key_of(&self, day: Weekday) -> TemporalKey {
        temporal_key(self.date_of(day))
    }

    /// Ordered `(day, key)` pairs driving a full grid render.
    pub fn slots(&self) -> impl Iterator<Item = (Weekday, TemporalKey)> {
        let week = *self;
        WEEK_DAYS.into_iter().map(move |day| (day, week.key_of(day)))
    }

    pub fn shifted(&self, weeks: i64) -> Self {
        Self {
            start: self.start + Duration::weeks(weeks),
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
    fn week_starts_on_sunday() {
        // 2024-03-13 is a Wednesday
        let week = DisplayWeek::containing(date(2024, 3, 13));
        assert_eq!(week.start(), date(2024, 3, 10));
        assert_eq!(week.end(), date(2024, 3, 16));
        assert_eq!(DisplayWeek::containing(date(2024, 3, 10)), week);
        assert_eq!(DisplayWeek::containing(date(2024, 3, 16)), week);
    }

    #[test]
    fn slots_cover_seven_consecutive_days() {
        let week = DisplayWeek::containing(date(2023, 12, 28));
        let slots: Vec<_> = week.slots().collect();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].0, Weekday::Sun);
        assert_eq!(slots[0].1.to_string(), "2023-12-24");
        assert_eq!(slots[6].1.to_string(), "2023-12-30");
    }

    #[test]
    fn key_of_matches_date_of() {
        let week = DisplayWeek::containing(date(2024, 2, 27));
        assert_eq!(week.date_of(Weekday::Thu), date(2024, 2, 29));
        assert_eq!(week.key_of(Weekday::Thu).to_string(), "2024-02-29");
        assert!(week.contains(date(2024, 2, 29)));
        assert!(!week.contains(date(2024, 3, 3)));
    }

    #[test]
    fn shifting_moves_whole_weeks() {
        let week = DisplayWeek::containing(date(2024, 3, 13));
        assert_eq!(week.shifted(1).start(), date(2024, 3, 17));
        assert_eq!(week.shifted(-1).start(), date(2024, 3, 3));
    }

    #[test]
    fn labels_follow_column_order() {
        let labels: Vec<&str> = WEEK_DAYS.iter().map(|d| day_label(*d)).collect();
        assert_eq!(labels, ["sun", "mon", "tue", "wed", "thu", "fri", "sat"]);
    }
}
