//! Month-grid and upcoming-event computations behind the events calendar.
//!
//! Everything here is pure: callers fetch events and pass in "today".

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::domain::{month_name, Event, EventCategory};

/// A (year, month) pair with `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// Resolves raw `year`/`month` query values. Missing values take today's
    /// year or month; anything unparseable or out of range discards both and
    /// falls back to today's month.
    pub fn from_query(year: Option<&str>, month: Option<&str>, today: NaiveDate) -> Self {
        let current = Self::of(today);
        let parse = |raw: Option<&str>, default: i64| -> Option<i64> {
            match raw.map(str::trim).filter(|v| !v.is_empty()) {
                Some(v) => v.parse::<i64>().ok(),
                None => Some(default),
            }
        };

        let year = parse(year, current.year as i64).and_then(|y| i32::try_from(y).ok());
        let month = parse(month, current.month as i64).and_then(|m| u32::try_from(m).ok());

        match (year, month) {
            (Some(y), Some(m)) if (1..=9999).contains(&y) => Self::new(y, m).unwrap_or(current),
            _ => current,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        (next - self.first_day()).num_days() as u32
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month).unwrap_or("")
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub day: u32,
    /// False for padding days borrowed from the neighbouring months.
    pub in_month: bool,
}

pub type Week = [GridDay; 7];

/// Sunday-first weeks covering the whole month, padded with the trailing days
/// of the previous month and the leading days of the next.
pub fn month_grid(target: YearMonth) -> Vec<Week> {
    let first = target.first_day();
    let last = first + Duration::days(target.days_in_month() as i64 - 1);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    let mut weeks = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let week: Week = std::array::from_fn(|offset| {
            let date = cursor + Duration::days(offset as i64);
            GridDay {
                date,
                day: date.day(),
                in_month: date.year() == target.year && date.month() == target.month,
            }
        });
        weeks.push(week);
        cursor += Duration::days(7);
    }
    weeks
}

/// Day numbers within `target` that have at least one event.
pub fn event_days(events: &[Event], target: YearMonth) -> BTreeSet<u32> {
    let days_in_month = target.days_in_month();
    events
        .iter()
        .filter(|e| e.year == target.year && e.month == target.month)
        .map(|e| e.day)
        .filter(|day| (1..=days_in_month).contains(day))
        .collect()
}

/// Number of events on or after `today`, per category. Categories without an
/// upcoming event are absent.
pub fn upcoming_counts(events: &[Event], today: NaiveDate) -> BTreeMap<EventCategory, usize> {
    let mut counts = BTreeMap::new();
    for event in events.iter().filter(|e| e.is_upcoming(today)) {
        *counts.entry(event.category).or_insert(0) += 1;
    }
    counts
}

/// The server's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Everything the calendar widget needs for one month.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub current: YearMonth,
    pub month_name: &'static str,
    pub weeks: Vec<Week>,
    pub event_days: BTreeSet<u32>,
    pub previous: YearMonth,
    pub next: YearMonth,
    pub upcoming_counts: BTreeMap<EventCategory, usize>,
}

impl CalendarView {
    pub fn build(events: &[Event], target: YearMonth, today: NaiveDate) -> Self {
        Self {
            current: target,
            month_name: target.name(),
            weeks: month_grid(target),
            event_days: event_days(events, target),
            previous: target.previous(),
            next: target.next(),
            upcoming_counts: upcoming_counts(events, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(year: i32, month: u32, day: u32, category: EventCategory) -> Event {
        Event {
            id: 0,
            title: format!("{:?} event", category),
            category,
            year,
            month,
            day,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            location: "School grounds".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn navigation_rolls_over_year_boundaries() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth { year: 2023, month: 12 });
        assert_eq!(january.next(), YearMonth { year: 2024, month: 2 });

        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), YearMonth { year: 2025, month: 1 });
        assert_eq!(december.previous(), YearMonth { year: 2024, month: 11 });
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days_in_month(), 31);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days_in_month(), 30);
    }

    #[test]
    fn grid_contains_each_day_once_in_sunday_weeks() {
        for year in [1900, 2000, 2023, 2024, 2026] {
            for month in 1..=12 {
                let target = YearMonth::new(year, month).unwrap();
                let weeks = month_grid(target);

                let in_month: Vec<u32> = weeks
                    .iter()
                    .flat_map(|w| w.iter())
                    .filter(|d| d.in_month)
                    .map(|d| d.day)
                    .collect();
                let expected: Vec<u32> = (1..=target.days_in_month()).collect();
                assert_eq!(in_month, expected, "{}-{}", year, month);

                for week in &weeks {
                    assert_eq!(week[0].date.weekday(), chrono::Weekday::Sun);
                    for pair in week.windows(2) {
                        assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
                    }
                }
            }
        }
    }

    #[test]
    fn grid_pads_with_neighbouring_month_days() {
        // June 2024 starts on a Saturday and ends on a Sunday.
        let weeks = month_grid(YearMonth::new(2024, 6).unwrap());
        assert_eq!(weeks.len(), 6);

        let first_week: Vec<(u32, bool)> = weeks[0].iter().map(|d| (d.day, d.in_month)).collect();
        assert_eq!(
            first_week,
            vec![(26, false), (27, false), (28, false), (29, false), (30, false), (31, false), (1, true)]
        );
        assert_eq!(weeks[5][0].day, 30);
        assert!(weeks[5][0].in_month);
        assert_eq!(weeks[5][1].day, 1);
        assert!(!weeks[5][1].in_month);
    }

    #[test]
    fn february_starting_on_sunday_fits_four_weeks() {
        let weeks = month_grid(YearMonth::new(2015, 2).unwrap());
        assert_eq!(weeks.len(), 4);
        assert!(weeks.iter().flat_map(|w| w.iter()).all(|d| d.in_month));
    }

    #[test]
    fn query_falls_back_to_today_on_bad_input() {
        let today = date(2026, 10, 19);
        let current = YearMonth { year: 2026, month: 10 };

        assert_eq!(YearMonth::from_query(None, None, today), current);
        assert_eq!(YearMonth::from_query(Some("2025"), Some("3"), today), YearMonth { year: 2025, month: 3 });
        assert_eq!(YearMonth::from_query(Some("2025"), None, today), YearMonth { year: 2025, month: 10 });
        assert_eq!(YearMonth::from_query(Some("2025"), Some("13"), today), current);
        assert_eq!(YearMonth::from_query(Some("2025"), Some("0"), today), current);
        assert_eq!(YearMonth::from_query(Some("twenty"), Some("3"), today), current);
        assert_eq!(YearMonth::from_query(Some("2025"), Some("March"), today), current);
        assert_eq!(YearMonth::from_query(Some("2025"), Some("-1"), today), current);
    }

    #[test]
    fn upcoming_counts_per_category() {
        let events = vec![
            event(2024, 6, 20, EventCategory::Sports),
            event(2024, 6, 10, EventCategory::Sports),
            event(2024, 11, 1, EventCategory::Arts),
            event(2025, 1, 1, EventCategory::Arts),
        ];
        let counts = upcoming_counts(&events, date(2024, 6, 15));

        let expected: BTreeMap<_, _> =
            [(EventCategory::Sports, 1), (EventCategory::Arts, 2)].into_iter().collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn month_order_is_calendar_order() {
        // Alphabetically both April and December sort before March.
        let events = vec![
            event(2024, 1, 20, EventCategory::Academic),
            event(2024, 4, 2, EventCategory::Cultural),
            event(2024, 12, 1, EventCategory::Cultural),
        ];
        let counts = upcoming_counts(&events, date(2024, 3, 15));
        assert_eq!(counts.get(&EventCategory::Academic), None);
        assert_eq!(counts.get(&EventCategory::Cultural), Some(&2));
    }

    #[test]
    fn event_days_only_cover_target_month() {
        let events = vec![
            event(2024, 6, 20, EventCategory::Sports),
            event(2024, 6, 20, EventCategory::Arts),
            event(2024, 6, 3, EventCategory::Arts),
            event(2024, 7, 4, EventCategory::Arts),
            event(2023, 6, 9, EventCategory::Arts),
        ];
        let days = event_days(&events, YearMonth::new(2024, 6).unwrap());
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![3, 20]);
    }

    #[test]
    fn calendar_view_ties_it_together() {
        let events = vec![event(2025, 1, 1, EventCategory::Arts)];
        let view = CalendarView::build(&events, YearMonth::new(2025, 1).unwrap(), date(2024, 12, 31));
        assert_eq!(view.month_name, "January");
        assert_eq!(view.previous, YearMonth { year: 2024, month: 12 });
        assert_eq!(view.next, YearMonth { year: 2025, month: 2 });
        assert!(view.event_days.contains(&1));
        assert_eq!(view.upcoming_counts.get(&EventCategory::Arts), Some(&1));
    }
}
