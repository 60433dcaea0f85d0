use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Display name for a month number in `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
        _ => None,
    }
}

/// Parses a month given either by its full English name or by number.
pub fn parse_month(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Some(index) = MONTH_NAMES.iter().position(|name| *name == value) {
        return Some(index as u32 + 1);
    }
    value.parse::<u32>().ok().filter(|m| (1..=12).contains(m))
}

/// 12-hour clock rendering used everywhere an event time leaves the crate.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventCategory {
    Arts,
    Community,
    Academic,
    Sports,
    Cultural,
    Workshops,
    Conferences,
}

impl EventCategory {
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Arts,
        EventCategory::Community,
        EventCategory::Academic,
        EventCategory::Sports,
        EventCategory::Cultural,
        EventCategory::Workshops,
        EventCategory::Conferences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Arts => "Arts",
            EventCategory::Community => "Community",
            EventCategory::Academic => "Academic",
            EventCategory::Sports => "Sports",
            EventCategory::Cultural => "Cultural",
            EventCategory::Workshops => "Workshops",
            EventCategory::Conferences => "Conferences",
        }
    }
}

impl FromStr for EventCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid event category: {}", s)))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub category: EventCategory,
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub day: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub description: String,
}

impl Event {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("")
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// True when the event falls on `today` or later, compared field by field
    /// in calendar order.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        (self.year, self.month, self.day) >= (today.year(), today.month(), today.day())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub category: EventCategory,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub description: String,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_field("title", "This field is required."));
        }
        if self.year < 1 {
            return Err(AppError::invalid_field("year", "Year must be positive."));
        }
        if month_name(self.month).is_none() {
            return Err(AppError::invalid_field("month", "Month must be between 1 and 12."));
        }
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(AppError::invalid_field(
                "day",
                format!("{} has no day {} in {}.", month_name(self.month).unwrap_or(""), self.day, self.year),
            ));
        }
        Ok(())
    }
}

/// Exact-match filters for the public event list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub month: Option<u32>,
    pub category: Option<EventCategory>,
}

impl EventFilter {
    /// Builds a filter from raw query values. Empty values mean "no filter".
    /// Returns `None` when a value names no month or category, since such a
    /// filter can match no event.
    pub fn from_query(month: Option<&str>, category: Option<&str>) -> Option<Self> {
        let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => Some(parse_month(m)?),
            None => None,
        };
        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => Some(c.parse::<EventCategory>().ok()?),
            None => None,
        };
        Some(Self { month, category })
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.month.map_or(true, |m| event.month == m)
            && self.category.map_or(true, |c| event.category == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(year: i32, month: u32, day: u32) -> Event {
        Event {
            id: 1,
            title: "Sports Day".to_string(),
            category: EventCategory::Sports,
            year,
            month,
            day,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
            location: "Main field".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn months_parse_by_name_or_number() {
        assert_eq!(parse_month("March"), Some(3));
        assert_eq!(parse_month("11"), Some(11));
        assert_eq!(parse_month("Smarch"), None);
        assert_eq!(parse_month("13"), None);
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
    }

    #[test]
    fn clock_uses_twelve_hour_format() {
        assert_eq!(format_clock(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "09:05 AM");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(15, 30, 0).unwrap()), "03:30 PM");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), "12:00 AM");
    }

    #[test]
    fn upcoming_uses_calendar_month_order() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(event(2024, 11, 1).is_upcoming(today));
        assert!(event(2024, 6, 15).is_upcoming(today));
        assert!(!event(2024, 1, 20).is_upcoming(today));
        assert!(!event(2024, 6, 14).is_upcoming(today));
        assert!(event(2025, 1, 1).is_upcoming(today));
    }

    #[test]
    fn filter_from_query() {
        let filter = EventFilter::from_query(Some("March"), Some("Academic")).unwrap();
        assert_eq!(filter.month, Some(3));
        assert_eq!(filter.category, Some(EventCategory::Academic));

        assert_eq!(EventFilter::from_query(Some(""), None), Some(EventFilter::default()));
        assert!(EventFilter::from_query(Some("Smarch"), None).is_none());
        assert!(EventFilter::from_query(None, Some("Chess")).is_none());
    }

    #[test]
    fn rejects_impossible_dates() {
        let request = CreateEventRequest {
            title: "Prize giving".to_string(),
            category: EventCategory::Academic,
            year: 2025,
            month: 2,
            day: 30,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            location: "Hall".to_string(),
            description: String::new(),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }
}
