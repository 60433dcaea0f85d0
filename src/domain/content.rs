use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// First graduating class listed on the alumni wall.
pub const FIRST_ALUMNI_YEAR: i32 = 2014;

// =============================================================================
// Testimonials, leadership, gallery
// =============================================================================

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub testimonial: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestimonialRequest {
    pub name: String,
    pub title: String,
    pub testimonial: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LeadershipMessage {
    pub id: i64,
    pub salutation: String,
    pub name: String,
    pub designation: String,
    pub message: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeadershipMessageRequest {
    pub salutation: String,
    pub name: String,
    pub designation: String,
    pub message: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GalleryImage {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

impl GalleryImage {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Gallery Image"
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGalleryImageRequest {
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
}

// =============================================================================
// Alumni
// =============================================================================

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AlumniMessage {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub year_of_completion: i32,
    pub message: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlumniMessageRequest {
    pub name: String,
    pub title: String,
    /// Defaults to the current year.
    pub year_of_completion: Option<i32>,
    pub message: String,
    pub image: Option<String>,
}

/// Accepted completion years; the upper bound moves with the calendar.
pub fn alumni_year_range(today: NaiveDate) -> std::ops::RangeInclusive<i32> {
    FIRST_ALUMNI_YEAR..=today.year()
}

pub fn validate_alumni_year(year: i32, today: NaiveDate) -> Result<()> {
    let range = alumni_year_range(today);
    if range.contains(&year) {
        Ok(())
    } else {
        Err(AppError::invalid_field(
            "year_of_completion",
            format!(
                "Select a valid choice. {} is not between {} and {}.",
                year,
                range.start(),
                range.end()
            ),
        ))
    }
}

// =============================================================================
// Featured events
// =============================================================================

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FeaturedEvent {
    pub id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub description: String,
}

impl FeaturedEvent {
    /// "March 05, 2025" for single-day events, "March 05 - 07, 2025" for ranges.
    pub fn date_range_display(&self) -> String {
        match self.end_date {
            Some(end) => format!(
                "{} - {}",
                self.start_date.format("%B %d"),
                end.format("%d, %Y")
            ),
            None => self.start_date.format("%B %d, %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeaturedEventRequest {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub description: String,
}

impl CreateFeaturedEventRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_field("title", "This field is required."));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(AppError::invalid_field(
                    "end_date",
                    "End date cannot be before the start date.",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Admission deadlines
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeadlineName {
    #[serde(rename = "Term One")]
    TermOne,
    #[serde(rename = "Term Two")]
    TermTwo,
    #[serde(rename = "Term Three")]
    TermThree,
    #[serde(rename = "Mid-Term One")]
    MidTermOne,
    #[serde(rename = "Mid-Term Two")]
    MidTermTwo,
}

impl DeadlineName {
    pub const ALL: [DeadlineName; 5] = [
        DeadlineName::TermOne,
        DeadlineName::TermTwo,
        DeadlineName::TermThree,
        DeadlineName::MidTermOne,
        DeadlineName::MidTermTwo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineName::TermOne => "Term One",
            DeadlineName::TermTwo => "Term Two",
            DeadlineName::TermThree => "Term Three",
            DeadlineName::MidTermOne => "Mid-Term One",
            DeadlineName::MidTermTwo => "Mid-Term Two",
        }
    }
}

impl FromStr for DeadlineName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        DeadlineName::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid admission period: {}", s)))
    }
}

impl fmt::Display for DeadlineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyAdmissionDeadline {
    pub id: i64,
    pub name: DeadlineName,
    pub deadline_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeadlineRequest {
    pub name: DeadlineName,
    pub deadline_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn featured(end: Option<NaiveDate>) -> FeaturedEvent {
        FeaturedEvent {
            id: 1,
            title: "Music Festival".to_string(),
            start_date: date(2025, 3, 5),
            end_date: end,
            image: None,
            description: String::new(),
        }
    }

    #[test]
    fn featured_event_date_text() {
        assert_eq!(featured(None).date_range_display(), "March 05, 2025");
        assert_eq!(featured(Some(date(2025, 3, 7))).date_range_display(), "March 05 - 07, 2025");
    }

    #[test]
    fn alumni_year_window_tracks_current_year() {
        let today = date(2026, 10, 19);
        assert!(validate_alumni_year(2014, today).is_ok());
        assert!(validate_alumni_year(2026, today).is_ok());
        assert!(validate_alumni_year(2013, today).is_err());
        assert!(validate_alumni_year(2027, today).is_err());
        assert!(validate_alumni_year(2027, date(2027, 1, 1)).is_ok());
    }

    #[test]
    fn featured_event_end_before_start_is_rejected() {
        let request = CreateFeaturedEventRequest {
            title: "Open Day".to_string(),
            start_date: date(2025, 5, 10),
            end_date: Some(date(2025, 5, 9)),
            image: None,
            description: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn untitled_gallery_image_has_fallback_title() {
        let image = GalleryImage { id: 1, title: String::new(), image: None };
        assert_eq!(image.display_title(), "Gallery Image");
    }
}
