use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    api::state::AppState,
    domain::{
        AlumniMessage, DeadlineName, FeaturedEvent, GalleryImage, KeyAdmissionDeadline,
        LeadershipMessage, Testimonial,
    },
    error::Result,
    storage::FileResolver,
};

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct TestimonialResponse {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub testimonial: String,
    pub image: Option<String>,
}

impl TestimonialResponse {
    pub fn new(t: Testimonial, files: &dyn FileResolver) -> Self {
        Self {
            image: files.resolve_optional(t.image.as_deref()),
            id: t.id,
            name: t.name,
            title: t.title,
            testimonial: t.testimonial,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeadershipResponse {
    pub id: i64,
    pub salutation: String,
    pub name: String,
    pub designation: String,
    pub message: String,
    pub image: Option<String>,
}

impl LeadershipResponse {
    pub fn new(l: LeadershipMessage, files: &dyn FileResolver) -> Self {
        Self {
            image: files.resolve_optional(l.image.as_deref()),
            id: l.id,
            salutation: l.salutation,
            name: l.name,
            designation: l.designation,
            message: l.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GalleryImageResponse {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

impl GalleryImageResponse {
    pub fn new(g: GalleryImage, files: &dyn FileResolver) -> Self {
        Self {
            image: files.resolve_optional(g.image.as_deref()),
            id: g.id,
            title: g.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlumniResponse {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub year_of_completion: i32,
    pub message: String,
    pub image: Option<String>,
}

impl AlumniResponse {
    pub fn new(a: AlumniMessage, files: &dyn FileResolver) -> Self {
        Self {
            image: files.resolve_optional(a.image.as_deref()),
            id: a.id,
            name: a.name,
            title: a.title,
            year_of_completion: a.year_of_completion,
            message: a.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeaturedEventResponse {
    pub id: i64,
    pub title: String,
    /// Human-readable date range, e.g. "March 05 - 07, 2025".
    pub date: String,
    pub image: Option<String>,
    pub description: String,
}

impl FeaturedEventResponse {
    pub fn new(f: FeaturedEvent, files: &dyn FileResolver) -> Self {
        Self {
            date: f.date_range_display(),
            image: files.resolve_optional(f.image.as_deref()),
            id: f.id,
            title: f.title,
            description: f.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeadlineResponse {
    pub id: i64,
    pub name: DeadlineName,
    pub deadline_date: NaiveDate,
}

impl From<KeyAdmissionDeadline> for DeadlineResponse {
    fn from(d: KeyAdmissionDeadline) -> Self {
        Self {
            id: d.id,
            name: d.name,
            deadline_date: d.deadline_date,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn testimonials(State(state): State<AppState>) -> Result<Json<Vec<TestimonialResponse>>> {
    let ctx = &state.service_context;
    let items = ctx.catalog_service.list_testimonials().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|t| TestimonialResponse::new(t, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}

pub async fn leadership(State(state): State<AppState>) -> Result<Json<Vec<LeadershipResponse>>> {
    let ctx = &state.service_context;
    let items = ctx.catalog_service.list_leadership().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|l| LeadershipResponse::new(l, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}

pub async fn gallery(State(state): State<AppState>) -> Result<Json<Vec<GalleryImageResponse>>> {
    let ctx = &state.service_context;
    let items = ctx.catalog_service.list_gallery().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|g| GalleryImageResponse::new(g, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}

pub async fn alumni(State(state): State<AppState>) -> Result<Json<Vec<AlumniResponse>>> {
    let ctx = &state.service_context;
    let items = ctx.catalog_service.list_alumni().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|a| AlumniResponse::new(a, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}

pub async fn featured_events(State(state): State<AppState>) -> Result<Json<Vec<FeaturedEventResponse>>> {
    let ctx = &state.service_context;
    let items = ctx.catalog_service.list_featured_events().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|f| FeaturedEventResponse::new(f, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}

pub async fn admission_deadlines(State(state): State<AppState>) -> Result<Json<Vec<DeadlineResponse>>> {
    let items = state.service_context.catalog_service.list_deadlines().await?;
    Ok(Json(items.into_iter().map(DeadlineResponse::from).collect()))
}
