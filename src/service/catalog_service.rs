use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::{
        AlumniRepository, DeadlineRepository, FeaturedEventRepository, GalleryRepository,
        LeadershipRepository, TestimonialRepository,
    },
};

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::invalid_field(field, "This field is required."))
    } else {
        Ok(())
    }
}

/// Read-mostly website content managed by staff.
pub struct CatalogService {
    testimonials: Arc<dyn TestimonialRepository>,
    leadership: Arc<dyn LeadershipRepository>,
    alumni: Arc<dyn AlumniRepository>,
    gallery: Arc<dyn GalleryRepository>,
    featured_events: Arc<dyn FeaturedEventRepository>,
    deadlines: Arc<dyn DeadlineRepository>,
}

impl CatalogService {
    pub fn new(
        testimonials: Arc<dyn TestimonialRepository>,
        leadership: Arc<dyn LeadershipRepository>,
        alumni: Arc<dyn AlumniRepository>,
        gallery: Arc<dyn GalleryRepository>,
        featured_events: Arc<dyn FeaturedEventRepository>,
        deadlines: Arc<dyn DeadlineRepository>,
    ) -> Self {
        Self { testimonials, leadership, alumni, gallery, featured_events, deadlines }
    }

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.testimonials.list().await
    }

    pub async fn create_testimonial(&self, request: CreateTestimonialRequest) -> Result<Testimonial> {
        require("name", &request.name)?;
        require("testimonial", &request.testimonial)?;
        self.testimonials.create(request).await
    }

    pub async fn list_leadership(&self) -> Result<Vec<LeadershipMessage>> {
        self.leadership.list().await
    }

    pub async fn create_leadership_message(
        &self,
        request: CreateLeadershipMessageRequest,
    ) -> Result<LeadershipMessage> {
        require("name", &request.name)?;
        require("message", &request.message)?;
        self.leadership.create(request).await
    }

    pub async fn list_alumni(&self) -> Result<Vec<AlumniMessage>> {
        self.alumni.list().await
    }

    /// Completion year defaults to the year of `today` and must fall between
    /// the first graduating class and `today`.
    pub async fn create_alumni_message(
        &self,
        request: CreateAlumniMessageRequest,
        today: NaiveDate,
    ) -> Result<AlumniMessage> {
        require("name", &request.name)?;
        require("message", &request.message)?;
        let year = request.year_of_completion.unwrap_or_else(|| today.year());
        validate_alumni_year(year, today)?;
        self.alumni.create(request, year).await
    }

    pub async fn list_gallery(&self) -> Result<Vec<GalleryImage>> {
        self.gallery.list().await
    }

    pub async fn create_gallery_image(&self, request: CreateGalleryImageRequest) -> Result<GalleryImage> {
        self.gallery.create(request).await
    }

    pub async fn list_featured_events(&self) -> Result<Vec<FeaturedEvent>> {
        self.featured_events.list().await
    }

    pub async fn create_featured_event(&self, request: CreateFeaturedEventRequest) -> Result<FeaturedEvent> {
        request.validate()?;
        self.featured_events.create(request).await
    }

    pub async fn list_deadlines(&self) -> Result<Vec<KeyAdmissionDeadline>> {
        self.deadlines.list().await
    }

    /// One deadline per admission period.
    pub async fn create_deadline(&self, request: CreateDeadlineRequest) -> Result<KeyAdmissionDeadline> {
        let name = request.name;
        self.deadlines.create(request).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("A deadline for {} already exists", name))
            }
            other => other,
        })
    }
}
