use async_trait::async_trait;
use crate::domain::*;
use crate::error::Result;

pub mod admission_repository;
pub mod enquiry_repository;
pub mod testimonial_repository;
pub mod leadership_repository;
pub mod alumni_repository;
pub mod gallery_repository;
pub mod featured_event_repository;
pub mod event_repository;
pub mod fee_repository;
pub mod deadline_repository;

pub use admission_repository::SqliteAdmissionRepository;
pub use enquiry_repository::SqliteEnquiryRepository;
pub use testimonial_repository::SqliteTestimonialRepository;
pub use leadership_repository::SqliteLeadershipRepository;
pub use alumni_repository::SqliteAlumniRepository;
pub use gallery_repository::SqliteGalleryRepository;
pub use featured_event_repository::SqliteFeaturedEventRepository;
pub use event_repository::SqliteEventRepository;
pub use fee_repository::SqliteFeeRepository;
pub use deadline_repository::SqliteDeadlineRepository;

#[async_trait]
pub trait AdmissionRepository: Send + Sync {
    async fn create(&self, message: NewAdmissionMessage) -> Result<AdmissionMessage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<AdmissionMessage>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<AdmissionMessage>>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn create(&self, message: NewEnquiryMessage) -> Result<EnquiryMessage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<EnquiryMessage>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<EnquiryMessage>>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn create(&self, request: CreateTestimonialRequest) -> Result<Testimonial>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Testimonial>>;
    async fn list(&self) -> Result<Vec<Testimonial>>;
}

#[async_trait]
pub trait LeadershipRepository: Send + Sync {
    async fn create(&self, request: CreateLeadershipMessageRequest) -> Result<LeadershipMessage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<LeadershipMessage>>;
    async fn list(&self) -> Result<Vec<LeadershipMessage>>;
}

#[async_trait]
pub trait AlumniRepository: Send + Sync {
    /// `year_of_completion` must already be resolved and range-checked.
    async fn create(&self, request: CreateAlumniMessageRequest, year_of_completion: i32) -> Result<AlumniMessage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<AlumniMessage>>;
    async fn list(&self) -> Result<Vec<AlumniMessage>>;
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn create(&self, request: CreateGalleryImageRequest) -> Result<GalleryImage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<GalleryImage>>;
    async fn list(&self) -> Result<Vec<GalleryImage>>;
}

#[async_trait]
pub trait FeaturedEventRepository: Send + Sync {
    async fn create(&self, request: CreateFeaturedEventRequest) -> Result<FeaturedEvent>;
    async fn find_by_id(&self, id: i64) -> Result<Option<FeaturedEvent>>;
    async fn list(&self) -> Result<Vec<FeaturedEvent>>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, request: CreateEventRequest) -> Result<Event>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    /// Newest year first, then calendar month, then day.
    async fn list(&self, filter: EventFilter) -> Result<Vec<Event>>;
}

#[async_trait]
pub trait FeeRepository: Send + Sync {
    async fn create(&self, input: FeeStructureInput) -> Result<FeeStructure>;
    async fn update(&self, id: i64, input: FeeStructureInput) -> Result<FeeStructure>;
    async fn find_by_id(&self, id: i64) -> Result<Option<FeeStructure>>;
    async fn find_by_level(&self, level: SchoolLevel) -> Result<Option<FeeStructure>>;
    /// Ordered by school level, youngest first.
    async fn list(&self) -> Result<Vec<FeeStructure>>;
}

#[async_trait]
pub trait DeadlineRepository: Send + Sync {
    async fn create(&self, request: CreateDeadlineRequest) -> Result<KeyAdmissionDeadline>;
    async fn find_by_id(&self, id: i64) -> Result<Option<KeyAdmissionDeadline>>;
    /// Earliest deadline first.
    async fn list(&self) -> Result<Vec<KeyAdmissionDeadline>>;
}
