pub mod catalog_service;
pub mod event_service;
pub mod fee_service;
pub mod intake_service;

use std::sync::Arc;
use sqlx::SqlitePool;

use crate::repository::*;
use crate::storage::FileResolver;
use catalog_service::CatalogService;
use event_service::EventService;
use fee_service::FeeService;
use intake_service::IntakeService;

pub struct ServiceContext {
    pub admission_repo: Arc<dyn AdmissionRepository>,
    pub enquiry_repo: Arc<dyn EnquiryRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub fee_repo: Arc<dyn FeeRepository>,
    pub intake_service: Arc<IntakeService>,
    pub catalog_service: Arc<CatalogService>,
    pub event_service: Arc<EventService>,
    pub fee_service: Arc<FeeService>,
    pub file_resolver: Arc<dyn FileResolver>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        admission_repo: Arc<dyn AdmissionRepository>,
        enquiry_repo: Arc<dyn EnquiryRepository>,
        event_repo: Arc<dyn EventRepository>,
        fee_repo: Arc<dyn FeeRepository>,
        file_resolver: Arc<dyn FileResolver>,
        db_pool: SqlitePool,
    ) -> Self {
        // Catalog repositories have no other consumers
        let catalog_service = Arc::new(CatalogService::new(
            Arc::new(SqliteTestimonialRepository::new(db_pool.clone())),
            Arc::new(SqliteLeadershipRepository::new(db_pool.clone())),
            Arc::new(SqliteAlumniRepository::new(db_pool.clone())),
            Arc::new(SqliteGalleryRepository::new(db_pool.clone())),
            Arc::new(SqliteFeaturedEventRepository::new(db_pool.clone())),
            Arc::new(SqliteDeadlineRepository::new(db_pool.clone())),
        ));

        let intake_service = Arc::new(IntakeService::new(admission_repo.clone(), enquiry_repo.clone()));
        let event_service = Arc::new(EventService::new(event_repo.clone()));
        let fee_service = Arc::new(FeeService::new(fee_repo.clone()));

        Self {
            admission_repo,
            enquiry_repo,
            event_repo,
            fee_repo,
            intake_service,
            catalog_service,
            event_service,
            fee_service,
            file_resolver,
            db_pool,
        }
    }

    /// Wires every SQLite repository onto one pool.
    pub fn from_pool(db_pool: SqlitePool, file_resolver: Arc<dyn FileResolver>) -> Self {
        Self::new(
            Arc::new(SqliteAdmissionRepository::new(db_pool.clone())),
            Arc::new(SqliteEnquiryRepository::new(db_pool.clone())),
            Arc::new(SqliteEventRepository::new(db_pool.clone())),
            Arc::new(SqliteFeeRepository::new(db_pool.clone())),
            file_resolver,
            db_pool,
        )
    }
}
