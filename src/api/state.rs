use std::sync::Arc;
use crate::{
    api::middleware::throttle::Throttles,
    config::Settings,
    service::ServiceContext,
};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub settings: Arc<Settings>,
    pub throttles: Throttles,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        settings: Arc<Settings>,
        throttles: Throttles,
    ) -> Self {
        Self {
            service_context,
            settings,
            throttles,
        }
    }
}
