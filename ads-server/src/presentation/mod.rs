use std::sync::Arc;

use crate::application::ad_service::AdService;
use crate::data::repositories::memory::InMemoryRepository;

pub(crate) mod dates;
pub(crate) mod grpc;
pub(crate) mod http;

/// Shared by the HTTP and gRPC bindings, so both operate on the same store.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) ad_service: Arc<AdService<InMemoryRepository>>,
}

impl AppState {
    pub(crate) fn new(ad_service: Arc<AdService<InMemoryRepository>>) -> Self {
        Self { ad_service }
    }
}
