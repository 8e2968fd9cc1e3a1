use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::store::Store;
use crate::data::ad_repository::{AdRepository, NewAd};
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::filter::AdFilter;
use crate::domain::user::User;

/// One lock over the whole store for every call, reads included.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn add_user(&self, input: NewUser) -> Result<i64, DomainError> {
        Ok(self.store.lock().add_user(input))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, DomainError> {
        self.store.lock().get_user(id)
    }

    async fn update_user(
        &self,
        id: i64,
        nickname: String,
        email: String,
    ) -> Result<(), DomainError> {
        self.store.lock().update_user(id, nickname, email)
    }

    async fn delete_user_by_id(&self, id: i64) -> Result<(), DomainError> {
        let removed_ads = self.store.lock().delete_user(id)?;
        debug!(user_id = id, removed_ads, "user deleted with owned ads");
        Ok(())
    }
}

#[async_trait]
impl AdRepository for InMemoryRepository {
    async fn add_ad(&self, input: NewAd) -> Result<i64, DomainError> {
        self.store.lock().add_ad(input)
    }

    async fn get_ad_by_id(&self, id: i64) -> Result<Ad, DomainError> {
        self.store.lock().get_ad(id)
    }

    async fn update_ad_status(
        &self,
        id: i64,
        published: bool,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.store
            .lock()
            .update_ad_status(id, published, changed_at)
    }

    async fn update_ad_content(
        &self,
        id: i64,
        title: String,
        text: String,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.store
            .lock()
            .update_ad_content(id, title, text, changed_at)
    }

    async fn delete_ad_by_id(&self, id: i64) -> Result<(), DomainError> {
        self.store.lock().delete_ad(id)
    }

    async fn get_ad_list(&self, filter: AdFilter) -> Result<Vec<Ad>, DomainError> {
        Ok(self.store.lock().list_ads(&filter))
    }
}
