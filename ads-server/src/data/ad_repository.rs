use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::filter::AdFilter;

#[derive(Debug, Clone)]
pub(crate) struct NewAd {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) author_id: i64,
    pub(crate) published: bool,
    pub(crate) date_created: DateTime<Utc>,
    pub(crate) date_changed: DateTime<Utc>,
}

impl NewAd {
    pub(crate) fn into_ad(self, id: i64) -> Ad {
        Ad {
            id,
            title: self.title,
            text: self.text,
            author_id: self.author_id,
            published: self.published,
            date_created: self.date_created,
            date_changed: self.date_changed,
        }
    }
}

#[async_trait]
pub(crate) trait AdRepository: Send + Sync {
    async fn add_ad(&self, input: NewAd) -> Result<i64, DomainError>;
    async fn get_ad_by_id(&self, id: i64) -> Result<Ad, DomainError>;
    async fn update_ad_status(
        &self,
        id: i64,
        published: bool,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
    async fn update_ad_content(
        &self,
        id: i64,
        title: String,
        text: String,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
    async fn delete_ad_by_id(&self, id: i64) -> Result<(), DomainError>;
    async fn get_ad_list(&self, filter: AdFilter) -> Result<Vec<Ad>, DomainError>;
}
