use chrono::Utc;
use tracing::{debug, info};

use crate::data::Repository;
use crate::data::ad_repository::NewAd;
use crate::data::user_repository::NewUser;
use crate::domain::ad::{Ad, validate_content};
use crate::domain::error::DomainError;
use crate::domain::filter::AdFilter;
use crate::domain::user::{User, validate_profile};

/// Read-then-write operations issue two separate repository calls and are not atomic.
pub(crate) struct AdService<R: Repository> {
    repo: R,
}

impl<R: Repository> AdService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_ad(
        &self,
        title: String,
        text: String,
        uid: i64,
    ) -> Result<Ad, DomainError> {
        let now = Utc::now();
        let new_ad = NewAd {
            title,
            text,
            author_id: uid,
            published: false,
            date_created: now,
            date_changed: now,
        };
        validate_content(&new_ad.title, &new_ad.text)?;

        let id = self.repo.add_ad(new_ad.clone()).await?;
        info!(ad_id = id, author_id = uid, "ad created");
        Ok(new_ad.into_ad(id))
    }

    pub(crate) async fn get_ad(&self, id: i64) -> Result<Ad, DomainError> {
        self.repo.get_ad_by_id(id).await
    }

    pub(crate) async fn change_ad_status(
        &self,
        id: i64,
        uid: i64,
        published: bool,
    ) -> Result<Ad, DomainError> {
        let mut ad = self.load_owned_ad(id, uid).await?;

        ad.published = published;
        ad.date_changed = Utc::now();

        self.repo
            .update_ad_status(id, published, ad.date_changed)
            .await?;
        debug!(ad_id = id, published, "ad status changed");
        Ok(ad)
    }

    pub(crate) async fn update_ad(
        &self,
        id: i64,
        uid: i64,
        title: String,
        text: String,
    ) -> Result<Ad, DomainError> {
        let mut ad = self.load_owned_ad(id, uid).await?;

        ad.title = title;
        ad.text = text;
        ad.date_changed = Utc::now();
        ad.validate()?;

        self.repo
            .update_ad_content(id, ad.title.clone(), ad.text.clone(), ad.date_changed)
            .await?;
        debug!(ad_id = id, "ad content updated");
        Ok(ad)
    }

    pub(crate) async fn delete_ad(&self, id: i64, uid: i64) -> Result<(), DomainError> {
        self.load_owned_ad(id, uid).await?;
        self.repo.delete_ad_by_id(id).await?;
        info!(ad_id = id, author_id = uid, "ad deleted");
        Ok(())
    }

    /// Lists ads matching `filter`. A filter with nothing set lists published ads only.
    pub(crate) async fn list_ads(&self, mut filter: AdFilter) -> Result<Vec<Ad>, DomainError> {
        if filter.is_empty() {
            filter.published = Some(true);
        }
        self.repo.get_ad_list(filter).await
    }

    pub(crate) async fn create_user(
        &self,
        nickname: String,
        email: String,
    ) -> Result<User, DomainError> {
        validate_profile(&nickname, &email)?;

        let new_user = NewUser { nickname, email };
        let id = self.repo.add_user(new_user.clone()).await?;
        info!(user_id = id, "user created");
        Ok(new_user.into_user(id))
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo.get_user_by_id(id).await
    }

    pub(crate) async fn update_user(
        &self,
        id: i64,
        nickname: String,
        email: String,
    ) -> Result<User, DomainError> {
        let mut user = self.repo.get_user_by_id(id).await?;

        user.nickname = nickname;
        user.email = email;
        user.validate()?;

        self.repo
            .update_user(id, user.nickname.clone(), user.email.clone())
            .await?;
        debug!(user_id = id, "user updated");
        Ok(user)
    }

    pub(crate) async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete_user_by_id(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn load_owned_ad(&self, id: i64, uid: i64) -> Result<Ad, DomainError> {
        let ad = self.repo.get_ad_by_id(id).await?;
        if ad.author_id != uid {
            return Err(DomainError::Forbidden);
        }
        Ok(ad)
    }
}
