use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::data::ad_repository::NewAd;
use crate::data::user_repository::NewUser;
use crate::domain::ad::Ad;
use crate::domain::error::DomainError;
use crate::domain::filter::AdFilter;
use crate::domain::user::User;

/// Id counters only move forward; ids are never reused after deletion.
#[derive(Debug, Default)]
pub(super) struct Store {
    users: BTreeMap<i64, User>,
    ads: BTreeMap<i64, Ad>,
    ads_by_author: HashMap<i64, BTreeSet<i64>>,
    next_user_id: i64,
    next_ad_id: i64,
}

impl Store {
    pub(super) fn add_user(&mut self, input: NewUser) -> i64 {
        let id = self.next_user_id;
        self.next_user_id += 1;

        self.users.insert(id, input.into_user(id));
        self.ads_by_author.insert(id, BTreeSet::new());
        id
    }

    pub(super) fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(DomainError::UserNotFound(id))
    }

    pub(super) fn update_user(
        &mut self,
        id: i64,
        nickname: String,
        email: String,
    ) -> Result<(), DomainError> {
        let user = self
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.nickname = nickname;
        user.email = email;
        Ok(())
    }

    /// Returns the number of ads removed along with the user.
    pub(super) fn delete_user(&mut self, id: i64) -> Result<usize, DomainError> {
        if self.users.remove(&id).is_none() {
            return Err(DomainError::UserNotFound(id));
        }

        let owned = self.ads_by_author.remove(&id).unwrap_or_default();
        let mut removed = 0;
        for ad_id in &owned {
            if self.ads.remove(ad_id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub(super) fn add_ad(&mut self, input: NewAd) -> Result<i64, DomainError> {
        let author_id = input.author_id;
        let owned = self
            .ads_by_author
            .get_mut(&author_id)
            .ok_or(DomainError::UserNotFound(author_id))?;

        let id = self.next_ad_id;
        self.next_ad_id += 1;

        owned.insert(id);
        self.ads.insert(id, input.into_ad(id));
        Ok(id)
    }

    pub(super) fn get_ad(&self, id: i64) -> Result<Ad, DomainError> {
        self.ads.get(&id).cloned().ok_or(DomainError::AdNotFound(id))
    }

    pub(super) fn update_ad_status(
        &mut self,
        id: i64,
        published: bool,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let ad = self.ads.get_mut(&id).ok_or(DomainError::AdNotFound(id))?;
        ad.published = published;
        ad.date_changed = changed_at;
        Ok(())
    }

    pub(super) fn update_ad_content(
        &mut self,
        id: i64,
        title: String,
        text: String,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let ad = self.ads.get_mut(&id).ok_or(DomainError::AdNotFound(id))?;
        ad.title = title;
        ad.text = text;
        ad.date_changed = changed_at;
        Ok(())
    }

    pub(super) fn delete_ad(&mut self, id: i64) -> Result<(), DomainError> {
        let ad = self.ads.remove(&id).ok_or(DomainError::AdNotFound(id))?;
        if let Some(owned) = self.ads_by_author.get_mut(&ad.author_id) {
            owned.remove(&id);
        }
        Ok(())
    }

    pub(super) fn list_ads(&self, filter: &AdFilter) -> Vec<Ad> {
        self.ads
            .values()
            .filter(|ad| filter.matches(ad))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub(super) fn indexed_ads(&self, author_id: i64) -> Option<&BTreeSet<i64>> {
        self.ads_by_author.get(&author_id)
    }
}
