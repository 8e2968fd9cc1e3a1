use chrono::NaiveDate;

use super::ad::Ad;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AdFilter {
    pub(crate) published: Option<bool>,
    pub(crate) author_id: Option<i64>,
    pub(crate) title: Option<String>,
    /// Compared against the UTC calendar date of `date_created`.
    pub(crate) date: Option<NaiveDate>,
}

impl AdFilter {
    pub(crate) fn is_empty(&self) -> bool {
        self.published.is_none()
            && self.author_id.is_none()
            && self.title.is_none()
            && self.date.is_none()
    }

    pub(crate) fn matches(&self, ad: &Ad) -> bool {
        self.published.is_none_or(|published| ad.published == published)
            && self.author_id.is_none_or(|author_id| ad.author_id == author_id)
            && self.title.as_deref().is_none_or(|title| ad.title == title)
            && self
                .date
                .is_none_or(|date| ad.date_created.date_naive() == date)
    }
}
