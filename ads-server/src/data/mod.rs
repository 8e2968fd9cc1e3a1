pub(crate) mod ad_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;

use ad_repository::AdRepository;
use user_repository::UserRepository;

/// Storage for both entity kinds; ads reference users, so one backend serves both.
pub(crate) trait Repository: AdRepository + UserRepository {}

impl<T> Repository for T where T: AdRepository + UserRepository {}
