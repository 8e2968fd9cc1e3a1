use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) nickname: String,
    pub(crate) email: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: i64) -> User {
        User {
            id,
            nickname: self.nickname,
            email: self.email,
        }
    }
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn add_user(&self, input: NewUser) -> Result<i64, DomainError>;
    async fn get_user_by_id(&self, id: i64) -> Result<User, DomainError>;
    async fn update_user(&self, id: i64, nickname: String, email: String)
    -> Result<(), DomainError>;
    /// Removes the user together with every ad it authored.
    async fn delete_user_by_id(&self, id: i64) -> Result<(), DomainError>;
}
