use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

/// Read-mostly credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Used to seed the first administrator.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;
    async fn count_users(&self) -> DomainResult<u64>;
}
