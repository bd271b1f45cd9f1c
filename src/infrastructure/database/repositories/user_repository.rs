use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepository};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
    }
}

fn db_err(operation: &'static str) -> impl Fn(sea_orm::DbErr) -> DomainError {
    move |e| DomainError::storage(operation, e)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err("find_user_by_username"))?;

        Ok(model.map(user_model_to_domain))
    }

    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(dto.username),
            password_hash: Set(dto.password_hash),
        };

        let created = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::invalid_input("create_user", "username already exists")
            } else {
                DomainError::storage("create_user", e)
            }
        })?;

        Ok(user_model_to_domain(created))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err("count_users"))
    }
}
