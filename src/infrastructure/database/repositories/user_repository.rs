//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

fn role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Customer => user::UserRole::Customer,
    }
}

fn entity_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        email: m.email,
        name: m.name,
        role: match m.role {
            user::UserRole::Admin => UserRole::Admin,
            user::UserRole::Customer => UserRole::Customer,
        },
        password_hash: m.password_hash,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count_admins(&self) -> DomainResult<u64> {
        Ok(user::Entity::find()
            .filter(user::Column::Role.eq(user::UserRole::Admin))
            .count(&self.db)
            .await?)
    }

    async fn save(&self, u: User) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: NotSet,
            email: Set(u.email),
            name: Set(u.name),
            role: Set(role_to_entity(u.role)),
            password_hash: Set(u.password_hash),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };
        let result = model.insert(&self.db).await?;
        info!(user_id = result.id, "User saved");
        Ok(entity_to_domain(result))
    }
}
