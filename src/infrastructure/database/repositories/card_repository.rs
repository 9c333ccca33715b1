//! SeaORM implementation of CardRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::card::{CardDetail, CardRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::card_detail;

fn entity_to_domain(m: card_detail::Model) -> CardDetail {
    CardDetail {
        id: m.id,
        user_id: m.user_id,
        card_number_last4: m.card_number_last4,
        card_holder_name: m.card_holder_name,
        card_type: m.card_type,
        expiry_month: m.expiry_month,
        expiry_year: m.expiry_year,
        is_default: m.is_default,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(c: CardDetail) -> card_detail::ActiveModel {
    card_detail::ActiveModel {
        id: Set(c.id),
        user_id: Set(c.user_id),
        card_number_last4: Set(c.card_number_last4),
        card_holder_name: Set(c.card_holder_name),
        card_type: Set(c.card_type),
        expiry_month: Set(c.expiry_month),
        expiry_year: Set(c.expiry_year),
        is_default: Set(c.is_default),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub struct SeaOrmCardRepository {
    db: DatabaseConnection,
}

impl SeaOrmCardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardRepository for SeaOrmCardRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CardDetail>> {
        let model = card_detail::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<CardDetail>> {
        let models = card_detail::Entity::find()
            .filter(card_detail::Column::UserId.eq(user_id))
            .order_by_asc(card_detail::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<CardDetail>> {
        let models = card_detail::Entity::find()
            .order_by_asc(card_detail::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, card: CardDetail) -> DomainResult<CardDetail> {
        let mut model = domain_to_active(card);
        model.id = NotSet;
        Ok(entity_to_domain(model.insert(&self.db).await?))
    }

    async fn update(&self, card: CardDetail) -> DomainResult<()> {
        if card_detail::Entity::find_by_id(card.id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Card", "id", card.id));
        }
        domain_to_active(card).update(&self.db).await?;
        Ok(())
    }

    async fn clear_default_for_user(&self, user_id: i32, keep_id: i32) -> DomainResult<()> {
        let result = card_detail::Entity::update_many()
            .col_expr(card_detail::Column::IsDefault, Expr::value(false))
            .col_expr(card_detail::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(card_detail::Column::UserId.eq(user_id))
            .filter(card_detail::Column::Id.ne(keep_id))
            .filter(card_detail::Column::IsDefault.eq(true))
            .exec(&self.db)
            .await?;
        debug!(user_id, cleared = result.rows_affected, "Cleared default cards");
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = card_detail::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Card", "id", id));
        }
        Ok(())
    }
}
