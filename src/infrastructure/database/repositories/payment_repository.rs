//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde_json::Value;

use super::{bill_repository, parse_column};
use crate::domain::bill::{Bill, BillStatus};
use crate::domain::payment::{PaymentRepository, PaymentStatus, PaymentTransaction};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{bill, payment_transaction};

fn entity_to_domain(m: payment_transaction::Model) -> DomainResult<PaymentTransaction> {
    let metadata = match m.metadata {
        Value::Object(map) => map,
        Value::Null => Default::default(),
        other => {
            return Err(DomainError::Storage(format!(
                "Transaction {} metadata is not an object: {}",
                m.transaction_id, other
            )))
        }
    };

    Ok(PaymentTransaction {
        status: parse_column(&m.status, "transaction status")?,
        transaction_id: m.transaction_id,
        user_id: m.user_id,
        bill_id: m.bill_id,
        amount: m.amount,
        payment_method: m.payment_method,
        transaction_date: m.transaction_date,
        scheduled_retry_date: m.scheduled_retry_date,
        failure_reason: m.failure_reason,
        retry_count: m.retry_count,
        metadata,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(t: PaymentTransaction) -> payment_transaction::ActiveModel {
    payment_transaction::ActiveModel {
        transaction_id: Set(t.transaction_id),
        user_id: Set(t.user_id),
        bill_id: Set(t.bill_id),
        amount: Set(t.amount),
        status: Set(t.status.as_str().to_string()),
        payment_method: Set(t.payment_method),
        transaction_date: Set(t.transaction_date),
        scheduled_retry_date: Set(t.scheduled_retry_date),
        failure_reason: Set(t.failure_reason),
        retry_count: Set(t.retry_count),
        metadata: Set(Value::Object(t.metadata)),
        created_at: Set(t.created_at),
        updated_at: Set(t.updated_at),
    }
}

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list(
        &self,
        query: sea_orm::Select<payment_transaction::Entity>,
    ) -> DomainResult<Vec<PaymentTransaction>> {
        query
            .order_by_asc(payment_transaction::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_domain)
            .collect()
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_id(&self, transaction_id: &str) -> DomainResult<Option<PaymentTransaction>> {
        payment_transaction::Entity::find_by_id(transaction_id.to_string())
            .one(&self.db)
            .await?
            .map(entity_to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        self.list(
            payment_transaction::Entity::find()
                .filter(payment_transaction::Column::UserId.eq(user_id)),
        )
        .await
    }

    async fn find_by_bill(&self, bill_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        self.list(
            payment_transaction::Entity::find()
                .filter(payment_transaction::Column::BillId.eq(bill_id)),
        )
        .await
    }

    async fn find_by_status(&self, status: PaymentStatus) -> DomainResult<Vec<PaymentTransaction>> {
        self.list(
            payment_transaction::Entity::find()
                .filter(payment_transaction::Column::Status.eq(status.as_str())),
        )
        .await
    }

    async fn find_due_retries(
        &self,
        now: DateTime<Utc>,
        max_retries: i32,
    ) -> DomainResult<Vec<PaymentTransaction>> {
        payment_transaction::Entity::find()
            .filter(payment_transaction::Column::Status.eq(PaymentStatus::Failed.as_str()))
            .filter(payment_transaction::Column::ScheduledRetryDate.lte(now))
            .filter(payment_transaction::Column::RetryCount.lt(max_retries))
            .order_by_asc(payment_transaction::Column::ScheduledRetryDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_domain)
            .collect()
    }

    async fn save(&self, transaction: PaymentTransaction) -> DomainResult<()> {
        domain_to_active(transaction).insert(&self.db).await?;
        Ok(())
    }

    async fn claim_for_retry(
        &self,
        transaction_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let result = payment_transaction::Entity::update_many()
            .col_expr(
                payment_transaction::Column::Status,
                Expr::value(PaymentStatus::Cancelled.as_str()),
            )
            .col_expr(
                payment_transaction::Column::ScheduledRetryDate,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(payment_transaction::Column::UpdatedAt, Expr::value(now))
            .filter(payment_transaction::Column::TransactionId.eq(transaction_id))
            .filter(payment_transaction::Column::Status.eq(PaymentStatus::Failed.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(true);
        }
        match self.find_by_id(transaction_id).await? {
            Some(_) => Ok(false),
            None => Err(DomainError::not_found("Transaction", "transaction_id", transaction_id)),
        }
    }

    async fn record(&self, transaction: PaymentTransaction, bill: Bill) -> DomainResult<()> {
        let bill_id = bill.id;
        let bill_number = bill.bill_number.clone();
        let txn = self.db.begin().await?;

        let updated = bill::Entity::update(bill_repository::domain_to_active(bill))
            .filter(bill::Column::Status.ne(BillStatus::Paid.as_str()))
            .exec(&txn)
            .await;
        match updated {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => {
                txn.rollback().await?;
                return Err(match bill::Entity::find_by_id(bill_id).one(&self.db).await? {
                    Some(_) => {
                        DomainError::Conflict(format!("Bill {} is already paid", bill_number))
                    }
                    None => DomainError::not_found("Bill", "id", bill_id),
                });
            }
            Err(e) => return Err(e.into()),
        }

        domain_to_active(transaction).insert(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
