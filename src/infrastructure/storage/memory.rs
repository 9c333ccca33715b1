//! In-memory repositories for development and testing
//!
//! Every aggregate lives in its own `DashMap`; integer keys come from
//! per-table counters that start at 1 like the SQL autoincrement columns.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::bill::{Bill, BillRepository, BillStatus};
use crate::domain::card::{CardDetail, CardRepository};
use crate::domain::payment::{PaymentRepository, PaymentStatus, PaymentTransaction};
use crate::domain::plan::{PlanRepository, PlanType, SubscriptionPlan};
use crate::domain::product::{Product, ProductRepository};
use crate::domain::sale::{Sale, SaleRepository};
use crate::domain::subscription::{SubscriptionRepository, UserSubscription};
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// In-memory implementation of every repository
pub struct InMemoryRepositoryProvider {
    users: DashMap<i32, User>,
    plans: DashMap<i32, SubscriptionPlan>,
    subscriptions: DashMap<i32, UserSubscription>,
    bills: DashMap<i32, Bill>,
    payments: DashMap<String, PaymentTransaction>,
    sales: DashMap<i32, Sale>,
    products: DashMap<i32, Product>,
    cards: DashMap<i32, CardDetail>,
    user_counter: AtomicI32,
    plan_counter: AtomicI32,
    subscription_counter: AtomicI32,
    bill_counter: AtomicI32,
    sale_counter: AtomicI32,
    product_counter: AtomicI32,
    card_counter: AtomicI32,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            plans: DashMap::new(),
            subscriptions: DashMap::new(),
            bills: DashMap::new(),
            payments: DashMap::new(),
            sales: DashMap::new(),
            products: DashMap::new(),
            cards: DashMap::new(),
            user_counter: AtomicI32::new(1),
            plan_counter: AtomicI32::new(1),
            subscription_counter: AtomicI32::new(1),
            bill_counter: AtomicI32::new(1),
            sale_counter: AtomicI32::new(1),
            product_counter: AtomicI32::new(1),
            card_counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst)
}

/// Clone the values matching `keep`, ordered by `key`.
fn collect<K, V, O>(
    map: &DashMap<K, V>,
    keep: impl Fn(&V) -> bool,
    key: impl Fn(&V) -> O,
) -> Vec<V>
where
    K: Eq + std::hash::Hash,
    V: Clone,
    O: Ord,
{
    let mut items: Vec<V> = map
        .iter()
        .filter(|e| keep(e.value()))
        .map(|e| e.value().clone())
        .collect();
    items.sort_by_key(|v| key(v));
    items
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        self
    }
    fn plans(&self) -> &dyn PlanRepository {
        self
    }
    fn subscriptions(&self) -> &dyn SubscriptionRepository {
        self
    }
    fn bills(&self) -> &dyn BillRepository {
        self
    }
    fn payments(&self) -> &dyn PaymentRepository {
        self
    }
    fn sales(&self) -> &dyn SaleRepository {
        self
    }
    fn products(&self) -> &dyn ProductRepository {
        self
    }
    fn cards(&self) -> &dyn CardRepository {
        self
    }
}

// ── Users ──────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        Ok(collect(&self.users, |_| true, |u| u.id))
    }

    async fn count_admins(&self) -> DomainResult<u64> {
        Ok(self.users.iter().filter(|u| u.role == UserRole::Admin).count() as u64)
    }

    async fn save(&self, mut user: User) -> DomainResult<User> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!("Email {}", user.email)));
        }
        user.id = next_id(&self.user_counter);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ── Plans ──────────────────────────────────────────────────────

#[async_trait]
impl PlanRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<SubscriptionPlan>> {
        Ok(self.plans.get(&id).map(|p| p.clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<SubscriptionPlan>> {
        Ok(self.plans.iter().find(|p| p.name == name).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        Ok(collect(&self.plans, |_| true, |p| p.id))
    }

    async fn find_active(&self) -> DomainResult<Vec<SubscriptionPlan>> {
        Ok(collect(&self.plans, |p| p.active, |p| p.id))
    }

    async fn find_by_type(&self, plan_type: PlanType) -> DomainResult<Vec<SubscriptionPlan>> {
        Ok(collect(&self.plans, |p| p.plan_type == plan_type, |p| p.id))
    }

    async fn save(&self, mut plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        plan.id = next_id(&self.plan_counter);
        self.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update(&self, plan: SubscriptionPlan) -> DomainResult<SubscriptionPlan> {
        if !self.plans.contains_key(&plan.id) {
            return Err(DomainError::not_found("Plan", "id", plan.id));
        }
        self.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }
}

// ── Subscriptions ──────────────────────────────────────────────

#[async_trait]
impl SubscriptionRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserSubscription>> {
        Ok(self.subscriptions.get(&id).map(|s| s.clone()))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>> {
        Ok(collect(&self.subscriptions, |s| s.user_id == user_id, |s| s.id))
    }

    async fn find_active_by_user(&self, user_id: i32) -> DomainResult<Vec<UserSubscription>> {
        Ok(collect(
            &self.subscriptions,
            |s| s.user_id == user_id && s.is_active(),
            |s| s.id,
        ))
    }

    async fn find_due(&self, now: DateTime<Utc>) -> DomainResult<Vec<UserSubscription>> {
        Ok(collect(&self.subscriptions, |s| s.is_due(now), |s| s.id))
    }

    async fn save(&self, mut subscription: UserSubscription) -> DomainResult<UserSubscription> {
        subscription.id = next_id(&self.subscription_counter);
        self.subscriptions.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn update(&self, subscription: UserSubscription) -> DomainResult<()> {
        if !self.subscriptions.contains_key(&subscription.id) {
            return Err(DomainError::not_found("Subscription", "id", subscription.id));
        }
        self.subscriptions.insert(subscription.id, subscription);
        Ok(())
    }
}

// ── Bills ──────────────────────────────────────────────────────

#[async_trait]
impl BillRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bill>> {
        Ok(self.bills.get(&id).map(|b| b.clone()))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Bill>> {
        Ok(collect(&self.bills, |b| b.user_id == user_id, |b| b.id))
    }

    async fn find_by_status(&self, status: BillStatus) -> DomainResult<Vec<Bill>> {
        Ok(collect(&self.bills, |b| b.status == status, |b| b.id))
    }

    async fn save(&self, mut bill: Bill) -> DomainResult<Bill> {
        bill.id = next_id(&self.bill_counter);
        self.bills.insert(bill.id, bill.clone());
        Ok(bill)
    }

    async fn update(&self, bill: Bill) -> DomainResult<()> {
        if !self.bills.contains_key(&bill.id) {
            return Err(DomainError::not_found("Bill", "id", bill.id));
        }
        self.bills.insert(bill.id, bill);
        Ok(())
    }
}

// ── Payments ───────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, transaction_id: &str) -> DomainResult<Option<PaymentTransaction>> {
        Ok(self.payments.get(transaction_id).map(|t| t.clone()))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        Ok(collect(&self.payments, |t| t.user_id == user_id, |t| t.created_at))
    }

    async fn find_by_bill(&self, bill_id: i32) -> DomainResult<Vec<PaymentTransaction>> {
        Ok(collect(&self.payments, |t| t.bill_id == bill_id, |t| t.created_at))
    }

    async fn find_by_status(&self, status: PaymentStatus) -> DomainResult<Vec<PaymentTransaction>> {
        Ok(collect(&self.payments, |t| t.status == status, |t| t.created_at))
    }

    async fn find_due_retries(
        &self,
        now: DateTime<Utc>,
        max_retries: i32,
    ) -> DomainResult<Vec<PaymentTransaction>> {
        Ok(collect(
            &self.payments,
            |t| {
                t.is_failed()
                    && t.retry_count < max_retries
                    && t.scheduled_retry_date.is_some_and(|at| at <= now)
            },
            |t| t.scheduled_retry_date,
        ))
    }

    async fn save(&self, transaction: PaymentTransaction) -> DomainResult<()> {
        if self.payments.contains_key(&transaction.transaction_id) {
            return Err(DomainError::Conflict(format!(
                "Transaction {}",
                transaction.transaction_id
            )));
        }
        self.payments
            .insert(transaction.transaction_id.clone(), transaction);
        Ok(())
    }

    async fn claim_for_retry(
        &self,
        transaction_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let Some(mut tx) = self.payments.get_mut(transaction_id) else {
            return Err(DomainError::not_found("Transaction", "transaction_id", transaction_id));
        };
        if !tx.is_failed() {
            return Ok(false);
        }
        tx.supersede(now);
        Ok(true)
    }

    async fn record(&self, transaction: PaymentTransaction, bill: Bill) -> DomainResult<()> {
        // Holding the bill entry serialises concurrent payments of one bill.
        let Some(mut stored) = self.bills.get_mut(&bill.id) else {
            return Err(DomainError::not_found("Bill", "id", bill.id));
        };
        if stored.is_paid() {
            return Err(DomainError::Conflict(format!(
                "Bill {} is already paid",
                stored.bill_number
            )));
        }
        if self.payments.contains_key(&transaction.transaction_id) {
            return Err(DomainError::Conflict(format!(
                "Transaction {}",
                transaction.transaction_id
            )));
        }
        self.payments
            .insert(transaction.transaction_id.clone(), transaction);
        *stored = bill;
        Ok(())
    }
}

// ── Sales ──────────────────────────────────────────────────────

#[async_trait]
impl SaleRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Sale>> {
        Ok(collect(&self.sales, |_| true, |s| (s.sale_date, s.id)))
    }

    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Sale>> {
        Ok(collect(
            &self.sales,
            |s| s.sale_date >= start && s.sale_date <= end,
            |s| (s.sale_date, s.id),
        ))
    }

    async fn find_by_region(&self, region: &str) -> DomainResult<Vec<Sale>> {
        Ok(collect(&self.sales, |s| s.region == region, |s| (s.sale_date, s.id)))
    }

    async fn find_page(&self, offset: u64, limit: u64) -> DomainResult<Vec<Sale>> {
        let mut sales = collect(&self.sales, |_| true, |s| (s.sale_date, s.id));
        sales.reverse();
        Ok(sales
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.sales.len() as u64)
    }

    async fn save(&self, mut sale: Sale) -> DomainResult<Sale> {
        sale.id = next_id(&self.sale_counter);
        self.sales.insert(sale.id, sale.clone());
        Ok(sale)
    }
}

// ── Products ───────────────────────────────────────────────────

#[async_trait]
impl ProductRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Product>> {
        Ok(self.products.get(&id).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        Ok(collect(&self.products, |_| true, |p| p.id))
    }

    async fn save(&self, mut product: Product) -> DomainResult<Product> {
        product.id = next_id(&self.product_counter);
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> DomainResult<()> {
        if !self.products.contains_key(&product.id) {
            return Err(DomainError::not_found("Product", "id", product.id));
        }
        self.products.insert(product.id, product);
        Ok(())
    }
}

// ── Cards ──────────────────────────────────────────────────────

#[async_trait]
impl CardRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<CardDetail>> {
        Ok(self.cards.get(&id).map(|c| c.clone()))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<CardDetail>> {
        Ok(collect(&self.cards, |c| c.user_id == user_id, |c| c.id))
    }

    async fn find_all(&self) -> DomainResult<Vec<CardDetail>> {
        Ok(collect(&self.cards, |_| true, |c| c.id))
    }

    async fn save(&self, mut card: CardDetail) -> DomainResult<CardDetail> {
        card.id = next_id(&self.card_counter);
        self.cards.insert(card.id, card.clone());
        Ok(card)
    }

    async fn update(&self, card: CardDetail) -> DomainResult<()> {
        if !self.cards.contains_key(&card.id) {
            return Err(DomainError::not_found("Card", "id", card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    async fn clear_default_for_user(&self, user_id: i32, keep_id: i32) -> DomainResult<()> {
        for mut card in self.cards.iter_mut() {
            if card.user_id == user_id && card.id != keep_id && card.is_default {
                card.is_default = false;
                card.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.cards
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Card", "id", id))?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
