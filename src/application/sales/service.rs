//! Sales ledger service
//!
//! Records sales and serves the analytics views over them.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::sale::analytics::{self, PeriodGranularity};
use crate::domain::sale::{
    CategorySales, DateRange, NewSale, PeriodSales, ProductSales, SalesAnalytics,
};
use crate::domain::{DomainResult, RepositoryProvider, Sale};
use crate::shared::PaginatedResult;

pub struct SalesService {
    repos: Arc<dyn RepositoryProvider>,
    premium_discount_rate: Decimal,
}

impl SalesService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, premium_discount_rate: Decimal) -> Self {
        Self {
            repos,
            premium_discount_rate,
        }
    }

    pub async fn create(&self, input: NewSale) -> DomainResult<Sale> {
        let sale = Sale::record(input, self.premium_discount_rate, Utc::now())?;
        let sale = self.repos.sales().save(sale).await?;
        info!(
            sale_id = sale.id,
            product_id = sale.product_id,
            customer_id = sale.customer_id,
            final_amount = %sale.final_amount,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Newest sales first.
    pub async fn list(&self, page: u64, limit: u64) -> DomainResult<PaginatedResult<Sale>> {
        let offset = page.saturating_sub(1) * limit;
        let items = self.repos.sales().find_page(offset, limit).await?;
        let total = self.repos.sales().count().await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    /// Every sale in `range`, newest first.
    pub async fn in_range(&self, range: DateRange) -> DomainResult<Vec<Sale>> {
        let mut sales = self.ledger(Some(range)).await?;
        sales.reverse();
        Ok(sales)
    }

    pub async fn by_region(&self, region: &str) -> DomainResult<Vec<Sale>> {
        self.repos.sales().find_by_region(region).await
    }

    pub async fn analytics(&self, range: Option<DateRange>) -> DomainResult<SalesAnalytics> {
        Ok(analytics::summarize(&self.ledger(range).await?))
    }

    pub async fn by_product(&self, range: Option<DateRange>) -> DomainResult<Vec<ProductSales>> {
        Ok(analytics::by_product(&self.ledger(range).await?))
    }

    pub async fn by_category(&self, range: Option<DateRange>) -> DomainResult<Vec<CategorySales>> {
        Ok(analytics::by_category(&self.ledger(range).await?))
    }

    pub async fn by_period(
        &self,
        granularity: PeriodGranularity,
        range: Option<DateRange>,
    ) -> DomainResult<Vec<PeriodSales>> {
        Ok(analytics::by_period(&self.ledger(range).await?, granularity))
    }

    pub async fn top_products(
        &self,
        limit: usize,
        range: Option<DateRange>,
    ) -> DomainResult<Vec<ProductSales>> {
        Ok(analytics::top_products(&self.ledger(range).await?, limit))
    }

    async fn ledger(&self, range: Option<DateRange>) -> DomainResult<Vec<Sale>> {
        match range {
            Some(range) => self.repos.sales().find_between(range.start, range.end).await,
            None => self.repos.sales().find_all().await,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::domain::sale::model::tests::new_sale;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn premium_discount_comes_from_config() {
        let service = SalesService::new(repos(), dec!(0.10));
        let mut input = new_sale(1, "Chair", 2, dec!(50));
        input.is_premium_customer = true;
        let sale = service.create(input).await.unwrap();
        assert_eq!(sale.discount_applied, dec!(10));
        assert_eq!(sale.final_amount, dec!(90));
    }

    #[tokio::test]
    async fn range_limits_analytics() {
        let service = SalesService::new(repos(), dec!(0.20));
        let jan = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        for (offset, price) in [(0, dec!(10)), (40, dec!(99))] {
            let mut input = new_sale(1, "Chair", 1, price);
            input.sale_date = Some(jan + Duration::days(offset));
            service.create(input).await.unwrap();
        }

        let all = service.analytics(None).await.unwrap();
        assert_eq!(all.total_sales, 2);

        let range = DateRange::from_bounds(Some(jan), Some(jan + Duration::days(1)));
        let january = service.analytics(range).await.unwrap();
        assert_eq!(january.total_sales, 1);
        assert_eq!(january.total_revenue, dec!(10));
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let service = SalesService::new(repos(), dec!(0.20));
        let base = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        for day in 0..5 {
            let mut input = new_sale(day, "Item", 1, dec!(1));
            input.sale_date = Some(base + Duration::days(i64::from(day)));
            service.create(input).await.unwrap();
        }

        let page = service.list(1, 2).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].product_id, 4);

        let last = service.list(3, 2).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].product_id, 0);
    }

    #[tokio::test]
    async fn in_range_is_newest_first() {
        let service = SalesService::new(repos(), dec!(0.20));
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        for day in 0..4 {
            let mut input = new_sale(day, "Item", 1, dec!(1));
            input.sale_date = Some(base + Duration::days(i64::from(day)));
            service.create(input).await.unwrap();
        }

        let range = DateRange {
            start: base + Duration::days(1),
            end: base + Duration::days(2),
        };
        let ids: Vec<i32> = service
            .in_range(range)
            .await
            .unwrap()
            .iter()
            .map(|s| s.product_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn region_lookup_is_exact() {
        let service = SalesService::new(repos(), dec!(0.20));
        let mut south = new_sale(1, "Item", 1, dec!(1));
        south.region = "South".into();
        service.create(south).await.unwrap();
        service.create(new_sale(1, "Item", 1, dec!(1))).await.unwrap();

        assert_eq!(service.by_region("South").await.unwrap().len(), 1);
        assert!(service.by_region("East").await.unwrap().is_empty());
    }
}
