//! Suggestion service: loads the ledger and stock, runs the engine.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::suggestion::{Priority, Suggestion, SuggestionEngine, SuggestionFilter};
use crate::domain::{DomainResult, RepositoryProvider};

pub struct SuggestionService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SuggestionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn all(&self, filter: SuggestionFilter) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| filter.apply(engine.all())).await
    }

    pub async fn inventory(&self) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| engine.inventory()).await
    }

    pub async fn pricing(&self) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| engine.pricing()).await
    }

    pub async fn marketing(&self) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| engine.marketing()).await
    }

    pub async fn regional(&self) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| engine.regional()).await
    }

    pub async fn bundles(&self) -> DomainResult<Vec<Suggestion>> {
        self.run(|engine| engine.bundles()).await
    }

    pub async fn high_priority(&self) -> DomainResult<Vec<Suggestion>> {
        self.all(SuggestionFilter {
            category: None,
            priority: Some(Priority::High),
        })
        .await
    }

    async fn run<F>(&self, rule: F) -> DomainResult<Vec<Suggestion>>
    where
        F: FnOnce(&SuggestionEngine<'_>) -> Vec<Suggestion>,
    {
        let sales = self.repos.sales().find_all().await?;
        let stock = self.repos.products().stock_levels().await?;
        let engine = SuggestionEngine::new(&sales, &stock, Utc::now());
        Ok(rule(&engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::domain::sale::model::tests::new_sale;
    use crate::domain::Sale;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn high_priority_only_returns_high() {
        let repos = repos();
        for customer in 1..=3 {
            let mut input = new_sale(1, "Kettle", 1, dec!(40));
            input.customer_id = customer;
            repos
                .sales()
                .save(Sale::record(input, dec!(0.2), Utc::now()).unwrap())
                .await
                .unwrap();
        }

        let service = SuggestionService::new(repos);
        let high = service.high_priority().await.unwrap();
        assert!(!high.is_empty());
        assert!(high.iter().all(|s| s.priority == Priority::High));

        let all = service.all(SuggestionFilter::default()).await.unwrap();
        assert!(all.len() > high.len());
        assert_eq!(service.regional().await.unwrap().len(), 1);
    }
}
