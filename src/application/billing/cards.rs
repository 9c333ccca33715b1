//! Stored payment cards

use std::sync::Arc;

use tracing::info;

use crate::domain::card::{CardDetail, CardUpdate, NewCard};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct CardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<CardDetail>> {
        self.repos.cards().find_all().await
    }

    pub async fn user_cards(&self, user_id: i32) -> DomainResult<Vec<CardDetail>> {
        self.repos.cards().find_by_user(user_id).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<CardDetail> {
        self.repos
            .cards()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Card", "id", id))
    }

    pub async fn create(&self, input: NewCard) -> DomainResult<CardDetail> {
        self.repos
            .users()
            .find_by_id(input.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", input.user_id))?;

        let card = self.repos.cards().save(CardDetail::from_new(input)?).await?;
        if card.is_default {
            self.repos.cards().clear_default_for_user(card.user_id, card.id).await?;
        }

        info!(
            card_id = card.id,
            user_id = card.user_id,
            last4 = card.card_number_last4.as_str(),
            "Card stored"
        );
        Ok(card)
    }

    pub async fn update(&self, id: i32, update: CardUpdate) -> DomainResult<CardDetail> {
        let mut card = self.get(id).await?;
        card.apply(update)?;
        self.repos.cards().update(card.clone()).await?;
        if card.is_default {
            self.repos.cards().clear_default_for_user(card.user_id, card.id).await?;
        }
        Ok(card)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let card = self.get(id).await?;
        self.repos.cards().delete(card.id).await?;
        info!(card_id = id, user_id = card.user_id, "Card removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::testing::repos;
    use crate::domain::User;

    fn new_card(user_id: i32, is_default: bool) -> NewCard {
        NewCard {
            user_id,
            card_number: "5500-0000-0000-0004".into(),
            card_holder_name: "Dana Lee".into(),
            card_type: Some("MASTERCARD".into()),
            expiry_month: 2,
            expiry_year: 2030,
            is_default,
        }
    }

    #[tokio::test]
    async fn new_default_card_replaces_old_default() {
        let repos = repos();
        let user = repos
            .users()
            .save(User::new_customer("dana@example.com", "Dana"))
            .await
            .unwrap();
        let service = CardService::new(repos);

        let first = service.create(new_card(user.id, true)).await.unwrap();
        let second = service.create(new_card(user.id, true)).await.unwrap();

        assert!(!service.get(first.id).await.unwrap().is_default);
        assert!(service.get(second.id).await.unwrap().is_default);
        assert_eq!(second.card_number_last4, "0004");
    }

    #[tokio::test]
    async fn card_needs_existing_owner() {
        let service = CardService::new(repos());
        assert!(matches!(
            service.create(new_card(77, false)).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_removes_card() {
        let repos = repos();
        let user = repos.users().save(User::new_customer("e@example.com", "E")).await.unwrap();
        let service = CardService::new(repos);
        let card = service.create(new_card(user.id, false)).await.unwrap();

        service.delete(card.id).await.unwrap();
        assert!(service.user_cards(user.id).await.unwrap().is_empty());
        assert!(service.delete(card.id).await.is_err());
    }
}
