//! Suggestion DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::suggestion::{Suggestion, SuggestionFilter};
use crate::domain::DomainResult;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionDto {
    /// `INVENTORY`, `PRICING`, `MARKETING`, `REGIONAL` or `PRODUCT`
    pub category: String,
    /// `HIGH`, `MEDIUM` or `LOW`
    pub priority: String,
    pub title: String,
    pub description: String,
    pub actionable: String,
    pub impact_score: u8,
    pub metric: String,
    #[schema(value_type = String)]
    pub current_value: Decimal,
    #[schema(value_type = String)]
    pub potential_value: Decimal,
}

impl From<Suggestion> for SuggestionDto {
    fn from(s: Suggestion) -> Self {
        Self {
            category: s.category.as_str().to_string(),
            priority: s.priority.as_str().to_string(),
            title: s.title,
            description: s.description,
            actionable: s.actionable,
            impact_score: s.impact_score,
            metric: s.metric,
            current_value: s.current_value,
            potential_value: s.potential_value,
        }
    }
}

/// Case-insensitive filters for `GET /suggestions`
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SuggestionQuery {
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl SuggestionQuery {
    pub fn into_filter(self) -> DomainResult<SuggestionFilter> {
        Ok(SuggestionFilter {
            category: self.category.as_deref().map(str::parse).transpose()?,
            priority: self.priority.as_deref().map(str::parse).transpose()?,
        })
    }
}
