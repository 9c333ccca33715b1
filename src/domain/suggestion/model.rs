//! Suggestion value types

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionCategory {
    Inventory,
    Pricing,
    Marketing,
    Regional,
    Product,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "INVENTORY",
            Self::Pricing => "PRICING",
            Self::Marketing => "MARKETING",
            Self::Regional => "REGIONAL",
            Self::Product => "PRODUCT",
        }
    }
}

impl FromStr for SuggestionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INVENTORY" => Ok(Self::Inventory),
            "PRICING" => Ok(Self::Pricing),
            "MARKETING" => Ok(Self::Marketing),
            "REGIONAL" => Ok(Self::Regional),
            "PRODUCT" => Ok(Self::Product),
            other => Err(DomainError::Validation(format!(
                "Unknown suggestion category: {}",
                other
            ))),
        }
    }
}

/// Urgency; sorts `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            other => Err(DomainError::Validation(format!("Unknown priority: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Concrete next step
    pub actionable: String,
    /// Estimated business impact, 0 to 100
    pub impact_score: u8,
    pub metric: String,
    pub current_value: Decimal,
    pub potential_value: Decimal,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionFilter {
    pub category: Option<SuggestionCategory>,
    pub priority: Option<Priority>,
}

impl SuggestionFilter {
    pub fn apply(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        suggestions
            .into_iter()
            .filter(|s| self.category.map_or(true, |c| s.category == c))
            .filter(|s| self.priority.map_or(true, |p| s.priority == p))
            .collect()
    }
}

/// Priority first, then highest impact.
pub fn rank(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.impact_score.cmp(&a.impact_score))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(category: SuggestionCategory, priority: Priority, impact: u8) -> Suggestion {
        Suggestion {
            category,
            priority,
            title: String::new(),
            description: String::new(),
            actionable: String::new(),
            impact_score: impact,
            metric: String::new(),
            current_value: Decimal::ZERO,
            potential_value: Decimal::ZERO,
        }
    }

    #[test]
    fn rank_orders_priority_then_impact() {
        let mut list = vec![
            suggestion(SuggestionCategory::Regional, Priority::Low, 60),
            suggestion(SuggestionCategory::Pricing, Priority::Medium, 65),
            suggestion(SuggestionCategory::Inventory, Priority::Medium, 70),
            suggestion(SuggestionCategory::Marketing, Priority::High, 80),
        ];
        rank(&mut list);
        let impacts: Vec<u8> = list.iter().map(|s| s.impact_score).collect();
        assert_eq!(impacts, vec![80, 70, 65, 60]);
    }

    #[test]
    fn filter_by_category_and_priority() {
        let list = vec![
            suggestion(SuggestionCategory::Regional, Priority::Low, 60),
            suggestion(SuggestionCategory::Regional, Priority::Medium, 70),
            suggestion(SuggestionCategory::Pricing, Priority::Medium, 65),
        ];
        let filter = SuggestionFilter {
            category: Some("regional".parse().unwrap()),
            priority: Some("medium".parse().unwrap()),
        };
        let out = filter.apply(list);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].impact_score, 70);
    }
}
