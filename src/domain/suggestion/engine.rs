//! Suggestion rules

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::{rank, Priority, Suggestion, SuggestionCategory};
use crate::domain::sale::Sale;
use crate::shared::money::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceStatus {
    TopPerformer,
    Steady,
    SlowMoving,
    Stagnant,
}

impl PerformanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopPerformer => "TOP_PERFORMER",
            Self::Steady => "STEADY",
            Self::SlowMoving => "SLOW_MOVING",
            Self::Stagnant => "STAGNANT",
        }
    }

    fn classify(velocity: Decimal, days_since_last: i64) -> Self {
        if velocity > dec!(2) {
            Self::TopPerformer
        } else if velocity > dec!(0.5) {
            Self::Steady
        } else if days_since_last > 30 {
            Self::Stagnant
        } else {
            Self::SlowMoving
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductPerformance {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub sales_count: u64,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
    pub avg_order_value: Decimal,
    pub avg_unit_price: Decimal,
    pub days_since_first_sale: i64,
    pub days_since_last_sale: i64,
    pub status: PerformanceStatus,
    /// Units sold per day since the first sale
    pub velocity: Decimal,
}

/// Snapshot of the ledger and stock the rules run over
pub struct SuggestionEngine<'a> {
    sales: &'a [Sale],
    stock: &'a HashMap<i32, i32>,
    now: DateTime<Utc>,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(sales: &'a [Sale], stock: &'a HashMap<i32, i32>, now: DateTime<Utc>) -> Self {
        Self { sales, stock, now }
    }

    /// Every rule, ranked.
    pub fn all(&self) -> Vec<Suggestion> {
        let mut out = self.inventory();
        out.extend(self.pricing());
        out.extend(self.marketing());
        out.extend(self.regional());
        out.extend(self.bundles());
        rank(&mut out);
        out
    }

    /// Per-product velocity scoring, fastest first.
    pub fn product_performance(&self) -> Vec<ProductPerformance> {
        let mut order: Vec<i32> = Vec::new();
        let mut grouped: HashMap<i32, Vec<&Sale>> = HashMap::new();
        for sale in self.sales {
            grouped
                .entry(sale.product_id)
                .or_insert_with(|| {
                    order.push(sale.product_id);
                    Vec::new()
                })
                .push(sale);
        }

        let mut out: Vec<ProductPerformance> = order
            .into_iter()
            .filter_map(|id| grouped.remove(&id).map(|sales| self.score(id, &sales)))
            .collect();
        out.sort_by(|a, b| b.velocity.cmp(&a.velocity));
        out
    }

    fn score(&self, product_id: i32, sales: &[&Sale]) -> ProductPerformance {
        let first = sales.iter().map(|s| s.sale_date).min().unwrap_or(self.now);
        let last = sales.iter().map(|s| s.sale_date).max().unwrap_or(self.now);
        let days_since_first = (self.now - first).num_days();
        let days_since_last = (self.now - last).num_days();

        let count = Decimal::from(sales.len() as u64);
        let total_quantity: i64 = sales.iter().map(|s| i64::from(s.quantity)).sum();
        let total_revenue: Decimal = sales.iter().map(|s| s.final_amount).sum();
        let price_sum: Decimal = sales.iter().map(|s| s.unit_price).sum();

        let velocity = if days_since_first > 0 {
            Decimal::from(total_quantity) / Decimal::from(days_since_first)
        } else {
            Decimal::ZERO
        };

        ProductPerformance {
            product_id,
            product_name: sales[0].product_name.clone(),
            category: sales[0].category.clone(),
            sales_count: sales.len() as u64,
            total_quantity,
            total_revenue,
            avg_order_value: total_revenue / count,
            avg_unit_price: price_sum / count,
            days_since_first_sale: days_since_first,
            days_since_last_sale: days_since_last,
            status: PerformanceStatus::classify(velocity, days_since_last),
            velocity,
        }
    }

    // ── Inventory ──────────────────────────────────────────────

    pub fn inventory(&self) -> Vec<Suggestion> {
        let performance = self.product_performance();
        let mut out = Vec::new();

        for perf in performance.iter().filter(|p| p.status == PerformanceStatus::TopPerformer) {
            let stock = self.stock_of(perf.product_id);
            let days_left = if stock > 0 {
                (Decimal::from(stock) / perf.velocity).trunc()
            } else {
                Decimal::ZERO
            };
            if days_left >= dec!(30) {
                continue;
            }

            let urgent = days_left < dec!(10);
            let restock = (perf.velocity * dec!(60)).trunc();
            out.push(Suggestion {
                category: SuggestionCategory::Inventory,
                priority: if urgent { Priority::High } else { Priority::Medium },
                title: format!("Restock High-Demand Product: {}", perf.product_name),
                description: format!(
                    "Selling {:.1} units/day. Current stock ({}) runs out in {} days.",
                    perf.velocity, stock, days_left
                ),
                actionable: format!("Order {} units to hold a 60-day supply", restock),
                impact_score: if urgent { 90 } else { 70 },
                metric: "Stock Days Remaining".into(),
                current_value: days_left,
                potential_value: dec!(60),
            });
        }

        for perf in performance.iter().filter(|p| {
            matches!(p.status, PerformanceStatus::SlowMoving | PerformanceStatus::Stagnant)
        }) {
            let stock = self.stock_of(perf.product_id);
            if stock <= 20 {
                continue;
            }
            out.push(Suggestion {
                category: SuggestionCategory::Inventory,
                priority: Priority::Medium,
                title: format!("Reduce Slow-Moving Inventory: {}", perf.product_name),
                description: format!(
                    "{} units in stock, selling {:.1} units/day. Last sale {} days ago.",
                    stock, perf.velocity, perf.days_since_last_sale
                ),
                actionable: "Run a 20-30% clearance promotion or bundle with popular items".into(),
                impact_score: 60,
                metric: "Excess Stock Value".into(),
                current_value: round_money(Decimal::from(stock) * perf.avg_unit_price),
                potential_value: round_money(dec!(10) * perf.avg_unit_price),
            });
        }

        out
    }

    fn stock_of(&self, product_id: i32) -> i32 {
        self.stock.get(&product_id).copied().unwrap_or(0)
    }

    // ── Pricing ────────────────────────────────────────────────

    pub fn pricing(&self) -> Vec<Suggestion> {
        let mut out = Vec::new();

        let mut categories: Vec<&str> = Vec::new();
        let mut totals: HashMap<&str, (Decimal, Decimal, u64)> = HashMap::new();
        for sale in self.sales {
            let entry = totals.entry(sale.category.as_str()).or_insert_with(|| {
                categories.push(sale.category.as_str());
                (Decimal::ZERO, Decimal::ZERO, 0)
            });
            entry.0 += sale.discount_applied;
            entry.1 += sale.final_amount;
            entry.2 += 1;
        }

        for category in categories {
            let (discounts, revenue, count) = totals[category];
            if revenue <= Decimal::ZERO {
                continue;
            }
            let rate = discounts / revenue;
            if rate <= dec!(0.05) {
                continue;
            }
            let percent = round_money(rate * dec!(100));
            out.push(Suggestion {
                category: SuggestionCategory::Pricing,
                priority: Priority::Medium,
                title: format!("Optimize Discounting Strategy: {}", category),
                description: format!(
                    "Average discount of ${:.2} per sale ({}% of revenue). Consider value-based pricing.",
                    discounts / Decimal::from(count),
                    percent
                ),
                actionable: "Test a 10-15% price increase for premium customers or tiered pricing".into(),
                impact_score: 65,
                metric: "Discount Rate".into(),
                current_value: percent,
                potential_value: dec!(3),
            });
        }

        for perf in self
            .product_performance()
            .into_iter()
            .filter(|p| p.status == PerformanceStatus::TopPerformer)
            .take(5)
            .filter(|p| p.avg_order_value > dec!(100))
        {
            out.push(Suggestion {
                category: SuggestionCategory::Pricing,
                priority: Priority::Low,
                title: format!("Test Premium Pricing: {}", perf.product_name),
                description: format!(
                    "High-value product (${:.2} average order) with {} sales. Demand looks price-insensitive.",
                    perf.avg_order_value, perf.sales_count
                ),
                actionable: "A/B test a 5-8% price increase for new customers".into(),
                impact_score: 55,
                metric: "Potential Revenue Uplift".into(),
                current_value: round_money(perf.total_revenue),
                potential_value: round_money(perf.total_revenue * dec!(1.05)),
            });
        }

        out
    }

    // ── Marketing ──────────────────────────────────────────────

    pub fn marketing(&self) -> Vec<Suggestion> {
        let mut out = Vec::new();

        let customers: HashSet<i32> = self.sales.iter().map(|s| s.customer_id).collect();
        if customers.is_empty() {
            return out;
        }
        let total = Decimal::from(customers.len() as u64);

        let premium: HashSet<i32> = self
            .sales
            .iter()
            .filter(|s| s.is_premium_customer)
            .map(|s| s.customer_id)
            .collect();
        let premium_rate = Decimal::from(premium.len() as u64) / total;

        if premium_rate < dec!(0.4) {
            let regular_revenue: Decimal = self
                .sales
                .iter()
                .filter(|s| !s.is_premium_customer)
                .map(|s| s.final_amount)
                .sum();
            out.push(Suggestion {
                category: SuggestionCategory::Marketing,
                priority: Priority::High,
                title: "Increase Premium Membership Conversion".into(),
                description: format!(
                    "Only {:.1}% of customers are premium members.",
                    premium_rate * dec!(100)
                ),
                actionable: "Offer top regular customers a 3-month premium trial at 50% off".into(),
                impact_score: 85,
                metric: "Potential Annual Revenue".into(),
                current_value: Decimal::ZERO,
                potential_value: round_money(regular_revenue * dec!(0.15) * dec!(4)),
            });
        }

        let mut categories_by_customer: HashMap<i32, HashSet<&str>> = HashMap::new();
        for sale in self.sales {
            categories_by_customer
                .entry(sale.customer_id)
                .or_default()
                .insert(sale.category.as_str());
        }
        let single = categories_by_customer.values().filter(|c| c.len() == 1).count() as u64;
        if Decimal::from(single) > total * dec!(0.3) {
            out.push(Suggestion {
                category: SuggestionCategory::Marketing,
                priority: Priority::Medium,
                title: "Cross-Category Promotion Campaign".into(),
                description: format!(
                    "{} customers ({:.1}%) buy from a single category.",
                    single,
                    Decimal::from(single) * dec!(100) / total
                ),
                actionable: "Email a 15% discount on complementary categories".into(),
                impact_score: 75,
                metric: "Cross-Sell Conversion Rate".into(),
                current_value: Decimal::ZERO,
                potential_value: Decimal::from(single) * dec!(0.25),
            });
        }

        let thirty_days_ago = self.now - Duration::days(30);
        let sixty_days_ago = self.now - Duration::days(60);
        let recent: HashSet<i32> = self
            .sales
            .iter()
            .filter(|s| s.sale_date > thirty_days_ago)
            .map(|s| s.customer_id)
            .collect();
        let lapsed: HashSet<i32> = self
            .sales
            .iter()
            .filter(|s| s.sale_date < thirty_days_ago && s.sale_date > sixty_days_ago)
            .map(|s| s.customer_id)
            .filter(|id| !recent.contains(id))
            .collect();
        if lapsed.len() > 10 {
            let lapsed_count = Decimal::from(lapsed.len() as u64);
            out.push(Suggestion {
                category: SuggestionCategory::Marketing,
                priority: Priority::High,
                title: "Win-Back Campaign for Lapsed Customers".into(),
                description: format!(
                    "{} customers have not purchased in 30-60 days.",
                    lapsed.len()
                ),
                actionable: "Send a personalised offer with 20% off their favourite category".into(),
                impact_score: 80,
                metric: "Lapsed Customers".into(),
                current_value: lapsed_count,
                potential_value: lapsed_count * dec!(0.2),
            });
        }

        out
    }

    // ── Regional ───────────────────────────────────────────────

    pub fn regional(&self) -> Vec<Suggestion> {
        let mut regions: Vec<(&str, Decimal, u64)> = Vec::new();
        for sale in self.sales {
            match regions.iter_mut().find(|(r, _, _)| *r == sale.region) {
                Some(entry) => {
                    entry.1 += sale.final_amount;
                    entry.2 += 1;
                }
                None => regions.push((sale.region.as_str(), sale.final_amount, 1)),
            }
        }
        if regions.is_empty() {
            return Vec::new();
        }

        let total: Decimal = regions.iter().map(|(_, revenue, _)| *revenue).sum();
        let average = total / Decimal::from(regions.len() as u64);
        let mut out = Vec::new();

        for (region, revenue, count) in &regions {
            if *revenue >= average * dec!(0.6) {
                continue;
            }
            out.push(Suggestion {
                category: SuggestionCategory::Regional,
                priority: Priority::Medium,
                title: format!("Boost Sales in {}", region),
                description: format!(
                    "Region generating ${:.2} ({:.1}% below average) from {} sales.",
                    revenue,
                    (average - revenue) / average * dec!(100),
                    count
                ),
                actionable: "Launch a regional promotion or raise local marketing spend by 30%".into(),
                impact_score: 70,
                metric: "Revenue Gap".into(),
                current_value: round_money(*revenue),
                potential_value: round_money(average),
            });
        }

        // max_by keeps the last maximum, so walk in reverse to favour the first seen
        if let Some((region, revenue, _)) = regions.iter().rev().max_by(|a, b| a.1.cmp(&b.1)) {
            out.push(Suggestion {
                category: SuggestionCategory::Regional,
                priority: Priority::Low,
                title: format!("Expand Success in {}", region),
                description: format!("Top performing region with ${:.2} revenue.", revenue),
                actionable: "Increase inventory allocation and test localised product variations".into(),
                impact_score: 60,
                metric: "Current Revenue".into(),
                current_value: round_money(*revenue),
                potential_value: round_money(*revenue * dec!(1.25)),
            });
        }

        out
    }

    // ── Bundles ────────────────────────────────────────────────

    pub fn bundles(&self) -> Vec<Suggestion> {
        let mut products_by_customer: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for sale in self.sales {
            products_by_customer
                .entry(sale.customer_id)
                .or_default()
                .insert(sale.product_id);
        }

        let mut pairs: HashMap<(i32, i32), u64> = HashMap::new();
        for products in products_by_customer.values() {
            let products: Vec<i32> = products.iter().copied().collect();
            for (i, a) in products.iter().enumerate() {
                for b in &products[i + 1..] {
                    *pairs.entry((*a, *b)).or_default() += 1;
                }
            }
        }

        let mut top: Vec<((i32, i32), u64)> =
            pairs.into_iter().filter(|(_, n)| *n >= 3).collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top.truncate(3);

        top.into_iter()
            .map(|((a, b), n)| Suggestion {
                category: SuggestionCategory::Product,
                priority: Priority::Medium,
                title: "Create Product Bundle".into(),
                description: format!(
                    "Products {} and {} were bought together by {} customers.",
                    a, b, n
                ),
                actionable: "Offer a combo bundle at 10% off to lift average order value".into(),
                impact_score: 65,
                metric: "Co-Purchase Frequency".into(),
                current_value: Decimal::from(n),
                potential_value: Decimal::from(n * 2),
            })
            .collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────
