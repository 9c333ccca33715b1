//! Calendar windows an invoice can cover

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingPeriod {
    Week,
    Month,
    Year,
    Custom,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
            Self::Custom => "CUSTOM",
        }
    }
}

impl FromStr for BillingPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WEEK" => Ok(Self::Week),
            "MONTH" => Ok(Self::Month),
            "YEAR" => Ok(Self::Year),
            "CUSTOM" => Ok(Self::Custom),
            other => Err(DomainError::Validation(format!("Unknown period: {}", other))),
        }
    }
}

/// Inclusive date window with its human-readable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
}

const DAY_FORMAT: &str = "%b %d, %Y";

impl PeriodWindow {
    /// Resolve the window relative to `today`.
    ///
    /// Supplied dates are only consulted for [`BillingPeriod::Custom`].
    pub fn resolve(
        period: BillingPeriod,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        match period {
            BillingPeriod::Week => {
                let start = today.week(chrono::Weekday::Mon).first_day();
                let end = start + Days::new(6);
                Ok(Self {
                    start,
                    end,
                    description: format!("Week of {}", start.format(DAY_FORMAT)),
                })
            }
            BillingPeriod::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                Ok(Self {
                    start,
                    end,
                    description: today.format("%B %Y").to_string(),
                })
            }
            BillingPeriod::Year => {
                let year = today.year();
                let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
                Ok(Self {
                    start,
                    end,
                    description: year.to_string(),
                })
            }
            BillingPeriod::Custom => match (start, end) {
                (Some(start), Some(end)) if start <= end => Ok(Self {
                    start,
                    end,
                    description: format!(
                        "{} to {}",
                        start.format(DAY_FORMAT),
                        end.format(DAY_FORMAT)
                    ),
                }),
                (Some(_), Some(_)) => Err(DomainError::Validation(
                    "Start date must not be after end date".into(),
                )),
                _ => Err(DomainError::Validation(
                    "Custom period requires both start and end dates".into(),
                )),
            },
        }
    }

    /// First and last instant of the window: `start 00:00:00` to `end 23:59:59`.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        (
            self.start.and_time(NaiveTime::MIN).and_utc(),
            self.end.and_time(last_second).and_utc(),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-01-08 is a Thursday
        let w = PeriodWindow::resolve(BillingPeriod::Week, None, None, date(2026, 1, 8)).unwrap();
        assert_eq!(w.start, date(2026, 1, 5));
        assert_eq!(w.end, date(2026, 1, 11));
        assert_eq!(w.description, "Week of Jan 05, 2026");
    }

    #[test]
    fn week_on_a_monday_starts_that_day() {
        let w = PeriodWindow::resolve(BillingPeriod::Week, None, None, date(2026, 1, 5)).unwrap();
        assert_eq!(w.start, date(2026, 1, 5));
    }

    #[test]
    fn week_on_sunday_looks_back() {
        let w = PeriodWindow::resolve(BillingPeriod::Week, None, None, date(2026, 1, 11)).unwrap();
        assert_eq!(w.start, date(2026, 1, 5));
    }

    #[test]
    fn month_covers_whole_month() {
        let w = PeriodWindow::resolve(BillingPeriod::Month, None, None, date(2024, 2, 14)).unwrap();
        assert_eq!(w.start, date(2024, 2, 1));
        assert_eq!(w.end, date(2024, 2, 29));
        assert_eq!(w.description, "February 2024");

        let dec =
            PeriodWindow::resolve(BillingPeriod::Month, None, None, date(2025, 12, 31)).unwrap();
        assert_eq!(dec.end, date(2025, 12, 31));
    }

    #[test]
    fn year_covers_whole_year() {
        let w = PeriodWindow::resolve(BillingPeriod::Year, None, None, date(2026, 7, 4)).unwrap();
        assert_eq!(w.start, date(2026, 1, 1));
        assert_eq!(w.end, date(2026, 12, 31));
        assert_eq!(w.description, "2026");
    }

    #[test]
    fn fixed_periods_ignore_supplied_dates() {
        let w = PeriodWindow::resolve(
            BillingPeriod::Year,
            Some(date(2020, 1, 1)),
            Some(date(2020, 1, 2)),
            date(2026, 7, 4),
        )
        .unwrap();
        assert_eq!(w.start, date(2026, 1, 1));
    }

    #[test]
    fn custom_uses_supplied_dates() {
        let w = PeriodWindow::resolve(
            BillingPeriod::Custom,
            Some(date(2026, 3, 1)),
            Some(date(2026, 3, 15)),
            date(2026, 7, 4),
        )
        .unwrap();
        assert_eq!(w.description, "Mar 01, 2026 to Mar 15, 2026");
    }

    #[test]
    fn custom_requires_ordered_dates() {
        let today = date(2026, 7, 4);
        assert!(PeriodWindow::resolve(BillingPeriod::Custom, None, Some(today), today).is_err());
        assert!(PeriodWindow::resolve(
            BillingPeriod::Custom,
            Some(date(2026, 3, 2)),
            Some(date(2026, 3, 1)),
            today
        )
        .is_err());
        assert!(
            PeriodWindow::resolve(BillingPeriod::Custom, Some(today), Some(today), today).is_ok()
        );
    }

    #[test]
    fn bounds_span_whole_days() {
        let w = PeriodWindow::resolve(
            BillingPeriod::Custom,
            Some(date(2026, 3, 1)),
            Some(date(2026, 3, 1)),
            date(2026, 3, 1),
        )
        .unwrap();
        let (from, to) = w.bounds();
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 59).unwrap());
    }

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("week".parse::<BillingPeriod>().unwrap(), BillingPeriod::Week);
        assert!("fortnight".parse::<BillingPeriod>().is_err());
    }
}
