//! Cart totals: subtotal, travel adjustment, volume discount.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::error::QuoteError;
use crate::money::{self, Money};

/// How travel is charged for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Travel is assumed covered once by the order's fees.
    #[default]
    IncludedOnce,
    /// A long job: every item after the first carries its own travel share.
    PerItem,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::IncludedOnce => "included_once",
            TravelMode::PerItem => "per_item",
        }
    }
}

/// Business rules for cart totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPolicy {
    /// The discount applies when the subtotal is strictly above this.
    #[serde(with = "money::as_dollars")]
    pub discount_threshold: Money,
    /// Discount percentage of the whole subtotal (15.0 = 15%).
    pub discount_percent: f64,
    /// An item billing more hours than this makes the cart a long job.
    pub long_job_hours: u32,
    /// Fraction of an item's fees treated as its travel share.
    pub travel_share: f64,
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self {
            discount_threshold: Money::from_cents(250_000),
            discount_percent: 15.0,
            long_job_hours: 16,
            travel_share: 0.5,
        }
    }
}

impl CartPolicy {
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(QuoteError::InvalidPolicy {
                name: "discount_percent".to_string(),
                value: self.discount_percent,
            });
        }
        if !(0.0..=1.0).contains(&self.travel_share) {
            return Err(QuoteError::InvalidPolicy {
                name: "travel_share".to_string(),
                value: self.travel_share,
            });
        }
        if self.discount_threshold.is_negative() {
            return Err(QuoteError::InvalidPolicy {
                name: "discount_threshold".to_string(),
                value: self.discount_threshold.to_dollars(),
            });
        }
        Ok(())
    }

    /// Discount for a subtotal: a percentage of the whole subtotal once it
    /// exceeds the threshold, otherwise zero.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if subtotal > self.discount_threshold {
            subtotal.percentage(self.discount_percent)
        } else {
            Money::ZERO
        }
    }

    /// Travel share of one item.
    pub fn travel_share_of(&self, item: &LineItem) -> Money {
        item.breakdown.fees().scale(self.travel_share)
    }
}

/// Derived cart totals. Always recomputed from the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Sum of line item totals.
    pub subtotal: Money,
    /// Whether any item exceeds the long-job hours.
    pub long_job: bool,
    pub travel_mode: TravelMode,
    /// Extra travel charge; zero unless `travel_mode` is `PerItem`.
    pub adjustment: Money,
    pub discount: Money,
    /// `max(0, subtotal + adjustment - discount)`.
    pub grand_total: Money,
}

impl Totals {
    /// Compute totals for `items` under `policy`.
    pub fn compute(items: &[LineItem], policy: &CartPolicy) -> Totals {
        let subtotal: Money = items.iter().map(|item| item.breakdown.total).sum();
        let long_job = items
            .iter()
            .any(|item| item.breakdown.total_hours > policy.long_job_hours);

        let (travel_mode, adjustment) = if long_job {
            (TravelMode::PerItem, travel_adjustment(items, policy))
        } else {
            (TravelMode::IncludedOnce, Money::ZERO)
        };

        let discount = policy.discount_for(subtotal);
        let grand_total = (subtotal + adjustment - discount).floor_zero();

        Totals {
            subtotal,
            long_job,
            travel_mode,
            adjustment,
            discount,
            grand_total,
        }
    }

    /// Whether a discount was applied.
    pub fn has_discount(&self) -> bool {
        self.discount.cents > 0
    }
}

/// Sum of every item's travel share except the largest, which is the trip
/// already covered by the order.
fn travel_adjustment(items: &[LineItem], policy: &CartPolicy) -> Money {
    let shares: Vec<Money> = items.iter().map(|i| policy.travel_share_of(i)).collect();
    let largest = shares.iter().copied().max().unwrap_or(Money::ZERO);
    shares.iter().sum::<Money>() - largest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{FixedCountSpec, RoomSpec, UnitKind};
    use crate::rates::RateTable;
    use crate::service::{ServiceKind, ServiceRequest};

    fn item(request: ServiceRequest) -> LineItem {
        let rates = RateTable::default();
        let breakdown = request.estimate(&rates).unwrap();
        LineItem::new(request, breakdown)
    }

    fn doors(count: u32) -> LineItem {
        item(ServiceRequest::single(
            ServiceKind::InteriorDoors,
            FixedCountSpec::new(UnitKind::InteriorDoor, count),
        ))
    }

    #[test]
    fn test_empty_totals() {
        let totals = Totals::compute(&[], &CartPolicy::default());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_discount_boundary() {
        let policy = CartPolicy::default();
        let threshold = policy.discount_threshold;

        assert_eq!(policy.discount_for(threshold), Money::ZERO);

        let just_over = threshold + Money::from_cents(1);
        assert_eq!(policy.discount_for(just_over), just_over.percentage(15.0));
        assert_eq!(policy.discount_for(just_over), Money::from_cents(37_500));
    }

    #[test]
    fn test_short_job_has_no_adjustment() {
        let items = vec![doors(1), doors(2)];
        let totals = Totals::compute(&items, &CartPolicy::default());
        assert!(!totals.long_job);
        assert_eq!(totals.travel_mode, TravelMode::IncludedOnce);
        assert_eq!(totals.adjustment, Money::ZERO);
        assert_eq!(totals.subtotal, items[0].breakdown.total + items[1].breakdown.total);
        assert_eq!(totals.grand_total, totals.subtotal);
    }

    #[test]
    fn test_long_job_adds_all_but_largest_travel_share() {
        // 16 doors: 20 h + 5 setup = 25 h billed, a long job.
        let big = doors(16);
        let small = doors(1);
        let other = doors(2);
        assert!(big.breakdown.total_hours > 16);

        let items = vec![small.clone(), big.clone(), other.clone()];
        let totals = Totals::compute(&items, &CartPolicy::default());
        assert!(totals.long_job);
        assert_eq!(totals.travel_mode, TravelMode::PerItem);

        // Shares are half of supplies: small 3 h * $4 / 2 = $6, other 4 h * $4 / 2 = $8.
        assert_eq!(totals.adjustment, Money::from_cents(600 + 800));
        assert_eq!(
            totals.grand_total,
            totals.subtotal + totals.adjustment - totals.discount
        );
    }

    #[test]
    fn test_single_long_item_has_zero_adjustment() {
        let items = vec![doors(16)];
        let totals = Totals::compute(&items, &CartPolicy::default());
        assert!(totals.long_job);
        assert_eq!(totals.adjustment, Money::ZERO);
    }

    #[test]
    fn test_grand_total_never_negative() {
        let policy = CartPolicy {
            discount_threshold: Money::ZERO,
            discount_percent: 100.0,
            ..CartPolicy::default()
        };
        let items = vec![item(ServiceRequest::single(
            ServiceKind::InteriorRoom,
            RoomSpec::new(30.0, 25.0, 10.0),
        ))];
        let totals = Totals::compute(&items, &policy);
        assert_eq!(totals.discount, totals.subtotal);
        assert!(totals.grand_total >= Money::ZERO);
        assert_eq!(
            totals.grand_total,
            (totals.subtotal + totals.adjustment - totals.discount).floor_zero()
        );
    }

    #[test]
    fn test_policy_validation() {
        assert!(CartPolicy::default().validate().is_ok());
        let policy = CartPolicy {
            travel_share: 1.5,
            ..CartPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
