//! Cart and line item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{CartPolicy, Totals};
use crate::error::QuoteError;
use crate::estimate::{EstimateBreakdown, SurfaceSpec};
use crate::ids::{CartId, LineItemId};
use crate::rates::RateTable;
use crate::service::{count_units, MergeKey, ServiceFamily, ServiceKind, ServiceRequest};

/// A quote cart. Item order is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Price a request and add it to the cart.
    ///
    /// Combinable services merge into an existing item with the same
    /// [`MergeKey`]: the counts are added and the breakdown is re-estimated
    /// from the combined count. Returns the id of the new or merged item.
    ///
    /// Returns an error if:
    /// - The surfaces don't fit the service
    /// - The request is not computable yet
    pub fn add_item(
        &mut self,
        rates: &RateTable,
        request: ServiceRequest,
    ) -> Result<LineItemId, QuoteError> {
        let breakdown = request.estimate(rates)?;

        if let Some(key) = request.merge_key() {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|item| item.merge_key() == Some(key))
            {
                let combined = existing
                    .unit_count()
                    .checked_add(request.unit_count())
                    .ok_or(QuoteError::Overflow)?;
                let merged = key.request(combined);
                existing.breakdown = merged.estimate(rates)?;
                existing.units = merged.units;
                debug!(
                    item = %existing.id,
                    service = %key.service,
                    count = combined,
                    "merged into existing line item"
                );
                let id = existing.id.clone();
                self.touch();
                return Ok(id);
            }
        }

        let item = LineItem::new(request, breakdown);
        let id = item.id.clone();
        debug!(item = %id, service = %item.service, total = %item.breakdown.total, "added line item");
        self.items.push(item);
        self.touch();
        Ok(id)
    }

    /// Replace an item's configuration and re-estimate it.
    ///
    /// The item keeps its id and position. If the new configuration is not
    /// computable the item is left unchanged.
    pub fn update_item(
        &mut self,
        rates: &RateTable,
        line_item_id: &LineItemId,
        request: ServiceRequest,
    ) -> Result<(), QuoteError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == line_item_id)
            .ok_or_else(|| QuoteError::ItemNotInCart(line_item_id.to_string()))?;

        let breakdown = request.estimate(rates)?;
        item.service = request.service;
        item.units = request.units;
        item.breakdown = breakdown;
        self.touch();
        Ok(())
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Totals for the current contents.
    pub fn totals(&self, policy: &CartPolicy) -> Totals {
        Totals::compute(&self.items, policy)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Items belonging to a service family.
    pub fn items_in(&self, family: ServiceFamily) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(move |i| i.family() == family)
    }

    /// Whether the cart holds anything outside `family`.
    pub fn has_other_than(&self, family: ServiceFamily) -> bool {
        self.has_outside(&[family])
    }

    /// Whether the cart holds anything outside every one of `families`.
    pub fn has_outside(&self, families: &[ServiceFamily]) -> bool {
        self.items.iter().any(|i| !families.contains(&i.family()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// One priced service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    pub service: ServiceKind,
    /// The surfaces the breakdown was computed from.
    pub units: Vec<SurfaceSpec>,
    pub breakdown: EstimateBreakdown,
}

impl LineItem {
    /// Create a line item from a request and its breakdown.
    pub fn new(request: ServiceRequest, breakdown: EstimateBreakdown) -> Self {
        Self {
            id: LineItemId::generate(),
            service: request.service,
            units: request.units,
            breakdown,
        }
    }

    pub fn family(&self) -> ServiceFamily {
        self.service.family()
    }

    /// Counted units (doors, cabinet faces) in this item.
    pub fn unit_count(&self) -> u32 {
        count_units(&self.units)
    }

    pub fn merge_key(&self) -> Option<MergeKey> {
        MergeKey::of(self.service, &self.units)
    }

    /// The request this item was priced from.
    pub fn request(&self) -> ServiceRequest {
        ServiceRequest::new(self.service, self.units.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{
        estimate, FixedCountSpec, LinearRunSpec, RoomSpec, TrimProfile, UnitKind, UnitOptions,
    };

    fn rates() -> RateTable {
        RateTable::default()
    }

    fn doors(service: ServiceKind, kind: UnitKind, count: u32, options: UnitOptions) -> ServiceRequest {
        ServiceRequest::single(service, FixedCountSpec::new(kind, count).with_options(options))
    }

    fn interior(count: u32) -> ServiceRequest {
        doors(
            ServiceKind::InteriorDoors,
            UnitKind::InteriorDoor,
            count,
            UnitOptions::default(),
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.id.as_str().starts_with("cart_"));
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let id = cart
            .add_item(
                &rates(),
                ServiceRequest::single(ServiceKind::InteriorRoom, RoomSpec::new(12.0, 10.0, 9.0)),
            )
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get_item(&id).unwrap().service, ServiceKind::InteriorRoom);
    }

    #[test]
    fn test_merge_past_count_range_leaves_cart_unchanged() {
        let rates = rates();
        let mut cart = Cart::new();
        let breakdown = interior(1).estimate(&rates).unwrap();
        cart.items.push(LineItem::new(interior(u32::MAX), breakdown));
        let before = cart.clone();

        let err = cart.add_item(&rates, interior(1)).unwrap_err();
        assert!(matches!(err, QuoteError::Overflow));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_merge_of_largest_counts_prices() {
        let rates = rates();
        let mut cart = Cart::new();
        cart.add_item(&rates, interior(crate::estimate::MAX_UNIT_COUNT))
            .unwrap();
        cart.add_item(&rates, interior(crate::estimate::MAX_UNIT_COUNT))
            .unwrap();

        let item = &cart.items[0];
        assert_eq!(item.unit_count(), 2 * crate::estimate::MAX_UNIT_COUNT);
        assert_eq!(item.breakdown.total, item.breakdown.component_sum());
    }

    #[test]
    fn test_merge_recomputes_from_combined_count() {
        let rates = rates();
        let mut cart = Cart::new();
        let first = cart.add_item(&rates, interior(1)).unwrap();
        let second = cart.add_item(&rates, interior(2)).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);

        let item = &cart.items[0];
        assert_eq!(item.unit_count(), 3);
        let expected =
            estimate(&rates, &FixedCountSpec::new(UnitKind::InteriorDoor, 3).into()).unwrap();
        assert_eq!(item.breakdown, expected);

        let one = estimate(&rates, &FixedCountSpec::new(UnitKind::InteriorDoor, 1).into()).unwrap();
        let two = estimate(&rates, &FixedCountSpec::new(UnitKind::InteriorDoor, 2).into()).unwrap();
        assert_ne!(item.breakdown.total, one.total + two.total);
    }

    #[test]
    fn test_different_flags_do_not_merge() {
        let rates = rates();
        let mut cart = Cart::new();
        cart.add_item(&rates, interior(1)).unwrap();
        cart.add_item(
            &rates,
            doors(
                ServiceKind::InteriorDoors,
                UnitKind::InteriorDoor,
                1,
                UnitOptions {
                    frame: true,
                    ..UnitOptions::default()
                },
            ),
        )
        .unwrap();

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_door_sub_types_do_not_merge() {
        let rates = rates();
        let mut cart = Cart::new();
        cart.add_item(&rates, interior(1)).unwrap();
        cart.add_item(
            &rates,
            doors(
                ServiceKind::ExteriorDoors,
                UnitKind::ExteriorDoor,
                1,
                UnitOptions::default(),
            ),
        )
        .unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_non_combinable_services_append() {
        let rates = rates();
        let mut cart = Cart::new();
        let trim = ServiceRequest::single(
            ServiceKind::TrimRun,
            LinearRunSpec::new(40.0, TrimProfile::BaseboardLow),
        );
        cart.add_item(&rates, trim.clone()).unwrap();
        cart.add_item(&rates, trim).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_incomputable_request_is_rejected() {
        let mut cart = Cart::new();
        let result = cart.add_item(
            &rates(),
            ServiceRequest::single(ServiceKind::InteriorRoom, RoomSpec::new(12.0, 0.0, 9.0)),
        );
        assert!(matches!(result, Err(QuoteError::NotComputable(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_item_re_estimates() {
        let rates = rates();
        let mut cart = Cart::new();
        let id = cart.add_item(&rates, interior(1)).unwrap();
        let before = cart.get_item(&id).unwrap().breakdown.total;

        cart.update_item(&rates, &id, interior(6)).unwrap();
        let item = cart.get_item(&id).unwrap();
        assert_eq!(item.unit_count(), 6);
        assert!(item.breakdown.total > before);
    }

    #[test]
    fn test_update_incomputable_leaves_item() {
        let rates = rates();
        let mut cart = Cart::new();
        let id = cart.add_item(&rates, interior(2)).unwrap();
        let before = cart.get_item(&id).unwrap().clone();

        assert!(cart.update_item(&rates, &id, interior(0)).is_err());
        assert_eq!(cart.get_item(&id).unwrap(), &before);
    }

    #[test]
    fn test_update_unknown_item() {
        let mut cart = Cart::new();
        let result = cart.update_item(&rates(), &LineItemId::new("missing"), interior(1));
        assert!(matches!(result, Err(QuoteError::ItemNotInCart(_))));
    }

    #[test]
    fn test_remove_and_clear() {
        let rates = rates();
        let mut cart = Cart::new();
        let id = cart.add_item(&rates, interior(1)).unwrap();
        cart.add_item(
            &rates,
            ServiceRequest::single(ServiceKind::InteriorRoom, RoomSpec::new(10.0, 10.0, 8.0)),
        )
        .unwrap();

        assert!(cart.remove_item(&id));
        assert!(!cart.remove_item(&id));
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let rates = rates();
        let mut cart = Cart::new();
        let a = cart
            .add_item(
                &rates,
                ServiceRequest::single(ServiceKind::InteriorRoom, RoomSpec::new(10.0, 10.0, 8.0)),
            )
            .unwrap();
        let b = cart.add_item(&rates, interior(1)).unwrap();
        let c = cart
            .add_item(
                &rates,
                ServiceRequest::single(
                    ServiceKind::TrimRun,
                    LinearRunSpec::new(30.0, TrimProfile::CrownMolding),
                ),
            )
            .unwrap();
        // Merging into `b` must not move it.
        cart.add_item(&rates, interior(2)).unwrap();

        let ids: Vec<_> = cart.items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![a, b, c]);
    }
}
