//! Itemized hours, materials and costs for one estimate.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::rates::RateTable;

/// Absorbs float noise so that e.g. `3 × 1.25` bills 4 hours, never 5.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Round up to the next whole unit; non-positive input gives zero.
/// `None` when the result does not fit a `u32`.
pub(crate) fn ceil_whole(value: f64) -> Option<u32> {
    let rounded = (value - ROUNDING_EPSILON).ceil();
    if rounded <= 0.0 {
        Some(0)
    } else if rounded <= f64::from(u32::MAX) {
        Some(rounded as u32)
    } else {
        None
    }
}

/// What was measured, for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceMeasure {
    pub wall_sqft: f64,
    pub ceiling_sqft: f64,
    pub linear_ft: f64,
    /// Doors, windows, closets, cabinet faces.
    pub units: u32,
}

impl SurfaceMeasure {
    fn combine(self, other: SurfaceMeasure) -> Option<SurfaceMeasure> {
        Some(SurfaceMeasure {
            wall_sqft: self.wall_sqft + other.wall_sqft,
            ceiling_sqft: self.ceiling_sqft + other.ceiling_sqft,
            linear_ft: self.linear_ft + other.linear_ft,
            units: self.units.checked_add(other.units)?,
        })
    }
}

/// Priced result of an estimate.
///
/// Always produced by the estimator; `total` is the exact sum of the four
/// cost components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub measure: SurfaceMeasure,
    /// Productive hours, rounded up.
    pub labor_hours: u32,
    /// Setup and cleanup hours, rounded up.
    pub setup_hours: u32,
    /// `labor_hours + setup_hours`; the billed hours.
    pub total_hours: u32,
    /// Whole gallons.
    pub material_units: u32,
    pub labor_cost: Money,
    pub material_cost: Money,
    pub supplies_cost: Money,
    pub flat_fees: Money,
    pub total: Money,
}

impl EstimateBreakdown {
    /// Round raw hours and gallons and price them. `None` if any quantity
    /// or cost overflows.
    pub(crate) fn price(
        rates: &RateTable,
        measure: SurfaceMeasure,
        productive_hours: f64,
        gallons: f64,
        flat_fees: Money,
    ) -> Option<Self> {
        let labor_hours = ceil_whole(productive_hours)?;
        let setup_hours = ceil_whole(f64::from(labor_hours) / rates.setup_divisor)?;
        let total_hours = labor_hours.checked_add(setup_hours)?;
        let material_units = ceil_whole(gallons)?;

        let labor_cost = rates.labor_rate.checked_mul(total_hours)?;
        let material_cost = rates.material_rate.checked_mul(material_units)?;
        let supplies_cost = rates.supply_rate.checked_mul(total_hours)?;
        let total = labor_cost
            .checked_add(material_cost)?
            .checked_add(supplies_cost)?
            .checked_add(flat_fees)?;

        Some(Self {
            measure,
            labor_hours,
            setup_hours,
            total_hours,
            material_units,
            labor_cost,
            material_cost,
            supplies_cost,
            flat_fees,
            total,
        })
    }

    /// Sum of the itemized costs. Equal to `total` for every breakdown the
    /// estimator produces.
    pub fn component_sum(&self) -> Money {
        self.labor_cost + self.material_cost + self.supplies_cost + self.flat_fees
    }

    /// The non-labor, non-material part of the price.
    pub fn fees(&self) -> Money {
        self.supplies_cost + self.flat_fees
    }

    /// Field-wise sum, used to reduce the units of a multi-unit service.
    /// Nothing is re-rounded or re-priced. `None` if any field overflows.
    pub fn combine(self, other: EstimateBreakdown) -> Option<EstimateBreakdown> {
        Some(EstimateBreakdown {
            measure: self.measure.combine(other.measure)?,
            labor_hours: self.labor_hours.checked_add(other.labor_hours)?,
            setup_hours: self.setup_hours.checked_add(other.setup_hours)?,
            total_hours: self.total_hours.checked_add(other.total_hours)?,
            material_units: self.material_units.checked_add(other.material_units)?,
            labor_cost: self.labor_cost.checked_add(other.labor_cost)?,
            material_cost: self.material_cost.checked_add(other.material_cost)?,
            supplies_cost: self.supplies_cost.checked_add(other.supplies_cost)?,
            flat_fees: self.flat_fees.checked_add(other.flat_fees)?,
            total: self.total.checked_add(other.total)?,
        })
    }
}
