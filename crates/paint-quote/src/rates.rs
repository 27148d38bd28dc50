//! The rate table every estimate is priced from.
//!
//! Loaded once at startup (defaults or configuration file) and then only
//! read. Dollar amounts are configured in dollars and held as [`Money`].

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::estimate::{UnitKind, UnitOptions};
use crate::money::{self, Money};

/// Labor, material and production constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Billed per total hour (productive plus setup).
    #[serde(with = "money::as_dollars")]
    pub labor_rate: Money,
    /// Price of one gallon of paint.
    #[serde(with = "money::as_dollars")]
    pub material_rate: Money,
    /// Consumables (tape, plastic, rollers) per total hour.
    #[serde(with = "money::as_dollars")]
    pub supply_rate: Money,
    /// Wall square feet one gallon covers with one coat.
    pub wall_coverage: f64,
    /// Ceiling square feet per gallon.
    pub ceiling_coverage: f64,
    /// Stucco (textured) ceiling square feet per gallon.
    pub stucco_ceiling_coverage: f64,
    /// Linear feet of trim per gallon.
    pub trim_coverage: f64,
    /// Material factor for two-coat walls.
    pub two_coat_multiplier: f64,
    /// Productive hours divided by this give setup/cleanup hours.
    pub setup_divisor: f64,
    /// Lowest room height accepted by form validation, in feet.
    pub min_ceiling_height: f64,
    pub production: ProductionRates,
    pub room_units: RoomUnitHours,
    pub flat_fees: FlatFees,
    pub units: UnitRateTables,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            labor_rate: Money::from_cents(6500),
            material_rate: Money::from_cents(4800),
            supply_rate: Money::from_cents(400),
            wall_coverage: 350.0,
            ceiling_coverage: 400.0,
            stucco_ceiling_coverage: 200.0,
            trim_coverage: 500.0,
            two_coat_multiplier: 2.0,
            setup_divisor: 4.0,
            min_ceiling_height: 7.0,
            production: ProductionRates::default(),
            room_units: RoomUnitHours::default(),
            flat_fees: FlatFees::default(),
            units: UnitRateTables::default(),
        }
    }
}

impl RateTable {
    /// Check that every rate is positive and finite.
    pub fn validate(&self) -> Result<(), QuoteError> {
        for (name, value) in self.named_values() {
            if !(value.is_finite() && value > 0.0) {
                return Err(QuoteError::InvalidRate {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Unit table for a per-unit surface kind.
    pub fn unit_rates(&self, kind: UnitKind) -> &UnitRates {
        match kind {
            UnitKind::InteriorDoor => &self.units.interior_door,
            UnitKind::ExteriorDoor => &self.units.exterior_door,
            UnitKind::CabinetFace => &self.units.cabinet_face,
        }
    }

    /// Every value that must be positive, with a dotted name for errors.
    ///
    /// Add-on increments are excluded: a zero add-on (e.g. no extra
    /// material for hardware) is legitimate.
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        let p = &self.production;
        let r = &self.room_units;
        let mut values = vec![
            ("labor_rate", self.labor_rate.to_dollars()),
            ("material_rate", self.material_rate.to_dollars()),
            ("supply_rate", self.supply_rate.to_dollars()),
            ("wall_coverage", self.wall_coverage),
            ("ceiling_coverage", self.ceiling_coverage),
            ("stucco_ceiling_coverage", self.stucco_ceiling_coverage),
            ("trim_coverage", self.trim_coverage),
            ("two_coat_multiplier", self.two_coat_multiplier),
            ("setup_divisor", self.setup_divisor),
            ("min_ceiling_height", self.min_ceiling_height),
            ("production.wall_two_coat", p.wall_two_coat),
            ("production.wall_one_coat", p.wall_one_coat),
            ("production.ceiling", p.ceiling),
            ("production.stucco_ceiling", p.stucco_ceiling),
            ("production.baseboard_low", p.baseboard_low),
            ("production.baseboard_high", p.baseboard_high),
            ("production.crown_molding", p.crown_molding),
            ("room_units.door", r.door),
            ("room_units.window", r.window),
            ("room_units.closet", r.closet),
            ("flat_fees.ensuite", self.flat_fees.ensuite.to_dollars()),
            ("flat_fees.accent_wall", self.flat_fees.accent_wall.to_dollars()),
        ];
        for (name, table) in [
            ("units.interior_door", &self.units.interior_door),
            ("units.exterior_door", &self.units.exterior_door),
            ("units.cabinet_face", &self.units.cabinet_face),
        ] {
            values.push((name, table.hours));
            values.push((name, table.gallons));
        }
        values
    }
}

/// How fast each surface is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionRates {
    /// Wall square feet per hour, two coats.
    pub wall_two_coat: f64,
    /// Wall square feet per hour, one coat.
    pub wall_one_coat: f64,
    /// Smooth ceiling square feet per hour.
    pub ceiling: f64,
    /// Stucco ceiling square feet per hour.
    pub stucco_ceiling: f64,
    /// Linear feet per hour, low-profile baseboard.
    pub baseboard_low: f64,
    /// Linear feet per hour, high-profile baseboard.
    pub baseboard_high: f64,
    /// Linear feet per hour, crown molding.
    pub crown_molding: f64,
}

impl Default for ProductionRates {
    fn default() -> Self {
        Self {
            wall_two_coat: 100.0,
            wall_one_coat: 160.0,
            ceiling: 90.0,
            stucco_ceiling: 60.0,
            baseboard_low: 40.0,
            baseboard_high: 25.0,
            crown_molding: 20.0,
        }
    }
}

/// Hours per fixture counted inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomUnitHours {
    pub door: f64,
    pub window: f64,
    pub closet: f64,
}

impl Default for RoomUnitHours {
    fn default() -> Self {
        Self {
            door: 0.75,
            window: 0.5,
            closet: 1.5,
        }
    }
}

/// Fees added once per room when the matching flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatFees {
    #[serde(with = "money::as_dollars")]
    pub ensuite: Money,
    #[serde(with = "money::as_dollars")]
    pub accent_wall: Money,
}

impl Default for FlatFees {
    fn default() -> Self {
        Self {
            ensuite: Money::from_cents(12_500),
            accent_wall: Money::from_cents(8_500),
        }
    }
}

/// Extra hours and gallons per unit when an add-on is selected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnRate {
    pub hours: f64,
    pub gallons: f64,
}

impl AddOnRate {
    pub const fn new(hours: f64, gallons: f64) -> Self {
        Self { hours, gallons }
    }
}

/// Per-unit rate table for a fixed-count surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRates {
    /// Base hours per unit.
    pub hours: f64,
    /// Base gallons per unit.
    pub gallons: f64,
    #[serde(default)]
    pub frame: AddOnRate,
    #[serde(default)]
    pub both_sides: AddOnRate,
    #[serde(default)]
    pub hardware: AddOnRate,
}

impl UnitRates {
    /// Hours and gallons for one unit with the selected add-ons.
    pub fn per_unit(&self, options: &UnitOptions) -> AddOnRate {
        let mut rate = AddOnRate::new(self.hours, self.gallons);
        for (selected, add_on) in [
            (options.frame, self.frame),
            (options.both_sides, self.both_sides),
            (options.hardware, self.hardware),
        ] {
            if selected {
                rate.hours += add_on.hours;
                rate.gallons += add_on.gallons;
            }
        }
        rate
    }
}

/// Unit tables for every fixed-count kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRateTables {
    pub interior_door: UnitRates,
    pub exterior_door: UnitRates,
    pub cabinet_face: UnitRates,
}

impl Default for UnitRateTables {
    fn default() -> Self {
        Self {
            interior_door: UnitRates {
                hours: 1.25,
                gallons: 0.25,
                frame: AddOnRate::new(0.5, 0.10),
                both_sides: AddOnRate::new(0.75, 0.15),
                hardware: AddOnRate::new(0.25, 0.0),
            },
            exterior_door: UnitRates {
                hours: 2.0,
                gallons: 0.35,
                frame: AddOnRate::new(0.75, 0.10),
                both_sides: AddOnRate::new(1.0, 0.20),
                hardware: AddOnRate::new(0.25, 0.0),
            },
            cabinet_face: UnitRates {
                hours: 0.6,
                gallons: 0.08,
                frame: AddOnRate::new(0.2, 0.02),
                both_sides: AddOnRate::new(0.4, 0.05),
                hardware: AddOnRate::new(0.1, 0.0),
            },
        }
    }
}
