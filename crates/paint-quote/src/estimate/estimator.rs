//! Dimensional cost estimator.
//!
//! Pure functions from a surface description to a priced breakdown. A
//! surface with a zero, missing (NaN), negative or infinite dimension, or a
//! zero unit count, is not yet computable and yields `None`; callers must
//! treat that as "cannot continue", never as a free item. A room below the
//! minimum wall height, or quantities too large to price without
//! overflowing, also yield `None`.

use crate::estimate::breakdown::{EstimateBreakdown, SurfaceMeasure};
use crate::estimate::surface::{
    BaseboardProfile, FixedCountSpec, LinearRunSpec, RoomSpec, SurfaceSpec, TrimProfile,
};
use crate::money::Money;
use crate::rates::RateTable;

/// Estimate a single surface.
pub fn estimate(rates: &RateTable, spec: &SurfaceSpec) -> Option<EstimateBreakdown> {
    match spec {
        SurfaceSpec::Room(room) => estimate_room(rates, room),
        SurfaceSpec::LinearRun(run) => estimate_linear_run(rates, run),
        SurfaceSpec::FixedCount(count) => estimate_fixed_count(rates, count),
    }
}

/// Estimate a multi-unit service: each unit independently, then a
/// field-wise sum. `None` if there are no units or any unit is incomputable.
pub fn estimate_units(rates: &RateTable, units: &[SurfaceSpec]) -> Option<EstimateBreakdown> {
    let mut breakdowns = units.iter().map(|unit| estimate(rates, unit));
    let first = breakdowns.next()??;
    breakdowns.try_fold(first, |acc, next| acc.combine(next?))
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Walls, optional ceiling, perimeter trim, per-fixture hours, flat fees.
pub fn estimate_room(rates: &RateTable, room: &RoomSpec) -> Option<EstimateBreakdown> {
    positive(room.length)?;
    positive(room.width)?;
    if positive(room.height)? < rates.min_ceiling_height {
        return None;
    }

    let production = &rates.production;
    let options = &room.options;
    let mut measure = SurfaceMeasure::default();

    let wall_area = room.wall_area();
    let (wall_rate, coats) = if options.two_coats {
        (production.wall_two_coat, rates.two_coat_multiplier)
    } else {
        (production.wall_one_coat, 1.0)
    };
    let mut hours = wall_area / wall_rate;
    let mut gallons = wall_area / rates.wall_coverage * coats;
    measure.wall_sqft = wall_area;

    if options.include_ceiling {
        let area = room.ceiling_area();
        let (rate, coverage) = if options.stucco_ceiling {
            (production.stucco_ceiling, rates.stucco_ceiling_coverage)
        } else {
            (production.ceiling, rates.ceiling_coverage)
        };
        hours += area / rate;
        gallons += area / coverage;
        measure.ceiling_sqft = area;
    }

    let perimeter = room.perimeter();
    let mut perimeter_rates = Vec::with_capacity(2);
    if let Some(profile) = options.baseboard {
        perimeter_rates.push(match profile {
            BaseboardProfile::Low => production.baseboard_low,
            BaseboardProfile::High => production.baseboard_high,
        });
    }
    if options.crown_molding {
        perimeter_rates.push(production.crown_molding);
    }
    for rate in perimeter_rates {
        hours += perimeter / rate;
        gallons += perimeter / rates.trim_coverage;
        measure.linear_ft += perimeter;
    }

    let fixtures = &rates.room_units;
    hours += f64::from(options.door_count) * fixtures.door
        + f64::from(options.window_count) * fixtures.window
        + f64::from(options.closet_count) * fixtures.closet;
    measure.units = options
        .door_count
        .checked_add(options.window_count)?
        .checked_add(options.closet_count)?;

    let mut flat_fees = Money::ZERO;
    if options.ensuite {
        flat_fees += rates.flat_fees.ensuite;
    }
    if options.accent_wall {
        flat_fees += rates.flat_fees.accent_wall;
    }

    EstimateBreakdown::price(rates, measure, hours, gallons, flat_fees)
}

/// Stand-alone trim priced by linear footage.
pub fn estimate_linear_run(rates: &RateTable, run: &LinearRunSpec) -> Option<EstimateBreakdown> {
    let length = positive(run.length)?;
    let production = &rates.production;
    let rate = match run.profile {
        TrimProfile::BaseboardLow => production.baseboard_low,
        TrimProfile::BaseboardHigh => production.baseboard_high,
        TrimProfile::CrownMolding => production.crown_molding,
    };

    let measure = SurfaceMeasure {
        linear_ft: length,
        ..SurfaceMeasure::default()
    };
    EstimateBreakdown::price(
        rates,
        measure,
        length / rate,
        length / rates.trim_coverage,
        Money::ZERO,
    )
}

/// Counted units priced from the kind's per-unit table.
pub fn estimate_fixed_count(
    rates: &RateTable,
    spec: &FixedCountSpec,
) -> Option<EstimateBreakdown> {
    if spec.count == 0 {
        return None;
    }
    let per_unit = rates.unit_rates(spec.kind).per_unit(&spec.options);
    let count = f64::from(spec.count);

    let measure = SurfaceMeasure {
        units: spec.count,
        ..SurfaceMeasure::default()
    };
    EstimateBreakdown::price(
        rates,
        measure,
        count * per_unit.hours,
        count * per_unit.gallons,
        Money::ZERO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::surface::{RoomOptions, UnitKind, UnitOptions};

    fn rates() -> RateTable {
        RateTable::default()
    }

    fn room_with_ceiling(length: f64, width: f64, height: f64) -> SurfaceSpec {
        RoomSpec::new(length, width, height)
            .with_options(RoomOptions {
                include_ceiling: true,
                ..RoomOptions::default()
            })
            .into()
    }

    #[test]
    fn test_reference_room_to_the_cent() {
        // walls 396 sq ft / 100 = 3.96 h, ceiling 120 / 90 = 1.33 h -> 6 h
        // setup ceil(6 / 4) = 2 h -> 8 h billed
        // gallons 396 / 350 * 2 + 120 / 400 = 2.56 -> 3
        let b = estimate(&rates(), &room_with_ceiling(12.0, 10.0, 9.0)).unwrap();

        assert_eq!(b.measure.wall_sqft, 396.0);
        assert_eq!(b.measure.ceiling_sqft, 120.0);
        assert_eq!(b.labor_hours, 6);
        assert_eq!(b.setup_hours, 2);
        assert_eq!(b.total_hours, 8);
        assert_eq!(b.material_units, 3);
        assert_eq!(b.labor_cost, Money::from_cents(52_000));
        assert_eq!(b.material_cost, Money::from_cents(14_400));
        assert_eq!(b.supplies_cost, Money::from_cents(3_200));
        assert_eq!(b.flat_fees, Money::ZERO);
        assert_eq!(b.total, Money::from_cents(69_600));
    }

    #[test]
    fn test_walls_only_uses_wall_area_formula() {
        let spec: SurfaceSpec = RoomSpec::new(11.0, 13.5, 8.0).into();
        let b = estimate(&rates(), &spec).unwrap();
        assert_eq!(b.measure.wall_sqft, 2.0 * (11.0 * 8.0 + 13.5 * 8.0));
        assert_eq!(b.measure.ceiling_sqft, 0.0);
    }

    #[test]
    fn test_one_coat_is_cheaper_than_two() {
        let two: SurfaceSpec = RoomSpec::new(14.0, 12.0, 9.0).into();
        let one: SurfaceSpec = RoomSpec::new(14.0, 12.0, 9.0)
            .with_options(RoomOptions {
                two_coats: false,
                ..RoomOptions::default()
            })
            .into();
        let two = estimate(&rates(), &two).unwrap();
        let one = estimate(&rates(), &one).unwrap();
        assert!(one.total < two.total);
        assert!(one.material_units < two.material_units);
    }

    #[test]
    fn test_total_increases_with_each_dimension() {
        let rates = rates();
        let base = (10.0, 10.0, 8.0);
        let price = |l: f64, w: f64, h: f64| {
            estimate(&rates, &RoomSpec::new(l, w, h).into())
                .unwrap()
                .total
        };

        let mut previous = price(base.0, base.1, base.2);
        for step in 1..=12 {
            // Each step adds 192 sq ft, more than one billed hour.
            let current = price(base.0 + f64::from(step) * 12.0, base.1, base.2);
            assert!(current > previous, "length step {}", step);
            previous = current;
        }

        let mut previous = price(base.0, base.1, base.2);
        for step in 1..=12 {
            let current = price(base.0, base.1 + f64::from(step) * 12.0, base.2);
            assert!(current > previous, "width step {}", step);
            previous = current;
        }

        let mut previous = price(base.0, base.1, base.2);
        for step in 1..=8 {
            let current = price(base.0, base.1, base.2 + f64::from(step) * 6.0);
            assert!(current > previous, "height step {}", step);
            previous = current;
        }
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let spec: SurfaceSpec = RoomSpec::new(15.5, 11.25, 9.0)
            .with_options(RoomOptions {
                include_ceiling: true,
                stucco_ceiling: true,
                baseboard: Some(BaseboardProfile::High),
                crown_molding: true,
                door_count: 2,
                window_count: 3,
                closet_count: 1,
                accent_wall: true,
                ensuite: true,
                ..RoomOptions::default()
            })
            .into();
        let rates = rates();
        assert_eq!(estimate(&rates, &spec), estimate(&rates, &spec));
    }

    #[test]
    fn test_zero_or_missing_dimension_is_not_computable() {
        let rates = rates();
        for (l, w, h) in [
            (0.0, 10.0, 8.0),
            (12.0, 0.0, 8.0),
            (12.0, 10.0, 0.0),
            (f64::NAN, 10.0, 8.0),
            (12.0, f64::INFINITY, 8.0),
            (-12.0, 10.0, 8.0),
        ] {
            assert!(estimate(&rates, &RoomSpec::new(l, w, h).into()).is_none());
        }
        assert!(estimate(&rates, &LinearRunSpec::new(0.0, TrimProfile::CrownMolding).into()).is_none());
        assert!(estimate(&rates, &FixedCountSpec::new(UnitKind::InteriorDoor, 0).into()).is_none());
    }

    #[test]
    fn test_add_ons_are_additive() {
        let rates = rates();
        let plain = estimate_room(&rates, &RoomSpec::new(12.0, 12.0, 8.0)).unwrap();
        let trimmed = estimate_room(
            &rates,
            &RoomSpec::new(12.0, 12.0, 8.0).with_options(RoomOptions {
                baseboard: Some(BaseboardProfile::Low),
                crown_molding: true,
                ..RoomOptions::default()
            }),
        )
        .unwrap();
        // Perimeter 48 ft counted once for baseboard and once for crown.
        assert_eq!(trimmed.measure.linear_ft, 96.0);
        assert!(trimmed.labor_hours > plain.labor_hours);
    }

    #[test]
    fn test_flat_fees_ignore_dimensions() {
        let rates = rates();
        let options = RoomOptions {
            ensuite: true,
            accent_wall: true,
            ..RoomOptions::default()
        };
        let small = estimate_room(&rates, &RoomSpec::new(8.0, 8.0, 8.0).with_options(options.clone()))
            .unwrap();
        let large = estimate_room(&rates, &RoomSpec::new(20.0, 18.0, 10.0).with_options(options))
            .unwrap();
        assert_eq!(small.flat_fees, Money::from_cents(21_000));
        assert_eq!(small.flat_fees, large.flat_fees);
        assert_eq!(small.total, small.component_sum());
    }

    #[test]
    fn test_room_fixtures_are_per_unit() {
        let rates = rates();
        // 10x10x8: walls 320 / 100 = 3.2 h; 2 doors 1.5 h, 2 windows 1 h, 1 closet 1.5 h -> 7.2 -> 8 h
        let b = estimate_room(
            &rates,
            &RoomSpec::new(10.0, 10.0, 8.0).with_options(RoomOptions {
                door_count: 2,
                window_count: 2,
                closet_count: 1,
                ..RoomOptions::default()
            }),
        )
        .unwrap();
        assert_eq!(b.labor_hours, 8);
        assert_eq!(b.setup_hours, 2);
        assert_eq!(b.measure.units, 5);
    }

    #[test]
    fn test_linear_run() {
        // 100 ft high baseboard: 100 / 25 = 4 h, setup 1 h; 100 / 500 = 0.2 -> 1 gal
        let b = estimate(&rates(), &LinearRunSpec::new(100.0, TrimProfile::BaseboardHigh).into())
            .unwrap();
        assert_eq!(b.labor_hours, 4);
        assert_eq!(b.total_hours, 5);
        assert_eq!(b.material_units, 1);
        // 5 * 65 + 48 + 5 * 4
        assert_eq!(b.total, Money::from_cents(39_300));
    }

    #[test]
    fn test_fixed_count_rounding_is_not_linear() {
        let rates = rates();
        let price = |count| {
            estimate_fixed_count(&rates, &FixedCountSpec::new(UnitKind::InteriorDoor, count))
                .unwrap()
        };
        let one = price(1);
        let two = price(2);
        let three = price(3);

        // 1.25 h -> 2 + 1 setup; 1 gal
        assert_eq!(one.total, Money::from_cents(25_500));
        // 2.5 h -> 3 + 1 setup; 1 gal
        assert_eq!(two.total, Money::from_cents(32_400));
        // 3.75 h -> 4 + 1 setup; 1 gal
        assert_eq!(three.total, Money::from_cents(39_300));
        assert_ne!(three.total, one.total + two.total);
    }

    #[test]
    fn test_fixed_count_options_change_price() {
        let rates = rates();
        let plain = FixedCountSpec::new(UnitKind::ExteriorDoor, 2);
        let framed = plain.clone().with_options(UnitOptions {
            frame: true,
            ..UnitOptions::default()
        });
        let plain = estimate_fixed_count(&rates, &plain).unwrap();
        let framed = estimate_fixed_count(&rates, &framed).unwrap();
        assert!(framed.total > plain.total);
    }

    #[test]
    fn test_multi_unit_is_field_wise_sum() {
        let rates = rates();
        let a = room_with_ceiling(12.0, 10.0, 9.0);
        let b: SurfaceSpec = RoomSpec::new(11.0, 10.0, 8.0).into();

        let combined = estimate_units(&rates, &[a.clone(), b.clone()]).unwrap();
        let a = estimate(&rates, &a).unwrap();
        let b = estimate(&rates, &b).unwrap();

        assert_eq!(combined.total_hours, a.total_hours + b.total_hours);
        assert_eq!(combined.material_units, a.material_units + b.material_units);
        assert_eq!(combined.total, a.total + b.total);
        assert_eq!(combined.measure.wall_sqft, a.measure.wall_sqft + b.measure.wall_sqft);
    }

    #[test]
    fn test_multi_unit_requires_every_unit() {
        let rates = rates();
        assert!(estimate_units(&rates, &[]).is_none());
        let units = [
            room_with_ceiling(12.0, 10.0, 9.0),
            RoomSpec::new(0.0, 10.0, 8.0).into(),
        ];
        assert!(estimate_units(&rates, &units).is_none());
    }

    #[test]
    fn test_room_below_minimum_height_is_not_computable() {
        let rates = rates();
        assert!(estimate_room(&rates, &RoomSpec::new(12.0, 10.0, 6.5)).is_none());
        assert!(estimate_room(&rates, &RoomSpec::new(12.0, 10.0, 7.0)).is_some());
    }

    #[test]
    fn test_room_fixture_count_overflow_is_not_computable() {
        let spec = RoomSpec::new(12.0, 10.0, 9.0).with_options(RoomOptions {
            door_count: u32::MAX,
            window_count: 1,
            ..RoomOptions::default()
        });
        assert!(estimate_room(&rates(), &spec).is_none());
    }

    #[test]
    fn test_huge_fixed_count_is_not_computable() {
        let spec = FixedCountSpec::new(UnitKind::InteriorDoor, 4_000_000_000);
        assert!(estimate(&rates(), &spec.into()).is_none());
    }

    #[test]
    fn test_largest_accepted_count_prices() {
        let rates = rates();
        let spec = FixedCountSpec::new(UnitKind::ExteriorDoor, crate::estimate::MAX_UNIT_COUNT)
            .with_options(UnitOptions {
                frame: true,
                both_sides: true,
                hardware: true,
            });
        let b = estimate_fixed_count(&rates, &spec).unwrap();
        assert_eq!(b.measure.units, crate::estimate::MAX_UNIT_COUNT);
        assert_eq!(b.total, b.component_sum());
    }
}
