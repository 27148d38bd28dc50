//! Show the active rate table.

use anyhow::Result;

use super::RatesArgs;
use crate::context::Context;

/// Run the rates command.
pub fn run(args: RatesArgs, ctx: &Context) -> Result<()> {
    if args.toml {
        print!("{}", ctx.config.to_toml_string()?);
        return Ok(());
    }

    let rates = &ctx.config.rates;
    if ctx.output.is_json() {
        ctx.output.json(rates);
        return Ok(());
    }

    ctx.output.header("Rates");
    ctx.output.kv("Labor", &format!("{}/h", rates.labor_rate.display()));
    ctx.output
        .kv("Paint", &format!("{}/gal", rates.material_rate.display()));
    ctx.output
        .kv("Supplies", &format!("{}/h", rates.supply_rate.display()));

    ctx.output.header("Coverage (per gallon)");
    ctx.output.kv("Walls", &format!("{} sq ft", rates.wall_coverage));
    ctx.output.kv("Ceiling", &format!("{} sq ft", rates.ceiling_coverage));
    ctx.output.kv(
        "Stucco ceiling",
        &format!("{} sq ft", rates.stucco_ceiling_coverage),
    );
    ctx.output.kv("Trim", &format!("{} ft", rates.trim_coverage));

    ctx.output.header("Production (per hour)");
    let p = &rates.production;
    ctx.output.kv("Walls, two coats", &format!("{} sq ft", p.wall_two_coat));
    ctx.output.kv("Walls, one coat", &format!("{} sq ft", p.wall_one_coat));
    ctx.output.kv("Ceiling", &format!("{} sq ft", p.ceiling));
    ctx.output.kv("Stucco ceiling", &format!("{} sq ft", p.stucco_ceiling));
    ctx.output.kv("Baseboard, low", &format!("{} ft", p.baseboard_low));
    ctx.output.kv("Baseboard, high", &format!("{} ft", p.baseboard_high));
    ctx.output.kv("Crown molding", &format!("{} ft", p.crown_molding));

    ctx.output.header("Per unit");
    let widths = [16, 8, 8];
    ctx.output.table_row(&["UNIT", "HOURS", "GALLONS"], &widths);
    for (name, unit) in [
        ("Interior door", &rates.units.interior_door),
        ("Exterior door", &rates.units.exterior_door),
        ("Cabinet face", &rates.units.cabinet_face),
    ] {
        let hours = unit.hours.to_string();
        let gallons = unit.gallons.to_string();
        ctx.output
            .table_row(&[name, hours.as_str(), gallons.as_str()], &widths);
    }

    ctx.output.header("Cart");
    let cart = &ctx.config.cart;
    ctx.output.kv(
        "Discount",
        &format!(
            "{}% over {}",
            cart.discount_percent,
            cart.discount_threshold.display()
        ),
    );
    ctx.output
        .kv("Long job", &format!("over {} h per item", cart.long_job_hours));
    Ok(())
}
