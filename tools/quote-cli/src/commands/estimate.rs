//! Price a single service without touching the cart.

use anyhow::Result;
use serde_json::json;

use super::EstimateArgs;
use crate::context::Context;

/// Run the estimate command.
pub fn run(args: EstimateArgs, ctx: &Context) -> Result<()> {
    let request = args.service.into_request(&ctx.config.rates)?;
    let breakdown = request.estimate(&ctx.config.rates)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "service": request.service,
            "units": request.units,
            "breakdown": breakdown,
        }));
        return Ok(());
    }

    ctx.output.header(request.service.display_name());
    let measure = &breakdown.measure;
    if measure.wall_sqft > 0.0 {
        ctx.output
            .kv("Walls", &format!("{:.0} sq ft", measure.wall_sqft));
    }
    if measure.ceiling_sqft > 0.0 {
        ctx.output
            .kv("Ceiling", &format!("{:.0} sq ft", measure.ceiling_sqft));
    }
    if measure.linear_ft > 0.0 {
        ctx.output
            .kv("Trim", &format!("{:.0} ft", measure.linear_ft));
    }
    if measure.units > 0 {
        ctx.output.kv("Units", &measure.units.to_string());
    }
    ctx.output.breakdown(&breakdown);
    Ok(())
}
