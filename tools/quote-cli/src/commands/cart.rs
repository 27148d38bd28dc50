//! Manage the persisted quote cart.

use std::path::PathBuf;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use paint_cache::DirStore;
use paint_quote::checkout::{QuoteRequest, Submitter};
use paint_quote::ids::LineItemId;
use paint_quote::session::CartSession;
use paint_quote::QuoteError;
use serde_json::json;

use super::{CartAction, CartArgs};
use crate::context::Context;
use crate::output::eligibility_badge;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session(&args.session, args.flow.into())?;
    ctx.output.debug(&format!(
        "Session {} ({} flow)",
        session.id(),
        session.flow()
    ));

    match args.action {
        CartAction::Show => show(&session, ctx),
        CartAction::Add(service) => {
            let request = service.into_request(&ctx.config.rates)?;
            let id = session.add(request)?;
            ctx.output.success(&format!("Added {}", id));
            show(&session, ctx)
        }
        CartAction::Remove { id } => {
            if !session.remove(&LineItemId::new(id.as_str())) {
                bail!("Item '{}' is not in the cart", id);
            }
            ctx.output.success(&format!("Removed {}", id));
            show(&session, ctx)
        }
        CartAction::Clear { yes } => {
            if session.cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items?", session.cart().len()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Clear cancelled");
                    return Ok(());
                }
            }
            session.clear();
            ctx.output.success("Cart cleared");
            Ok(())
        }
        CartAction::Checkout { yes, out } => checkout(&mut session, yes, out, ctx),
    }
}

fn show(session: &CartSession<DirStore>, ctx: &Context) -> Result<()> {
    let cart = session.cart();
    let totals = session.totals();
    let eligibility = session.eligibility();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "session": session.id(),
            "flow": session.flow(),
            "cart": cart,
            "totals": totals,
            "eligibility": eligibility,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", cart.len()));
    if cart.is_empty() {
        ctx.output.info("Nothing in the cart yet");
    } else {
        let widths = [20, 16, 6, 12];
        ctx.output
            .table_row(&["ID", "SERVICE", "HOURS", "TOTAL"], &widths);
        for item in &cart.items {
            let hours = item.breakdown.total_hours.to_string();
            let total = item.breakdown.total.display();
            ctx.output.table_row(
                &[
                    item.id.as_str(),
                    item.service.display_name(),
                    hours.as_str(),
                    total.as_str(),
                ],
                &widths,
            );
        }
    }

    ctx.output.header("Totals");
    ctx.output.totals(&totals);
    ctx.output.kv("Status", &eligibility_badge(&eligibility));
    Ok(())
}

fn checkout(
    session: &mut CartSession<DirStore>,
    yes: bool,
    out: Option<PathBuf>,
    ctx: &Context,
) -> Result<()> {
    let eligibility = session.eligibility();
    if !eligibility.eligible {
        bail!(
            "{}",
            eligibility.reason.unwrap_or_else(|| "Checkout not allowed".to_string())
        );
    }

    if !yes && !ctx.output.is_json() {
        show(session, ctx)?;
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Submit quote request for {}?",
                session.totals().grand_total.display()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let mut submitter = JsonSubmitter { out };
    let request = session.checkout(&mut submitter)?;
    ctx.output.success(&format!(
        "Submitted {} for {}",
        request.id,
        request.totals.grand_total.display()
    ));
    Ok(())
}

/// Writes submitted requests as JSON to a file or stdout.
struct JsonSubmitter {
    out: Option<PathBuf>,
}

impl Submitter for JsonSubmitter {
    fn submit(&mut self, request: &QuoteRequest) -> Result<(), QuoteError> {
        let body = serde_json::to_string_pretty(request)?;
        match &self.out {
            Some(path) => std::fs::write(path, body + "\n").map_err(|e| {
                QuoteError::Submission(format!("failed to write {}: {}", path.display(), e))
            }),
            None => {
                println!("{}", body);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use paint_quote::cart::{Cart, CartPolicy};

    #[test]
    fn test_json_submitter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        let request =
            QuoteRequest::from_cart("local", &Cart::new(), &CartPolicy::default(), Utc::now());

        let mut submitter = JsonSubmitter {
            out: Some(path.clone()),
        };
        submitter.submit(&request).unwrap();

        let written: QuoteRequest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, request);
    }

    #[test]
    fn test_json_submitter_reports_write_failure() {
        let request =
            QuoteRequest::from_cart("local", &Cart::new(), &CartPolicy::default(), Utc::now());
        let mut submitter = JsonSubmitter {
            out: Some(PathBuf::from("/nonexistent/dir/request.json")),
        };
        assert!(matches!(
            submitter.submit(&request),
            Err(QuoteError::Submission(_))
        ));
    }
}
