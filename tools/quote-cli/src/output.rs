//! Output formatting for the CLI.

use console::style;
use paint_quote::cart::Totals;
use paint_quote::checkout::Eligibility;
use paint_quote::estimate::EstimateBreakdown;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the lines of a priced breakdown.
    pub fn breakdown(&self, breakdown: &EstimateBreakdown) {
        if self.json {
            return;
        }
        self.kv(
            "Hours",
            &format!(
                "{} ({} labor + {} setup)",
                breakdown.total_hours, breakdown.labor_hours, breakdown.setup_hours
            ),
        );
        self.kv("Paint", &format!("{} gal", breakdown.material_units));
        self.kv("Labor", &breakdown.labor_cost.display());
        self.kv("Material", &breakdown.material_cost.display());
        self.kv("Supplies", &breakdown.supplies_cost.display());
        if !breakdown.flat_fees.is_zero() {
            self.kv("Flat fees", &breakdown.flat_fees.display());
        }
        self.kv("Total", &style(breakdown.total.display()).bold().to_string());
    }

    /// Print cart totals.
    pub fn totals(&self, totals: &Totals) {
        if self.json {
            return;
        }
        self.kv("Subtotal", &totals.subtotal.display());
        if totals.long_job {
            self.kv(
                "Travel",
                &format!("{} ({})", totals.adjustment.display(), totals.travel_mode.as_str()),
            );
        }
        if totals.has_discount() {
            self.kv("Discount", &format!("-{}", totals.discount.display()));
        }
        self.kv("Total", &style(totals.grand_total.display()).bold().to_string());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored label for the checkout gate.
pub fn eligibility_badge(eligibility: &Eligibility) -> String {
    if eligibility.eligible {
        style("ready for checkout").green().to_string()
    } else {
        let reason = eligibility.reason.as_deref().unwrap_or("not eligible");
        style(reason).yellow().to_string()
    }
}
