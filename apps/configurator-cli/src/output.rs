//! # Terminal Output
//!
//! Formats command responses for stdout. Logs go to stderr, so stdout stays
//! clean for piping (`--json | jq`).

use std::fmt::Write as _;

use serde::Serialize;

use configurator_core::{format_delta, PriceBreakdown, Quote, VehicleModel};

use crate::commands::{ModelResponse, QuoteResponse, QuoteSummary, SectionResponse};
use crate::error::ApiError;

const LABEL_WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 12;

/// Pretty JSON for `--json`.
pub fn json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))
}

fn row(out: &mut String, label: &str, amount: &str) {
    let _ = writeln!(
        out,
        "{:<label_width$}{:>amount_width$}",
        label,
        amount,
        label_width = LABEL_WIDTH,
        amount_width = AMOUNT_WIDTH
    );
}

pub fn models_table(models: &[ModelResponse]) -> String {
    let mut out = String::new();
    for model in models {
        let marker = if model.is_default { " *" } else { "" };
        let label = format!("{:<16}{}{}", model.id, model.name, marker);
        row(&mut out, &label, &model.base_price.to_string());
    }
    out
}

pub fn options_table(sections: &[SectionResponse]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} ({})", section.name, section.id);
        for option in &section.options {
            let marker = if option.is_default { " *" } else { "" };
            let label = format!("  {:<16}{}{}", option.id, option.name, marker);
            row(&mut out, &label, &option.price_text);
        }
    }
    out
}

pub fn price_table(model: &VehicleModel, price: &PriceBreakdown) -> String {
    let mut out = String::new();
    row(&mut out, &model.name, &price.base_price.to_string());
    for item in &price.line_items {
        let label = format!("  {}: {}", item.section_name, item.option_name);
        row(&mut out, &label, &format_delta(item.price));
    }
    out.push('\n');
    row(&mut out, "Subtotal", &price.subtotal.to_string());
    row(&mut out, &format!("Tax & Fees ({})", price.tax_rate), &price.tax.to_string());
    row(&mut out, "Total", &price.total.to_string());
    out
}

pub fn quote_summary(response: &QuoteResponse) -> String {
    format!(
        "Quote {}\nTotal {}\nWritten to {}\n",
        response.quote_id,
        response.total,
        response.path.display()
    )
}

/// One line per stored quote, oldest first.
pub fn quotes_table(quotes: &[QuoteSummary]) -> String {
    if quotes.is_empty() {
        return "No quotes yet\n".to_string();
    }

    let mut out = String::new();
    for quote in quotes {
        let _ = writeln!(
            out,
            "{}  {:<16}{:>amount_width$}  {}",
            quote.id,
            quote.model_id,
            quote.total.to_string(),
            quote.customer_name.as_deref().unwrap_or("-"),
            amount_width = AMOUNT_WIDTH
        );
    }
    out
}

/// A stored quote: header, then its price table.
pub fn quote_detail(quote: &Quote, model: &VehicleModel) -> String {
    let mut out = format!("Quote {}\nCreated {}\n", quote.id(), quote.created_at().to_rfc3339());
    if let Some(customer) = quote.customer() {
        let _ = writeln!(
            out,
            "Prepared for {} ({}, {})",
            customer.name, customer.email, customer.phone
        );
    }
    out.push('\n');
    out.push_str(&price_table(model, quote.breakdown()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{list_models, list_options};
    use crate::state::CatalogState;
    use configurator_core::{
        assemble_verified_quote, price_selection, Catalog, CustomerInfo, Selection, TAX_RATE,
    };

    fn catalog() -> CatalogState {
        CatalogState::new(Catalog::elite_ev().unwrap())
    }

    #[test]
    fn test_models_table_marks_default() {
        let table = models_table(&list_models(&catalog()));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Tesla Model 3 *"));
        assert!(lines[0].ends_with("$45,000"));
        assert!(!lines[1].contains('*'));
    }

    #[test]
    fn test_options_table() {
        let table = options_table(&list_options(&catalog()));

        assert!(table.starts_with("Color (color)\n"));
        assert!(table.contains("Long Range"));
        assert!(table.contains("+$10,000"));
    }

    #[test]
    fn test_price_table() {
        let catalog = catalog();
        let selection = Selection::default_for(&catalog)
            .with_option(&catalog, "battery", "long-range")
            .unwrap();
        let price = price_selection(&catalog, &selection, TAX_RATE).unwrap();

        let table = price_table(catalog.default_model(), &price);
        assert!(table.contains("Battery: Long Range"));
        assert!(table.lines().any(|l| l.starts_with("  Color: Pearl White") && l.ends_with("Included")));
        assert!(table.lines().any(|l| l.starts_with("Tax & Fees (8%)") && l.ends_with("$4,400")));
        assert!(table.lines().last().is_some_and(|l| l.ends_with("$59,400")));
    }

    #[test]
    fn test_json_output() {
        let out = json(&list_models(&catalog())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["basePrice"], 45_000);
    }

    #[test]
    fn test_quotes_table() {
        assert_eq!(quotes_table(&[]), "No quotes yet\n");

        let catalog = catalog();
        let customer = CustomerInfo::new("Ada Lovelace", "ada@example.com", "555-123-4567").unwrap();
        let quote =
            assemble_verified_quote(&catalog, Selection::default_for(&catalog), TAX_RATE, Some(customer))
                .unwrap();

        let table = quotes_table(&[QuoteSummary::from(&quote)]);
        assert!(table.starts_with(quote.id().as_str()));
        assert!(table.contains("tesla-model-3"));
        assert!(table.contains("$48,600"));
        assert!(table.trim_end().ends_with("Ada Lovelace"));
    }

    #[test]
    fn test_quote_detail() {
        let catalog = catalog();
        let quote = assemble_verified_quote(&catalog, Selection::default_for(&catalog), TAX_RATE, None).unwrap();

        let detail = quote_detail(&quote, catalog.default_model());
        assert!(detail.starts_with(&format!("Quote {}\n", quote.id())));
        assert!(!detail.contains("Prepared for"));
        assert!(detail.lines().last().is_some_and(|l| l.ends_with("$48,600")));
    }
}
