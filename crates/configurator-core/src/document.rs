//! # Quote Document
//!
//! The renderer-facing view of a quote: every piece of text a quote document
//! must show, already formatted and in display order.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EliteEV Motors                                   ◄── vendor header     │
//! │  Electric Vehicle Configuration Quote                                   │
//! │  Quote Date: 2026-10-17                           ◄── quote date        │
//! │  Quote ID: 6f1c…                                                        │
//! │  Prepared for: Ada Lovelace (…)                   ◄── only with customer│
//! │                                                                         │
//! │  Vehicle Configuration                                                  │
//! │  Model: Tesla Model 3                             ◄── model             │
//! │  Base Price: $45,000                                                    │
//! │                                                                         │
//! │  Selected Options:                                ◄── one per section   │
//! │    Color: Pearl White (Included)                      catalog order     │
//! │    Battery: Long Range (+$10,000)                                       │
//! │    ...                                                                  │
//! │                                                                         │
//! │  Subtotal: $55,000                                ◄── totals            │
//! │  Tax & Fees (8%): $4,400                                                │
//! │  Total: $59,400                                                         │
//! │                                                                         │
//! │  Sales Representative: ...                        ◄── vendor contact    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Renderers decide pagination and byte format; this module decides content.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::configuration::resolve;
use crate::error::CoreResult;
use crate::money::Money;
use crate::quote::Quote;
use crate::types::{CustomerInfo, QuoteId, TaxRate};

// =============================================================================
// Vendor Profile
// =============================================================================

/// Who is issuing the quote. Printed in the header and contact block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VendorProfile {
    pub name: String,
    pub tagline: String,
    pub sales_rep_name: String,
    pub sales_rep_phone: String,
    pub sales_rep_email: String,
    pub dealership: String,
    pub address: Vec<String>,
    pub phone: String,
    pub website: String,
}

impl Default for VendorProfile {
    fn default() -> Self {
        VendorProfile {
            name: "EliteEV Motors".to_string(),
            tagline: "Electric Vehicle Configuration Quote".to_string(),
            sales_rep_name: "Sarah Johnson".to_string(),
            sales_rep_phone: "(555) 123-4567".to_string(),
            sales_rep_email: "sarah.johnson@eliteev.com".to_string(),
            dealership: "EliteEV Motors Dealership".to_string(),
            address: vec![
                "123 Electric Avenue".to_string(),
                "Future City, FC 12345".to_string(),
            ],
            phone: "(555) 100-CARS".to_string(),
            website: "www.eliteev.com".to_string(),
        }
    }
}

impl VendorProfile {
    /// The fixed contact block printed at the end of every document.
    pub fn contact_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Sales Representative:".to_string(),
            self.sales_rep_name.clone(),
            format!("Phone: {}", self.sales_rep_phone),
            format!("Email: {}", self.sales_rep_email),
            String::new(),
            self.dealership.clone(),
        ];
        lines.extend(self.address.iter().cloned());
        lines.push(format!("Phone: {}", self.phone));
        lines.push(format!("Website: {}", self.website));
        lines
    }
}

// =============================================================================
// Document
// =============================================================================

/// One selected option as printed on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionLine {
    /// Capitalized section id (`Battery`).
    pub label: String,
    pub option_name: String,
    pub price: Money,
    /// `+$10,000`, or `Included` for zero-priced options.
    pub price_text: String,
}

/// Everything a renderer needs to produce a quote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteDocument {
    pub quote_id: QuoteId,
    /// `YYYY-MM-DD`, from the quote's creation time.
    pub quote_date: String,
    pub vendor: VendorProfile,
    pub customer: Option<CustomerInfo>,
    pub model_name: String,
    pub base_price: Money,
    pub options: Vec<OptionLine>,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl QuoteDocument {
    /// Builds the document for a quote.
    ///
    /// The model name comes from the catalog; option lines come from the
    /// quote's own breakdown, so the document shows exactly what was priced.
    ///
    /// ## Errors
    /// `UnresolvedReference` if the quote's selection no longer resolves
    /// against `catalog`.
    pub fn build(catalog: &Catalog, quote: &Quote, vendor: &VendorProfile) -> CoreResult<Self> {
        let resolved = resolve(catalog, quote.selection())?;
        let breakdown = quote.breakdown();

        let options = breakdown
            .line_items
            .iter()
            .map(|item| OptionLine {
                label: capitalize(&item.section_id),
                option_name: item.option_name.clone(),
                price: item.price,
                price_text: format_delta(item.price),
            })
            .collect();

        Ok(QuoteDocument {
            quote_id: quote.id().clone(),
            quote_date: quote.created_at().format("%Y-%m-%d").to_string(),
            vendor: vendor.clone(),
            customer: quote.customer().cloned(),
            model_name: resolved.model.name.clone(),
            base_price: breakdown.base_price,
            options,
            subtotal: breakdown.subtotal,
            tax_rate: breakdown.tax_rate,
            tax: breakdown.tax,
            total: breakdown.total,
        })
    }

    /// The document's text, line by line, in display order.
    ///
    /// Blank strings separate blocks.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.vendor.name.clone(),
            self.vendor.tagline.clone(),
            format!("Quote Date: {}", self.quote_date),
            format!("Quote ID: {}", self.quote_id),
        ];

        if let Some(customer) = &self.customer {
            lines.push(format!(
                "Prepared for: {} ({}, {})",
                customer.name, customer.email, customer.phone
            ));
        }

        lines.push(String::new());
        lines.push("Vehicle Configuration".to_string());
        lines.push(format!("Model: {}", self.model_name));
        lines.push(format!("Base Price: {}", self.base_price));

        lines.push(String::new());
        lines.push("Selected Options:".to_string());
        for option in &self.options {
            lines.push(format!(
                "  {}: {} ({})",
                option.label, option.option_name, option.price_text
            ));
        }

        lines.push(String::new());
        lines.push(format!("Subtotal: {}", self.subtotal));
        lines.push(format!("Tax & Fees ({}): {}", self.tax_rate, self.tax));
        lines.push(format!("Total: {}", self.total));

        lines.push(String::new());
        lines.extend(self.vendor.contact_lines());
        lines
    }

    /// Suggested file name without extension:
    /// `Tesla_Model_3_quote_2026-10-17_550e8400`.
    ///
    /// The trailing quote id prefix keeps two quotes for the same model on the
    /// same day apart.
    pub fn file_stem(&self) -> String {
        let model = self.model_name.split_whitespace().collect::<Vec<_>>().join("_");
        let short_id: String = self.quote_id.as_str().chars().take(8).collect();
        format!("{}_quote_{}_{}", model, self.quote_date, short_id)
    }
}

/// `+$N` for a positive delta, `Included` for zero.
pub fn format_delta(price: Money) -> String {
    if price.is_zero() {
        "Included".to_string()
    } else {
        format!("+{}", price)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Selection;
    use crate::error::CoreError;
    use crate::pricing::TAX_RATE;
    use crate::quote::assemble_verified_quote;

    fn long_range_document(customer: Option<CustomerInfo>) -> QuoteDocument {
        let catalog = Catalog::elite_ev().unwrap();
        let selection = Selection::default_for(&catalog)
            .with_option(&catalog, "battery", "long-range")
            .unwrap();
        let quote = assemble_verified_quote(&catalog, selection, TAX_RATE, customer).unwrap();
        QuoteDocument::build(&catalog, &quote, &VendorProfile::default()).unwrap()
    }

    fn position(lines: &[String], needle: &str) -> usize {
        lines
            .iter()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("missing line containing {needle:?}"))
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(Money::zero()), "Included");
        assert_eq!(format_delta(Money::from_units(10_000)), "+$10,000");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("battery"), "Battery");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_document_fields() {
        let doc = long_range_document(None);

        assert_eq!(doc.model_name, "Tesla Model 3");
        assert_eq!(doc.options.len(), 6);
        assert_eq!(doc.options[1].label, "Battery");
        assert_eq!(doc.options[1].price_text, "+$10,000");
        assert_eq!(doc.options[0].price_text, "Included");
        assert_eq!(doc.total.units(), 59_400);
        assert_eq!(doc.quote_date.len(), 10);
    }

    #[test]
    fn test_lines_in_required_order() {
        let doc = long_range_document(None);
        let lines = doc.lines();

        let header = position(&lines, "EliteEV Motors");
        let date = position(&lines, "Quote Date:");
        let model = position(&lines, "Model: Tesla Model 3");
        let base = position(&lines, "Base Price: $45,000");
        let color = position(&lines, "Color: Pearl White (Included)");
        let battery = position(&lines, "Battery: Long Range (+$10,000)");
        let wheels = position(&lines, "Wheels: 18\" Aero Wheels (Included)");
        let subtotal = position(&lines, "Subtotal: $55,000");
        let tax = position(&lines, "Tax & Fees (8%): $4,400");
        let total = position(&lines, "Total: $59,400");
        let contact = position(&lines, "Sales Representative:");
        let website = position(&lines, "Website: www.eliteev.com");

        let order = [
            header, date, model, base, color, battery, wheels, subtotal, tax, total, contact, website,
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
    }

    #[test]
    fn test_customer_line_only_when_present() {
        let without = long_range_document(None).lines();
        assert!(!without.iter().any(|l| l.starts_with("Prepared for")));

        let customer = CustomerInfo::new("Ada Lovelace", "ada@example.com", "555-123-4567").unwrap();
        let with = long_range_document(Some(customer)).lines();
        assert!(with
            .iter()
            .any(|l| l == "Prepared for: Ada Lovelace (ada@example.com, 555-123-4567)"));
    }

    #[test]
    fn test_file_stem() {
        let doc = long_range_document(None);
        assert_eq!(
            doc.file_stem(),
            format!("Tesla_Model_3_quote_{}_{}", doc.quote_date, &doc.quote_id.as_str()[..8])
        );
    }

    #[test]
    fn test_file_stem_differs_per_quote() {
        let first = long_range_document(None);
        let second = long_range_document(None);

        assert_ne!(first.file_stem(), second.file_stem());
    }

    #[test]
    fn test_build_rejects_quote_from_other_catalog() {
        let catalog = Catalog::elite_ev().unwrap();
        let selection = Selection::default_for(&catalog);
        let quote = assemble_verified_quote(&catalog, selection, TAX_RATE, None).unwrap();

        let other = Catalog::from_json(
            r#"{
                "models": [{ "id": "city", "name": "City", "basePrice": 20000 }],
                "sections": []
            }"#,
        )
        .unwrap();

        let err = QuoteDocument::build(&other, &quote, &VendorProfile::default()).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedReference { .. }));
    }
}
