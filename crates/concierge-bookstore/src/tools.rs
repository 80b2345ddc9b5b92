//! Bookstore tools
//!
//! Each tool exists twice: as a plain function (used directly and in tests)
//! and as a [`FunctionTool`] the model can call.

use crate::catalog::{DISCOUNTS, find_book};
use crate::error::{BookstoreError, Result};
use concierge_tools::{FunctionTool, Param};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;

/// Tax rate applied when the caller does not give one
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Reply for titles not in the catalog
pub const BOOK_NOT_FOUND: &str = "Book not found in catalog";

/// Price and category of a book, e.g. `"$10.99 (fiction)"`
///
/// Titles must match exactly; anything else yields [`BOOK_NOT_FOUND`].
pub fn get_book_price(title: &str) -> String {
    match find_book(title) {
        Some(book) => format!("${:.2} ({})", book.price(), book.category),
        None => BOOK_NOT_FOUND.to_string(),
    }
}

/// Every discount description, one `- ` line each, after a fixed header
pub fn list_available_discounts() -> String {
    let mut result = String::from("Available discounts:\n");
    for discount in DISCOUNTS {
        result.push_str("- ");
        result.push_str(discount.description);
        result.push('\n');
    }
    result
}

/// Tax and total for an order
///
/// `tax_rate` is a fraction (`0.08` for 8%) and defaults to
/// [`DEFAULT_TAX_RATE`]. Both amounts are rounded half away from zero to
/// cents.
///
/// ```
/// use concierge_bookstore::calculate_tax;
///
/// assert_eq!(
///     calculate_tax(100.0, None).unwrap(),
///     "Tax: $8.00, Total with Tax: $108.00"
/// );
/// ```
pub fn calculate_tax(order_total: f64, tax_rate: Option<f64>) -> Result<String> {
    let total = to_amount("order_total", order_total)?;
    let rate = to_amount("tax_rate", tax_rate.unwrap_or(DEFAULT_TAX_RATE))?;

    let tax = total.checked_mul(rate).ok_or_else(|| BookstoreError::InvalidAmount {
        field: "order_total",
        reason: "too large".to_string(),
    })?;
    let with_tax = total.checked_add(tax).ok_or_else(|| BookstoreError::InvalidAmount {
        field: "order_total",
        reason: "too large".to_string(),
    })?;

    Ok(format!(
        "Tax: ${:.2}, Total with Tax: ${:.2}",
        to_cents(tax),
        to_cents(with_tax)
    ))
}

fn to_amount(field: &'static str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(BookstoreError::InvalidAmount {
            field,
            reason: "must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(BookstoreError::InvalidAmount {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Decimal::try_from(value).map_err(|_| BookstoreError::InvalidAmount {
        field,
        reason: "out of range".to_string(),
    })
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `get_book_price` as a model-callable tool
pub fn get_book_price_tool() -> FunctionTool {
    FunctionTool::new(
        "get_book_price",
        "Get the price of a book by title. Returns the price and category.",
        |args| Ok(get_book_price(args.str("title")?)),
    )
    .with_param(Param::string("title", "The title of the book"))
}

/// `list_available_discounts` as a model-callable tool
pub fn list_available_discounts_tool() -> FunctionTool {
    FunctionTool::new(
        "list_available_discounts",
        "List all available discounts.",
        |_| Ok(list_available_discounts()),
    )
}

/// `calculate_tax` as a model-callable tool
pub fn calculate_tax_tool() -> FunctionTool {
    FunctionTool::new(
        "calculate_tax",
        "Calculate tax and total price with tax.",
        |args| Ok(calculate_tax(args.f64("order_total")?, args.opt_f64("tax_rate"))?),
    )
    .with_param(Param::number("order_total", "The total amount before tax"))
    .with_param(
        Param::number("tax_rate", "The tax rate as a decimal (e.g., 0.08 for 8%)")
            .with_default(json!(DEFAULT_TAX_RATE)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_tools::Tool;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_get_book_price() {
        assert_eq!(get_book_price("1984"), "$10.99 (fiction)");
        assert_eq!(get_book_price("The Catcher in the Rye"), "$10.50 (fiction)");
        assert_eq!(get_book_price("Thinking, Fast and Slow"), "$17.99 (non_fiction)");
        assert_eq!(get_book_price("Dune"), BOOK_NOT_FOUND);
        assert_eq!(get_book_price(""), BOOK_NOT_FOUND);
    }

    #[test]
    fn test_list_available_discounts() {
        assert_eq!(
            list_available_discounts(),
            "Available discounts:\n\
             - Buy 2, Get 1 Free on select Fiction books\n\
             - 10% Discount on purchases above $50\n\
             - Loyalty Members get an extra 5% off on every order\n"
        );
    }

    #[test]
    fn test_calculate_tax() {
        assert_eq!(
            calculate_tax(100.0, None).unwrap(),
            "Tax: $8.00, Total with Tax: $108.00"
        );
        assert_eq!(
            calculate_tax(100.0, Some(0.10)).unwrap(),
            "Tax: $10.00, Total with Tax: $110.00"
        );
        assert_eq!(
            calculate_tax(25.98, None).unwrap(),
            "Tax: $2.08, Total with Tax: $28.06"
        );
        assert_eq!(calculate_tax(0.0, None).unwrap(), "Tax: $0.00, Total with Tax: $0.00");
    }

    #[test]
    fn test_calculate_tax_rounds_half_away_from_zero() {
        // 10.00 * 0.0625 = 0.625
        assert_eq!(
            calculate_tax(10.0, Some(0.0625)).unwrap(),
            "Tax: $0.63, Total with Tax: $10.63"
        );
    }

    #[test]
    fn test_calculate_tax_rejects_bad_input() {
        assert!(calculate_tax(-1.0, None).is_err());
        assert!(calculate_tax(f64::NAN, None).is_err());
        assert!(calculate_tax(f64::INFINITY, None).is_err());
        assert!(calculate_tax(10.0, Some(-0.1)).is_err());
        assert!(calculate_tax(10.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_tools_are_idempotent() {
        assert_eq!(get_book_price("Sapiens"), get_book_price("Sapiens"));
        assert_eq!(list_available_discounts(), list_available_discounts());
        assert_eq!(calculate_tax(31.24, None), calculate_tax(31.24, None));
    }

    #[tokio::test]
    async fn test_calculate_tax_tool_defaults_rate() {
        let tool = calculate_tax_tool();
        let output = assert_ok!(tool.execute(json!({ "order_total": 100 })).await);
        assert_eq!(output, "Tax: $8.00, Total with Tax: $108.00");

        let output = assert_ok!(
            tool.execute(json!({ "order_total": 100, "tax_rate": null })).await
        );
        assert_eq!(output, "Tax: $8.00, Total with Tax: $108.00");

        let output = assert_ok!(
            tool.execute(json!({ "order_total": 100, "tax_rate": 0.1 })).await
        );
        assert_eq!(output, "Tax: $10.00, Total with Tax: $110.00");
    }

    #[tokio::test]
    async fn test_calculate_tax_tool_errors() {
        let tool = calculate_tax_tool();
        assert_err!(tool.execute(json!({})).await);
        assert_err!(tool.execute(json!({ "order_total": "100" })).await);
        assert_eq!(
            tool.invoke(json!({ "order_total": -5 })).await,
            "Error: Invalid order_total: must not be negative"
        );
    }

    #[tokio::test]
    async fn test_price_and_discount_tools() {
        let price = get_book_price_tool();
        assert_eq!(price.input_schema()["required"], json!(["title"]));
        let output = assert_ok!(price.execute(json!({ "title": "Educated" })).await);
        assert_eq!(output, "$13.75 (non_fiction)");

        let discounts = list_available_discounts_tool();
        assert_eq!(discounts.input_schema()["required"], json!([]));
        let output = assert_ok!(discounts.execute(json!({})).await);
        assert!(output.starts_with("Available discounts:\n"));
    }

    #[test]
    fn test_tax_rate_default_not_in_schema() {
        let schema = calculate_tax_tool().input_schema();
        assert_eq!(schema["required"], json!(["order_total"]));
        assert!(schema["properties"]["tax_rate"].get("default").is_none());
    }
}
