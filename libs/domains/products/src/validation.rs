//! Product payload validation as pure functions.

use axum_helpers::FieldErrors;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::models::{NewProduct, ProductInput, ProductPatch};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const PRICE_NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";
pub const STOCK_TOO_LOW: &str = "Ensure this value is greater than or equal to 1.";
pub const STOCK_TOO_HIGH: &str = "Ensure this value is less than or equal to 2147483647.";
pub const TOO_MANY_DIGITS: &str = "Ensure that there are no more than 10 digits in total.";
pub const TOO_MANY_DECIMALS: &str = "Ensure that there are no more than 2 decimal places.";
pub const TOO_MANY_WHOLE_DIGITS: &str =
    "Ensure that there are no more than 8 digits before the decimal point.";

pub const NAME_MAX: usize = 100;
pub const MODEL_MAX: usize = 50;
pub const TYPE_MAX: usize = 30;
pub const STORE_MAX: usize = 50;
pub const IMAGE_MAX: usize = 100;

const PRICE_MAX_DIGITS: u32 = 10;
const PRICE_DECIMAL_PLACES: u32 = 2;
const STOCK_MIN: i64 = 1;
const STOCK_MAX: i64 = i32::MAX as i64;

/// Validates the fields present in `input`.
///
/// With `partial == false` every field is required. Each field reports at most
/// one message. Name uniqueness needs storage and is checked by the service.
pub fn validate_product(input: &ProductInput, partial: bool) -> Result<ProductPatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut patch = ProductPatch::default();

    patch.name = text_field(&mut errors, "name", &input.name, NAME_MAX, partial);
    patch.model = text_field(&mut errors, "model", &input.model, MODEL_MAX, partial);
    patch.product_type = text_field(&mut errors, "type", &input.product_type, TYPE_MAX, partial);
    patch.store = text_field(&mut errors, "store", &input.store, STORE_MAX, partial);
    patch.image = text_field(&mut errors, "image", &input.image, IMAGE_MAX, partial);

    patch.price = match &input.price {
        Some(raw) => record(&mut errors, "price", parse_price(raw)),
        None => missing(&mut errors, "price", partial),
    };
    patch.stock = match &input.stock {
        Some(raw) => record(&mut errors, "stock", parse_stock(raw)),
        None => missing(&mut errors, "stock", partial),
    };

    errors.into_result()?;
    Ok(patch)
}

impl TryFrom<ProductPatch> for NewProduct {
    type Error = FieldErrors;

    /// Reports every absent field as required.
    fn try_from(patch: ProductPatch) -> Result<Self, Self::Error> {
        match patch {
            ProductPatch {
                name: Some(name),
                model: Some(model),
                product_type: Some(product_type),
                store: Some(store),
                price: Some(price),
                image: Some(image),
                stock: Some(stock),
            } => Ok(NewProduct {
                name,
                model,
                product_type,
                store,
                price,
                image,
                stock,
            }),
            partial => {
                let mut errors = FieldErrors::new();
                let present = [
                    ("name", partial.name.is_some()),
                    ("model", partial.model.is_some()),
                    ("type", partial.product_type.is_some()),
                    ("store", partial.store.is_some()),
                    ("price", partial.price.is_some()),
                    ("image", partial.image.is_some()),
                    ("stock", partial.stock.is_some()),
                ];
                for (field, _) in present.iter().filter(|(_, here)| !here) {
                    errors.add(*field, REQUIRED);
                }
                Err(errors)
            }
        }
    }
}

fn record<T>(errors: &mut FieldErrors, field: &str, result: Result<T, &'static str>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

fn missing<T>(errors: &mut FieldErrors, field: &str, partial: bool) -> Option<T> {
    if !partial {
        errors.add(field, REQUIRED);
    }
    None
}

/// Trims, then checks blank and length.
fn text_field(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Option<String>,
    max: usize,
    partial: bool,
) -> Option<String> {
    let Some(raw) = raw else {
        return missing(errors, field, partial);
    };
    let value = raw.trim();
    let checked = if value.is_empty() {
        Err(BLANK.to_string())
    } else if value.chars().count() > max {
        Err(format!("Ensure this field has no more than {max} characters."))
    } else {
        Ok(value.to_string())
    };

    match checked {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Parses a JSON number or numeric string, enforces `NUMERIC(10, 2)` precision
/// and then the lower bound. The result is rescaled to two places.
pub fn parse_price(raw: &Value) -> Result<Decimal, &'static str> {
    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(INVALID_NUMBER),
    };
    let mut price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| INVALID_NUMBER)?;

    check_precision(&price)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PRICE_NEGATIVE);
    }

    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

/// Digit counting follows the written form: trailing zeros after the point
/// count as decimal places.
fn check_precision(value: &Decimal) -> Result<(), &'static str> {
    let decimals = value.scale();
    let digits = digit_count(value.mantissa().unsigned_abs());

    let (total, whole) = if decimals > digits {
        (decimals, 0)
    } else {
        (digits, digits - decimals)
    };

    if total > PRICE_MAX_DIGITS {
        Err(TOO_MANY_DIGITS)
    } else if decimals > PRICE_DECIMAL_PLACES {
        Err(TOO_MANY_DECIMALS)
    } else if whole > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        Err(TOO_MANY_WHOLE_DIGITS)
    } else {
        Ok(())
    }
}

fn digit_count(mut n: u128) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Accepts integers, integral floats and integer strings.
pub fn parse_stock(raw: &Value) -> Result<i32, &'static str> {
    let value = match raw {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e18 => f as i64,
            _ => return Err(INVALID_INTEGER),
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| INVALID_INTEGER)?,
        _ => return Err(INVALID_INTEGER),
    };

    if value < STOCK_MIN {
        return Err(STOCK_TOO_LOW);
    }
    if value > STOCK_MAX {
        return Err(STOCK_TOO_HIGH);
    }
    i32::try_from(value).map_err(|_| STOCK_TOO_HIGH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_input() -> ProductInput {
        serde_json::from_value(json!({
            "name": "Gaming Laptop",
            "model": "GL-15",
            "type": "electronics",
            "store": "Ikeja",
            "price": "1200.5",
            "image": "laptop.png",
            "stock": 4
        }))
        .unwrap()
    }

    #[test]
    fn accepts_complete_payload() {
        let patch = validate_product(&full_input(), false).unwrap();
        let product = NewProduct::try_from(patch).unwrap();

        assert_eq!(product.price.to_string(), "1200.50");
        assert_eq!(product.stock, 4);
        assert_eq!(product.product_type, "electronics");
    }

    #[test]
    fn full_validation_requires_every_field() {
        let errors = validate_product(&ProductInput::default(), false).unwrap_err();
        for field in ["name", "model", "type", "store", "price", "image", "stock"] {
            assert_eq!(errors.get(field), Some(REQUIRED), "{field}");
        }
    }

    #[test]
    fn partial_validation_checks_only_supplied_fields() {
        let input = ProductInput {
            stock: Some(json!(12)),
            ..Default::default()
        };
        let patch = validate_product(&input, true).unwrap();

        assert_eq!(patch.stock, Some(12));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn partial_patch_is_not_a_new_product() {
        let patch = ProductPatch {
            name: Some("Desk".into()),
            ..Default::default()
        };
        let errors = NewProduct::try_from(patch).unwrap_err();

        assert!(!errors.contains("name"));
        assert_eq!(errors.get("stock"), Some(REQUIRED));
    }

    #[test]
    fn blank_and_overlong_text() {
        let input = ProductInput {
            name: Some("   ".into()),
            model: Some("m".repeat(51)),
            ..full_input()
        };
        let errors = validate_product(&input, false).unwrap_err();

        assert_eq!(errors.get("name"), Some(BLANK));
        assert_eq!(
            errors.get("model"),
            Some("Ensure this field has no more than 50 characters.")
        );
    }

    #[test]
    fn stock_bounds() {
        assert_eq!(parse_stock(&json!(0)), Err(STOCK_TOO_LOW));
        assert_eq!(parse_stock(&json!(-3)), Err(STOCK_TOO_LOW));
        assert_eq!(parse_stock(&json!(1)), Ok(1));
        assert_eq!(parse_stock(&json!(2147483647)), Ok(i32::MAX));
        assert_eq!(parse_stock(&json!(2147483648i64)), Err(STOCK_TOO_HIGH));
        assert_eq!(parse_stock(&json!("7")), Ok(7));
        assert_eq!(parse_stock(&json!(3.0)), Ok(3));
        assert_eq!(parse_stock(&json!(2.5)), Err(INVALID_INTEGER));
        assert_eq!(parse_stock(&json!("many")), Err(INVALID_INTEGER));
    }

    #[test]
    fn price_zero_is_allowed() {
        assert_eq!(parse_price(&json!(0)).unwrap().to_string(), "0.00");
        assert_eq!(parse_price(&json!("0.00")).unwrap().to_string(), "0.00");
    }

    #[test]
    fn price_accepts_numbers_and_strings() {
        assert_eq!(parse_price(&json!(12.5)).unwrap().to_string(), "12.50");
        assert_eq!(parse_price(&json!(" 99 ")).unwrap().to_string(), "99.00");
    }

    #[test]
    fn price_rules() {
        assert_eq!(parse_price(&json!("-1")), Err(PRICE_NEGATIVE));
        assert_eq!(parse_price(&json!("abc")), Err(INVALID_NUMBER));
        assert_eq!(parse_price(&json!(true)), Err(INVALID_NUMBER));
        assert_eq!(parse_price(&json!("1.999")), Err(TOO_MANY_DECIMALS));
        assert_eq!(parse_price(&json!("1.000")), Err(TOO_MANY_DECIMALS));
        assert_eq!(parse_price(&json!("123456789")), Err(TOO_MANY_WHOLE_DIGITS));
        assert_eq!(parse_price(&json!("12345678901")), Err(TOO_MANY_DIGITS));
        assert!(parse_price(&json!("12345678.99")).is_ok());
    }

    #[test]
    fn precision_error_wins_over_negative() {
        assert_eq!(parse_price(&json!("-1.001")), Err(TOO_MANY_DECIMALS));
    }
}
