//! Projection request validation.
//!
//! Checks run in a fixed order and the first failure is reported: body
//! present, every parameter present, numeric rates, maturity date format,
//! then floor against ceiling.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sofr_curve_core::{parse_maturity_date, LoanTerms, ProjectionError};
use std::str::FromStr;

use crate::error::RequestError;

/// Request parameters as `(name, snake_case alias)`.
const MATURITY_DATE: (&str, &str) = ("maturityDate", "maturity_date");
const RATE_FLOOR: (&str, &str) = ("rateFloor", "rate_floor");
const RATE_CEILING: (&str, &str) = ("rateCeiling", "rate_ceiling");
const RATE_SPREAD: (&str, &str) = ("rateSpread", "rate_spread");

const REQUIRED: [(&str, &str); 4] = [MATURITY_DATE, RATE_FLOOR, RATE_CEILING, RATE_SPREAD];

/// Validates a projection request body into loan terms.
///
/// # Errors
/// Returns the first `RequestError` encountered.
pub fn parse_loan_terms(body: &Value) -> Result<LoanTerms, RequestError> {
    let fields = match body.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => return Err(RequestError::MissingBody),
    };

    for (name, alias) in REQUIRED {
        if lookup(fields, (name, alias)).is_none() {
            return Err(RequestError::MissingParameter(name));
        }
    }

    let rate_floor = decimal_param(fields, RATE_FLOOR)?;
    let rate_ceiling = decimal_param(fields, RATE_CEILING)?;
    let rate_spread = decimal_param(fields, RATE_SPREAD)?;

    let maturity_date = match lookup(fields, MATURITY_DATE) {
        Some(Value::String(raw)) => parse_maturity_date(raw)?,
        other => {
            return Err(ProjectionError::InvalidMaturityDate(
                other.map(Value::to_string).unwrap_or_default(),
            )
            .into())
        }
    };

    Ok(LoanTerms::new(
        maturity_date,
        rate_floor,
        rate_ceiling,
        rate_spread,
    )?)
}

fn lookup<'a>(fields: &'a Map<String, Value>, (name, alias): (&str, &str)) -> Option<&'a Value> {
    fields.get(name).or_else(|| fields.get(alias))
}

fn decimal_param(fields: &Map<String, Value>, key: (&str, &str)) -> Result<Decimal, RequestError> {
    lookup(fields, key)
        .and_then(to_decimal)
        .ok_or(RequestError::InvalidParameterType)
}

/// Accepts JSON numbers and numeric strings.
fn to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
