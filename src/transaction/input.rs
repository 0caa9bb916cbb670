//! Parsing and validation of transaction request bodies.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    transaction::core::{Description, Transaction, TransactionBuilder},
    validation::ValidationError,
};

/// The JSON body for creating or updating a transaction.
///
/// Every field is kept as raw JSON so that a wrongly typed field is reported
/// as a validation error on that field rather than a generic parse failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    /// The value of the transaction, as a JSON number or a numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// When the transaction occurred, as an RFC 3339 date-time or a `YYYY-MM-DD` date.
    #[serde(default)]
    pub date: Option<Value>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<Value>,
}

impl TransactionInput {
    /// Check the input and convert it into the fields of a transaction.
    ///
    /// All three fields must be present before any of them is parsed. `null`
    /// and the empty string count as missing. Zero is a valid amount.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] naming the first field that is missing,
    /// or failing that, the first field that cannot be parsed.
    pub fn validate(self) -> Result<TransactionBuilder, ValidationError> {
        let amount = require("amount", self.amount)?;
        let date = require("date", self.date)?;
        let description = require("description", self.description)?;

        let amount = parse_amount(&amount)?;
        let date = parse_date_value(&date)?;
        let description = match description {
            Value::String(text) => Description::new(&text)?,
            _ => return Err(ValidationError::new("description", "must be a string")),
        };

        Ok(Transaction::build(amount, date, description))
    }
}

/// Unwrap the result of the JSON extractor, turning a malformed body into a
/// validation error.
pub(super) fn accept_json(
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<TransactionInput, Error> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rejection) => {
            tracing::debug!("rejected transaction body: {rejection}");
            Err(ValidationError::new("body", rejection.body_text()).into())
        }
    }
}

fn require(field: &'static str, value: Option<Value>) -> Result<Value, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::missing(field)),
        Some(Value::String(text)) if text.is_empty() => Err(ValidationError::missing(field)),
        Some(value) => Ok(value),
    }
}

fn parse_amount(value: &Value) -> Result<f64, ValidationError> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match amount {
        Some(amount) if amount.is_finite() => Ok(amount),
        Some(_) => Err(ValidationError::new("amount", "must be a finite number")),
        None => Err(ValidationError::new("amount", "must be a number")),
    }
}

fn parse_date_value(value: &Value) -> Result<OffsetDateTime, ValidationError> {
    let Value::String(text) = value else {
        return Err(ValidationError::new("date", "must be a string"));
    };

    parse_date(text).ok_or_else(|| {
        ValidationError::new(
            "date",
            format!("\"{text}\" is not a valid RFC 3339 date-time or YYYY-MM-DD date"),
        )
    })
}

/// Parse a date-time string into an instant.
///
/// Accepts RFC 3339 date-times (e.g. `2024-01-15T10:30:00.000Z`), date-times
/// without an offset (e.g. `2024-01-15T10:30:00` or `2024-01-15T10:30`) and
/// plain dates (e.g. `2024-01-15`). Values without an offset are taken to be
/// UTC and plain dates are taken to be midnight UTC.
pub fn parse_date(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    let date_time_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];

    for format in date_time_formats {
        if let Ok(date_time) = PrimitiveDateTime::parse(text, format) {
            return Some(date_time.assume_utc());
        }
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}
