//! Raw record normalization.
//!
//! The data source is a JSON array of loosely shaped objects. Each object is
//! normalized into one canonical [`Customer`] without ever failing: absent or
//! non-string identity fields become empty strings, zones are trimmed, and
//! unparseable dates become the [`SignupDate::Unknown`] sentinel.
//!
//! Both the source export's original keys and the canonical snake_case keys
//! are accepted, which makes normalization idempotent: serializing a
//! [`Customer`] and normalizing it again yields the same record.

use crate::model::customer::{Customer, SignupDate};
use serde_json::Value;

const FULL_NAME_KEYS: &[&str] = &["full_name", "Nombre completo"];
const EMAIL_KEYS: &[&str] = &["email", "Correo electrónico"];
// The export writes the phone column header with a trailing space.
const PHONE_KEYS: &[&str] = &["phone", "Numero ", "Numero"];
const GROUP_KEYS: &[&str] = &["customer_group", "Grupo de clientes"];
const ZONE_KEYS: &[&str] = &["zone", "ZONA"];
const SIGNUP_KEYS: &[&str] = &["signup_date", "Fecha de alta"];

/// Normalize one raw record into a canonical [`Customer`].
///
/// Never fails: a non-object value produces the all-default customer, and any
/// missing or ill-typed field falls back to its default.
#[must_use]
pub fn normalize_record(raw: &Value) -> Customer {
    Customer {
        full_name: text(raw, FULL_NAME_KEYS),
        email: text(raw, EMAIL_KEYS),
        phone: loose_text(raw, PHONE_KEYS),
        group: text(raw, GROUP_KEYS),
        zone: text(raw, ZONE_KEYS).trim().to_string(),
        signup: signup(raw, SIGNUP_KEYS),
    }
}

/// Normalize a whole raw collection, preserving input order.
#[must_use]
pub fn normalize_all(raw: &[Value]) -> Vec<Customer> {
    raw.iter().map(normalize_record).collect()
}

fn lookup<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = raw.as_object()?;
    keys.iter().find_map(|key| object.get(*key))
}

/// String fields: only JSON strings count, anything else is empty.
fn text(raw: &Value, keys: &[&str]) -> String {
    lookup(raw, keys)
        .and_then(Value::as_str)
        .map_or_else(String::new, str::to_string)
}

/// Phone numbers sometimes arrive as JSON numbers; render those as text.
fn loose_text(raw: &Value, keys: &[&str]) -> String {
    match lookup(raw, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn signup(raw: &Value, keys: &[&str]) -> SignupDate {
    lookup(raw, keys)
        .and_then(Value::as_str)
        .map_or(SignupDate::Unknown, SignupDate::parse)
}
