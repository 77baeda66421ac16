//! # Card Shape Classification
//!
//! File: cli/src/cards/shape.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The chat backend sends tool payloads without any type discriminator. This
//! module decides which card template a payload gets by looking at which
//! fields it carries.
//!
//! ## Architecture
//!
//! - `fields`: Accepted keys for every logical field. The backend answers with
//!   Spanish keys (`nombre`, `facturas`, ...); English aliases are accepted too.
//! - `CLASSIFICATION_ORDER`: An ordered list of `(CardShape, predicate)` pairs.
//!   Shapes are not mutually exclusive, so the first matching predicate wins.
//! - Small value helpers (`lookup`, `is_truthy`, `display_text`) shared with the
//!   renderer.
//!
use serde::Serialize;
use serde_json::{Map, Value};

/// Accepted JSON keys for each logical field, backend key first.
pub mod fields {
    pub const NAME: &[&str] = &["nombre", "name"];
    pub const IDENTITY_NUMBER: &[&str] = &["dni", "identity_number"];
    pub const ADDRESS: &[&str] = &["direccion", "address"];
    pub const EMAIL: &[&str] = &["correo", "email"];
    pub const PHONE: &[&str] = &["telefono", "phone"];
    pub const POLICY_NUMBER: &[&str] = &["poliza", "policy_number"];

    pub const INVOICES: &[&str] = &["facturas", "invoices"];
    pub const INCIDENTS: &[&str] = &["incidencias", "incidents"];
    pub const WEATHER: &[&str] = &["clima", "weather"];

    pub const ID: &[&str] = &["identificador", "id"];
    pub const DATE: &[&str] = &["fecha", "date"];
    pub const STATUS: &[&str] = &["estado", "status"];
    pub const AMOUNT: &[&str] = &["importe", "amount"];

    pub const LOCATION: &[&str] = &["ubicacion", "location"];
    pub const DESCRIPTION: &[&str] = &["descripcion", "description"];
}

/// The card template chosen for a tool payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardShape {
    Subscriber,
    InvoiceList,
    IncidentList,
    Weather,
    Generic,
}

type ShapePredicate = fn(&Map<String, Value>) -> bool;

/// Evaluated top to bottom; `Generic` is the fallback when nothing matches.
pub const CLASSIFICATION_ORDER: [(CardShape, ShapePredicate); 4] = [
    (CardShape::Subscriber, is_subscriber),
    (CardShape::InvoiceList, is_invoice_list),
    (CardShape::IncidentList, is_incident_list),
    (CardShape::Weather, is_weather),
];

/// # Classify Payload (`classify`)
///
/// Returns the shape of the first predicate in `CLASSIFICATION_ORDER` that
/// accepts `data`. Anything that is not a JSON object is `Generic`.
pub fn classify(data: &Value) -> CardShape {
    let Some(object) = data.as_object() else {
        return CardShape::Generic;
    };
    CLASSIFICATION_ORDER
        .iter()
        .find(|(_, matches)| matches(object))
        .map(|(shape, _)| *shape)
        .unwrap_or(CardShape::Generic)
}

fn is_subscriber(object: &Map<String, Value>) -> bool {
    [fields::NAME, fields::IDENTITY_NUMBER, fields::ADDRESS]
        .iter()
        .any(|keys| lookup(object, keys).is_some_and(is_truthy))
}

fn is_invoice_list(object: &Map<String, Value>) -> bool {
    lookup(object, fields::INVOICES).is_some_and(Value::is_array)
}

fn is_incident_list(object: &Map<String, Value>) -> bool {
    lookup(object, fields::INCIDENTS).is_some_and(Value::is_array)
}

// Presence decides, so `"clima": ""` and `"clima": null` are weather too.
fn is_weather(object: &Map<String, Value>) -> bool {
    has_any(object, fields::WEATHER)
}

/// First value stored under any of `keys`, in key order.
pub fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

pub fn has_any(object: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().any(|key| object.contains_key(*key))
}

/// JavaScript-style truthiness: null, false, 0, NaN and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings are shown without quotes; everything else as its JSON literal.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthy value under `keys` as display text.
pub fn truthy_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    lookup(object, keys)
        .filter(|value| is_truthy(value))
        .map(display_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscriber_wins_over_invoices() {
        let data = json!({
            "nombre": "Ana García",
            "facturas": [{ "identificador": "F-1" }]
        });
        assert_eq!(classify(&data), CardShape::Subscriber);
    }

    #[test]
    fn test_each_shape_is_reachable() {
        assert_eq!(classify(&json!({ "dni": "12345678Z" })), CardShape::Subscriber);
        assert_eq!(classify(&json!({ "address": "Calle Mayor 1" })), CardShape::Subscriber);
        assert_eq!(classify(&json!({ "facturas": [] })), CardShape::InvoiceList);
        assert_eq!(classify(&json!({ "incidencias": [] })), CardShape::IncidentList);
        assert_eq!(classify(&json!({ "clima": "Clima: 20 grados" })), CardShape::Weather);
        assert_eq!(classify(&json!({ "total": 3 })), CardShape::Generic);
    }

    #[test]
    fn test_invoices_before_incidents() {
        let data = json!({ "facturas": [], "incidencias": [] });
        assert_eq!(classify(&data), CardShape::InvoiceList);
    }

    #[test]
    fn test_non_array_lists_fall_through() {
        assert_eq!(classify(&json!({ "facturas": "none" })), CardShape::Generic);
        assert_eq!(
            classify(&json!({ "facturas": {}, "incidencias": [] })),
            CardShape::IncidentList
        );
    }

    #[test]
    fn test_weather_matches_on_presence() {
        assert_eq!(classify(&json!({ "clima": "" })), CardShape::Weather);
        assert_eq!(classify(&json!({ "weather": null })), CardShape::Weather);
    }

    #[test]
    fn test_falsy_subscriber_fields_do_not_match() {
        let data = json!({ "nombre": "", "dni": null, "clima": "soleado" });
        assert_eq!(classify(&data), CardShape::Weather);
    }

    #[test]
    fn test_non_objects_are_generic() {
        assert_eq!(classify(&json!([1, 2, 3])), CardShape::Generic);
        assert_eq!(classify(&json!("done")), CardShape::Generic);
        assert_eq!(classify(&Value::Null), CardShape::Generic);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(1.5)));
    }
}
