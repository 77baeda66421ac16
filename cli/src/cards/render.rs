//! # Card Renderer
//!
//! File: cli/src/cards/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns one tool payload into a `Card`: a structured, surface-independent
//! description of what to show. The terminal sink and the HTML templates both
//! consume the same `Card` values.
//!
//! ## Architecture
//!
//! 1. `shape::classify` picks the card shape from the payload's fields.
//! 2. A per-shape builder reads the fields it knows about and applies the
//!    fallback texts. Fields outside a shape's fixed list are dropped.
//! 3. Anything unrecognised becomes a `GenericCard`: the payload flattened into
//!    `key: value` rows, with one depth level per nested object or array.
//!
//! Rendering is pure: the same payload always produces an equal `Card`.
//!
use super::shape::{self, classify, fields, lookup, truthy_text, CardShape};
use super::weather::{parse_weather, weather_icon};
use serde::Serialize;
use serde_json::{Map, Value};

/// One classified, formatted tool payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Card {
    Subscriber(SubscriberCard),
    InvoiceList(InvoiceListCard),
    IncidentList(IncidentListCard),
    Weather(WeatherCard),
    Generic(GenericCard),
}

impl Card {
    pub fn shape(&self) -> CardShape {
        match self {
            Card::Subscriber(_) => CardShape::Subscriber,
            Card::InvoiceList(_) => CardShape::InvoiceList,
            Card::IncidentList(_) => CardShape::IncidentList,
            Card::Weather(_) => CardShape::Weather,
            Card::Generic(_) => CardShape::Generic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardField {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriberCard {
    pub name: Option<String>,
    pub fields: Vec<CardField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub id: String,
    pub date: String,
    pub status: String,
    pub status_class: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListCard {
    pub count: usize,
    pub invoices: Vec<InvoiceLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentLine {
    pub location: String,
    pub description: String,
    pub status: String,
    pub status_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentListCard {
    pub count: usize,
    pub incidents: Vec<IncidentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCard {
    pub city: Option<String>,
    pub temperature: Option<String>,
    pub description: Option<String>,
    pub icon: &'static str,
}

/// A row of the generic key/value tree. `value` is `None` when the rows that
/// follow at `depth + 1` hold this key's nested content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub depth: usize,
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericCard {
    pub rows: Vec<TreeRow>,
}

// --- Fixed field list for subscriber cards, in display order ---
const SUBSCRIBER_FIELDS: [(&[&str], &str, &str); 5] = [
    (fields::IDENTITY_NUMBER, "🆔", "ID"),
    (fields::ADDRESS, "📍", "Address"),
    (fields::EMAIL, "📧", "Email"),
    (fields::PHONE, "📞", "Phone"),
    (fields::POLICY_NUMBER, "📋", "Policy"),
];

const MISSING_ID: &str = "N/A";
const MISSING_DATE: &str = "No date";
const MISSING_STATUS: &str = "No status";
const MISSING_AMOUNT: &str = "0.00";
const MISSING_LOCATION: &str = "Location not specified";
const MISSING_DESCRIPTION: &str = "No description.";

/// # Render Tool Payload (`render`)
///
/// Classifies `data` and builds the matching card.
pub fn render(data: &Value) -> Card {
    let empty = Map::new();
    let object = data.as_object().unwrap_or(&empty);
    match classify(data) {
        CardShape::Subscriber => Card::Subscriber(subscriber_card(object)),
        CardShape::InvoiceList => {
            Card::InvoiceList(invoice_list_card(items(object, fields::INVOICES)))
        }
        CardShape::IncidentList => {
            Card::IncidentList(incident_list_card(items(object, fields::INCIDENTS)))
        }
        CardShape::Weather => Card::Weather(weather_card(lookup(object, fields::WEATHER))),
        CardShape::Generic => Card::Generic(generic_card(data)),
    }
}

fn items<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> &'a [Value] {
    lookup(object, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn subscriber_card(object: &Map<String, Value>) -> SubscriberCard {
    let shown = SUBSCRIBER_FIELDS
        .iter()
        .filter_map(|&(keys, icon, label)| {
            truthy_text(object, keys).map(|value| CardField { icon, label, value })
        })
        .collect();
    SubscriberCard {
        name: truthy_text(object, fields::NAME),
        fields: shown,
    }
}

fn invoice_list_card(invoices: &[Value]) -> InvoiceListCard {
    let empty = Map::new();
    let invoices: Vec<InvoiceLine> = invoices
        .iter()
        .map(|invoice| {
            let invoice = invoice.as_object().unwrap_or(&empty);
            let status = truthy_text(invoice, fields::STATUS);
            InvoiceLine {
                id: truthy_text(invoice, fields::ID).unwrap_or_else(|| MISSING_ID.to_string()),
                date: truthy_text(invoice, fields::DATE)
                    .unwrap_or_else(|| MISSING_DATE.to_string()),
                status_class: status_class(status.as_deref()),
                status: status.unwrap_or_else(|| MISSING_STATUS.to_string()),
                amount: format_amount(lookup(invoice, fields::AMOUNT)),
            }
        })
        .collect();
    InvoiceListCard {
        count: invoices.len(),
        invoices,
    }
}

fn incident_list_card(incidents: &[Value]) -> IncidentListCard {
    let empty = Map::new();
    let incidents: Vec<IncidentLine> = incidents
        .iter()
        .map(|incident| {
            let incident = incident.as_object().unwrap_or(&empty);
            let status = truthy_text(incident, fields::STATUS);
            IncidentLine {
                location: truthy_text(incident, fields::LOCATION)
                    .unwrap_or_else(|| MISSING_LOCATION.to_string()),
                description: truthy_text(incident, fields::DESCRIPTION)
                    .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
                status_class: status_class(status.as_deref()),
                status: status.unwrap_or_else(|| MISSING_STATUS.to_string()),
            }
        })
        .collect();
    IncidentListCard {
        count: incidents.len(),
        incidents,
    }
}

fn weather_card(sentence: Option<&Value>) -> WeatherCard {
    let report = sentence
        .and_then(Value::as_str)
        .map(parse_weather)
        .unwrap_or_default();
    let icon = report
        .description
        .as_deref()
        .map(weather_icon)
        .unwrap_or(super::weather::DEFAULT_WEATHER_ICON);
    WeatherCard {
        city: report.city,
        temperature: report.temperature,
        description: report.description,
        icon,
    }
}

/// CSS class for a status badge: `status-<lowercased>` or `status-unknown`.
pub fn status_class(status: Option<&str>) -> String {
    match status {
        Some(s) if !s.is_empty() => format!("status-{}", s.to_lowercase()),
        _ => "status-unknown".to_string(),
    }
}

/// Euro amount: numbers with two decimals, text as given, falsy as `0.00`.
fn format_amount(amount: Option<&Value>) -> String {
    let text = match amount.filter(|value| shape::is_truthy(value)) {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|f| format!("{:.2}", f))
            .unwrap_or_else(|| n.to_string()),
        Some(other) => shape::display_text(other),
        None => MISSING_AMOUNT.to_string(),
    };
    format!("€{}", text)
}

fn generic_card(data: &Value) -> GenericCard {
    let mut rows = Vec::new();
    match data {
        Value::Object(_) | Value::Array(_) => flatten_into(data, 0, &mut rows),
        Value::Null => {}
        primitive => rows.push(TreeRow {
            depth: 0,
            key: "value".to_string(),
            value: Some(primitive.to_string()),
        }),
    }
    GenericCard { rows }
}

fn flatten_into(container: &Value, depth: usize, rows: &mut Vec<TreeRow>) {
    let entries: Vec<(String, &Value)> = match container {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(list) => list
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("[{}]", i), v))
            .collect(),
        _ => return,
    };
    for (key, value) in entries {
        match value {
            Value::Object(_) | Value::Array(_) => {
                rows.push(TreeRow {
                    depth,
                    key,
                    value: None,
                });
                flatten_into(value, depth + 1, rows);
            }
            primitive => rows.push(TreeRow {
                depth,
                key,
                value: Some(primitive.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscriber_card_keeps_fixed_field_order() {
        let data = json!({
            "telefono": "600111222",
            "nombre": "Ana García",
            "dni": "12345678Z",
            "correo": "",
            "plan": "Fibra 600",
            "poliza": "POL-9"
        });
        let Card::Subscriber(card) = render(&data) else {
            panic!("expected subscriber card");
        };
        assert_eq!(card.name.as_deref(), Some("Ana García"));
        let labels: Vec<&str> = card.fields.iter().map(|f| f.label).collect();
        // Empty email is skipped and the unlisted "plan" field is dropped.
        assert_eq!(labels, vec!["ID", "Phone", "Policy"]);
        assert_eq!(card.fields[0].value, "12345678Z");
        assert_eq!(card.fields[0].icon, "🆔");
    }

    #[test]
    fn test_subscriber_without_name_has_no_title() {
        let Card::Subscriber(card) = render(&json!({ "direccion": "Calle Mayor 1" })) else {
            panic!("expected subscriber card");
        };
        assert_eq!(card.name, None);
        assert_eq!(card.fields.len(), 1);
        assert_eq!(card.fields[0].label, "Address");
    }

    #[test]
    fn test_invoice_lines_and_fallbacks() {
        let data = json!({
            "facturas": [
                { "identificador": "F-2024-01", "fecha": "2024-01-31", "estado": "Pagado", "importe": 42.5 },
                {}
            ]
        });
        let Card::InvoiceList(card) = render(&data) else {
            panic!("expected invoice card");
        };
        assert_eq!(card.count, 2);
        let paid = &card.invoices[0];
        assert_eq!(paid.id, "F-2024-01");
        assert_eq!(paid.status_class, "status-pagado");
        assert_eq!(paid.amount, "€42.50");

        let blank = &card.invoices[1];
        assert_eq!(blank.id, "N/A");
        assert_eq!(blank.date, "No date");
        assert_eq!(blank.status, "No status");
        assert_eq!(blank.status_class, "status-unknown");
        assert_eq!(blank.amount, "€0.00");
    }

    #[test]
    fn test_status_class_is_lowercased() {
        assert_eq!(status_class(Some("PENDIENTE")), "status-pendiente");
        assert_eq!(status_class(Some("")), "status-unknown");
        assert_eq!(status_class(None), "status-unknown");
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(format_amount(Some(&json!("19,99"))), "€19,99");
        assert_eq!(format_amount(Some(&json!(7))), "€7.00");
        assert_eq!(format_amount(Some(&json!(0))), "€0.00");
        assert_eq!(format_amount(None), "€0.00");
    }

    #[test]
    fn test_incident_lines() {
        let data = json!({
            "incidencias": [
                { "ubicacion": "Sevilla", "descripcion": "Corte de fibra", "estado": "Abierta" },
                { "estado": null }
            ]
        });
        let Card::IncidentList(card) = render(&data) else {
            panic!("expected incident card");
        };
        assert_eq!(card.count, 2);
        assert_eq!(card.incidents[0].status_class, "status-abierta");
        assert_eq!(card.incidents[1].location, "Location not specified");
        assert_eq!(card.incidents[1].description, "No description.");
        assert_eq!(card.incidents[1].status, "No status");
        assert_eq!(card.incidents[1].status_class, "status-unknown");
    }

    #[test]
    fn test_weather_card() {
        let Card::Weather(card) = render(&json!({ "clima": "Clima: 20 grados en Madrid, soleado" }))
        else {
            panic!("expected weather card");
        };
        assert_eq!(card.temperature.as_deref(), Some("20"));
        assert_eq!(card.city.as_deref(), Some("Madrid"));
        assert_eq!(card.description.as_deref(), Some("Soleado"));
        assert_eq!(card.icon, "☀️");
    }

    #[test]
    fn test_weather_card_with_non_text_value() {
        let Card::Weather(card) = render(&json!({ "clima": { "temp": 20 } })) else {
            panic!("expected weather card");
        };
        assert_eq!(card.city, None);
        assert_eq!(card.temperature, None);
        assert_eq!(card.description, None);
    }

    #[test]
    fn test_generic_tree_indents_nested_values() {
        let data = json!({
            "detalle": { "codigo": 7, "etiquetas": ["a", { "b": null }] },
            "ok": true
        });
        let Card::Generic(card) = render(&data) else {
            panic!("expected generic card");
        };
        let rows: Vec<(usize, &str, Option<&str>)> = card
            .rows
            .iter()
            .map(|r| (r.depth, r.key.as_str(), r.value.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "detalle", None),
                (1, "codigo", Some("7")),
                (1, "etiquetas", None),
                (2, "[0]", Some("\"a\"")),
                (2, "[1]", None),
                (3, "b", Some("null")),
                (0, "ok", Some("true")),
            ]
        );
    }

    #[test]
    fn test_generic_primitive_and_null() {
        let Card::Generic(card) = render(&json!("done")) else {
            panic!("expected generic card");
        };
        assert_eq!(card.rows.len(), 1);
        assert_eq!(card.rows[0].value.as_deref(), Some("\"done\""));

        assert_eq!(render(&Value::Null), Card::Generic(GenericCard { rows: vec![] }));
    }

    #[test]
    fn test_render_is_idempotent() {
        let data = json!({ "facturas": [{ "estado": "Pendiente", "importe": "10.00" }] });
        let first = render(&data);
        let second = render(&data);
        assert_eq!(first, second);
        assert_eq!(first.shape(), CardShape::InvoiceList);
    }
}
