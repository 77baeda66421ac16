//! # Plain-Text Card Layout
//!
//! File: cli/src/common/ui/text.rs
//! Author: Christi Mahu
//!
//! Formats display items as terminal text. Cards become a tool header line
//! followed by indented body lines; generic trees indent two spaces per depth.
//!
use crate::cards::render::{
    GenericCard, IncidentListCard, InvoiceListCard, SubscriberCard, WeatherCard,
};
use crate::cards::{Card, DisplayItem, ToolCard};

const INDENT: &str = "  ";

/// # Format Display Item (`format_item`)
///
/// Returns the complete text block for one transcript entry, without a
/// trailing newline.
pub fn format_item(item: &DisplayItem) -> String {
    match item {
        DisplayItem::Text { text, .. } => text.clone(),
        DisplayItem::Card(card) => format_tool_card(card),
    }
}

fn format_tool_card(tool_card: &ToolCard) -> String {
    let mut lines = vec![format!("{} {}", tool_card.icon, tool_card.tool)];
    let body = match &tool_card.card {
        Card::Subscriber(card) => subscriber_lines(card),
        Card::InvoiceList(card) => invoice_lines(card),
        Card::IncidentList(card) => incident_lines(card),
        Card::Weather(card) => weather_lines(card),
        Card::Generic(card) => generic_lines(card),
    };
    lines.extend(body.into_iter().map(|line| format!("{}{}", INDENT, line)));
    lines.join("\n")
}

fn subscriber_lines(card: &SubscriberCard) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(name) = &card.name {
        lines.push(format!("👤 {}", name));
    }
    for field in &card.fields {
        lines.push(format!("{} {}: {}", field.icon, field.label, field.value));
    }
    lines
}

fn invoice_lines(card: &InvoiceListCard) -> Vec<String> {
    let mut lines = vec![format!("📄 Invoices ({})", card.count)];
    for invoice in &card.invoices {
        lines.push(format!(
            "# Invoice {} | 📅 {} | {} | {}",
            invoice.id, invoice.date, invoice.status, invoice.amount
        ));
    }
    lines
}

fn incident_lines(card: &IncidentListCard) -> Vec<String> {
    let mut lines = vec![format!("🚨 Incidents ({})", card.count)];
    for incident in &card.incidents {
        lines.push(format!(
            "📍 {} | {} | {}",
            incident.location, incident.description, incident.status
        ));
    }
    lines
}

fn weather_lines(card: &WeatherCard) -> Vec<String> {
    let mut lines = vec![format!(
        "🌤️ Weather in {}",
        card.city.as_deref().unwrap_or("Unknown")
    )];
    if let Some(temperature) = &card.temperature {
        lines.push(format!("🌡️ {}°C", temperature));
    }
    if let Some(description) = &card.description {
        lines.push(format!("{} {}", card.icon, description));
    }
    lines
}

fn generic_lines(card: &GenericCard) -> Vec<String> {
    card.rows
        .iter()
        .map(|row| {
            let indent = INDENT.repeat(row.depth);
            match &row.value {
                Some(value) => format!("{}{}: {}", indent, row.key, value),
                None => format!("{}{}:", indent, row.key),
            }
        })
        .collect()
}
