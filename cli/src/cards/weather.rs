//! # Weather Sentence Parsing
//!
//! File: cli/src/cards/weather.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The weather tool answers with a single sentence such as
//! `"Clima: 20 grados en Madrid, soleado"` rather than structured fields. This
//! module pulls the temperature, the city and the remaining condition text out
//! of that sentence and picks an icon for the condition.
//!
//! The lexicon covers the backend's Spanish phrasing plus the English
//! equivalents (`degrees`, `in`, `Weather:`).
//!
use regex::Regex;
use std::sync::OnceLock;

/// Shown when no condition keyword matches.
pub const DEFAULT_WEATHER_ICON: &str = "🌍";

/// Condition keywords in priority order: sunny, cloudy, rain, storm, snow.
const WEATHER_ICONS: [(&[&str], &str); 5] = [
    (&["sol", "despejado", "sunny", "clear"], "☀️"),
    (&["nube", "nublado", "cloud"], "☁️"),
    (&["lluvia", "rain"], "🌧️"),
    (&["tormenta", "storm"], "⛈️"),
    (&["nieve", "snow"], "❄️"),
];

/// Fields recovered from a weather sentence. Missing matches stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherReport {
    /// The reading as written, with a decimal comma normalised to a dot.
    pub temperature: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
}

fn temperature_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(-?\d+(?:[.,]\d+)?)\s*(?:grados|degrees)")
            .expect("temperature pattern is valid")
    })
}

fn city_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(?:en|in)\s+([a-záéíóúüñ\s]+)").expect("city pattern is valid")
    })
}

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:clima|weather)\s*:").expect("label pattern is valid")
    })
}

/// # Parse Weather Sentence (`parse_weather`)
///
/// Extracts the temperature preceding "grados"/"degrees", the city following
/// "en"/"in", and the condition: whatever is left once both matches and the
/// leading label are removed, with its first letter uppercased.
pub fn parse_weather(sentence: &str) -> WeatherReport {
    let temperature_match = temperature_pattern().captures(sentence);
    let city_match = city_pattern().captures(sentence);

    let temperature = temperature_match
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(',', "."));

    let city = city_match
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| !c.is_empty());

    let mut remainder = sentence.to_string();
    if let Some(whole) = temperature_match.as_ref().and_then(|caps| caps.get(0)) {
        remainder = remainder.replacen(whole.as_str(), "", 1);
    }
    if let Some(whole) = city_match.as_ref().and_then(|caps| caps.get(0)) {
        remainder = remainder.replacen(whole.as_str(), "", 1);
    }
    let remainder = label_pattern().replace(&remainder, "");
    let description = capitalize_first(remainder.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | '.' | ':' | '-')
    }));

    WeatherReport {
        temperature,
        city,
        description,
    }
}

/// # Pick Weather Icon (`weather_icon`)
///
/// Case-insensitive substring match against the condition keywords; the first
/// group with a hit decides.
pub fn weather_icon(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    WEATHER_ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_WEATHER_ICON)
}

fn capitalize_first(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
