use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::streak::{StreakSummary, parse_streak};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "string_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub photo: String,
    #[serde(default = "missing_stat", deserialize_with = "de_stat")]
    pub goals: f64,
    #[serde(default = "missing_stat", deserialize_with = "de_stat")]
    pub motm: f64,
    #[serde(
        rename = "cleanSheets",
        default = "missing_stat",
        deserialize_with = "de_stat"
    )]
    pub clean_sheets: f64,
    #[serde(default, deserialize_with = "string_or_default")]
    pub streak: String,
}

impl Player {
    pub fn streak_summary(&self) -> StreakSummary {
        parse_streak(&self.streak)
    }
}

pub fn parse_players_json(raw: &str) -> Result<Vec<Player>> {
    serde_json::from_str::<Vec<Player>>(raw).context("invalid players json")
}

/// Coerces a loosely typed JSON stat into a number. Never fails; values that
/// do not read as a number become `NaN`.
pub fn coerce_stat(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_stat_str(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn coerce_stat_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix_digits(digits, radix);
        }
    }
    // Rust accepts "inf"/"nan" spellings that are not numbers here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Digits only, no sign; wide values keep their magnitude as an `f64`.
fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return f64::NAN;
        };
        acc = acc * radix as f64 + d as f64;
    }
    acc
}

fn missing_stat() -> f64 {
    f64::NAN
}

fn de_stat<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_stat(&value))
}

fn string_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rendered = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(rendered)
}

pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}
