//! Tool records and the catalogue they form.
//!
//! The catalogue JSON is externally maintained and has drifted over time:
//! several attributes are published under a canonical key and a legacy alias.
//! [`Tool`] keeps both raw keys private and exposes one coalescing accessor
//! per attribute, so the rest of the crate never has to know about the
//! aliases.
//!
//! Apart from `slug` and `name`, nothing is trusted to be present or
//! well-typed. A value of the wrong JSON type is treated as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;

/// An audience list (`for_who` / `not_for`): either bullet points or one
/// descriptive sentence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<String>),
    Text(String),
}

/// A single catalogue entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tool {
    /// Lookup key, also used in detail-page URLs.
    pub slug: String,
    /// Display name.
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Screenshot filename, relative to the asset directory.
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub for_who: Option<ListField>,
    #[serde(default, deserialize_with = "lenient")]
    pub not_for: Option<ListField>,

    // ── Aliased keys (canonical, legacy) ──
    #[serde(default)]
    price_eur: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    youtube_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    repo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    github_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    release_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    releases_url: Option<String>,
}

impl Tool {
    /// Price in EUR, from `price_eur` or the legacy `price`.
    ///
    /// Numeric strings are accepted. Anything else (including non-finite
    /// values) counts as no price, and an unusable `price_eur` falls
    /// through to `price`.
    pub fn price(&self) -> Option<f64> {
        self.price_eur
            .as_ref()
            .and_then(as_number)
            .or_else(|| self.price.as_ref().and_then(as_number))
    }

    /// `true` when the price is absent, zero or negative.
    pub fn is_free(&self) -> bool {
        self.price().is_none_or(|p| p <= 0.0)
    }

    /// Demo video URL, from `video_url` or the legacy `youtube_url`.
    pub fn video_url(&self) -> Option<&str> {
        coalesce(&self.video_url, &self.youtube_url)
    }

    /// Source repository URL, from `repo_url` or the legacy `github_url`.
    pub fn repo_url(&self) -> Option<&str> {
        coalesce(&self.repo_url, &self.github_url)
    }

    /// Releases page URL, from `release_url` or the legacy `releases_url`.
    pub fn release_url(&self) -> Option<&str> {
        coalesce(&self.release_url, &self.releases_url)
    }

    /// Screenshot filename, if a non-blank one is set.
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }
}

/// First tool whose slug equals `slug` exactly (case-sensitive).
pub fn find_tool<'a>(tools: &'a [Tool], slug: &str) -> Option<&'a Tool> {
    tools.iter().find(|t| t.slug == slug)
}

/// Parse a catalogue body.
///
/// The body must be a JSON array. Elements that are not tool-shaped (no
/// string `slug` or `name`) are skipped with a warning; source order is
/// preserved for the rest.
pub fn parse_catalogue(body: &str) -> Result<Vec<Tool>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(FetchError::NotArray(json_kind(&other))),
    };

    let total = entries.len();
    let mut tools = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Tool>(entry) {
            Ok(tool) => tools.push(tool),
            Err(e) => warn!("skipping catalogue entry {index}: {e}"),
        }
    }
    debug!("parsed catalogue: {} of {} entries usable", tools.len(), total);
    Ok(tools)
}

fn coalesce<'a>(canonical: &'a Option<String>, legacy: &'a Option<String>) -> Option<&'a str> {
    non_blank(canonical).or_else(|| non_blank(legacy))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize an optional field, mapping wrong-typed values to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
