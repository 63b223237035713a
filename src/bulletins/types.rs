//! Wire types for the circulars endpoint
//!
//! Field names follow what the backend actually emits (`serial_no`,
//! `pdf_link`, `debug_info.fallback_data`, ...). The camelCase names are
//! accepted as aliases so other producers of the same envelope also parse.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::FetchError;

/// Placeholder shown when a bulletin carries no order number
pub const NOT_AVAILABLE: &str = "N/A";

/// Message used when a failed response carries no error text
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch circulars";

/// One published circular
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    /// Display identifier, unique within one response
    #[serde(rename = "serial_no", alias = "serialNumber")]
    pub serial_number: u32,
    /// Publication date, ideally ISO-8601 but not guaranteed
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "order_no", alias = "orderNumber", default)]
    pub order_number: Option<String>,
    /// Untrusted free text
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    /// Link to the source document, possibly percent-encoded
    #[serde(
        rename = "pdf_link",
        alias = "documentLink",
        default,
        deserialize_with = "null_as_default"
    )]
    pub document_link: String,
}

impl Bulletin {
    /// Order number, or `N/A` when missing or blank
    pub fn order_label(&self) -> &str {
        self.order_number
            .as_deref()
            .map(str::trim)
            .filter(|order| !order.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Diagnostics block attached by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Set when the backend substituted sample data for the live source
    #[serde(rename = "fallback_data", alias = "usedFallbackData", default)]
    pub used_fallback_data: Option<bool>,
}

/// Response envelope returned by the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "success", alias = "ok", default)]
    pub ok: bool,
    #[serde(
        rename = "circulars",
        alias = "bulletins",
        default,
        deserialize_with = "skip_malformed_items"
    )]
    pub bulletins: Vec<Bulletin>,
    #[serde(rename = "error", alias = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(rename = "debug_info", alias = "diagnostics", default)]
    pub diagnostics: Option<Diagnostics>,
}

/// Bulletins extracted from a usable response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedBulletins {
    pub bulletins: Vec<Bulletin>,
    /// The backend served sample data instead of live data
    pub used_fallback: bool,
}

impl ResponseEnvelope {
    /// A response is usable when it reports success or still carries data.
    ///
    /// `ok: false` with a non-empty list is rendered like a success; only the
    /// fallback diagnostic adds a warning.
    pub fn is_usable(&self) -> bool {
        self.ok || !self.bulletins.is_empty()
    }

    pub fn used_fallback(&self) -> bool {
        self.diagnostics
            .as_ref()
            .and_then(|d| d.used_fallback_data)
            .unwrap_or(false)
    }

    /// Split the envelope into usable data or an upstream error
    pub fn classify(self) -> Result<FetchedBulletins, FetchError> {
        if self.is_usable() {
            let used_fallback = self.used_fallback();
            return Ok(FetchedBulletins {
                bulletins: self.bulletins,
                used_fallback,
            });
        }

        let message = self
            .error_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
        Err(FetchError::Upstream(message))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Items that do not decode are dropped so one bad row cannot sink the list
fn skip_malformed_items<'de, D>(deserializer: D) -> Result<Vec<Bulletin>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Bulletin>(item) {
            Ok(bulletin) => Some(bulletin),
            Err(e) => {
                tracing::warn!(index, "Skipping malformed circular: {}", e);
                None
            }
        })
        .collect())
}
