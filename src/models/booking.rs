use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::FormField;

// Deserialize householdSize leniently: browsers send it as a string, API
// clients tend to send a number. Anything else is treated as absent.
fn de_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Raw booking submission as posted by the form.
///
/// Every field is optional at the wire level; which ones must actually be
/// present is decided by the configured required-field set, not by serde.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "de_string_or_number")]
    pub household_size: Option<String>,
    pub notes: Option<String>,
    /// Honeypot input rendered invisibly in the form; real visitors leave
    /// it empty.
    pub botcheck: Option<String>,
}

impl BookingRequest {
    /// Flatten into (field, value) pairs for the fields that were sent.
    pub fn into_fields(self) -> Vec<(FormField, String)> {
        let pairs = [
            (FormField::FirstName, self.first_name),
            (FormField::LastName, self.last_name),
            (FormField::Email, self.email),
            (FormField::Phone, self.phone),
            (FormField::Location, self.location),
            (FormField::Date, self.date),
            (FormField::HouseholdSize, self.household_size),
            (FormField::Notes, self.notes),
        ];

        pairs
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

/// Outgoing booking payload, shared by both submission targets.
///
/// Only fields enabled in the configuration are ever populated; absent
/// fields are omitted from the serialized JSON entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub submitted_at: String,
}

/// Request-scoped context captured from the submitting page.
#[derive(Debug, Clone, Default)]
pub struct SubmissionMeta {
    pub page: Option<String>,
    pub user_agent: Option<String>,
}

/// A payload plus the derived email-routing fields the relay target needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionEnvelope {
    pub payload: BookingPayload,
    /// Copy of the submitter's email so replies go to them.
    pub reply_to: Option<String>,
    /// Readable sender name, "first last" or the clinic name as fallback.
    pub from_name: String,
    pub subject: String,
    pub page: Option<String>,
    pub user_agent: Option<String>,
}

/// Response body for the booking endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}
