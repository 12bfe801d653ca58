use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// The closed set of booking-form field names.
///
/// Configuration naming any field outside this enumeration fails to parse,
/// which makes a bad deployment a startup error rather than a runtime one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Location,
    Date,
    HouseholdSize,
    Notes,
}

impl FormField {
    /// Wire/JSON name for this field (camelCase, matching the form payload).
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Location => "location",
            FormField::Date => "date",
            FormField::HouseholdSize => "householdSize",
            FormField::Notes => "notes",
        }
    }

    /// Placeholder text shown in the rendered form input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email Address",
            FormField::Phone => "Mobile Number",
            FormField::Location => "Select Area",
            FormField::Date => "Preferred Date",
            FormField::HouseholdSize => "Number of household members?",
            FormField::Notes => "Additional Notes",
        }
    }

    /// HTML input type for the rendered form.
    pub fn input_type(&self) -> &'static str {
        match self {
            FormField::Email => "email",
            FormField::Phone => "tel",
            FormField::Date => "date",
            FormField::HouseholdSize => "number",
            _ => "text",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormConfig {
    /// Ordered list of fields to render; fields absent here do not exist
    /// for this deployment.
    pub fields: Vec<FormField>,
    /// Leave blank to route submissions through the form relay.
    #[serde(default)]
    pub submit_url: String,
    #[serde(default)]
    pub requires_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicLocation {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroStats {
    pub years_in_business: u32,
    pub patients_helped: u64,
    #[serde(default)]
    pub custom_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub google: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMembership {
    pub is_verified: bool,
    pub network_name: String,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub member_since: Option<u32>,
    #[serde(default)]
    pub certification_level: Option<String>,
    pub show_badge: bool,
    pub show_stats: bool,
    pub local_area: String,
    pub certification_blurb: String,
    #[serde(default)]
    pub badge_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyConfig {
    #[serde(default)]
    pub effective_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegalConfig {
    #[serde(default)]
    pub privacy: Option<PrivacyConfig>,
}

/// Static configuration for one clinic deployment.
///
/// Everything the site renders and everything the booking form does is
/// driven by this record. It is loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicConfig {
    pub clinic_name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub main_area: Option<String>,
    #[serde(default)]
    pub areas_served: Vec<String>,
    pub locations: Vec<ClinicLocation>,
    pub hero_stats: HeroStats,
    pub booking_form: BookingFormConfig,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub network_membership: Option<NetworkMembership>,
    #[serde(default)]
    pub legal: Option<LegalConfig>,
}

impl ClinicConfig {
    /// Whether the location field should be rendered at all. An empty
    /// areas-served list disables it regardless of `requires_location`.
    pub fn location_enabled(&self) -> bool {
        self.booking_form.fields.contains(&FormField::Location) && !self.areas_served.is_empty()
    }

    /// Main area name used in page titles, falling back to the first
    /// configured location.
    pub fn main_area_or_default(&self) -> &str {
        self.main_area
            .as_deref()
            .or_else(|| self.locations.first().map(|l| l.name.as_str()))
            .unwrap_or("You")
    }
}

// Errors produced while loading configuration. These are fatal at startup
// and never surface to site visitors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read clinic config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse clinic config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Load the clinic configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinicConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let config: ClinicConfig = serde_json::from_str(&raw)?;

    info!(
        "Loaded clinic config for '{}' from {} ({} form fields)",
        config.clinic_name,
        path.display(),
        config.booking_form.fields.len()
    );

    Ok(config)
}

/// Resolve the config file path from the environment, defaulting to
/// `clinic.json` in the working directory.
pub fn config_path_from_env() -> String {
    env::var("CLINIC_CONFIG").unwrap_or_else(|_| "clinic.json".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "clinicName": "Lice Treatment Center",
            "phone": "(555) 123-4567",
            "email": "info@licetreatment.com",
            "mainArea": "Downtown",
            "areasServed": ["Downtown", "Northside"],
            "locations": [
                { "name": "Main Location", "address": "123 Main Street" }
            ],
            "heroStats": { "yearsInBusiness": 8, "patientsHelped": 400000 },
            "bookingForm": {
                "fields": ["firstName", "lastName", "email", "location"],
                "submitUrl": "",
                "requiresLocation": true
            }
        }"#
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.clinic_name, "Lice Treatment Center");
        assert_eq!(config.booking_form.fields.len(), 4);
        assert!(config.booking_form.submit_url.is_empty());
        assert!(config.booking_form.requires_location);
        assert_eq!(config.areas_served, vec!["Downtown", "Northside"]);
    }

    #[test]
    fn test_unknown_field_name_is_rejected() {
        let raw = sample_json().replace("\"lastName\"", "\"ssn\"");
        let result: Result<ClinicConfig, _> = serde_json::from_str(&raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("/nonexistent/clinic.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_location_enabled_requires_areas() {
        let mut config: ClinicConfig = serde_json::from_str(sample_json()).unwrap();
        assert!(config.location_enabled());

        config.areas_served.clear();
        assert!(!config.location_enabled());
    }

    #[test]
    fn test_optional_sections_default() {
        let config: ClinicConfig = serde_json::from_str(sample_json()).unwrap();
        assert!(config.network_membership.is_none());
        assert!(config.social_links.is_none());
        assert!(config.legal.is_none());
        assert!(config.logo.is_none());
    }
}
