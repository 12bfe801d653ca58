use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{ClinicConfig, FormField};
use crate::models::booking::{BookingPayload, SubmissionEnvelope, SubmissionMeta};
use crate::target::{SubmissionTarget, TransportError};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Appointment request sent! We'll be in touch soon.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Fire-and-forget notification channel for submission outcomes.
///
/// The web handler plugs in a collector that turns these into the JSON
/// response the page renders as a toast.
// Send + Sync so submit futures holding a notifier can run on the
// multi-threaded runtime.
#[cfg_attr(test, mockall::automock)]
pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Errors terminal for one submit attempt. None of these crash the
/// service; the form is always left editable.
#[derive(Debug)]
pub enum BookingError {
    /// One or more required fields were empty at submit time. The
    /// submission target was never contacted.
    Validation { missing: Vec<FormField> },
    /// The submission target could not be reached or rejected the payload.
    /// Field values are preserved so the visitor can resubmit.
    Transport(TransportError),
    /// A value was supplied for a field the configuration does not enable.
    FieldNotEnabled(FormField),
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingError::Validation { missing } => {
                let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
                write!(f, "missing required fields: {}", names.join(", "))
            }
            BookingError::Transport(e) => write!(f, "submission failed: {}", e),
            BookingError::FieldNotEnabled(field) => {
                write!(f, "field '{}' is not enabled for this form", field)
            }
        }
    }
}

impl std::error::Error for BookingError {}

/// Compute the required-field set from configuration.
///
/// A field is required when it is enabled, is not `notes`, and, for
/// `location`, only when the deployment both demands a location and has
/// areas to choose from. Order follows the configured field order.
pub fn required_fields(config: &ClinicConfig) -> Vec<FormField> {
    let form = &config.booking_form;
    form.fields
        .iter()
        .copied()
        .filter(|field| match field {
            FormField::Notes => false,
            FormField::Location => form.requires_location && !config.areas_served.is_empty(),
            _ => true,
        })
        .collect()
}

/// State for one booking form: current field values plus the in-flight
/// guard. Lives for a single submit attempt on the server side; the same
/// contract drives the in-page form script.
pub struct BookingForm {
    config: Arc<ClinicConfig>,
    values: HashMap<FormField, String>,
    submitting: bool,
}

impl BookingForm {
    pub fn new(config: Arc<ClinicConfig>) -> Self {
        let values = config
            .booking_form
            .fields
            .iter()
            .map(|&field| (field, String::new()))
            .collect();

        Self {
            config,
            values,
            submitting: false,
        }
    }

    /// Update one field. No validation happens here; that is submit's job.
    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), BookingError> {
        if !self.config.booking_form.fields.contains(&field) {
            return Err(BookingError::FieldNotEnabled(field));
        }
        self.values.insert(field, value.into());
        Ok(())
    }

    /// Current value of a field, empty string if enabled but unset.
    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[cfg(test)]
    pub(crate) fn force_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Validate, build the payload, and dispatch it to the target.
    ///
    /// A no-op while a submission is already in flight. On success all
    /// field values reset to empty; on any failure they are preserved for
    /// a manual resubmit. The outcome is always reported through the
    /// notifier before this returns.
    pub async fn submit(
        &mut self,
        target: &SubmissionTarget,
        notifier: &dyn Notify,
        meta: &SubmissionMeta,
    ) -> Result<(), BookingError> {
        if self.submitting {
            warn!("Ignoring submit while a submission is already in flight");
            return Ok(());
        }

        // Whitespace-only input never satisfies a required field.
        for value in self.values.values_mut() {
            *value = value.trim().to_string();
        }

        let missing: Vec<FormField> = required_fields(&self.config)
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .collect();

        if !missing.is_empty() {
            let error = BookingError::Validation { missing };
            info!("Rejected booking submission: {}", error);
            notifier.failure(&error.to_string());
            return Err(error);
        }

        self.submitting = true;
        let envelope = self.build_envelope(meta);

        debug!(
            "Dispatching booking submission from '{}'",
            envelope.from_name
        );
        let result = target.submit(&envelope).await;
        self.submitting = false;

        match result {
            Ok(ack) => {
                info!("Booking submission delivered");
                for value in self.values.values_mut() {
                    value.clear();
                }
                let message = ack.message.as_deref().unwrap_or(DEFAULT_SUCCESS_MESSAGE);
                notifier.success(message);
                Ok(())
            }
            Err(err) => {
                let message = if err.message.is_empty() {
                    DEFAULT_FAILURE_MESSAGE.to_string()
                } else {
                    err.message.clone()
                };
                notifier.failure(&message);
                Err(BookingError::Transport(err))
            }
        }
    }

    // Assemble the outgoing payload from the current (already trimmed)
    // field values, adding the derived routing fields.
    fn build_envelope(&self, meta: &SubmissionMeta) -> SubmissionEnvelope {
        let enabled = |field: FormField| -> Option<String> {
            let value = self.value(field);
            if self.config.booking_form.fields.contains(&field) && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        };

        // Coercion failure means no numeric value is sent at all.
        let household_size = enabled(FormField::HouseholdSize).and_then(|v| v.parse::<u32>().ok());

        let payload = BookingPayload {
            first_name: enabled(FormField::FirstName),
            last_name: enabled(FormField::LastName),
            email: enabled(FormField::Email),
            phone: enabled(FormField::Phone),
            location: enabled(FormField::Location),
            date: enabled(FormField::Date),
            household_size,
            notes: enabled(FormField::Notes),
            submitted_at: Utc::now().to_rfc3339(),
        };

        let display_name = format!(
            "{} {}",
            self.value(FormField::FirstName),
            self.value(FormField::LastName)
        )
        .trim()
        .to_string();

        let from_name = if display_name.is_empty() {
            self.config.clinic_name.clone()
        } else {
            display_name
        };

        SubmissionEnvelope {
            reply_to: payload.email.clone(),
            from_name,
            subject: format!("New Booking - {}", self.config.clinic_name),
            page: meta.page.clone(),
            user_agent: meta.user_agent.clone(),
            payload,
        }
    }
}
