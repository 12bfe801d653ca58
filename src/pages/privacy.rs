use axum::{extract::State, response::Html};
use chrono::{NaiveDate, Utc};
use horrorshow::{html, RenderOnce, Template, TemplateBuffer};
use std::sync::Arc;

use crate::config::ClinicConfig;
use crate::handlers::api::AppState;
use crate::pages::{Footer, Header, PageMeta, SitePage};

// Human-readable effective date. An unparseable configured value is
// assumed to already be display text; no value at all means today.
fn format_effective_date(config: &ClinicConfig) -> String {
    let configured = config
        .legal
        .as_ref()
        .and_then(|l| l.privacy.as_ref())
        .and_then(|p| p.effective_date.clone());

    match configured {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => raw,
        },
        None => Utc::now().format("%B %-d, %Y").to_string(),
    }
}

struct PrivacyBody {
    config: Arc<ClinicConfig>,
}

impl RenderOnce for PrivacyBody {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let effective_date = format_effective_date(&self.config);
        let address = self
            .config
            .locations
            .first()
            .map(|l| l.address.clone())
            .unwrap_or_default();
        let header = Header {
            config: Arc::clone(&self.config),
        };
        let footer = Footer {
            config: Arc::clone(&self.config),
        };
        let config = &self.config;

        tmpl << html! {
            : header;
            main(class = "legal container") {
                h1 : "Privacy Policy";
                p(class = "effective") : format!("Effective date: {}", effective_date);
                section {
                    h2 : "Information We Collect";
                    p : format!(
                        "When you request an appointment, {} collects the details you \
                         provide in the booking form, such as your name, contact \
                         information, preferred location and date, and household size.",
                        config.clinic_name
                    );
                }
                section {
                    h2 : "How We Use Your Information";
                    p : "We use the information you submit solely to schedule and \
                         provide lice-removal services, to respond to your request, and \
                         to contact you about your appointment. We do not sell your \
                         personal information.";
                }
                section {
                    h2 : "Data Sharing";
                    p : "Booking requests may be delivered through a trusted form-relay \
                         provider acting on our behalf. No other third parties receive \
                         your information except as required by law.";
                }
                section {
                    h2 : "Contact Us";
                    p {
                        : format!("{}, {}", config.clinic_name, address);
                        br;
                        : format!("Phone: {}", config.phone);
                        br;
                        : format!("Email: {}", config.email);
                    }
                }
            }
            : footer;
        }
    }
}

/// Render the privacy-policy page to an HTML string.
pub fn render_privacy(config: Arc<ClinicConfig>) -> String {
    SitePage {
        meta: PageMeta::for_privacy(&config),
        content: PrivacyBody { config },
    }
    .into_string()
    .unwrap()
}

// Privacy policy page handler
pub async fn get_privacy(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_privacy(Arc::clone(&state.config)))
}
