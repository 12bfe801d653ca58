use axum::{extract::State, response::Html};
use horrorshow::{html, Raw, RenderOnce, Template, TemplateBuffer};
use std::sync::Arc;

use crate::config::{ClinicConfig, FormField};
use crate::handlers::api::AppState;
use crate::pages::{Footer, Header, PageMeta, SitePage};
use crate::services::booking::required_fields;

// Posts the form as JSON and renders the outcome as a toast. The submit
// button stays disabled while a submission is in flight, and the fields
// only reset on success.
const FORM_SCRIPT: &str = r#"
const form = document.getElementById('booking-form');
const button = document.getElementById('booking-submit');
const toast = document.getElementById('booking-toast');
form.addEventListener('submit', async (event) => {
	event.preventDefault();
	if (button.disabled) return;
	button.disabled = true;
	button.textContent = 'Submitting...';
	const data = {};
	new FormData(form).forEach((value, key) => {
		if (value !== '') data[key] = value;
	});
	try {
		const response = await fetch('/api/booking', {
			method: 'POST',
			headers: { 'Content-Type': 'application/json' },
			body: JSON.stringify(data)
		});
		const body = await response.json();
		toast.textContent = body.message;
		toast.className = body.success ? 'toast success' : 'toast error';
		if (body.success) form.reset();
	} catch (err) {
		toast.textContent = 'Something went wrong. Please try again.';
		toast.className = 'toast error';
	} finally {
		button.disabled = false;
		button.textContent = 'SUBMIT';
	}
});
"#;

// "400000" reads like a phone number; render "400,000".
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Hero section: headline, stats copy, and the booking form.
struct Hero {
    config: Arc<ClinicConfig>,
}

impl Hero {
    // Placeholder text, with an asterisk when the field is required.
    fn placeholder(field: FormField, required: &[FormField]) -> String {
        if required.contains(&field) {
            format!("{}*", field.label())
        } else {
            field.label().to_string()
        }
    }
}

impl RenderOnce for Hero {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let config = &self.config;
        let required = required_fields(config);
        let location_enabled = config.location_enabled();

        tmpl << html! {
            section(class = "hero") {
                div(class = "container") {
                    div(class = "hero-copy") {
                        h1 {
                            : "FAST. EFFECTIVE.";
                            br;
                            span(class = "accent") : "GUARANTEED";
                        }
                        p(class = "lead") {
                            : "Our network of lice removal professionals has treated over ";
                            strong : format!("{} cases", format_count(config.hero_stats.patients_helped));
                            : " of lice, many near you!";
                        }
                        @ if let Some(message) = &config.hero_stats.custom_message {
                            p(class = "custom-message") : message.clone();
                        }
                        p {
                            a(class = "cta", href = "#booking-form") : "Book Appointment";
                            : " ";
                            a(class = "cta secondary", href = "#benefits") : "Learn More";
                        }
                    }
                    div(class = "booking-card") {
                        h3 : "Book an Appointment";
                        p(class = "hint") : "Get rid of lice in just one treatment";
                        form(id = "booking-form") {
                            input(
                                type = "text",
                                name = "botcheck",
                                class = "honeypot",
                                tabindex = "-1",
                                autocomplete = "off"
                            );
                            div(class = "name-row") {
                                @ for field in [FormField::FirstName, FormField::LastName] {
                                    @ if config.booking_form.fields.contains(&field) {
                                        input(
                                            type = field.input_type(),
                                            name = field.as_str(),
                                            placeholder = Self::placeholder(field, &required)
                                        );
                                    }
                                }
                            }
                            @ for field in [FormField::Email, FormField::Phone] {
                                @ if config.booking_form.fields.contains(&field) {
                                    input(
                                        type = field.input_type(),
                                        name = field.as_str(),
                                        placeholder = Self::placeholder(field, &required)
                                    );
                                }
                            }
                            @ if location_enabled {
                                select(name = "location") {
                                    option(value = "", selected = "selected", disabled = "disabled")
                                        : Self::placeholder(FormField::Location, &required);
                                    @ for area in &config.areas_served {
                                        option(value = area.clone()) : area.clone();
                                    }
                                }
                            }
                            @ for field in [FormField::Date, FormField::HouseholdSize, FormField::Notes] {
                                @ if config.booking_form.fields.contains(&field) {
                                    input(
                                        type = field.input_type(),
                                        name = field.as_str(),
                                        min ?= (field == FormField::HouseholdSize).then_some("1"),
                                        placeholder = Self::placeholder(field, &required)
                                    );
                                }
                            }
                            button(id = "booking-submit", class = "cta secondary", type = "submit")
                                : "SUBMIT";
                        }
                        div(id = "booking-toast", class = "toast");
                        script : Raw(FORM_SCRIPT);
                    }
                }
            }
        }
    }
}

/// Network-membership trust block. Renders nothing unless the clinic is a
/// verified member with the badge enabled.
struct NetworkVerification {
    config: Arc<ClinicConfig>,
}

impl RenderOnce for NetworkVerification {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let Some(membership) = self.config.network_membership.clone() else {
            return;
        };
        if !membership.is_verified || !membership.show_badge {
            return;
        }

        let treated = format!(
            "{}+",
            format_count(self.config.hero_stats.patients_helped)
        );

        tmpl << html! {
            section(class = "network", id = "learn-more") {
                div(class = "container") {
                    h3 : format!("Certified {} Professional", membership.network_name);
                    p(class = "blurb") : format!(
                        "Your local {} • {}",
                        membership.local_area, membership.certification_blurb
                    );
                    @ if membership.show_stats {
                        div(class = "stat-cards") {
                            div(class = "stat-card") {
                                div(class = "value") : treated;
                                div(class = "label") : "Successful Treatments";
                            }
                            div(class = "stat-card") {
                                div(class = "value") : "100+";
                                div(class = "label") : "Verified Providers";
                            }
                            div(class = "stat-card") {
                                @ if let Some(badge) = membership.badge_image {
                                    img(src = badge, alt = "Network verification badge");
                                } else {
                                    div(class = "value") : "Verified";
                                    div(class = "label") : membership.network_name;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Benefits section: static marketing copy, same for every deployment.
struct Benefits;

impl RenderOnce for Benefits {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let benefits = [
            (
                "Single Treatment Solution",
                "We Kill Lice AND Lice Eggs In A Single Treatment",
                "Over the counter products rely on precise use and often don't kill the \
                 eggs themselves. Our signature approach ensures that all lice and their \
                 eggs are removed and disabled from reproducing.",
            ),
            (
                "100% Safe & Natural",
                "Non-Toxic & Pesticide Free",
                "Our lice treatment is safe for kids and most importantly doesn't hurt!",
            ),
            (
                "Expert Education",
                "In-Clinic Head Lice Education",
                "Head lice can cause a lot of stress for families. Our goal is to provide \
                 you with a complete head lice education so you have a thorough \
                 understanding of the life cycle of lice, how lice spreads and how to \
                 prevent getting lice in the future.",
            ),
        ];

        tmpl << html! {
            section(class = "benefits", id = "benefits") {
                div(class = "container") {
                    h2 : "Why Choose Our Treatment?";
                    p(class = "intro") : "Our proven lice removal treatment method starts with \
                        identification and then uses our signature technology to remove not \
                        only lice but their eggs. Guaranteed!";
                    div(class = "benefit-grid") {
                        @ for (highlight, title, description) in benefits {
                            div(class = "benefit") {
                                div(class = "highlight") : highlight;
                                h3 : title;
                                p : description;
                                a(class = "cta", href = "#booking-form") : "Book Now";
                            }
                        }
                    }
                }
            }
        }
    }
}

struct HomeBody {
    config: Arc<ClinicConfig>,
}

impl RenderOnce for HomeBody {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let header = Header {
            config: Arc::clone(&self.config),
        };
        let hero = Hero {
            config: Arc::clone(&self.config),
        };
        let network = NetworkVerification {
            config: Arc::clone(&self.config),
        };
        let footer = Footer {
            config: self.config,
        };

        tmpl << html! {
            : header;
            : hero;
            : network;
            : Benefits;
            : footer;
        }
    }
}

/// Render the home page to an HTML string.
pub fn render_home(config: Arc<ClinicConfig>) -> String {
    SitePage {
        meta: PageMeta::new(&config, None),
        content: HomeBody { config },
    }
    .into_string()
    .unwrap()
}

// Home page handler
pub async fn get_home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_home(Arc::clone(&state.config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ClinicConfig {
        serde_json::from_str(
            r#"{
                "clinicName": "Lice Treatment Center",
                "phone": "(555) 123-4567",
                "email": "info@licetreatment.com",
                "mainArea": "Downtown",
                "areasServed": ["Downtown", "Northside"],
                "locations": [
                    { "name": "Main Location", "address": "123 Main Street" }
                ],
                "heroStats": {
                    "yearsInBusiness": 8,
                    "patientsHelped": 400000,
                    "customMessage": "Lice Removal Near You"
                },
                "bookingForm": {
                    "fields": ["firstName", "lastName", "email", "phone", "location", "date", "householdSize"],
                    "submitUrl": "",
                    "requiresLocation": true
                },
                "networkMembership": {
                    "isVerified": true,
                    "networkName": "Lice Removal Network",
                    "showBadge": true,
                    "showStats": true,
                    "localArea": "Downtown",
                    "certificationBlurb": "Lice Removal Professional"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_home_renders_config_driven_content() {
        let html = render_home(Arc::new(sample_config()));

        assert!(html.contains("Lice Treatment Center"));
        assert!(html.contains("Lice Removal Near You"));
        assert!(html.contains("400,000 cases"));
        // Enabled fields are rendered, with asterisks on required ones
        assert!(html.contains("First Name*"));
        assert!(html.contains("Mobile Number*"));
        // Area choices come from config
        assert!(html.contains("Northside"));
        // Honeypot is present
        assert!(html.contains("botcheck"));
    }

    #[test]
    fn test_disabled_fields_are_not_rendered() {
        let mut config = sample_config();
        config.booking_form.fields =
            vec![FormField::FirstName, FormField::Email, FormField::Date];
        let html = render_home(Arc::new(config));

        assert!(html.contains("name=\"firstName\""));
        assert!(!html.contains("name=\"phone\""));
        assert!(!html.contains("name=\"householdSize\""));
    }

    #[test]
    fn test_empty_areas_disable_location_select() {
        let mut config = sample_config();
        config.areas_served.clear();
        let html = render_home(Arc::new(config));

        assert!(!html.contains("name=\"location\""));
    }

    #[test]
    fn test_network_section_respects_show_badge() {
        let mut config = sample_config();
        if let Some(membership) = config.network_membership.as_mut() {
            membership.show_badge = false;
        }
        let html = render_home(Arc::new(config));

        assert!(!html.contains("Certified Lice Removal Network Professional"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(400000), "400,000");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
