use horrorshow::{helper::doctype, html, Raw, RenderOnce, TemplateBuffer};
use std::sync::Arc;

use crate::config::ClinicConfig;

pub mod home;
pub mod privacy;

const BASE_STYLE: &str = r#"
:root {
	--primary: #0e7fc1;
	--secondary: #3cb878;
	--ink: #1b2733;
	--muted: #5b6b7a;
	--paper: #ffffff;
	--wash: #eef6fb;
}
* { box-sizing: border-box; }
body {
	margin: 0;
	font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
	color: var(--ink);
	background-color: var(--paper);
}
a { color: var(--primary); }
.container { max-width: 1080px; margin: 0 auto; padding: 0 16px; }
.top-bar { background-color: var(--primary); color: #fff; font-size: 14px; padding: 8px 0; }
.top-bar .container { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 12px; }
.top-bar a { color: #fff; font-weight: 700; text-decoration: none; }
header.site { border-bottom: 1px solid #dde5ec; padding: 14px 0; }
header.site .container { display: flex; align-items: center; justify-content: space-between; gap: 12px; }
.brand { font-size: 26px; font-weight: 800; color: var(--primary); }
.brand img { height: 56px; width: auto; }
.cta { display: inline-block; background-color: var(--primary); color: #fff; border: 0; border-radius: 8px; padding: 10px 18px; font-weight: 700; text-decoration: none; cursor: pointer; }
.cta.secondary { background-color: var(--secondary); }
.cta:disabled { opacity: 0.6; cursor: wait; }
section.hero { background-color: var(--wash); padding: 48px 0; }
section.hero .container { display: grid; grid-template-columns: 1fr 1fr; gap: 40px; align-items: center; }
@media (max-width: 800px) { section.hero .container { grid-template-columns: 1fr; } }
.hero-copy h1 { font-size: 44px; line-height: 1.1; margin: 0 0 16px 0; }
.hero-copy h1 .accent { color: var(--secondary); }
.hero-copy .lead { font-size: 19px; color: var(--muted); }
.hero-copy .custom-message { font-size: 24px; font-weight: 700; color: var(--secondary); }
.booking-card { background-color: var(--paper); border-radius: 12px; box-shadow: 0 10px 30px rgba(14, 127, 193, 0.15); padding: 28px; }
.booking-card h3 { margin-top: 0; }
.booking-card .hint { color: var(--muted); margin-bottom: 16px; }
.booking-card input, .booking-card select { width: 100%; margin-bottom: 12px; padding: 10px 12px; border: 1px solid #c7d3de; border-radius: 8px; font-size: 15px; }
.booking-card .name-row { display: grid; grid-template-columns: 1fr 1fr; gap: 10px; }
.honeypot { display: none; }
.toast { margin-top: 12px; padding: 10px 12px; border-radius: 8px; display: none; }
.toast.success { display: block; background-color: #e4f6ec; color: #17623b; }
.toast.error { display: block; background-color: #fdeaea; color: #8d2222; }
section.network { padding: 40px 0; background-color: #f7fbf9; text-align: center; }
.stat-cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; max-width: 860px; margin: 24px auto 0 auto; }
@media (max-width: 700px) { .stat-cards { grid-template-columns: 1fr; } }
.stat-card { border: 1px solid #cfe5da; border-radius: 12px; padding: 24px; }
.stat-card .value { font-size: 30px; font-weight: 800; color: var(--primary); }
.stat-card .label, .network .blurb { color: var(--muted); }
.stat-card img { max-height: 120px; }
section.benefits { padding: 56px 0; }
section.benefits .intro { text-align: center; max-width: 640px; margin: 0 auto 36px auto; color: var(--muted); }
section.benefits h2 { text-align: center; margin-bottom: 8px; }
.benefit-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 24px; }
@media (max-width: 800px) { .benefit-grid { grid-template-columns: 1fr; } }
.benefit { border-radius: 12px; padding: 28px; background-color: var(--wash); text-align: center; }
.benefit .highlight { text-transform: uppercase; letter-spacing: 0.08em; font-size: 13px; font-weight: 700; color: var(--primary); }
.benefit p { color: var(--muted); }
footer.site { background-color: var(--ink); color: #dfe7ee; padding: 48px 0 24px 0; }
footer.site .columns { display: grid; grid-template-columns: repeat(3, 1fr); gap: 32px; }
@media (max-width: 800px) { footer.site .columns { grid-template-columns: 1fr; } }
footer.site h4 { color: #fff; }
footer.site a { color: #aee0ff; }
.area-chip { display: inline-block; background-color: rgba(255, 255, 255, 0.12); border-radius: 999px; padding: 4px 12px; margin: 0 6px 6px 0; font-size: 14px; }
.footer-bottom { border-top: 1px solid rgba(255, 255, 255, 0.2); margin-top: 36px; padding-top: 20px; text-align: center; color: #9fb0bf; }
main.legal { padding: 40px 0; }
main.legal section { border: 1px solid #dde5ec; border-radius: 12px; padding: 24px; margin-bottom: 20px; }
main.legal h2 { margin-top: 0; font-size: 20px; }
main.legal .effective { color: var(--muted); }
"#;

/// Metadata applied once per page render: the document title and the SEO
/// meta description.
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    /// Build page metadata from the clinic name and a page-specific
    /// description; pass `None` to use the default marketing copy.
    pub fn new(config: &ClinicConfig, custom_description: Option<&str>) -> Self {
        let description = custom_description.map(str::to_string).unwrap_or_else(|| {
            format!(
                "{} will remove 100% of head lice & eggs in one quick guaranteed treatment. \
                 Voted by moms as Best Lice Treatment Near Me in {}.",
                config.clinic_name,
                config.main_area_or_default()
            )
        });

        Self {
            title: format!(
                "{} | Lice Removal Near {}",
                config.clinic_name,
                config.main_area_or_default()
            ),
            description,
        }
    }

    pub fn for_privacy(config: &ClinicConfig) -> Self {
        let description = format!("Privacy policy for {}.", config.clinic_name);
        Self {
            title: format!("Privacy Policy - {}", config.clinic_name),
            description,
        }
    }
}

/// Full HTML document: head built from [`PageMeta`], body from `content`.
pub struct SitePage<C: RenderOnce + 'static> {
    pub meta: PageMeta,
    pub content: C,
}

impl<C> RenderOnce for SitePage<C>
where
    C: RenderOnce + 'static,
{
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        tmpl << html! {
            : doctype::HTML;
            html(lang = "en") {
                head {
                    meta(charset = "utf-8");
                    meta(name = "viewport", content = "width=device-width, initial-scale=1");
                    title : self.meta.title;
                    meta(name = "description", content = self.meta.description);
                    style : Raw(BASE_STYLE);
                }
                body {
                    : self.content;
                }
            }
        }
    }
}

// Digits-only form of the configured phone number for tel: links.
fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

/// Top bar and main site header, shared by every page.
pub struct Header {
    pub config: Arc<ClinicConfig>,
}

impl RenderOnce for Header {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let config = &self.config;
        tmpl << html! {
            div(class = "top-bar") {
                div(class = "container") {
                    span : "Same Day Appointments Available!";
                    span : "5-Star Rated Treatment";
                    a(href = tel_href(&config.phone)) : config.phone.clone();
                    @ if config.locations.len() > 1 {
                        span : format!("{} Locations", config.locations.len());
                    }
                }
            }
            header(class = "site") {
                div(class = "container") {
                    span(class = "brand") {
                        @ if let Some(logo) = &config.logo {
                            img(src = logo.clone(), alt = format!("{} logo", config.clinic_name));
                        } else {
                            : config.clinic_name.clone();
                        }
                    }
                    span {
                        a(class = "cta", href = tel_href(&config.phone)) : "Call Now";
                        : " ";
                        a(class = "cta secondary", href = "/#booking-form") : "Book Online";
                    }
                }
            }
        }
    }
}

/// Site footer: contact details, locations, areas served, legal links.
pub struct Footer {
    pub config: Arc<ClinicConfig>,
}

impl RenderOnce for Footer {
    fn render_once(self, tmpl: &mut TemplateBuffer) {
        let config = &self.config;
        let year = chrono::Utc::now().format("%Y").to_string();
        let social = config.social_links.clone().unwrap_or_default();
        let badge = config
            .network_membership
            .as_ref()
            .and_then(|m| m.badge_image.clone());

        tmpl << html! {
            footer(class = "site", id = "contact") {
                div(class = "container") {
                    div(class = "columns") {
                        div {
                            h4 : config.clinic_name.clone();
                            p : "Professional lice removal services with guaranteed \
                                 results in a single treatment.";
                            @ if let Some(facebook) = social.facebook {
                                a(href = facebook, rel = "noopener noreferrer") : "Facebook";
                                : " ";
                            }
                            @ if let Some(instagram) = social.instagram {
                                a(href = instagram, rel = "noopener noreferrer") : "Instagram";
                                : " ";
                            }
                            @ if let Some(google) = social.google {
                                a(href = google, rel = "noopener noreferrer") : "Google";
                            }
                        }
                        div {
                            h4 : "Contact Us";
                            p : config.phone.clone();
                            p : config.email.clone();
                            p : "Mon-Fri: 9AM-6PM";
                            @ if let Some(website) = &config.website {
                                p {
                                    a(href = website.clone(), rel = "noopener noreferrer")
                                        : "Visit our website";
                                }
                            }
                        }
                        div {
                            h4 : "Our Locations";
                            @ for location in &config.locations {
                                p {
                                    strong : location.name.clone();
                                    br;
                                    : location.address.clone();
                                    @ if let Some(phone) = &location.phone {
                                        @ if *phone != config.phone {
                                            br;
                                            : phone.clone();
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div {
                        h4 : "Areas We Serve";
                        @ if config.areas_served.is_empty() {
                            p : "Contact us to confirm service coverage in your area.";
                        } else {
                            @ for area in &config.areas_served {
                                span(class = "area-chip") : area.clone();
                            }
                        }
                    }
                    @ if let Some(badge) = badge {
                        img(src = badge, alt = "Network membership badge");
                    }
                    div(class = "footer-bottom") {
                        : format!("© {} {}. All rights reserved. ", year, config.clinic_name);
                        a(href = "/privacy") : "Privacy Policy";
                    }
                }
            }
        }
    }
}
