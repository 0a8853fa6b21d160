use super::domain::AudienceSelector;
use serde::{Deserialize, Serialize};

/// Character limit for SMS-bound messages.
pub const SMS_CHARACTER_LIMIT: usize = 160;

/// Grouping used when listing templates and dispatch history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    HealthAlert,
    Information,
    Education,
}

/// Message template with placeholders from the closed set
/// `{village}`, `{date}`, `{asha_worker}`, `{location}`, `{disease}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: String,
    pub title: String,
    pub body: String,
    pub category: TemplateCategory,
}

/// The standard advisory templates shipped with the service.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<NotificationTemplate>,
}

impl TemplateCatalog {
    pub fn standard() -> Self {
        let templates = vec![
            NotificationTemplate {
                id: "water_alert".to_string(),
                title: "Water Quality Alert".to_string(),
                body: "URGENT: Water quality in {village} has deteriorated. Please boil water \
                       before drinking and use only treated water for cooking. Contact your \
                       ASHA worker for more information."
                    .to_string(),
                category: TemplateCategory::HealthAlert,
            },
            NotificationTemplate {
                id: "disease_outbreak".to_string(),
                title: "Disease Outbreak Warning".to_string(),
                body: "Health Alert: Cases of {disease} reported in {village}. Please maintain \
                       hygiene, wash hands frequently, and seek immediate medical attention if \
                       symptoms appear."
                    .to_string(),
                category: TemplateCategory::HealthAlert,
            },
            NotificationTemplate {
                id: "water_test".to_string(),
                title: "Water Testing Schedule".to_string(),
                body: "Water quality testing will be conducted in {village} on {date}. Please \
                       ensure water sources are accessible. Contact {asha_worker} for questions."
                    .to_string(),
                category: TemplateCategory::Information,
            },
            NotificationTemplate {
                id: "health_camp".to_string(),
                title: "Health Camp Announcement".to_string(),
                body: "Free health checkup camp in {village} on {date} at {location}. Bring \
                       your health cards. Services include general checkup, vaccination, and \
                       health education."
                    .to_string(),
                category: TemplateCategory::Information,
            },
            NotificationTemplate {
                id: "prevention_tips".to_string(),
                title: "Prevention Guidelines".to_string(),
                body: "Stay healthy! Drink boiled/treated water, wash hands with soap, keep \
                       surroundings clean, and report any illness to your ASHA worker \
                       immediately."
                    .to_string(),
                category: TemplateCategory::Education,
            },
        ];

        Self { templates }
    }

    pub fn find(&self, id: &str) -> Option<&NotificationTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn templates(&self) -> &[NotificationTemplate] {
        &self.templates
    }
}

/// Values substituted into template placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub village: String,
    pub date: String,
    pub asha_worker: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
}

fn placeholder_value<'a>(token: &str, context: &'a RenderContext) -> Option<&'a str> {
    match token {
        "village" => Some(&context.village),
        "date" => Some(&context.date),
        "asha_worker" => Some(&context.asha_worker),
        "location" => Some(&context.location),
        "disease" => context.disease.as_deref(),
        _ => None,
    }
}

/// Substitutes placeholders in a single left-to-right pass. Substituted
/// values are never re-scanned; a placeholder with no value is left verbatim
/// and logged.
pub fn render(template: &NotificationTemplate, context: &RenderContext) -> String {
    let mut rendered = String::with_capacity(template.body.len());
    let mut rest = template.body.as_str();

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];

        match tail.find('}') {
            Some(close) => {
                let token = &tail[1..close];
                match placeholder_value(token, context) {
                    Some(value) => rendered.push_str(value),
                    None => {
                        tracing::warn!(
                            template = %template.id,
                            placeholder = token,
                            "no value for placeholder; left unsubstituted"
                        );
                        rendered.push_str(&tail[..=close]);
                    }
                }
                rest = &tail[close + 1..];
            }
            None => {
                rendered.push_str(tail);
                rest = "";
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

#[derive(Debug, thiserror::Error)]
#[error("population must be positive to estimate recipients")]
pub struct InvalidPopulationError;

/// Estimated reach of a notification under the audience rule. Fractions are
/// floored with integer arithmetic.
pub fn estimate_recipients(
    population: u32,
    selector: AudienceSelector,
) -> Result<u32, InvalidPopulationError> {
    if population == 0 {
        return Err(InvalidPopulationError);
    }

    Ok(match selector {
        AudienceSelector::All => population,
        AudienceSelector::AdultsOnly => (u64::from(population) * 6 / 10) as u32,
        AudienceSelector::FamilyHeads => population / 4,
    })
}

#[derive(Debug, thiserror::Error)]
#[error("message is {length} characters, over the {limit}-character limit")]
pub struct LengthExceededError {
    pub length: usize,
    pub limit: usize,
}

/// Passes the message through unchanged when it fits the channel limit;
/// never truncates.
pub fn enforce_length(message: String, limit: usize) -> Result<String, LengthExceededError> {
    let length = message.chars().count();
    if length > limit {
        return Err(LengthExceededError { length, limit });
    }

    Ok(message)
}
