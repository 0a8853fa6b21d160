use crate::surveillance::villages::domain::AudienceSelector;
use crate::surveillance::villages::notify::{
    enforce_length, estimate_recipients, render, NotificationTemplate, RenderContext,
    TemplateCatalog, TemplateCategory, SMS_CHARACTER_LIMIT,
};

fn context() -> RenderContext {
    RenderContext {
        village: "Rampur".to_string(),
        date: "2024-01-15".to_string(),
        asha_worker: "Priya Sharma".to_string(),
        location: "village center".to_string(),
        disease: None,
    }
}

#[test]
fn audience_fractions_match_the_selector() {
    assert_eq!(
        estimate_recipients(1200, AudienceSelector::All).expect("positive population"),
        1200
    );
    assert_eq!(
        estimate_recipients(1200, AudienceSelector::AdultsOnly).expect("positive population"),
        720
    );
    assert_eq!(
        estimate_recipients(1200, AudienceSelector::FamilyHeads).expect("positive population"),
        300
    );
}

#[test]
fn audience_fractions_floor_for_odd_populations() {
    assert_eq!(
        estimate_recipients(7, AudienceSelector::AdultsOnly).expect("positive population"),
        4
    );
    assert_eq!(
        estimate_recipients(7, AudienceSelector::FamilyHeads).expect("positive population"),
        1
    );
}

#[test]
fn zero_population_is_rejected() {
    estimate_recipients(0, AudienceSelector::All).expect_err("zero population rejected");
}

#[test]
fn render_substitutes_every_known_placeholder() {
    let catalog = TemplateCatalog::standard();
    let template = catalog.find("water_test").expect("template exists");

    let message = render(template, &context());

    assert!(message.contains("Rampur"));
    assert!(message.contains("2024-01-15"));
    assert!(message.contains("Priya Sharma"));
    assert!(!message.contains('{'));
}

#[test]
fn unset_placeholder_is_left_verbatim() {
    let catalog = TemplateCatalog::standard();
    let template = catalog.find("disease_outbreak").expect("template exists");

    let message = render(template, &context());

    assert!(message.contains("{disease}"));
    assert!(message.contains("Rampur"));
}

#[test]
fn unknown_token_is_left_verbatim() {
    let template = NotificationTemplate {
        id: "custom".to_string(),
        title: "Custom".to_string(),
        body: "Hello {village}, see {schedule} for details.".to_string(),
        category: TemplateCategory::Information,
    };

    let message = render(&template, &context());

    assert_eq!(message, "Hello Rampur, see {schedule} for details.");
}

#[test]
fn substituted_values_are_never_rescanned() {
    let template = NotificationTemplate {
        id: "custom".to_string(),
        title: "Custom".to_string(),
        body: "Alert for {village}.".to_string(),
        category: TemplateCategory::Information,
    };
    let mut context = context();
    context.village = "{date}".to_string();

    let message = render(&template, &context);

    assert_eq!(message, "Alert for {date}.");
}

#[test]
fn unterminated_brace_is_copied_through() {
    let template = NotificationTemplate {
        id: "custom".to_string(),
        title: "Custom".to_string(),
        body: "Report issues to {asha_worker} at {village".to_string(),
        category: TemplateCategory::Information,
    };

    let message = render(&template, &context());

    assert_eq!(message, "Report issues to Priya Sharma at {village");
}

#[test]
fn messages_within_the_limit_pass_through_unchanged() {
    let message = "a".repeat(SMS_CHARACTER_LIMIT);

    let passed = enforce_length(message.clone(), SMS_CHARACTER_LIMIT).expect("fits the limit");
    assert_eq!(passed, message);
}

#[test]
fn messages_over_the_limit_are_rejected_not_truncated() {
    let message = "a".repeat(SMS_CHARACTER_LIMIT + 1);

    let error = enforce_length(message, SMS_CHARACTER_LIMIT).expect_err("over the limit");
    assert_eq!(error.length, 161);
    assert_eq!(error.limit, 160);
}

#[test]
fn standard_catalog_carries_the_advisory_set() {
    let catalog = TemplateCatalog::standard();

    assert_eq!(catalog.templates().len(), 5);
    assert!(catalog.find("water_alert").is_some());
    assert!(catalog.find("prevention_tips").is_some());
    assert!(catalog.find("unknown_template").is_none());

    let alerts = catalog
        .templates()
        .iter()
        .filter(|template| template.category == TemplateCategory::HealthAlert)
        .count();
    assert_eq!(alerts, 2);
}
