//! Generators for layout configurations.

use formsteps_core::{LayoutConfig, LayoutEntry, StepSettings};

/// Step format type used by the generated layouts.
pub const STEPS_FORMAT: &str = "steps";

/// Creates step settings with the same add and edit title.
pub fn titled_settings(title: &str) -> StepSettings {
    StepSettings {
        add_label: Some(title.to_string()),
        edit_label: Some(title.to_string()),
        ..Default::default()
    }
}

/// Creates step settings with navigation labels.
///
/// Empty strings leave the corresponding label unset.
pub fn navigation_settings(cancel: &str, previous: &str, next: &str, submit: &str) -> StepSettings {
    let label = |value: &str| (!value.is_empty()).then(|| value.to_string());
    StepSettings {
        cancel_button: label(cancel),
        previous_button: label(previous),
        next_button: label(next),
        submit_button: label(submit),
        ..Default::default()
    }
}

/// Creates a layout with one step group per name, weighted in the given
/// order.
pub fn linear_layout(names: &[&str]) -> LayoutConfig {
    names
        .iter()
        .enumerate()
        .fold(LayoutConfig::new(), |layout, (weight, name)| {
            layout.with_group(*name, LayoutEntry::new(STEPS_FORMAT, weight as i32))
        })
}

/// Creates the article layout used by the integration tests.
///
/// Three steps: `group_basics` (title), `group_details` (body and the nested
/// `group_meta` details group with tags) and `group_publish` (status). The
/// steps are declared out of weight order.
pub fn article_layout() -> LayoutConfig {
    LayoutConfig::new()
        .with_group(
            "group_publish",
            LayoutEntry::new(STEPS_FORMAT, 10)
                .with_label("Publish")
                .with_children(["status"])
                .with_settings(StepSettings {
                    add_label: Some("Publish article".to_string()),
                    edit_label: Some("Publish changes".to_string()),
                    previous_button: Some("Back".to_string()),
                    submit_button: Some("Save article".to_string()),
                    preview_button: Some("Preview article".to_string()),
                    delete_button: Some("Delete article".to_string()),
                    delete_path: Some("/node/[node:id]/delete".to_string()),
                    ..Default::default()
                }),
        )
        .with_group(
            "group_basics",
            LayoutEntry::new(STEPS_FORMAT, 0)
                .with_label("Basics")
                .with_children(["title"])
                .with_settings(StepSettings {
                    add_label: Some("Create article".to_string()),
                    edit_label: Some("Edit article".to_string()),
                    cancel_button: Some("Cancel".to_string()),
                    next_button: Some("Continue".to_string()),
                    ..Default::default()
                }),
        )
        .with_group(
            "group_meta",
            LayoutEntry::new("details", 0)
                .with_label("Meta")
                .with_children(["tags"]),
        )
        .with_group(
            "group_details",
            LayoutEntry::new(STEPS_FORMAT, 5)
                .with_label("Details")
                .with_children(["body", "group_meta"])
                .with_settings(StepSettings {
                    add_label: Some("Describe article".to_string()),
                    previous_button: Some("Back".to_string()),
                    next_button: Some("Continue".to_string()),
                    ..Default::default()
                }),
        )
}
