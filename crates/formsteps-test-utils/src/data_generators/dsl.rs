//! Generators for form display documents.

/// Creates a minimal valid form display document with one step.
pub fn create_minimal_form_display_yaml() -> String {
    r#"
dsl_version: "1.0"
form_display:
  entity_type: node
  bundle: page
  fields: [title]
  groups:
    - name: group_only
      format_type: steps
      label: Only step
      children: [title]
"#
    .to_string()
}

/// Creates the article form display document with three steps and a
/// nested details group.
pub fn create_article_form_display_yaml() -> String {
    r#"
dsl_version: "1.0"
form_display:
  entity_type: node
  bundle: article
  mode: default
  fields: [title, body, tags, status]
  groups:
    - name: group_basics
      format_type: steps
      label: Basics
      weight: 0
      children: [title]
      format_settings:
        add_label: Create article
        edit_label: Edit article
        cancel_button: Cancel
        cancel_path: /admin/content
        next_button: Continue
    - name: group_details
      format_type: steps
      label: Details
      weight: 5
      children: [body, group_meta]
      format_settings:
        previous_button: Back
        next_button: Continue
    - name: group_meta
      format_type: details
      label: Meta
      children: [tags]
    - name: group_publish
      format_type: steps
      label: Publish
      weight: 10
      children: [status]
      format_settings:
        previous_button: Back
        submit_button: Save article
        delete_button: Delete
        delete_path: "/node/[node:id]/delete"
"#
    .to_string()
}

/// Creates a form display document whose single step uses the given
/// cancel path.
pub fn create_form_display_yaml_with_cancel_path(cancel_path: &str) -> String {
    format!(
        r#"
dsl_version: "1.0"
form_display:
  entity_type: node
  bundle: page
  fields: [title]
  groups:
    - name: group_only
      format_type: steps
      label: Only step
      children: [title]
      format_settings:
        cancel_path: "{}"
"#,
        cancel_path
    )
}
