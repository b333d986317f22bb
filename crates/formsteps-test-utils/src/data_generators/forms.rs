//! Generators for form trees.

use formsteps_core::{
    FormActions, FormElement, FormTree, LinkAction, SubmitButton, Url, CONFIRMATION_HANDLER,
    SAVE_HANDLER, SUBMIT_FORM_HANDLER, SUBMIT_TRIGGER,
};

/// Creates the default entity form actions: save, preview and delete.
pub fn entity_actions(delete_url: Url) -> FormActions {
    FormActions {
        submit: Some(
            SubmitButton::new(SUBMIT_TRIGGER, "Save").with_handlers([
                SUBMIT_FORM_HANDLER,
                SAVE_HANDLER,
                CONFIRMATION_HANDLER,
            ]),
        ),
        preview: Some(
            SubmitButton::new("preview", "Preview").with_handlers([SUBMIT_FORM_HANDLER, "::preview"]),
        ),
        delete: Some(LinkAction::new("Delete", delete_url)),
        ..Default::default()
    }
}

/// Creates the article form matching
/// [`article_layout`](super::article_layout).
pub fn article_form() -> FormTree {
    FormTree::new()
        .with_element("title", FormElement::field())
        .with_element("body", FormElement::field())
        .with_element("tags", FormElement::field())
        .with_element("status", FormElement::field())
        .with_element("revision_log", FormElement::field())
        .with_element("group_basics", FormElement::group(["title"]))
        .with_element("group_meta", FormElement::group(["tags"]))
        .with_element("group_details", FormElement::group(["body", "group_meta"]))
        .with_element("group_publish", FormElement::group(["status"]))
        .with_actions(entity_actions(Url::Internal("/node/delete".to_string())))
}
