//! Sticky save/cancel/delete bar.

use askama::Template;

/// Save bar actions for a page backed by an edit session.
#[derive(Debug, Clone, Template)]
#[template(path = "components/save_bar.html")]
pub struct SaveBar {
    /// HTMX POST target for save.
    pub save_action: String,
    /// POST target that discards the form.
    pub cancel_action: String,
    /// POST target deleting the record; `None` hides the button.
    pub delete_action: Option<String>,
    /// Save is disabled unless the form has pending changes.
    pub save_disabled: bool,
    pub disabled: bool,
}

impl SaveBar {
    #[must_use]
    pub fn new(
        session_path: &str,
        delete_action: Option<String>,
        save_enabled: bool,
        disabled: bool,
    ) -> Self {
        Self {
            save_action: format!("{session_path}/submit"),
            cancel_action: format!("{session_path}/cancel"),
            delete_action,
            save_disabled: !save_enabled,
            disabled,
        }
    }
}
