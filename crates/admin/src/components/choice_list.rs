//! Single-select field with search, incremental loading and "create new".

use askama::Template;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Inline link to an out-of-band creation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceAdd {
    pub label: String,
    pub href: String,
}

/// Label of the choice whose value is `value`, or `value` itself.
#[must_use]
pub fn display_label(choices: &[Choice], value: &str) -> String {
    choices
        .iter()
        .find(|choice| choice.value == value)
        .map_or_else(|| value.to_string(), |choice| choice.label.clone())
}

/// Searchable single-select.
///
/// Holds no cache of its own: `choices`, `has_more` and `loading` come from
/// the owner's loader, and a pick is posted back to the owner, which updates
/// both the raw value and the display value.
#[derive(Debug, Clone, Template)]
#[template(path = "components/choice_list.html")]
pub struct ChoiceListField {
    /// Form field name.
    pub name: String,
    pub label: String,
    pub choices: Vec<Choice>,
    /// Raw stored value.
    pub value: String,
    /// Text shown in the search box.
    pub display_value: String,
    pub has_more: bool,
    pub loading: bool,
    pub disabled: bool,
    pub error: Option<String>,
    pub add: Option<ChoiceAdd>,
    /// HTMX GET target for search and "load more"; `None` for static lists.
    pub fetch_url: Option<String>,
    /// HTMX POST target for a pick; `None` submits with the enclosing form.
    pub change_url: Option<String>,
    /// Element replaced by the HTMX responses.
    pub target: String,
}

impl ChoiceListField {
    /// A static select over `choices` submitted with its form.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, choices: Vec<Choice>) -> Self {
        let name = name.into();
        Self {
            target: format!("#choice-{name}"),
            name,
            label: label.into(),
            choices,
            value: String::new(),
            display_value: String::new(),
            has_more: false,
            loading: false,
            disabled: false,
            error: None,
            add: None,
            fetch_url: None,
            change_url: None,
        }
    }

    /// Select `value`, showing the matching choice's label.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.display_value = display_label(&self.choices, &self.value);
        self
    }

    /// Whether another "load more" request may be issued.
    #[must_use]
    pub const fn can_fetch_more(&self) -> bool {
        self.has_more && !self.loading && !self.disabled
    }

    /// Whether `choice` is the stored value.
    #[must_use]
    pub fn is_selected(&self, choice: &Choice) -> bool {
        choice.value == self.value
    }
}
