//! Selection list configuration.

/// Metadata the owning component attaches to a selection list.
///
/// The list stores these fields and hands them back unchanged; nothing in
/// this crate reads them. A list-level `disabled` flag does not block
/// selection changes, that is up to whoever routes input to the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConfig {
    /// Name of the list.
    pub name: Option<String>,

    /// Component ID of the list (distinct from entry identifiers).
    pub id: Option<String>,

    /// Style classes.
    pub classes: Vec<String>,

    /// Whether the whole list is disabled.
    pub disabled: bool,
}

impl ListConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the component ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add classes from a whitespace separated string.
    pub fn classes(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Check if a class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
