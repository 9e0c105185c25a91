//! Entries held by a selection list, and the forms they can be given in.

/// One selectable item in a [`SelectionList`](super::SelectionList).
///
/// The value and prompt are fixed at construction. The selected and
/// disabled flags can only be changed by the owning list once the entry
/// has been added to it.
///
/// # Example
///
/// ```
/// use selection_list::Entry;
///
/// let entry = Entry::new(42, "Answer").with_id("answer").selected();
/// assert_eq!(*entry.value(), 42);
/// assert!(entry.is_selected());
/// ```
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    prompt: String,
    id: Option<String>,
    disabled: bool,
    selected: bool,
}

impl<V> Entry<V> {
    /// Create an enabled, unselected entry.
    pub fn new(value: V, prompt: impl Into<String>) -> Self {
        Self {
            value,
            prompt: prompt.into(),
            id: None,
            disabled: false,
            selected: false,
        }
    }

    /// Start out selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Start out disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The application value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the entry, returning its value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// The display prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The identifier, if one was given.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the entry is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the entry is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// The forms an entry can be supplied in: a ready-made [`Entry`] or a bare
/// `(value, prompt)` pair.
#[derive(Debug, Clone)]
pub enum EntrySpec<V> {
    Entry(Entry<V>),
    Pair(V, String),
}

impl<V> EntrySpec<V> {
    /// Normalize into an [`Entry`]. Pairs become enabled, unselected entries
    /// without an identifier.
    pub fn into_entry(self) -> Entry<V> {
        match self {
            EntrySpec::Entry(entry) => entry,
            EntrySpec::Pair(value, prompt) => Entry::new(value, prompt),
        }
    }
}

impl<V> From<Entry<V>> for EntrySpec<V> {
    fn from(entry: Entry<V>) -> Self {
        EntrySpec::Entry(entry)
    }
}

impl<V, S: Into<String>> From<(V, S)> for EntrySpec<V> {
    fn from((value, prompt): (V, S)) -> Self {
        EntrySpec::Pair(value, prompt.into())
    }
}

/// Addresses an entry either by position or by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    Index(usize),
    Id(&'a str),
}

impl From<usize> for EntryRef<'_> {
    fn from(index: usize) -> Self {
        EntryRef::Index(index)
    }
}

impl<'a> From<&'a str> for EntryRef<'a> {
    fn from(id: &'a str) -> Self {
        EntryRef::Id(id)
    }
}

impl<'a> From<&'a String> for EntryRef<'a> {
    fn from(id: &'a String) -> Self {
        EntryRef::Id(id.as_str())
    }
}

impl std::fmt::Display for EntryRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryRef::Index(index) => write!(f, "#{}", index),
            EntryRef::Id(id) => write!(f, "'{}'", id),
        }
    }
}
