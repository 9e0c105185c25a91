//! Selection list state.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ListConfig;
use crate::error::{Result, SelectionListError};

use super::entry::{Entry, EntryRef, EntrySpec};
use super::events::{SelectedChanged, Subscribers, SubscriptionId};

/// Unique identifier for a SelectionList instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__selection_list_{}", self.0)
    }
}

/// An ordered list of entries supporting multiple selection.
///
/// `SelectionList<V>` manages:
/// - Entry order and lookup by position or identifier
/// - Identifier uniqueness across every structural change
/// - Selected/disabled state of each entry
/// - Change notifications and a dirty flag for whoever renders the list
///
/// Disabled entries cannot be selected, deselected or toggled through the
/// list; those calls succeed without doing anything.
///
/// # Example
///
/// ```
/// use selection_list::{Entry, EntrySpec, SelectionList};
///
/// let mut list = SelectionList::new(vec![
///     EntrySpec::from((1, "a")),
///     Entry::new(2, "b").selected().into(),
///     Entry::new(3, "c").disabled().into(),
/// ])?;
///
/// list.select(0)?;
/// assert_eq!(list.selected_values(), vec![1, 2]);
/// # Ok::<(), selection_list::SelectionListError>(())
/// ```
#[derive(Debug)]
pub struct SelectionList<V> {
    id: ListId,
    entries: Vec<Entry<V>>,
    /// Identifier -> position. Rebuilt whenever positions shift.
    index: HashMap<String, usize>,
    config: ListConfig,
    dirty: bool,
    pub(super) subscribers: Subscribers<V>,
}

impl<V> SelectionList<V> {
    /// Create a list from entry specs with the default config.
    pub fn new<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<EntrySpec<V>>,
    {
        Self::with_config(specs, ListConfig::default())
    }

    /// Create a list from entry specs, carrying the given config.
    ///
    /// Fails with [`SelectionListError::DuplicateIdentifier`] if two
    /// entries share an identifier.
    pub fn with_config<I, S>(specs: I, config: ListConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<EntrySpec<V>>,
    {
        let entries = normalize(specs);
        let index = build_index(&HashMap::new(), &entries)?;
        let id = ListId::new();
        log::debug!("{}: created with {} entries", id, entries.len());
        Ok(Self {
            id,
            entries,
            index,
            config,
            dirty: false,
            subscribers: Subscribers::default(),
        })
    }

    /// Get the unique ID.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ListConfig {
        &mut self.config
    }

    // -------------------------------------------------------------------------
    // Entry access
    // -------------------------------------------------------------------------

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in list order.
    pub fn entries(&self) -> &[Entry<V>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry<V>> {
        self.entries.iter()
    }

    /// Get the entry at `index`.
    pub fn entry_at(&self, index: usize) -> Result<&Entry<V>> {
        self.entries
            .get(index)
            .ok_or(SelectionListError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Get the entry with identifier `id`.
    pub fn entry_by_id(&self, id: &str) -> Result<&Entry<V>> {
        let index = self.index_of(id)?;
        Ok(&self.entries[index])
    }

    /// Get an entry by index or identifier.
    pub fn entry<'a>(&self, target: impl Into<EntryRef<'a>>) -> Result<&Entry<V>> {
        let index = self.resolve(target.into())?;
        Ok(&self.entries[index])
    }

    /// Position of the entry with identifier `id`.
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SelectionListError::IdentifierNotFound(id.to_string()))
    }

    fn resolve(&self, target: EntryRef<'_>) -> Result<usize> {
        match target {
            EntryRef::Index(index) if index < self.entries.len() => Ok(index),
            EntryRef::Index(index) => Err(SelectionListError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            }),
            EntryRef::Id(id) => self.index_of(id),
        }
    }

    // -------------------------------------------------------------------------
    // Selection queries
    // -------------------------------------------------------------------------

    /// Check if an entry is selected.
    pub fn is_selected<'a>(&self, target: impl Into<EntryRef<'a>>) -> Result<bool> {
        Ok(self.entry(target)?.is_selected())
    }

    /// Values of the selected entries, in list order.
    pub fn selected(&self) -> impl Iterator<Item = &V> {
        self.entries
            .iter()
            .filter(|entry| entry.is_selected())
            .map(Entry::value)
    }

    /// Number of selected entries.
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_selected()).count()
    }

    // -------------------------------------------------------------------------
    // Enable / disable
    // -------------------------------------------------------------------------

    /// Set the disabled flag of an entry.
    ///
    /// This never changes whether the entry is selected, and raises no
    /// selection change.
    pub fn set_disabled<'a>(
        &mut self,
        target: impl Into<EntryRef<'a>>,
        disabled: bool,
    ) -> Result<()> {
        let index = self.resolve(target.into())?;
        let entry = &mut self.entries[index];
        if entry.is_disabled() != disabled {
            entry.set_disabled(disabled);
            self.dirty = true;
            log::debug!("{}: entry #{} disabled={}", self.id, index, disabled);
        }
        Ok(())
    }

    pub fn enable<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<()> {
        self.set_disabled(target, false)
    }

    pub fn disable<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<()> {
        self.set_disabled(target, true)
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Register a handler for selection changes.
    ///
    /// Handlers run synchronously, in registration order, before the
    /// mutating call returns. A handler may mutate the list; any change it
    /// makes is delivered to every handler after the current event.
    pub fn on_selected_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut SelectionList<V>, &SelectedChanged<V>) + 'static,
    {
        self.subscribers.subscribe(handler)
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the list has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl<V: Clone> SelectionList<V> {
    /// Values of the selected entries, in list order (not selection order).
    pub fn selected_values(&self) -> Vec<V> {
        self.selected().cloned().collect()
    }

    fn notify(&mut self) {
        self.dirty = true;
        let event = SelectedChanged {
            list_id: self.id,
            selected: self.selected_values(),
        };
        self.emit(event);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select an entry.
    ///
    /// Returns `Ok(false)` without notifying if the entry is disabled.
    /// Selecting an already selected entry still notifies.
    pub fn select<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<bool> {
        self.apply(target.into(), |_| true)
    }

    /// Deselect an entry. Disabled entries are left alone.
    pub fn deselect<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<bool> {
        self.apply(target.into(), |_| false)
    }

    /// Flip the selected state of an entry. Disabled entries are left alone.
    pub fn toggle<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<bool> {
        self.apply(target.into(), |selected| !selected)
    }

    fn apply(
        &mut self,
        target: EntryRef<'_>,
        change: impl FnOnce(bool) -> bool,
    ) -> Result<bool> {
        let index = self.resolve(target)?;
        let entry = &mut self.entries[index];
        if entry.is_disabled() {
            log::trace!("{}: ignoring change to disabled entry {}", self.id, target);
            return Ok(false);
        }
        let selected = change(entry.is_selected());
        entry.set_selected(selected);
        log::trace!("{}: entry {} selected={}", self.id, target, selected);
        self.notify();
        Ok(true)
    }

    /// Select every enabled entry.
    ///
    /// Disabled entries are not selected, and any selection they still hold
    /// is released, so afterwards the selection is exactly the enabled
    /// entries. Raises one notification.
    pub fn select_all(&mut self) {
        for entry in &mut self.entries {
            let enabled = !entry.is_disabled();
            entry.set_selected(enabled);
        }
        log::debug!("{}: selected all enabled entries", self.id);
        self.notify();
    }

    /// Deselect every entry, disabled ones included. Raises one notification.
    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.set_selected(false);
        }
        log::debug!("{}: deselected all entries", self.id);
        self.notify();
    }

    /// Flip the selected state of every enabled entry. Disabled entries keep
    /// their state. Raises one notification.
    pub fn toggle_all(&mut self) {
        for entry in self.entries.iter_mut().filter(|e| !e.is_disabled()) {
            let selected = !entry.is_selected();
            entry.set_selected(selected);
        }
        log::debug!("{}: toggled all enabled entries", self.id);
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Structural mutation
    // -------------------------------------------------------------------------

    /// Append one entry.
    pub fn add_entry(&mut self, spec: impl Into<EntrySpec<V>>) -> Result<()> {
        self.add_entries([spec])
    }

    /// Append entries in order.
    ///
    /// If any identifier collides with an existing entry or with another new
    /// entry, nothing is added. Raises one notification if any added entry
    /// is selected.
    pub fn add_entries<I, S>(&mut self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<EntrySpec<V>>,
    {
        let added = normalize(specs);
        if added.is_empty() {
            return Ok(());
        }
        let start = self.entries.len();
        let new_ids = build_index(&self.index, &added)
            .inspect_err(|e| log::warn!("{}: rejected add: {}", self.id, e))?;

        let any_selected = added.iter().any(Entry::is_selected);
        let count = added.len();
        self.index
            .extend(new_ids.into_iter().map(|(id, i)| (id, start + i)));
        self.entries.extend(added);
        self.dirty = true;
        log::debug!("{}: added {} entries", self.id, count);

        if any_selected {
            self.notify();
        }
        Ok(())
    }

    /// Remove an entry and return it.
    ///
    /// Raises a notification if the removed entry was selected.
    pub fn remove_entry<'a>(&mut self, target: impl Into<EntryRef<'a>>) -> Result<Entry<V>> {
        let index = self.resolve(target.into())?;
        let entry = self.entries.remove(index);
        self.reindex();
        self.dirty = true;
        log::debug!("{}: removed entry #{}", self.id, index);

        if entry.is_selected() {
            self.notify();
        }
        Ok(entry)
    }

    /// Remove every entry. Raises a notification if anything was selected.
    pub fn clear_entries(&mut self) {
        let had_selection = self.entries.iter().any(Entry::is_selected);
        self.entries.clear();
        self.index.clear();
        self.dirty = true;
        log::debug!("{}: cleared entries", self.id);

        if had_selection {
            self.notify();
        }
    }

    /// Replace all entries. The new set is validated before anything is
    /// swapped in. Always raises one notification.
    pub fn replace_entries<I, S>(&mut self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<EntrySpec<V>>,
    {
        let entries = normalize(specs);
        let index = build_index(&HashMap::new(), &entries)
            .inspect_err(|e| log::warn!("{}: rejected replace: {}", self.id, e))?;
        log::debug!("{}: replaced entries ({})", self.id, entries.len());
        self.entries = entries;
        self.index = index;
        self.notify();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.id().map(|id| (id.to_string(), i)))
            .collect();
    }
}

fn normalize<V, I, S>(specs: I) -> Vec<Entry<V>>
where
    I: IntoIterator<Item = S>,
    S: Into<EntrySpec<V>>,
{
    specs
        .into_iter()
        .map(|spec| EntrySpec::into_entry(spec.into()))
        .collect()
}

/// Map identifiers of `entries` to their positions within `entries`,
/// failing if any identifier repeats or is already taken in `existing`.
fn build_index<V>(
    existing: &HashMap<String, usize>,
    entries: &[Entry<V>],
) -> Result<HashMap<String, usize>> {
    let mut seen = HashSet::new();
    let mut index = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        let Some(id) = entry.id() else {
            continue;
        };
        if existing.contains_key(id) || !seen.insert(id) {
            return Err(SelectionListError::DuplicateIdentifier(id.to_string()));
        }
        index.insert(id.to_string(), i);
    }
    Ok(index)
}
