//! Selection list - an ordered, multi-selectable list of entries.
//!
//! The list provides:
//! - Construction from ready-made entries or `(value, prompt)` pairs
//! - Lookup by position or by unique identifier
//! - Select, deselect and toggle (single and bulk), skipping disabled entries
//! - Synchronous change notifications carrying the selected values
//!
//! Rendering, focus and input handling belong to the caller.
//!
//! # Example
//!
//! ```
//! use selection_list::prelude::*;
//!
//! let mut list = SelectionList::new([("rust", "Rust"), ("go", "Go"), ("zig", "Zig")])?;
//! list.on_selected_changed(|_, event| println!("now selected: {:?}", event.selected));
//!
//! list.toggle(2)?;
//! list.select(0)?;
//! assert_eq!(list.selected_values(), vec!["rust", "zig"]);
//! # Ok::<(), SelectionListError>(())
//! ```

mod entry;
mod events;
mod state;

pub use entry::{Entry, EntryRef, EntrySpec};
pub use events::{SelectedChanged, SubscriptionId};
pub use state::{ListId, SelectionList};
