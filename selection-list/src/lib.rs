pub mod config;
pub mod error;
pub mod list;

pub use config::ListConfig;
pub use error::{Result, SelectionListError};
pub use list::{
    Entry, EntryRef, EntrySpec, ListId, SelectedChanged, SelectionList, SubscriptionId,
};

pub mod prelude {
    pub use crate::config::ListConfig;
    pub use crate::error::SelectionListError;
    pub use crate::list::{Entry, EntryRef, EntrySpec, SelectedChanged, SelectionList};
}
