//! Core module - stores, lifecycle and query components

pub mod accounts;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod record;
pub mod registry;
pub mod search;
pub mod store;

pub use accounts::{AccountsStore, Role, Session, UserAccount};
pub use autocomplete::AutocompleteField;
pub use config::Config;
pub use error::{InventoryError, Result};
pub use lifecycle::{ImportStats, RecordLifecycle};
pub use platform::PlatformInfo;
pub use record::{InventoryRecord, RecordDraft, DISPLAY_HEADERS};
pub use registry::{CategoryRegistry, CategoryTable};
pub use search::{Metric, SearchEngine};
pub use store::InventoryStore;
