//! Headless table view for a gallery of folders and files.
//!
//! The host owns the data, the sort order and the paging. This crate turns a
//! snapshot of that state into grid wiring and cells, and turns grid events
//! back into host intents.

pub mod columns;
pub mod controller;
pub mod format;
pub mod gate;
pub mod item;
pub mod sort;

pub use columns::{Cell, Column, ColumnConfig, Progress, RenderEnv, Thumbnail};
pub use controller::{ClickEvent, GridConfig, TableCallbacks, TableViewController, TableViewProps};
pub use format::{Catalog, HumanSize, SELECT_KEY, SizeFormatter, Translator};
pub use gate::SortGate;
pub use item::{Item, ItemKind, ItemMessage, MessageKind};
pub use sort::{SortDirection, SortSpec, SortSpecError};
