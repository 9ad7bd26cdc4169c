//! Core state machine for the checkout address fields widget.
//!
//! Everything in this crate is synchronous and free of I/O: the dataset is
//! handed in already fetched, settings arrive as a JSON snapshot, and side
//! effects are returned as values for the caller to execute.

pub mod config;
pub mod error;
pub mod gate;
pub mod hierarchy;
pub mod layout;
pub mod locale;
pub mod record;
pub mod runtime_config;
pub mod settings;
pub mod sync;

pub use config::{load_runtime_config, load_runtime_config_from_env};
pub use error::ConfigError;
pub use gate::{Behavior, InterceptDecision, ValidationErrors};
pub use hierarchy::{HierarchyFilter, OptionLists, SelectionState};
pub use layout::{FieldView, WidgetView};
pub use locale::Language;
pub use record::{Dataset, LocationRecord};
pub use runtime_config::RuntimeConfig;
pub use settings::{Field, FieldConfig, FieldToggle, Settings};
pub use sync::{AttributeChange, AttributeSync, PersistRequest, PersistTicket};
