//! Checkout address fields widget.
//!
//! [`AddressWidget`] is the synchronous state machine: host pushes and
//! buyer interactions go in, [`Effect`]s come out. [`WidgetRuntime`] runs
//! those effects on tokio against the injected [`DatasetSource`] and
//! [`AttributeWriter`].

pub mod host;
pub mod runtime;
pub mod telemetry;
pub mod widget;

pub use host::{AttributeWriter, DatasetSource, HostError, HostSnapshot, ShippingAddress};
pub use runtime::WidgetRuntime;
pub use telemetry::{init_tracing, TelemetryError};
pub use widget::{AddressWidget, Effect, FetchRequest, WidgetEvent};
