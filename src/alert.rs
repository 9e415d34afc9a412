//! Alert Hooks
//!
//! What happens to future-dated items after a filter pass: typed hooks, the
//! built-in `log` and `report` strategies, a registry of named strategies for
//! configuration-driven selection, and the single-use completion signal that
//! hands control back to the host pipeline.

pub mod completion;
pub mod hook;
pub mod registry;

pub use completion::{Completion, Done};
pub use hook::{Alert, LogAlert, ReportAlert};
pub use registry::{AlertRegistry, AlertSpec};
