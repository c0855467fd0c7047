//! Log sink boundary contract.
//!
//! [`LogSink`] is the surface a front-end logger talks to. The JSON sink
//! implements it, test doubles implement it, and a bridge to another logging
//! facade only has to implement these methods.

use logerr_kverrors::{ErrorValue, Value};
use std::any::Any;
use std::sync::Arc;

/// Boundary contract for structured log sinks.
pub trait LogSink: Send + Sync {
    /// Returns true when records at `level` would be emitted.
    fn enabled(&self, level: u32) -> bool;

    /// Emit an informational record at `level` when enabled.
    #[track_caller]
    fn info(&self, level: u32, msg: &str, keys_and_values: Vec<Value>);

    /// Emit an error record. Never gated by verbosity.
    #[track_caller]
    fn error(&self, error: Option<ErrorValue>, msg: &str, keys_and_values: Vec<Value>);

    /// A derived sink whose records carry the extra attributes.
    fn with_values(&self, keys_and_values: Vec<Value>) -> Arc<dyn LogSink>;

    /// A derived sink whose component name is extended with `name`.
    fn with_name(&self, name: &str) -> Arc<dyn LogSink>;

    /// Access the concrete sink for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Type name of the concrete sink, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
