//! The verbosity-gated JSON log sink.

use crate::caller;
use crate::clock::{self, TimestampFn};
use crate::encoder::{EncodeError, Encoder, JsonEncoder};
use crate::keys::ERROR_KEY;
use crate::record::Line;
use crate::verbosity::Verbosity;
use logerr_kverrors::{Attrs, ErrorValue, KVError, Value, combine, to_map};
use logerr_ports::{LogSink, LogWriter};
use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Produces one JSON record per emission.
///
/// Writer, verbosity and inherited context sit behind a single lock; the name,
/// encoder and clock are fixed for the life of the sink. Derived sinks
/// (`with_values`, `with_name`) copy what they need and never share state
/// with their parent afterwards.
pub struct Sink {
    name: String,
    encoder: Arc<dyn Encoder>,
    clock: Option<TimestampFn>,
    state: RwLock<State>,
}

struct State {
    verbosity: Verbosity,
    output: Arc<dyn LogWriter>,
    context: Attrs,
}

/// What an emission needs from the shared state, taken in one read.
struct Snapshot {
    verbosity: Verbosity,
    output: Arc<dyn LogWriter>,
    context: Attrs,
}

impl Sink {
    /// A sink named `name` writing JSON to `output` at verbosity 0.
    pub fn new(name: impl Into<String>, output: Arc<dyn LogWriter>) -> Self {
        Self {
            name: name.into(),
            encoder: Arc::new(JsonEncoder),
            clock: None,
            state: RwLock::new(State {
                verbosity: Verbosity::ZERO,
                output,
                context: Attrs::new(),
            }),
        }
    }

    /// Set the initial verbosity.
    #[must_use]
    pub fn with_verbosity(self, verbosity: impl Into<Verbosity>) -> Self {
        self.write_state().verbosity = verbosity.into();
        self
    }

    /// Replace the encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Seed the inherited context from a flat key/value list.
    #[must_use]
    pub fn with_context(self, keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        self.write_state().context = to_map(keys_and_values);
        self
    }

    /// Use `clock` instead of the process-wide timestamp function.
    ///
    /// Derived sinks inherit the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Component name written under `_component`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The encoder in use.
    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// A copy of the inherited context.
    pub fn context(&self) -> Attrs {
        self.read_state().context.clone()
    }

    /// Returns true when records at `level` are emitted.
    pub fn enabled(&self, level: u32) -> bool {
        self.read_state().verbosity.allows(level)
    }

    /// Emit a record at `level` if the sink is verbose enough.
    ///
    /// Call-site attributes override inherited ones.
    #[track_caller]
    pub fn info(&self, level: u32, msg: &str, keys_and_values: impl IntoIterator<Item = Value>) {
        let location = Location::caller();
        let Some(snapshot) = self.snapshot(Some(level), keys_and_values) else {
            return;
        };
        self.emit(location, msg, snapshot);
    }

    /// Emit an error record. Never gated by verbosity.
    ///
    /// Without an error this behaves like `info(0, ..)`. A `KVError` is
    /// attached under `_error` as-is; any other error is attached as a
    /// `KVError` carrying its text.
    #[track_caller]
    pub fn error(
        &self,
        error: Option<ErrorValue>,
        msg: &str,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) {
        let location = Location::caller();
        let Some(mut snapshot) = self.snapshot(None, keys_and_values) else {
            return;
        };
        if let Some(error) = error {
            snapshot
                .context
                .insert(ERROR_KEY.to_string(), Value::Error(normalize(error)));
        }
        self.emit(location, msg, snapshot);
    }

    /// A sink whose context is this sink's context plus the given pairs.
    #[must_use]
    pub fn with_values(&self, keys_and_values: impl IntoIterator<Item = Value>) -> Self {
        let state = self.write_state();
        let child = State {
            verbosity: state.verbosity,
            output: Arc::clone(&state.output),
            context: combine(&state.context, keys_and_values),
        };
        drop(state);
        self.derive(self.name.clone(), child)
    }

    /// A sink named `<name>_<suffix>`, or `<suffix>` when this sink is unnamed.
    #[must_use]
    pub fn with_name(&self, suffix: &str) -> Self {
        let state = self.write_state();
        let child = State {
            verbosity: state.verbosity,
            output: Arc::clone(&state.output),
            context: state.context.clone(),
        };
        drop(state);
        let name = if self.name.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{suffix}", self.name)
        };
        self.derive(name, child)
    }

    /// Replace the writer records go to.
    pub fn set_output(&self, output: Arc<dyn LogWriter>) {
        self.write_state().output = output;
    }

    /// Change the verbosity.
    pub fn set_verbosity(&self, level: u32) {
        self.write_state().verbosity = Verbosity::new(level);
    }

    /// The current verbosity.
    pub fn get_verbosity(&self) -> u32 {
        self.read_state().verbosity.get()
    }

    fn derive(&self, name: String, state: State) -> Self {
        Self {
            name,
            encoder: Arc::clone(&self.encoder),
            clock: self.clock.clone(),
            state: RwLock::new(state),
        }
    }

    fn snapshot(
        &self,
        gate: Option<u32>,
        keys_and_values: impl IntoIterator<Item = Value>,
    ) -> Option<Snapshot> {
        let state = self.read_state();
        if gate.is_some_and(|level| !state.verbosity.allows(level)) {
            return None;
        }
        Some(Snapshot {
            verbosity: state.verbosity,
            output: Arc::clone(&state.output),
            context: combine(&state.context, keys_and_values),
        })
    }

    fn emit(&self, location: &Location<'_>, msg: &str, snapshot: Snapshot) {
        let line = Line {
            timestamp: self.now(),
            file_line: caller::file_line(location),
            verbosity: snapshot.verbosity,
            component: self.name.clone(),
            message: msg.to_string(),
            context: snapshot.context,
        };
        self.write(snapshot.output.as_ref(), &line);
    }

    fn write(&self, output: &dyn LogWriter, line: &Line) {
        match self.encoder.encode(output, line) {
            Ok(()) | Err(EncodeError::Io(_)) => {},
            Err(error) => {
                let fallback = fallback_line(self.encoder.name(), line, &error);
                let _ = output.write_all(fallback.as_bytes());
            },
        }
    }

    fn now(&self) -> String {
        self.clock
            .as_ref()
            .map_or_else(clock::timestamp, |clock| clock())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        formatter
            .debug_struct("Sink")
            .field("name", &self.name)
            .field("encoder", &self.encoder)
            .field("verbosity", &state.verbosity)
            .field("context", &state.context)
            .finish_non_exhaustive()
    }
}

impl LogSink for Sink {
    fn enabled(&self, level: u32) -> bool {
        Self::enabled(self, level)
    }

    #[track_caller]
    fn info(&self, level: u32, msg: &str, keys_and_values: Vec<Value>) {
        Self::info(self, level, msg, keys_and_values);
    }

    #[track_caller]
    fn error(&self, error: Option<ErrorValue>, msg: &str, keys_and_values: Vec<Value>) {
        Self::error(self, error, msg, keys_and_values);
    }

    fn with_values(&self, keys_and_values: Vec<Value>) -> Arc<dyn LogSink> {
        Arc::new(Self::with_values(self, keys_and_values))
    }

    fn with_name(&self, name: &str) -> Arc<dyn LogSink> {
        Arc::new(Self::with_name(self, name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Keep `KVError`s as they are; turn anything else into one carrying its text.
fn normalize(error: ErrorValue) -> ErrorValue {
    if error.as_kv_error().is_some() {
        error
    } else {
        ErrorValue::new(KVError::new(error.to_string(), Vec::<Value>::new()))
    }
}

/// Diagnostic line written when a record cannot be encoded.
fn fallback_line(encoder: &str, line: &Line, cause: &EncodeError) -> String {
    format!(
        "{{\"message\":\"failed to encode message\",\"encoder\":{},\"log\":{},\"cause\":{}}}\n",
        quote(encoder),
        quote(&format!("{line:?}")),
        quote(&cause.to_string()),
    )
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("{text:?}"))
}
