//! Wire-stable keys for the built-in record fields.

/// Record timestamp (RFC3339 with nanoseconds, UTC).
pub const TIMESTAMP_KEY: &str = "_ts";
/// Call site as `path:line`; present in developer mode only.
pub const FILE_LINE_KEY: &str = "_file:line";
/// Sink verbosity at emission time, as a decimal string.
pub const LEVEL_KEY: &str = "_level";
/// Component name of the emitting sink.
pub const COMPONENT_KEY: &str = "_component";
/// Record message.
pub const MESSAGE_KEY: &str = "_message";
/// Error attached by `Sink::error`.
pub const ERROR_KEY: &str = "_error";

/// Keys owned by the fixed record fields. Context entries with these keys are
/// not written.
pub const FIXED_KEYS: [&str; 5] = [
    TIMESTAMP_KEY,
    FILE_LINE_KEY,
    LEVEL_KEY,
    COMPONENT_KEY,
    MESSAGE_KEY,
];

/// Returns true when `key` belongs to a fixed record field.
pub fn is_fixed_key(key: &str) -> bool {
    FIXED_KEYS.contains(&key)
}
