//! Default constants for shim configuration.

/// Prefix prepended to a property name to find the backing field of a
/// synthesized object (`Name` -> `_Name`).
pub const DEFAULT_BACKING_FIELD_PREFIX: &str = "_";
