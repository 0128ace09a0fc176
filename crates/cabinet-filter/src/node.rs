//! Opaque node abstraction.

/// A file-system-like entity exposing named properties.
///
/// Nodes are supplied by an external provider layer and are opaque to the
/// engine core, which never inspects them. Only the per-column matchers read
/// properties, and each matcher decides how to interpret the raw property
/// string for its column (e.g. `"size"` as a byte count, `"modified"` as a
/// date).
pub trait Node {
    /// Returns the value of a named property, or `None` if the node does not
    /// expose it.
    fn property(&self, name: &str) -> Option<String>;
}
