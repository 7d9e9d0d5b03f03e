//! Session-related types.
//!
//! The session record carries no cart data, only a marker that makes the
//! session get an ID. Carts are looked up by that ID.

/// Session keys.
pub mod keys {
    /// Marks the session as belonging to a visitor.
    pub const VISITOR: &str = "visitor";
}
