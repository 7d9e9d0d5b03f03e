//! Types stored outside the core model, such as session keys.

pub mod session;
