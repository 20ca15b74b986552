//! Infrastructure layer: external service integrations.

pub mod discovery;
