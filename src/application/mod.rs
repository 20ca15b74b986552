//! Application layer: batch orchestration over the domain traits.

pub mod services;
