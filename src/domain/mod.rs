//! # Domain Layer
//!
//! Value objects, entities and pure domain services of the comparison
//! engine. Nothing in this layer performs I/O or holds state between calls.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
