//! Ray casting primitives

pub mod primitives;

pub use primitives::{Ray, Triangle};
