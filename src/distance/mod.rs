//! Distance between located entities.
//!
//! Routing cost and travel time are both plain Euclidean distance computed
//! from coordinates on demand; nothing is cached.

mod euclidean;

pub use euclidean::{euclidean, Point};
