pub mod brute_force;
pub mod cost;
pub mod error;
pub mod held_karp;
pub mod matrix;
pub mod node;
pub mod tour;

pub use brute_force::brute_force;
pub use cost::Cost;
pub use error::InvalidInputError;
pub use held_karp::held_karp;
pub use matrix::DistanceMatrix;
pub use node::{Node, NodeSet};
pub use tour::Tour;
