//! The hitting-set search which enumerates all minimal diagnoses (or, with a diagnosis labeler,
//! all minimal conflicts) of a knowledge base.
mod engine;
mod node;
mod options;

pub use engine::*;
pub use node::*;
pub use options::*;
