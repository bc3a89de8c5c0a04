//! Project classification
//!
//! A cloned tree is assigned exactly one [`ProjectKind`], which decides the
//! toolchain used to compile it.

pub mod classifier;
pub mod project_kind;

pub use classifier::{collect_cxx_sources, ProjectClassifier};
pub use project_kind::ProjectKind;
