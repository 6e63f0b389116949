//! Generation domain module - turns properties into files on disk
//!
//! A [`Generator`] describes a single output file: which template renders it,
//! where it lands and what data the template sees. The [`GeneratorRunner`]
//! executes generators in order, enforcing that no two generators in one run
//! write the same path.

pub mod errors;
pub mod layout;
pub mod model;
pub mod naming;
pub mod runner;
pub mod traits;

pub use errors::*;
pub use model::*;
pub use runner::*;
pub use traits::*;
