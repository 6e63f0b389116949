//! Packaging - turns a finished output root into a downloadable archive
//!
//! Packaging runs after every generator has finished and knows nothing about
//! templates. It only walks the tree and names the result.

pub mod archive;
pub mod errors;
pub mod naming;

pub use archive::*;
pub use errors::*;
pub use naming::*;
