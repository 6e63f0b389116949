//! Template store implementations and rendering
//!
//! Templates are addressed by `(search path, name)`. A generation context
//! supplies two search paths, and the primary one is always consulted first.

pub mod embedded;
pub mod errors;
pub mod filesystem;
pub mod memory;
pub mod renderer;
pub mod store;

pub use embedded::*;
pub use errors::*;
pub use filesystem::*;
pub use memory::*;
pub use store::{ResolvedTemplate, TemplateStore, resolve_template};
