//! cloudgen - scaffolds standalone Spring Cloud servers from a property blob
//!
//! A request names a server type (`sc-alone-radio`), a project name and a
//! template variant. The matching service renders its templates into a fresh
//! output directory, which is then packaged as a zip archive.
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod packaging;
pub mod properties;
pub mod services;
pub mod templates;
pub mod transport;

pub use error::{ErrorKind, ScaffoldError};
