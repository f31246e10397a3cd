//! Core types, validation rules and services for the Alma records service.
//!
//! This crate is deliberately free of HTTP dependencies. The API crate wraps a
//! [`Registry`] and translates its outcomes into responses.

pub mod dashboard;
pub mod error;
pub mod fee;
pub mod guardian;
pub mod participant;
pub mod registry;
pub mod rules;
pub mod site;
pub mod store;

pub use error::{Dependents, Entity, Error, ErrorKind, Result};
pub use registry::Registry;
pub use store::{EntityStore, Id};
