//! Domain modules containing business logic organized by bounded contexts.
//!
//! - **tools**: tool descriptors, registry and the individual tool definitions
//! - **web**: web page fetching and HTML to Markdown extraction
//! - **docs**: documentation download from git repositories

pub mod docs;
pub mod tools;
pub mod web;
