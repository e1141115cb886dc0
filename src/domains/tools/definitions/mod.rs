//! Tool definitions module.
//!
//! Each tool is defined in its own file and grouped by the domain it serves.

pub mod docs;
pub mod util;
pub mod web;

pub use docs::{DownloadDocsMdTool, DownloadDocsTool};
pub use util::{AddTool, EchoTool};
pub use web::{FetchMdTool, FetchMultiTool, FetchTool};
