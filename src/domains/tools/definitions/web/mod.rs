pub mod fetch;
pub mod fetch_md;
pub mod fetch_multi;

pub use fetch::FetchTool;
pub use fetch_md::FetchMdTool;
pub use fetch_multi::FetchMultiTool;
