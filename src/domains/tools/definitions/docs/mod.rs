pub mod download;
pub mod download_md;

pub use download::DownloadDocsTool;
pub use download_md::DownloadDocsMdTool;
