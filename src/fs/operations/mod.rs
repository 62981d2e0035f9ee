//! Node operations against the nodes and share endpoints, split into focused modules.

mod browse;
mod dir_ops;
mod share;
mod upload;
mod utils;

pub use share::{AccessDuration, ShareRequest, ShareResult};
pub use upload::UploadRequest;
pub use utils::normalize_name;
