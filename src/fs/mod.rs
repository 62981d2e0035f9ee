//! Filesystem nodes and the operations that list and change them.

pub(crate) mod node;
mod operations;

pub use node::{Node, NodeAction, NodeType};
pub use operations::{AccessDuration, ShareRequest, ShareResult, UploadRequest, normalize_name};
