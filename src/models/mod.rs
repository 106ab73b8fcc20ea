//! # Models
//!
//! Data shapes exchanged with the work item tracking service.

pub mod patch_document;
pub mod task_detail;
pub mod work_item;

pub use patch_document::{PatchDocument, PatchOp, PatchOperation, WorkItemRelation};
pub use task_detail::TaskDetail;
pub use work_item::{ReferenceLink, WorkItem};
