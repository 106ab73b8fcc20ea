//! # Work Item Constants
//!
//! Reference names used by the work item tracking service. Field paths in a
//! field-update document are built from these names.

/// Field reference names
pub mod fields {
    pub const TITLE: &str = "System.Title";
    pub const ITERATION_PATH: &str = "System.IterationPath";
    pub const AREA_PATH: &str = "System.AreaPath";
    pub const TEAM_PROJECT: &str = "System.TeamProject";
    pub const ORIGINAL_ESTIMATE: &str = "Microsoft.VSTS.Scheduling.OriginalEstimate";
    pub const REMAINING_WORK: &str = "Microsoft.VSTS.Scheduling.RemainingWork";
}

/// Link relation types
pub mod relations {
    /// Child-to-parent hierarchy link
    pub const HIERARCHY_REVERSE: &str = "System.LinkTypes.Hierarchy-Reverse";
}

/// Keys of the `_links` collection on a work item
pub mod links {
    pub const SELF: &str = "self";
    pub const HTML: &str = "html";
}

/// Work item type created for every descriptor
pub const TASK_WORK_ITEM_TYPE: &str = "Task";

/// REST api-version sent with every request
pub const DEFAULT_API_VERSION: &str = "7.0";

/// Media type for field-update documents
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Parent id meaning "no parent configured"
pub const UNSET_PARENT_ID: i64 = 0;

/// Process exit codes
pub mod exit_codes {
    /// Every task was created, or a dry run finished
    pub const SUCCESS: u8 = 0;
    /// Configuration could not be loaded or the client could not be built
    pub const STARTUP_ERROR: u8 = 1;
    /// The parent work item could not be resolved; nothing was submitted
    pub const PARENT_UNRESOLVED: u8 = 2;
    /// The batch ran but at least one task failed
    pub const PARTIAL_FAILURE: u8 = 3;
}
