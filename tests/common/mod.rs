#![allow(dead_code)]

pub mod mock_client;

pub use mock_client::*;

use workitem_batch::{BatchConfig, TaskDetail};

/// Batch configuration pointing at `parent_id` with the given tasks
pub fn batch_config(parent_id: i64, tasks: Vec<TaskDetail>) -> BatchConfig {
    BatchConfig {
        org_url: "https://dev.azure.com/contoso".to_string(),
        credential: "test-pat".to_string(),
        parent_id,
        tasks,
        ..Default::default()
    }
}
