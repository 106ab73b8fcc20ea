//! Mock Work Item Client
//!
//! In-memory implementation of the WorkItemClient trait that records every
//! call and can be scripted to fail.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use workitem_batch::constants::{fields, links};
use workitem_batch::{ClientError, ClientResult, PatchDocument, WorkItem, WorkItemClient};

/// A recorded create_work_item call
#[derive(Debug, Clone)]
pub struct CreateCall {
    pub document: PatchDocument,
    pub project: String,
    pub work_item_type: String,
}

impl CreateCall {
    /// Title carried by the recorded document
    pub fn title(&self) -> String {
        self.document
            .field_value(fields::TITLE)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Mock client state for tracking calls
#[derive(Debug, Default, Clone)]
pub struct MockClientState {
    pub fetch_calls: Vec<i64>,
    pub create_calls: Vec<CreateCall>,
}

/// What fetch_work_item answers with
#[derive(Debug, Clone)]
pub enum FetchBehavior {
    Return(WorkItem),
    NotFound,
    ServiceError(u16, String),
}

pub struct MockWorkItemClient {
    fetch: FetchBehavior,
    failing_titles: HashSet<String>,
    omit_html_link: bool,
    create_delay: Option<Duration>,
    next_id: AtomicI64,
    state: Arc<Mutex<MockClientState>>,
}

/// A parent work item shaped like the service's response
pub fn parent_work_item(id: i64, iteration: &str, area: &str, project: &str) -> WorkItem {
    WorkItem::new(id)
        .with_field(fields::ITERATION_PATH, iteration)
        .with_field(fields::AREA_PATH, area)
        .with_field(fields::TEAM_PROJECT, project)
        .with_field("System.WorkItemType", "User Story")
        .with_link(
            links::SELF,
            format!("https://dev.azure.com/contoso/_apis/wit/workItems/{id}"),
        )
}

impl MockWorkItemClient {
    /// Client whose fetch returns `parent`
    pub fn with_parent(parent: WorkItem) -> Self {
        Self::new(FetchBehavior::Return(parent))
    }

    pub fn new(fetch: FetchBehavior) -> Self {
        Self {
            fetch,
            failing_titles: HashSet::new(),
            omit_html_link: false,
            create_delay: None,
            next_id: AtomicI64::new(1000),
            state: Arc::new(Mutex::new(MockClientState::default())),
        }
    }

    /// Make creation of the task with this title fail with a service error
    pub fn failing_on(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    /// Return created items without an html link
    pub fn without_html_links(mut self) -> Self {
        self.omit_html_link = true;
        self
    }

    /// Delay each creation call
    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    /// Get the current state for assertions
    pub fn get_state(&self) -> MockClientState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkItemClient for MockWorkItemClient {
    fn endpoint(&self) -> &str {
        "mock://work-items"
    }

    async fn fetch_work_item(&self, id: i64) -> ClientResult<WorkItem> {
        self.state.lock().unwrap().fetch_calls.push(id);

        match &self.fetch {
            FetchBehavior::Return(item) => Ok(item.clone()),
            FetchBehavior::NotFound => Err(ClientError::WorkItemNotFound {
                id,
                message: format!(
                    "TF401232: Work item {id} does not exist, or you do not have permissions to read it."
                ),
            }),
            FetchBehavior::ServiceError(status, message) => {
                Err(ClientError::api_error(*status, message.clone()))
            }
        }
    }

    async fn create_work_item(
        &self,
        document: &PatchDocument,
        project: &str,
        work_item_type: &str,
    ) -> ClientResult<WorkItem> {
        let call = CreateCall {
            document: document.clone(),
            project: project.to_string(),
            work_item_type: work_item_type.to_string(),
        };
        let title = call.title();
        self.state.lock().unwrap().create_calls.push(call);

        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_titles.contains(&title) {
            return Err(ClientError::api_error(
                400,
                format!("TF401320: Rule Error for field Title. Error code: Required, InvalidEmpty. ({title})"),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = WorkItem::new(id).with_field(fields::TITLE, title.as_str());
        if !self.omit_html_link {
            created = created.with_link(
                links::HTML,
                format!("https://dev.azure.com/contoso/{project}/_workitems/edit/{id}"),
            );
        }
        Ok(created)
    }
}
