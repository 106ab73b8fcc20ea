//! # Work Item Clients
//!
//! The [`WorkItemClient`] capability and its REST implementation.

pub mod rest_client;
pub mod traits;

pub use rest_client::{RestClientConfig, RestWorkItemClient};
pub use traits::WorkItemClient;
