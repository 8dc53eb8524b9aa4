//! REST adapter for the Azure DevOps work item tracking service.

mod client;
mod models;

pub use client::{AzureDevOpsWorkItemStore, StoreSettings};
