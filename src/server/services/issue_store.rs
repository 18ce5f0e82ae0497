use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::server::models::issue::{Issue, IssueUpdate, NewIssue};

/// The document-store primitives the issue endpoint needs. Handlers hold this
/// behind an `Arc` so the backend can be swapped (Postgres in production, the
/// in-memory store in tests).
///
/// `update_by_id` and `delete_by_id` report whether any document matched; a
/// malformed identifier counts as no match, so callers cannot distinguish the
/// two cases.
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn find_by_project(&self, project: &str) -> Result<Vec<Issue>>;
    async fn insert(&self, issue: NewIssue) -> Result<Issue>;
    async fn update_by_id(&self, id: &str, update: IssueUpdate) -> Result<bool>;
    async fn delete_by_id(&self, id: &str) -> Result<bool>;
}

/// In-memory backend. Keeps insertion order so listings are stable.
#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<Vec<Issue>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find_by_project(&self, project: &str) -> Result<Vec<Issue>> {
        let issues = self.issues.read().await;
        Ok(issues
            .iter()
            .filter(|issue| issue.project == project)
            .cloned()
            .collect())
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue> {
        let issue = issue.into_issue(Uuid::new_v4().to_string());
        let mut issues = self.issues.write().await;
        issues.push(issue.clone());
        Ok(issue)
    }

    async fn update_by_id(&self, id: &str, update: IssueUpdate) -> Result<bool> {
        let mut issues = self.issues.write().await;
        match issues.iter_mut().find(|issue| issue.id == id) {
            Some(issue) => {
                update.apply(issue);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut issues = self.issues.write().await;
        match issues.iter().position(|issue| issue.id == id) {
            Some(index) => {
                issues.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
