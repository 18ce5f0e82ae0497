use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::server::models::timestamp;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IssueError {
    #[error("required field(s) missing")]
    MissingRequiredField,
}

/// A persisted issue. `project` partitions issues for listing but is never
/// part of the wire representation; responses carry exactly the nine fields
/// below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing, default)]
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: String,
    pub updated_on: String,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

/// An issue validated and fully populated, minus the identifier the store
/// assigns on insert.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: String,
    pub updated_on: String,
    pub created_by: String,
    pub assigned_to: String,
    pub open: bool,
    pub status_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

impl NewIssue {
    /// Validates a create request and produces the document to persist.
    /// `issue_title`, `issue_text` and `created_by` must be present and
    /// non-empty; the optional fields default to empty strings. The project
    /// is taken as-is from the path, with no validation of its own.
    pub fn from_request(project: &str, request: CreateIssueRequest) -> Result<Self, IssueError> {
        let issue_title = required(request.issue_title)?;
        let issue_text = required(request.issue_text)?;
        let created_by = required(request.created_by)?;
        let stamp = timestamp::creation_stamp();

        Ok(Self {
            project: project.to_string(),
            issue_title,
            issue_text,
            created_on: stamp.clone(),
            updated_on: stamp,
            created_by,
            assigned_to: request.assigned_to.unwrap_or_default(),
            open: true,
            status_text: request.status_text.unwrap_or_default(),
        })
    }

    pub fn into_issue(self, id: String) -> Issue {
        Issue {
            id,
            project: self.project,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_on: self.created_on,
            updated_on: self.updated_on,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            open: self.open,
            status_text: self.status_text,
        }
    }
}

fn required(field: Option<String>) -> Result<String, IssueError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(IssueError::MissingRequiredField),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateIssueRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub open: Option<bool>,
    pub status_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteIssueRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Query parameters accepted by the list endpoint. Everything arrives as a
/// string, including `open`, which is validated against "true"/"false" by the
/// handler.
#[derive(Debug, Default, Deserialize)]
pub struct ListIssuesQuery {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<String>,
}

/// The set of fields a partial update writes. A string field is included only
/// when it was sent with a non-empty value; `open` is included only when it
/// was sent as an explicit `false` (this endpoint closes issues but never
/// reopens them). `updated_on` is always stamped.
#[derive(Debug, Clone)]
pub struct IssueUpdate {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub open: Option<bool>,
    pub status_text: Option<String>,
    pub updated_on: String,
}

impl IssueUpdate {
    pub fn from_request(request: &UpdateIssueRequest) -> Self {
        Self {
            issue_title: supplied(&request.issue_title),
            issue_text: supplied(&request.issue_text),
            created_by: supplied(&request.created_by),
            assigned_to: supplied(&request.assigned_to),
            open: request.open.filter(|open| !open),
            status_text: supplied(&request.status_text),
            updated_on: timestamp::update_stamp(),
        }
    }

    /// True when no writable field survived filtering. The `updated_on` stamp
    /// does not count: it is only written alongside a real change.
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.open.is_none()
            && self.status_text.is_none()
    }

    pub fn apply(&self, issue: &mut Issue) {
        if let Some(issue_title) = &self.issue_title {
            issue.issue_title = issue_title.clone();
        }
        if let Some(issue_text) = &self.issue_text {
            issue.issue_text = issue_text.clone();
        }
        if let Some(created_by) = &self.created_by {
            issue.created_by = created_by.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            issue.assigned_to = assigned_to.clone();
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
        if let Some(status_text) = &self.status_text {
            issue.status_text = status_text.clone();
        }
        issue.updated_on = self.updated_on.clone();
    }
}

fn supplied(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
