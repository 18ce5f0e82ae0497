use axum::extract::{Json, Path, Query, State};
use serde_json::{json, Value};
use tracing::error;

use crate::server::{
    config::AppState,
    models::issue::{
        CreateIssueRequest, DeleteIssueRequest, Issue, IssueUpdate, ListIssuesQuery, NewIssue,
        UpdateIssueRequest,
    },
};

/// GET /api/issues/{project}
///
/// Fetches the project's issues and narrows them with whatever exact-match
/// filters were supplied. Filters combine with AND semantics; empty query
/// values are ignored. `open` is validated last, so a bad value still
/// short-circuits the response into an error object.
pub async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(filter): Query<ListIssuesQuery>,
) -> Json<Value> {
    let mut issues = match state.store.find_by_project(&project).await {
        Ok(issues) => issues,
        Err(e) => {
            error!("Failed to fetch issues for project {}: {:?}", project, e);
            return Json(json!({ "error": "could not fetch issues" }));
        }
    };

    retain_eq(&mut issues, &filter.id, |issue| &issue.id);
    retain_eq(&mut issues, &filter.issue_title, |issue| &issue.issue_title);
    retain_eq(&mut issues, &filter.issue_text, |issue| &issue.issue_text);
    retain_eq(&mut issues, &filter.created_on, |issue| &issue.created_on);
    retain_eq(&mut issues, &filter.updated_on, |issue| &issue.updated_on);
    retain_eq(&mut issues, &filter.created_by, |issue| &issue.created_by);
    retain_eq(&mut issues, &filter.assigned_to, |issue| &issue.assigned_to);
    retain_eq(&mut issues, &filter.status_text, |issue| &issue.status_text);

    match filter.open.as_deref().filter(|value| !value.is_empty()) {
        Some("true") => issues.retain(|issue| issue.open),
        Some("false") => issues.retain(|issue| !issue.open),
        Some(_) => return Json(json!({ "error": "query:open must be true or false" })),
        None => {}
    }

    Json(json!(issues))
}

fn retain_eq(issues: &mut Vec<Issue>, value: &Option<String>, field: fn(&Issue) -> &str) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        issues.retain(|issue| field(issue) == value);
    }
}

/// POST /api/issues/{project}
pub async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Json(request): Json<CreateIssueRequest>,
) -> Json<Value> {
    let issue = match NewIssue::from_request(&project, request) {
        Ok(issue) => issue,
        Err(e) => return Json(json!({ "error": e.to_string() })),
    };

    match state.store.insert(issue).await {
        Ok(issue) => Json(json!(issue)),
        Err(e) => {
            error!("Failed to insert issue: {:?}", e);
            Json(json!({ "error": "required field(s) missing" }))
        }
    }
}

/// PUT /api/issues/{project}
///
/// The project segment does not scope updates; the issue is looked up by
/// `_id` alone. Every failure past the missing-id check echoes the id back
/// as given, even when it is malformed.
pub async fn update_issue(
    State(state): State<AppState>,
    Path(_project): Path<String>,
    Json(request): Json<UpdateIssueRequest>,
) -> Json<Value> {
    let Some(id) = supplied_id(&request.id) else {
        return Json(json!({ "error": "missing _id" }));
    };

    let update = IssueUpdate::from_request(&request);
    if update.is_empty() {
        return Json(json!({ "error": "no update field(s) sent", "_id": id }));
    }

    match state.store.update_by_id(&id, update).await {
        Ok(true) => Json(json!({ "result": "successfully updated", "_id": id })),
        Ok(false) => Json(json!({ "error": "could not update", "_id": id })),
        Err(e) => {
            error!("Failed to update issue {}: {:?}", id, e);
            Json(json!({ "error": "could not update", "_id": id }))
        }
    }
}

/// DELETE /api/issues/{project}
///
/// Like update, deletion ignores the project segment and works off `_id`.
pub async fn delete_issue(
    State(state): State<AppState>,
    Path(_project): Path<String>,
    Json(request): Json<DeleteIssueRequest>,
) -> Json<Value> {
    let Some(id) = supplied_id(&request.id) else {
        return Json(json!({ "error": "missing _id" }));
    };

    match state.store.delete_by_id(&id).await {
        Ok(true) => Json(json!({ "result": "successfully deleted", "_id": id })),
        Ok(false) => Json(json!({ "error": "could not delete", "_id": id })),
        Err(e) => {
            error!("Failed to delete issue {}: {:?}", id, e);
            Json(json!({ "error": "could not delete", "_id": id }))
        }
    }
}

fn supplied_id(id: &Option<String>) -> Option<String> {
    id.as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
