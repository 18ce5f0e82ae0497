use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::server::models::issue::{Issue, IssueUpdate, NewIssue};
use crate::server::services::issue_store::IssueStore;

/// Postgres-backed issue store. Every operation touches a single row, so
/// plain statements suffice; no transactions are needed.
pub struct IssueDatabaseService {
    pool: PgPool,
}

impl IssueDatabaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for IssueDatabaseService {
    async fn find_by_project(&self, project: &str) -> Result<Vec<Issue>> {
        let rows = sqlx::query(
            r#"
            SELECT id, project, issue_title, issue_text, created_on, updated_on,
                   created_by, assigned_to, open, status_text
            FROM issues
            WHERE project = $1
            ORDER BY inserted_at
            "#,
        )
        .bind(project)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch issues")?;

        Ok(rows
            .into_iter()
            .map(|row| Issue {
                id: row.get::<Uuid, _>("id").to_string(),
                project: row.get("project"),
                issue_title: row.get("issue_title"),
                issue_text: row.get("issue_text"),
                created_on: row.get("created_on"),
                updated_on: row.get("updated_on"),
                created_by: row.get("created_by"),
                assigned_to: row.get("assigned_to"),
                open: row.get("open"),
                status_text: row.get("status_text"),
            })
            .collect())
    }

    async fn insert(&self, issue: NewIssue) -> Result<Issue> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO issues (id, project, issue_title, issue_text, created_on,
                                updated_on, created_by, assigned_to, open, status_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(&issue.project)
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(&issue.created_on)
        .bind(&issue.updated_on)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(issue.open)
        .bind(&issue.status_text)
        .execute(&self.pool)
        .await
        .context("Failed to insert issue")?;

        Ok(issue.into_issue(id.to_string()))
    }

    async fn update_by_id(&self, id: &str, update: IssueUpdate) -> Result<bool> {
        // A string that is not a UUID cannot match any row.
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let IssueUpdate {
            issue_title,
            issue_text,
            created_by,
            assigned_to,
            open,
            status_text,
            updated_on,
        } = update;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE issues SET updated_on = ");
        query.push_bind(updated_on);
        if let Some(issue_title) = issue_title {
            query.push(", issue_title = ").push_bind(issue_title);
        }
        if let Some(issue_text) = issue_text {
            query.push(", issue_text = ").push_bind(issue_text);
        }
        if let Some(created_by) = created_by {
            query.push(", created_by = ").push_bind(created_by);
        }
        if let Some(assigned_to) = assigned_to {
            query.push(", assigned_to = ").push_bind(assigned_to);
        }
        if let Some(open) = open {
            query.push(", open = ").push_bind(open);
        }
        if let Some(status_text) = status_text {
            query.push(", status_text = ").push_bind(status_text);
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .context("Failed to update issue")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete issue")?;

        Ok(result.rows_affected() > 0)
    }
}
