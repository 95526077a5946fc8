//! Shared success envelope for API handlers.
//!
//! Every successful response is `{ "status": "success", "data": ... }`, with
//! optional `message`, `results` (list length) and `token` fields. Use
//! [`ApiResponse`] instead of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

use crate::services::views::{ProjectView, UserView};

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::new(UserBody { user }).with_message("User updated successfully")))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            results: None,
            token: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl ApiResponse<()> {
    /// A success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            results: None,
            token: None,
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct UsersBody {
    pub users: Vec<UserView>,
}

#[derive(Debug, Serialize)]
pub struct ProjectBody {
    pub project: ProjectView,
}

#[derive(Debug, Serialize)]
pub struct ProjectsBody {
    pub projects: Vec<ProjectView>,
}

impl ApiResponse<UsersBody> {
    /// List envelope with `results` set to the list length.
    pub fn users(users: Vec<UserView>) -> Self {
        let count = users.len();
        Self::new(UsersBody { users }).with_results(count)
    }
}

impl ApiResponse<ProjectsBody> {
    pub fn projects(projects: Vec<ProjectView>) -> Self {
        let count = projects.len();
        Self::new(ProjectsBody { projects }).with_results(count)
    }
}

impl ApiResponse<UserBody> {
    pub fn user(user: UserView) -> Self {
        Self::new(UserBody { user })
    }
}

impl ApiResponse<ProjectBody> {
    pub fn project(project: ProjectView) -> Self {
        Self::new(ProjectBody { project })
    }
}
