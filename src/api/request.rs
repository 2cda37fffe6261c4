//! Material Request Endpoints
//!
//! Students ask for material the platform lacks; admins resolve requests.

use leptos_listkit::{require, QueryParams, Validate, ValidationError};
use serde::Serialize;

use super::{segment, text_param, ApiClient, ApiMessage, EndpointSource};
use crate::error::AppResult;
use crate::models::{MaterialRequest, RequestStatus};

pub const REQUESTS: &str = "/requests";
/// Requests raised by the signed-in student
pub const MY_REQUESTS: &str = "/requests/mine";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFilter {
    pub title: String,
    /// Empty for any status
    pub status: Option<RequestStatus>,
}

impl QueryParams for RequestFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "title", &self.title);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Validate for NewRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Title", self.title.as_str()), ("Description", self.description.as_str())])
    }
}

#[derive(Serialize)]
struct StatusChange {
    status: RequestStatus,
}

impl ApiClient {
    pub fn requests(&self) -> EndpointSource<RequestFilter, MaterialRequest> {
        self.source(REQUESTS)
    }

    pub fn my_requests(&self) -> EndpointSource<RequestFilter, MaterialRequest> {
        self.source(MY_REQUESTS)
    }

    pub async fn create_request(&self, request: NewRequest) -> AppResult<ApiMessage> {
        self.post(REQUESTS, &request).await
    }

    pub async fn set_request_status(&self, id: &str, status: RequestStatus) -> AppResult<ApiMessage> {
        self.patch(&format!("{}/{}/status", REQUESTS, segment(id)), &StatusChange { status })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_param() {
        let filter = RequestFilter {
            title: String::new(),
            status: Some(RequestStatus::Pending),
        };
        assert_eq!(filter.params(), vec![("status", "pending".to_string())]);
    }

    #[test]
    fn test_status_body() {
        let body = serde_json::to_string(&StatusChange {
            status: RequestStatus::Fulfilled,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"fulfilled"}"#);
    }
}
