//! Student Endpoints (admin)

use leptos_listkit::QueryParams;

use super::{text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::Student;

pub const STUDENTS: &str = "/students";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentFilter {
    /// Matches name or email
    pub search: String,
    pub status: StatusFilter,
}

impl QueryParams for StudentFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "search", &self.search);
        pairs.extend(self.status.param());
        pairs
    }
}

impl ApiClient {
    pub fn students(&self) -> EndpointSource<StudentFilter, Student> {
        self.source(STUDENTS)
    }

    /// Block or unblock a student account
    pub async fn set_student_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(STUDENTS, id, is_active).await
    }
}
