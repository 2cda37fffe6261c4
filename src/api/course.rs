//! Course Endpoints

use leptos_listkit::{require, Changes, QueryParams, Validate, ValidationError};
use serde::Serialize;

use super::{segment, text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::Course;

pub const COURSES: &str = "/courses";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub course_name: String,
    pub status: StatusFilter,
}

impl QueryParams for CourseFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "courseName", &self.course_name);
        pairs.extend(self.status.param());
        pairs
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub course_name: String,
}

impl Validate for NewCourse {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Course name", self.course_name.as_str())])
    }
}

impl ApiClient {
    pub fn courses(&self) -> EndpointSource<CourseFilter, Course> {
        self.source(COURSES)
    }

    /// Every active course, for dropdowns and the public catalogue
    pub async fn active_courses(&self) -> AppResult<Vec<Course>> {
        self.get(&format!("{}/active", COURSES), &[]).await
    }

    pub async fn create_course(&self, course: NewCourse) -> AppResult<ApiMessage> {
        self.post(COURSES, &course).await
    }

    pub async fn update_course(&self, id: &str, changes: Changes) -> AppResult<ApiMessage> {
        self.patch(&format!("{}/{}", COURSES, segment(id)), &changes.to_json()).await
    }

    pub async fn set_course_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(COURSES, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params() {
        let filter = CourseFilter {
            course_name: "B.Tech".into(),
            status: StatusFilter::Inactive,
        };
        assert_eq!(
            filter.params(),
            vec![("courseName", "B.Tech".to_string()), ("isActive", "false".to_string())]
        );
        assert!(CourseFilter::default().params().is_empty());
    }

    #[test]
    fn test_new_course_requires_name() {
        assert_eq!(
            NewCourse { course_name: "".into() }.validate(),
            Err(ValidationError::Missing("Course name"))
        );
    }
}
