//! Subject Endpoints
//!
//! Subjects carry a cover image, so writes go out as multipart.

use leptos_listkit::{require, Changes, FieldValue, FileUpload, QueryParams, Validate, ValidationError};

use super::{multipart, segment, text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::Subject;

pub const SUBJECTS: &str = "/subjects";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectFilter {
    pub subject_name: String,
    /// Course id, empty for all courses
    pub course: String,
    pub status: StatusFilter,
}

impl QueryParams for SubjectFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "subjectName", &self.subject_name);
        text_param(&mut pairs, "course", &self.course);
        pairs.extend(self.status.param());
        pairs
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewSubject {
    pub subject_name: String,
    pub course: String,
    pub image: Option<FileUpload>,
}

impl NewSubject {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = vec![
            ("subjectName", FieldValue::text(self.subject_name.trim())),
            ("course", FieldValue::text(&self.course)),
        ];
        if let Some(image) = &self.image {
            fields.push(("image", FieldValue::File(image.clone())));
        }
        fields
    }
}

impl Validate for NewSubject {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[
            ("Subject name", self.subject_name.as_str()),
            ("Course", self.course.as_str()),
        ])?;
        match &self.image {
            Some(image) if !image.mime.starts_with("image/") => {
                Err(ValidationError::Invalid("Subject image must be an image file".into()))
            }
            _ => Ok(()),
        }
    }
}

impl ApiClient {
    pub fn subjects(&self) -> EndpointSource<SubjectFilter, Subject> {
        self.source(SUBJECTS)
    }

    /// Active subjects, optionally only those of one course
    pub async fn active_subjects(&self, course: Option<&str>) -> AppResult<Vec<Subject>> {
        let query: Vec<(&str, String)> = course.map(|c| ("course", c.to_string())).into_iter().collect();
        self.get(&format!("{}/active", SUBJECTS), &query).await
    }

    pub async fn create_subject(&self, subject: NewSubject) -> AppResult<ApiMessage> {
        let fields = subject.fields();
        let form = multipart(fields.iter().map(|(k, v)| (*k, v)))?;
        self.post_form(SUBJECTS, form).await
    }

    /// Send only the changed fields; a new image forces multipart
    pub async fn update_subject(&self, id: &str, changes: Changes) -> AppResult<ApiMessage> {
        let path = format!("{}/{}", SUBJECTS, segment(id));
        if changes.has_files() {
            self.patch_form(&path, multipart(changes.iter())?).await
        } else {
            self.patch(&path, &changes.to_json()).await
        }
    }

    pub async fn set_subject_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(SUBJECTS, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> FileUpload {
        FileUpload {
            name: "cover.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, 0x50],
        }
    }

    #[test]
    fn test_subject_needs_course() {
        let subject = NewSubject {
            subject_name: "Physics".into(),
            ..Default::default()
        };
        assert_eq!(subject.validate(), Err(ValidationError::Missing("Course")));
    }

    #[test]
    fn test_subject_image_must_be_image() {
        let mut subject = NewSubject {
            subject_name: "Physics".into(),
            course: "c1".into(),
            image: Some(png()),
        };
        assert!(subject.validate().is_ok());

        subject.image = Some(FileUpload {
            mime: "application/pdf".into(),
            ..png()
        });
        assert!(matches!(subject.validate(), Err(ValidationError::Invalid(_))));
    }

    #[test]
    fn test_fields_include_image_only_when_chosen() {
        let without = NewSubject {
            subject_name: " Physics ".into(),
            course: "c1".into(),
            image: None,
        };
        let fields = without.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, FieldValue::text("Physics"));

        let with = NewSubject { image: Some(png()), ..without };
        assert_eq!(with.fields().len(), 3);
    }

    #[test]
    fn test_filter_by_course() {
        let filter = SubjectFilter {
            course: "c1".into(),
            ..Default::default()
        };
        assert_eq!(filter.params(), vec![("course", "c1".to_string())]);
    }
}
