//! Catalog Store
//!
//! Active courses, subjects and material types, shared by every dropdown in
//! filter bars and forms. Uses reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::models::{Course, MaterialType, Subject};

#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    pub courses: Vec<Course>,
    pub subjects: Vec<Subject>,
    pub material_types: Vec<MaterialType>,
}

fn courses_as_options(courses: &[Course]) -> Vec<(String, String)> {
    courses
        .iter()
        .map(|c| (c.id.clone(), c.course_name.clone()))
        .collect()
}

/// Subjects of `course`, or all of them when `course` is empty
fn subjects_as_options(subjects: &[Subject], course: &str) -> Vec<(String, String)> {
    subjects
        .iter()
        .filter(|s| course.is_empty() || s.course.id == course)
        .map(|s| (s.id.clone(), s.subject_name.clone()))
        .collect()
}

fn material_types_as_options(types: &[MaterialType]) -> Vec<(String, String)> {
    types
        .iter()
        .map(|t| (t.id.clone(), t.type_name.clone()))
        .collect()
}

pub type CatalogStore = Store<CatalogState>;

pub fn use_catalog() -> CatalogStore {
    expect_context::<CatalogStore>()
}

/// `(id, name)` pairs for a course dropdown
pub fn course_options(store: CatalogStore) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || store.courses().with(|c| courses_as_options(c)))
}

/// Subject dropdown, narrowed to the course currently picked
pub fn subject_options(store: CatalogStore, course: Signal<String>) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || {
        let course = course.get();
        store.subjects().with(|s| subjects_as_options(s, &course))
    })
}

pub fn material_type_options(store: CatalogStore) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || store.material_types().with(|t| material_types_as_options(t)))
}

async fn fetch_catalog(api: &ApiClient) -> AppResult<(Vec<Course>, Vec<Subject>, Vec<MaterialType>)> {
    let courses = api.active_courses().await?;
    let subjects = api.active_subjects(None).await?;
    let material_types = api.active_material_types().await?;
    Ok((courses, subjects, material_types))
}

/// Reload all three lookup lists. Called at start-up and after admin edits.
pub async fn refresh_catalog(store: CatalogStore, api: ApiClient) -> AppResult<()> {
    let (courses, subjects, material_types) = fetch_catalog(&api).await?;
    log::debug!(
        "[catalog] {} courses, {} subjects, {} material types",
        courses.len(),
        subjects.len(),
        material_types.len()
    );
    *store.courses().write() = courses;
    *store.subjects().write() = subjects;
    *store.material_types().write() = material_types;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRef;

    fn subject(id: &str, name: &str, course: &str) -> Subject {
        Subject {
            id: id.into(),
            subject_name: name.into(),
            course: CourseRef {
                id: course.into(),
                course_name: course.to_uppercase(),
            },
            image: None,
            is_active: true,
        }
    }

    #[test]
    fn test_subject_options_by_course() {
        let subjects = vec![
            subject("s1", "Calculus", "bsc"),
            subject("s2", "Accounting", "bcom"),
            subject("s3", "Algebra", "bsc"),
        ];

        let bsc: Vec<String> = subjects_as_options(&subjects, "bsc")
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert_eq!(bsc, vec!["Calculus", "Algebra"]);
        assert_eq!(subjects_as_options(&subjects, "").len(), 3);
        assert!(subjects_as_options(&subjects, "mba").is_empty());
    }

    #[test]
    fn test_course_options() {
        let courses = vec![Course {
            id: "c1".into(),
            course_name: "B.Sc".into(),
            is_active: true,
        }];
        assert_eq!(courses_as_options(&courses), vec![("c1".to_string(), "B.Sc".to_string())]);
    }
}
