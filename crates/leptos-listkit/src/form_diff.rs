//! Form Diff Builder
//!
//! An edit buffer over a snapshot of one record. On submit only the fields
//! whose value changed are sent; a freshly chosen file always counts as a
//! change.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A file picked in a form, held in memory until upload
#[derive(Clone, PartialEq)]
pub struct FileUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(f64),
    File(FileUpload),
    Empty,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::File(f) => f.name.clone(),
            FieldValue::Empty => String::new(),
        }
    }

    fn to_json(&self) -> Option<Value> {
        match self {
            FieldValue::Text(s) => Some(Value::String(s.clone())),
            FieldValue::Flag(b) => Some(Value::Bool(*b)),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n).map(Value::Number),
            FieldValue::Empty => Some(Value::Null),
            FieldValue::File(_) => None,
        }
    }
}

/// Records that can be edited field by field
pub trait Editable {
    /// Tracked fields with their wire names
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;
}

/// Nothing to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No changes to save")]
pub struct NoChanges;

/// Only the changed fields of an edit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Changes(BTreeMap<&'static str, FieldValue>);

impl Changes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn has_files(&self) -> bool {
        self.0.values().any(|v| matches!(v, FieldValue::File(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Non-file fields as a JSON object
    pub fn to_json(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.to_json().map(|json| (k.to_string(), json)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EditBuffer {
    original: BTreeMap<&'static str, FieldValue>,
    current: BTreeMap<&'static str, FieldValue>,
}

impl EditBuffer {
    pub fn new<E: Editable>(record: &E) -> Self {
        let original: BTreeMap<_, _> = record.fields().into_iter().collect();
        Self {
            current: original.clone(),
            original,
        }
    }

    /// Untracked field names are ignored
    pub fn set(&mut self, field: &'static str, value: FieldValue) {
        if let Some(slot) = self.current.get_mut(field) {
            *slot = value;
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.current.get(field)
    }

    pub fn original(&self, field: &str) -> Option<&FieldValue> {
        self.original.get(field)
    }

    /// Put a field back to its snapshot value
    pub fn revert(&mut self, field: &str) {
        if let (Some(slot), Some(orig)) = (self.current.get_mut(field), self.original.get(field)) {
            *slot = orig.clone();
        }
    }

    /// Changed fields, or `NoChanges` when the submit should be skipped
    pub fn diff(&self) -> Result<Changes, NoChanges> {
        let changes: BTreeMap<_, _> = self
            .current
            .iter()
            .filter(|(field, value)| match value {
                FieldValue::File(_) => true,
                _ => self.original.get(*field) != Some(*value),
            })
            .map(|(field, value)| (*field, value.clone()))
            .collect();

        if changes.is_empty() {
            Err(NoChanges)
        } else {
            Ok(Changes(changes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Subject {
        name: String,
        course: String,
        image: Option<String>,
    }

    impl Editable for Subject {
        fn fields(&self) -> Vec<(&'static str, FieldValue)> {
            vec![
                ("subjectName", FieldValue::text(&self.name)),
                ("course", FieldValue::text(&self.course)),
                (
                    "image",
                    self.image.clone().map(FieldValue::Text).unwrap_or(FieldValue::Empty),
                ),
            ]
        }
    }

    fn subject() -> Subject {
        Subject {
            name: "Calculus".into(),
            course: "c1".into(),
            image: Some("https://cdn/calc.png".into()),
        }
    }

    fn upload() -> FileUpload {
        FileUpload {
            name: "calc.png".into(),
            mime: "image/png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_no_changes_skips_submit() {
        let buffer = EditBuffer::new(&subject());
        assert_eq!(buffer.diff(), Err(NoChanges));
    }

    #[test]
    fn test_edit_back_to_original_is_not_a_change() {
        let mut buffer = EditBuffer::new(&subject());
        buffer.set("subjectName", FieldValue::text("Algebra"));
        buffer.set("subjectName", FieldValue::text("Calculus"));
        assert_eq!(buffer.diff(), Err(NoChanges));
    }

    #[test]
    fn test_only_changed_fields_sent() {
        let mut buffer = EditBuffer::new(&subject());
        buffer.set("subjectName", FieldValue::text("Linear Algebra"));
        buffer.set("course", FieldValue::text("c2"));

        let changes = buffer.diff().unwrap();
        assert_eq!(changes.len(), 2);
        assert!(changes.contains("subjectName"));
        assert!(changes.contains("course"));
        assert!(!changes.contains("image"));
        assert!(!changes.has_files());

        let json = changes.to_json();
        assert_eq!(json.get("subjectName"), Some(&Value::String("Linear Algebra".into())));
        assert_eq!(json.len(), 2);
    }

    #[test]
    fn test_new_file_always_included() {
        let mut buffer = EditBuffer::new(&subject());
        buffer.set("image", FieldValue::File(upload()));

        let changes = buffer.diff().unwrap();
        assert_eq!(changes.len(), 1);
        assert!(changes.has_files());
        // files travel as multipart parts, not JSON
        assert!(changes.to_json().is_empty());
    }

    #[test]
    fn test_untracked_field_ignored_and_revert() {
        let mut buffer = EditBuffer::new(&subject());
        buffer.set("price", FieldValue::Number(10.0));
        assert!(buffer.get("price").is_none());

        buffer.set("course", FieldValue::text("c9"));
        buffer.revert("course");
        assert_eq!(buffer.diff(), Err(NoChanges));
    }
}
