//! Material Endpoints
//!
//! Admin management of study materials plus the student-facing catalogue and
//! library of purchased materials.

use leptos_listkit::{require, Changes, FieldValue, FileUpload, QueryParams, Validate, ValidationError};

use super::{multipart, segment, text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::Material;

pub const MATERIALS: &str = "/materials";
/// Active materials, visible without admin rights
pub const MATERIAL_CATALOGUE: &str = "/materials/catalogue";
/// Materials the signed-in student has bought
pub const MATERIAL_LIBRARY: &str = "/materials/purchased";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialFilter {
    pub title: String,
    pub subject: String,
    pub material_type: String,
    pub status: StatusFilter,
    /// Only materials priced at zero
    pub free_only: bool,
}

impl QueryParams for MaterialFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "title", &self.title);
        text_param(&mut pairs, "subject", &self.subject);
        text_param(&mut pairs, "materialType", &self.material_type);
        pairs.extend(self.status.param());
        if self.free_only {
            pairs.push(("free", "true".to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewMaterial {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub material_type: String,
    /// As typed in the form
    pub price: String,
    pub file: Option<FileUpload>,
    pub thumbnail: Option<FileUpload>,
}

/// Parse a price field: non-negative, at most two decimals
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let invalid = || ValidationError::Invalid("Price must be a non-negative amount".into());
    let price: f64 = raw.parse().map_err(|_| invalid())?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }
    if raw.split_once('.').is_some_and(|(_, frac)| frac.len() > 2) {
        return Err(ValidationError::Invalid("Price can have at most two decimals".into()));
    }
    Ok(price)
}

impl NewMaterial {
    fn fields(&self) -> Result<Vec<(&'static str, FieldValue)>, ValidationError> {
        let mut fields = vec![
            ("title", FieldValue::text(self.title.trim())),
            ("description", FieldValue::text(&self.description)),
            ("subject", FieldValue::text(&self.subject)),
            ("materialType", FieldValue::text(&self.material_type)),
            ("price", FieldValue::Number(parse_price(&self.price)?)),
        ];
        if let Some(file) = &self.file {
            fields.push(("file", FieldValue::File(file.clone())));
        }
        if let Some(thumbnail) = &self.thumbnail {
            fields.push(("thumbnail", FieldValue::File(thumbnail.clone())));
        }
        Ok(fields)
    }
}

impl Validate for NewMaterial {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[
            ("Title", self.title.as_str()),
            ("Subject", self.subject.as_str()),
            ("Material type", self.material_type.as_str()),
        ])?;
        parse_price(&self.price)?;
        if self.file.is_none() {
            return Err(ValidationError::Missing("Material file"));
        }
        Ok(())
    }
}

impl ApiClient {
    pub fn materials(&self) -> EndpointSource<MaterialFilter, Material> {
        self.source(MATERIALS)
    }

    pub fn material_catalogue(&self) -> EndpointSource<MaterialFilter, Material> {
        self.source(MATERIAL_CATALOGUE)
    }

    pub fn material_library(&self) -> EndpointSource<MaterialFilter, Material> {
        self.source(MATERIAL_LIBRARY)
    }

    pub async fn create_material(&self, material: NewMaterial) -> AppResult<ApiMessage> {
        let fields = material.fields()?;
        let form = multipart(fields.iter().map(|(k, v)| (*k, v)))?;
        self.post_form(MATERIALS, form).await
    }

    pub async fn update_material(&self, id: &str, changes: Changes) -> AppResult<ApiMessage> {
        let path = format!("{}/{}", MATERIALS, segment(id));
        if changes.has_files() {
            self.patch_form(&path, multipart(changes.iter())?).await
        } else {
            self.patch(&path, &changes.to_json()).await
        }
    }

    pub async fn set_material_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(MATERIALS, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> FileUpload {
        FileUpload {
            name: "notes.pdf".into(),
            mime: "application/pdf".into(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }
    }

    fn material() -> NewMaterial {
        NewMaterial {
            title: "Thermodynamics notes".into(),
            description: "Unit 1-3".into(),
            subject: "s1".into(),
            material_type: "t1".into(),
            price: "149".into(),
            file: Some(pdf()),
            thumbnail: None,
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(""), Ok(0.0));
        assert_eq!(parse_price("99.50"), Ok(99.5));
        assert!(parse_price("-1").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("1.999").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_material_requires_file() {
        assert!(material().validate().is_ok());
        let no_file = NewMaterial { file: None, ..material() };
        assert_eq!(no_file.validate(), Err(ValidationError::Missing("Material file")));
    }

    #[test]
    fn test_material_fields() {
        let fields = material().fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["title", "description", "subject", "materialType", "price", "file"]);
        assert_eq!(fields[4].1, FieldValue::Number(149.0));
    }

    #[test]
    fn test_filter_free_only() {
        let filter = MaterialFilter {
            title: "thermo".into(),
            free_only: true,
            ..Default::default()
        };
        assert_eq!(
            filter.params(),
            vec![("title", "thermo".to_string()), ("free", "true".to_string())]
        );
    }
}
