//! Material Type Endpoints

use leptos_listkit::{require, Changes, QueryParams, Validate, ValidationError};
use serde::Serialize;

use super::{segment, text_param, ApiClient, ApiMessage, EndpointSource, StatusFilter};
use crate::error::AppResult;
use crate::models::MaterialType;

pub const MATERIAL_TYPES: &str = "/material-types";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTypeFilter {
    pub type_name: String,
    pub status: StatusFilter,
}

impl QueryParams for MaterialTypeFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        text_param(&mut pairs, "typeName", &self.type_name);
        pairs.extend(self.status.param());
        pairs
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialType {
    pub type_name: String,
}

impl Validate for NewMaterialType {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&[("Type name", self.type_name.as_str())])
    }
}

impl ApiClient {
    pub fn material_types(&self) -> EndpointSource<MaterialTypeFilter, MaterialType> {
        self.source(MATERIAL_TYPES)
    }

    pub async fn active_material_types(&self) -> AppResult<Vec<MaterialType>> {
        self.get(&format!("{}/active", MATERIAL_TYPES), &[]).await
    }

    pub async fn create_material_type(&self, material_type: NewMaterialType) -> AppResult<ApiMessage> {
        self.post(MATERIAL_TYPES, &material_type).await
    }

    pub async fn update_material_type(&self, id: &str, changes: Changes) -> AppResult<ApiMessage> {
        self.patch(&format!("{}/{}", MATERIAL_TYPES, segment(id)), &changes.to_json()).await
    }

    pub async fn set_material_type_status(&self, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.set_status(MATERIAL_TYPES, id, is_active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_filter() {
        let filter = MaterialTypeFilter {
            type_name: "cal".into(),
            status: StatusFilter::All,
        };
        assert_eq!(filter.params(), vec![("typeName", "cal".to_string())]);
    }
}
