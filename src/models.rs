//! Frontend Models
//!
//! Data structures matching API records. Identifiers arrive as `_id`,
//! everything else in camelCase.

use chrono::{DateTime, Utc};
use leptos_listkit::{Editable, FieldValue};
use serde::{Deserialize, Serialize};

/// Course record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Course as embedded in other records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject_name: String,
    pub course: CourseRef,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialType {
    #[serde(rename = "_id")]
    pub id: String,
    pub type_name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTypeRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub type_name: String,
}

/// Study material offered for sale (or free when price is zero)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: SubjectRef,
    pub material_type: MaterialTypeRef,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    /// Set on student listings once bought
    #[serde(default)]
    pub purchased: bool,
}

impl Material {
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub subject: Option<SubjectRef>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [RequestStatus::Pending, RequestStatus::Fulfilled, RequestStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Fulfilled => "Fulfilled",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A student asking for material that is not on the platform yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: Option<SubjectRef>,
    #[serde(default)]
    pub student: Option<StudentRef>,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Signed-in identity persisted in session storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}

/// Order created on the server before the checkout widget opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    /// Minor currency units (paise)
    pub amount: u64,
    pub currency: String,
    pub material_id: String,
    pub material_title: String,
}

/// Fields the checkout widget hands back on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

/// Render minor units as a price, e.g. 49900 INR → "₹499.00"
pub fn format_amount(minor: u64, currency: &str) -> String {
    let symbol = match currency {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };
    let major = format!("{}.{:02}", minor / 100, minor % 100);
    if symbol.is_empty() {
        format!("{} {}", major, currency)
    } else {
        format!("{}{}", symbol, major)
    }
}

/// Display price of a material, "Free" at zero
pub fn format_price(price: f64) -> String {
    if price <= 0.0 {
        "Free".to_string()
    } else {
        format!("₹{:.2}", price)
    }
}

fn optional_text(value: &Option<String>) -> FieldValue {
    value.clone().map(FieldValue::Text).unwrap_or(FieldValue::Empty)
}

impl Editable for Course {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![("courseName", FieldValue::text(&self.course_name))]
    }
}

impl Editable for MaterialType {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![("typeName", FieldValue::text(&self.type_name))]
    }
}

impl Editable for Subject {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("subjectName", FieldValue::text(&self.subject_name)),
            ("course", FieldValue::text(&self.course.id)),
            ("image", optional_text(&self.image)),
        ]
    }
}

impl Editable for Material {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("title", FieldValue::text(&self.title)),
            ("description", FieldValue::text(&self.description)),
            ("subject", FieldValue::text(&self.subject.id)),
            ("materialType", FieldValue::text(&self.material_type.id)),
            ("price", FieldValue::Number(self.price)),
            ("file", optional_text(&self.file_url)),
            ("thumbnail", optional_text(&self.thumbnail)),
        ]
    }
}

impl Editable for Flashcard {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("question", FieldValue::text(&self.question)),
            ("answer", FieldValue::text(&self.answer)),
            (
                "subject",
                self.subject
                    .as_ref()
                    .map(|s| FieldValue::text(&s.id))
                    .unwrap_or(FieldValue::Empty),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_listkit::EditBuffer;

    #[test]
    fn test_material_from_wire() {
        let json = r#"{
            "_id": "m1",
            "title": "Calculus Notes",
            "subject": {"_id": "s1", "subjectName": "Calculus"},
            "materialType": {"_id": "t1", "typeName": "Notes"},
            "price": 149.0,
            "isActive": true
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.id, "m1");
        assert_eq!(material.subject.subject_name, "Calculus");
        assert_eq!(material.material_type.type_name, "Notes");
        assert_eq!(material.description, "");
        assert!(!material.purchased);
        assert!(!material.is_free());
    }

    #[test]
    fn test_session_round_trip_keeps_role() {
        let json = r#"{"token":"t","user":{"_id":"u1","name":"Asha","email":"a@x.in","role":"admin"}}"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }

    #[test]
    fn test_request_status() {
        assert_eq!(RequestStatus::parse("fulfilled"), Some(RequestStatus::Fulfilled));
        assert_eq!(RequestStatus::parse("done"), None);
        let status: RequestStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(status, RequestStatus::Rejected);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(49900, "INR"), "₹499.00");
        assert_eq!(format_amount(5, "USD"), "$0.05");
        assert_eq!(format_amount(1234, "JPY"), "12.34 JPY");
        assert_eq!(format_price(0.0), "Free");
        assert_eq!(format_price(99.5), "₹99.50");
    }

    #[test]
    fn test_material_diff_price_only() {
        let material = Material {
            id: "m1".into(),
            title: "Notes".into(),
            description: String::new(),
            subject: SubjectRef { id: "s1".into(), subject_name: "Calc".into() },
            material_type: MaterialTypeRef { id: "t1".into(), type_name: "Notes".into() },
            price: 99.0,
            file_url: Some("https://cdn/notes.pdf".into()),
            thumbnail: None,
            is_active: true,
            purchased: false,
        };
        let mut buffer = EditBuffer::new(&material);
        buffer.set("price", FieldValue::Number(129.0));

        let changes = buffer.diff().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("price"), Some(&FieldValue::Number(129.0)));
    }
}
