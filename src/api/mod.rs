//! REST API Client
//!
//! Typed bindings to the platform API, organized by domain. Every call goes
//! through `ApiClient`, which attaches the bearer token and turns non-success
//! responses into `AppError::Server` with the server's own message.

mod auth;
mod course;
mod flashcard;
mod material;
mod material_type;
mod payment;
mod playlist;
mod request;
mod student;
mod subject;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use leptos_listkit::{query_pairs, FieldValue, ListQuery, ListSource, Page, QueryParams};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub use auth::*;
pub use course::*;
pub use flashcard::*;
pub use material::*;
pub use material_type::*;
pub use payment::*;
pub use playlist::*;
pub use request::*;
pub use student::*;
pub use subject::*;

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Encode an id for use inside a URL path
pub fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Body of mutation responses
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Active/inactive filter shared by admin lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const OPTIONS: [(StatusFilter, &'static str); 3] = [
        (StatusFilter::All, "All"),
        (StatusFilter::Active, "Active"),
        (StatusFilter::Inactive, "Inactive"),
    ];

    pub fn value(&self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Active => "true",
            StatusFilter::Inactive => "false",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "true" => StatusFilter::Active,
            "false" => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }

    /// `isActive` query pair, when filtering
    fn param(&self) -> Option<(&'static str, String)> {
        match self {
            StatusFilter::All => None,
            _ => Some(("isActive", self.value().to_string())),
        }
    }
}

/// Push `key=value` when the trimmed text is non-empty
fn text_param(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    is_active: bool,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: None,
        }
    }

    /// Same client acting for the given session token
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.map(Arc::from),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = AppError::from_response(status.as_u16(), &body);
            log::warn!("[api] {}", err);
            return Err(err);
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> AppResult<T> {
        self.send(self.request(Method::POST, path).multipart(form)).await
    }

    pub async fn patch_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> AppResult<T> {
        self.send(self.request(Method::PATCH, path).multipart(form)).await
    }

    /// One page of a list endpoint
    pub async fn list<F: QueryParams, R: DeserializeOwned>(&self, path: &str, query: &ListQuery<F>) -> AppResult<Page<R>> {
        self.get(path, &query_pairs(query)).await
    }

    /// Flip the active flag of a record
    pub async fn set_status(&self, path: &str, id: &str, is_active: bool) -> AppResult<ApiMessage> {
        self.patch(&format!("{}/{}/status", path, segment(id)), &StatusBody { is_active }).await
    }

    /// Paginated source over `path`, for `use_paginated_list`
    pub fn source<F, R>(&self, path: &'static str) -> EndpointSource<F, R> {
        EndpointSource {
            api: self.clone(),
            path,
            _marker: PhantomData,
        }
    }
}

/// A list endpoint bound to its filter and record types
pub struct EndpointSource<F, R> {
    api: ApiClient,
    path: &'static str,
    _marker: PhantomData<fn() -> (F, R)>,
}

impl<F, R> Clone for EndpointSource<F, R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path,
            _marker: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<F, R> ListSource for EndpointSource<F, R>
where
    F: QueryParams + Clone + PartialEq + 'static,
    R: DeserializeOwned + Clone + 'static,
{
    type Filter = F;
    type Record = R;
    type Error = AppError;

    async fn fetch_page(&self, query: &ListQuery<F>) -> AppResult<Page<R>> {
        self.api.list(self.path, query).await
    }
}

/// Multipart body from form fields; files become file parts
pub fn multipart<'a>(fields: impl IntoIterator<Item = (&'static str, &'a FieldValue)>) -> AppResult<Form> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = match value {
            FieldValue::File(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.name.clone())
                    .mime_str(&file.mime)?;
                form.part(name, part)
            }
            FieldValue::Empty => form,
            other => form.text(name, other.as_text()),
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq)]
    struct TypeFilter {
        type_name: String,
        status: StatusFilter,
    }

    impl QueryParams for TypeFilter {
        fn params(&self) -> Vec<(&'static str, String)> {
            let mut pairs = Vec::new();
            text_param(&mut pairs, "typeName", &self.type_name);
            pairs.extend(self.status.param());
            pairs
        }
    }

    #[test]
    fn test_url_join() {
        let api = ApiClient::new("https://api.studyswap.in/");
        assert_eq!(api.url("/courses"), "https://api.studyswap.in/courses");
        assert_eq!(api.url("courses/1"), "https://api.studyswap.in/courses/1");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("64f1a2b3c4"), "64f1a2b3c4");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_bearer_header_and_query() {
        let api = ApiClient::new("http://localhost:4000").with_token(Some("abc"));
        let query = ListQuery::new(
            TypeFilter {
                type_name: " cal ".into(),
                status: StatusFilter::Active,
            },
            10,
        );
        let request = api
            .request(Method::GET, "/material-types")
            .query(&query_pairs(&query))
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:4000/material-types?pageno=1&limit=10&typeName=cal&isActive=true"
        );
        assert_eq!(request.headers().get("authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn test_anonymous_request_has_no_auth() {
        let api = ApiClient::new("http://localhost:4000");
        let request = api.request(Method::GET, "/courses/active").build().unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(StatusFilter::parse("true"), StatusFilter::Active);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(StatusFilter::All.param(), None);
        assert_eq!(StatusFilter::Inactive.param(), Some(("isActive", "false".to_string())));
    }

    #[test]
    fn test_api_message_tolerates_missing_message() {
        let msg: ApiMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.message, None);
    }
}
