//! Application Configuration
//!
//! Values baked in at build time through environment variables, falling back
//! to defaults derived from the page location.

use std::time::Duration;

/// Hosted checkout script
pub const DEFAULT_CHECKOUT_SCRIPT: &str = "https://checkout.razorpay.com/v1/checkout.js";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,
    pub checkout_script_url: String,
    /// Public key the checkout widget is opened with
    pub checkout_key: String,
    /// Brand name shown in the checkout widget
    pub merchant_name: String,
    pub default_page_size: u32,
    pub filter_debounce: Duration,
    /// How long the checkout result stays on screen before leaving
    pub redirect_delay: Duration,
    pub toast_lifetime: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api".to_string(),
            checkout_script_url: DEFAULT_CHECKOUT_SCRIPT.to_string(),
            checkout_key: String::new(),
            merchant_name: "StudySwap".to_string(),
            default_page_size: 10,
            filter_debounce: Duration::from_millis(500),
            redirect_delay: Duration::from_secs(3),
            toast_lifetime: Duration::from_secs(4),
        }
    }
}

impl AppConfig {
    /// Resolve from build-time variables, then the browser location
    pub fn load() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self::resolve(
            option_env!("STUDYSWAP_API_URL"),
            option_env!("STUDYSWAP_CHECKOUT_KEY"),
            origin.as_deref(),
        )
    }

    fn resolve(api_url: Option<&str>, checkout_key: Option<&str>, origin: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base_url = match (api_url, origin) {
            (Some(url), _) if !url.trim().is_empty() => url.trim().to_string(),
            (_, Some(origin)) => format!("{}/api", origin.trim_end_matches('/')),
            _ => defaults.api_base_url.clone(),
        };
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            checkout_key: checkout_key.unwrap_or_default().to_string(),
            ..defaults
        }
    }
}
