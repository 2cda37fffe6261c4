//! Razorpay Checkout
//!
//! Thin binding over the global `Razorpay` constructor from checkout.js. All
//! callbacks are forwarded into the bridge's event channel; the machine
//! decides what they mean.

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::bridge::{CheckoutWidget, WidgetProvider};
use super::machine::CheckoutEvent;
use super::script::{global_defined, load_script};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, PaymentOrder, PaymentReceipt};

const GLOBAL: &str = "Razorpay";

#[derive(Debug, Clone, Serialize)]
struct Prefill {
    name: String,
    email: String,
}

#[derive(Debug, Clone, Serialize)]
struct Theme {
    color: &'static str,
}

/// Options object passed to `new Razorpay(...)`, minus the callbacks
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOptions {
    key: String,
    amount: u64,
    currency: String,
    name: String,
    description: String,
    order_id: String,
    prefill: Prefill,
    theme: Theme,
}

impl CheckoutOptions {
    pub fn new(config: &AppConfig, order: &PaymentOrder, user: Option<&AuthUser>) -> Self {
        Self {
            key: config.checkout_key.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: config.merchant_name.clone(),
            description: order.material_title.clone(),
            order_id: order.order_id.clone(),
            prefill: Prefill {
                name: user.map(|u| u.name.clone()).unwrap_or_default(),
                email: user.map(|u| u.email.clone()).unwrap_or_default(),
            },
            theme: Theme { color: "#4f46e5" },
        }
    }
}

pub struct RazorpayProvider {
    script_url: String,
    options: CheckoutOptions,
}

impl RazorpayProvider {
    pub fn new(script_url: impl Into<String>, options: CheckoutOptions) -> Self {
        Self {
            script_url: script_url.into(),
            options,
        }
    }
}

/// `error.description` of a `payment.failed` response
fn failure_reason(response: &JsValue) -> String {
    Reflect::get(response, &JsValue::from_str("error"))
        .and_then(|error| Reflect::get(&error, &JsValue::from_str("description")))
        .ok()
        .and_then(|d| d.as_string())
        .unwrap_or_default()
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> AppResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

#[async_trait(?Send)]
impl WidgetProvider for RazorpayProvider {
    type Widget = RazorpayWidget;

    fn is_loaded(&self) -> bool {
        global_defined(GLOBAL)
    }

    async fn load(&self) -> AppResult<()> {
        load_script(&self.script_url).await?;
        if global_defined(GLOBAL) {
            Ok(())
        } else {
            Err(AppError::External("Payment provider did not initialise".into()))
        }
    }

    fn create(&self, events: UnboundedSender<CheckoutEvent>) -> AppResult<RazorpayWidget> {
        let constructor: Function = Reflect::get(&js_sys::global(), &JsValue::from_str(GLOBAL))?
            .dyn_into()
            .map_err(|_| AppError::External("Payment provider is not loaded".into()))?;

        let on_success = {
            let events = events.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
                let event = match serde_wasm_bindgen::from_value::<PaymentReceipt>(response) {
                    Ok(receipt) => CheckoutEvent::Succeeded(receipt),
                    Err(err) => {
                        log::error!("[checkout] unreadable success payload: {}", err);
                        CheckoutEvent::PaymentFailed("Unexpected response from payment provider".into())
                    }
                };
                let _ = events.unbounded_send(event);
            })
        };
        let on_dismiss = {
            let events = events.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                let _ = events.unbounded_send(CheckoutEvent::Dismissed);
            })
        };
        let on_failure = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
            let _ = events.unbounded_send(CheckoutEvent::PaymentFailed(failure_reason(&response)));
        });

        let options = serde_wasm_bindgen::to_value(&self.options)
            .map_err(|e| AppError::External(e.to_string()))?;
        set(&options, "handler", on_success.as_ref())?;
        let modal = Object::new();
        set(&modal, "ondismiss", on_dismiss.as_ref())?;
        set(&options, "modal", &modal)?;

        let instance = Reflect::construct(&constructor, &Array::of1(&options))?;
        let on: Function = Reflect::get(&instance, &JsValue::from_str("on"))?
            .dyn_into()
            .map_err(|_| AppError::External("Payment provider has no event API".into()))?;
        on.call2(&instance, &JsValue::from_str("payment.failed"), on_failure.as_ref())?;

        Ok(RazorpayWidget {
            instance,
            closed: std::cell::Cell::new(false),
            _handlers: vec![on_success, on_dismiss, on_failure],
        })
    }
}

pub struct RazorpayWidget {
    instance: JsValue,
    closed: std::cell::Cell<bool>,
    /// Kept alive as long as the provider may call them
    _handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl RazorpayWidget {
    fn call(&self, method: &str) -> AppResult<()> {
        let function: Function = Reflect::get(&self.instance, &JsValue::from_str(method))?
            .dyn_into()
            .map_err(|_| AppError::External(format!("Payment provider has no {}()", method)))?;
        function.call0(&self.instance)?;
        Ok(())
    }
}

impl CheckoutWidget for RazorpayWidget {
    fn open(&self) -> AppResult<()> {
        self.call("open")
    }

    fn close(&self) {
        if self.closed.replace(true) {
            return;
        }
        if let Err(err) = self.call("close") {
            log::warn!("[checkout] close failed: {}", err);
        }
    }
}
