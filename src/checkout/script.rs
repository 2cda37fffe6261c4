//! Inject a third-party `<script>` and wait for it to load.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::error::{AppError, AppResult};

/// True when `name` is defined on the global object
pub fn global_defined(name: &str) -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

pub async fn load_script(src: &str) -> AppResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::External("Document unavailable".into()))?;
    let script: HtmlScriptElement = document
        .create_element("script")?
        .dyn_into()
        .map_err(|_| AppError::External("Could not create script element".into()))?;
    script.set_src(src);
    script.set_async(true);

    let (tx, rx) = oneshot::channel::<Result<(), String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let tx = tx.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        })
    };
    let on_error = {
        let tx = tx.clone();
        let src = src.to_string();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(format!("Could not load {}", src)));
            }
        })
    };
    script.set_onload(Some(on_load.as_ref().unchecked_ref()));
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    document
        .body()
        .ok_or_else(|| AppError::External("Document has no body".into()))?
        .append_child(&script)?;
    log::debug!("[checkout] loading {}", src);

    let result = rx
        .await
        .map_err(|_| AppError::External("Script loader dropped".into()))?;
    script.set_onload(None);
    script.set_onerror(None);
    result.map_err(|msg| {
        log::error!("[checkout] {}", msg);
        AppError::External("Could not load the payment provider. Please try again.".into())
    })
}
