//! Checkout Page (student)
//!
//! Picks up the payment order parked by the browse page and runs the hosted
//! checkout widget through `CheckoutBridge`. The bridge owns the widget; this
//! page only runs the effects that touch the app: verification, storage,
//! notices and navigation.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::checkout::{
    CheckoutBridge, CheckoutEffect, CheckoutOptions, CheckoutOutcome, Destination, EffectSink,
    RazorpayProvider,
};
use crate::components::FatalError;
use crate::context::{use_app, AppContext, Route};
use crate::models::{format_amount, PaymentOrder};
use crate::session::browser_session;

pub const NO_PAYMENT_IN_PROGRESS: &str = "No payment in progress. Pick a material to buy first.";

fn destination_route(destination: Destination) -> Route {
    match destination {
        Destination::Library => Route::StudentLibrary,
        Destination::Browse => Route::StudentBrowse,
    }
}

/// Runs page-level checkout effects against the app context
struct PageEffects {
    ctx: AppContext,
    redirect_delay: Duration,
    status: RwSignal<String>,
}

impl EffectSink for PageEffects {
    fn apply(&self, effect: CheckoutEffect) {
        let ctx = self.ctx;
        match effect {
            CheckoutEffect::VerifyPayment(receipt) => {
                self.status.set("Confirming your payment...".to_string());
                let api = ctx.api();
                spawn_local(async move {
                    match api.verify_payment(&receipt).await {
                        Ok(_) => log::info!("[checkout] payment {} verified", receipt.razorpay_payment_id),
                        Err(err) => {
                            log::error!("[checkout] verification failed: {}", err);
                            ctx.report(&err);
                        }
                    }
                });
            }
            CheckoutEffect::ClearOrder => {
                if let Err(err) = browser_session().clear_order() {
                    log::warn!("[checkout] could not clear order: {}", err);
                }
            }
            CheckoutEffect::Notify(level, text) => {
                self.status.set(text.clone());
                ctx.toaster.push(level, text);
            }
            CheckoutEffect::NavigateAway(destination) => {
                let delay = u32::try_from(self.redirect_delay.as_millis()).unwrap_or(u32::MAX);
                let route = destination_route(destination);
                spawn_local(async move {
                    TimeoutFuture::new(delay).await;
                    // Only leave if the student is still looking at checkout
                    if ctx.route() == Route::Checkout {
                        ctx.navigate(route);
                    }
                });
            }
            CheckoutEffect::LoadScript | CheckoutEffect::OpenWidget | CheckoutEffect::CloseWidget => {
                log::debug!("[checkout] bridge effect reached the page: {:?}", effect);
            }
        }
    }
}

fn pending_order() -> Option<PaymentOrder> {
    browser_session().load_order().unwrap_or_else(|err| {
        log::warn!("[checkout] could not read order: {}", err);
        None
    })
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    match pending_order() {
        Some(order) => view! { <CheckoutSession order=order /> }.into_any(),
        None => view! { <FatalError message=NO_PAYMENT_IN_PROGRESS /> }.into_any(),
    }
}

#[component]
fn CheckoutSession(order: PaymentOrder) -> impl IntoView {
    let ctx = use_app();
    let config = ctx.config();
    let user = ctx.session.with_untracked(|s| s.as_ref().map(|s| s.user.clone()));

    let status = RwSignal::new("Opening secure checkout...".to_string());
    let fatal = RwSignal::new(None::<String>);

    let options = CheckoutOptions::new(&config, &order, user.as_ref());
    let provider = RazorpayProvider::new(config.checkout_script_url.clone(), options);
    let bridge = Rc::new(CheckoutBridge::new(provider));

    let held = StoredValue::new_local(Rc::clone(&bridge));
    on_cleanup(move || {
        held.try_with_value(|bridge| bridge.teardown());
    });

    let sink = PageEffects {
        ctx,
        redirect_delay: config.redirect_delay,
        status,
    };
    spawn_local(async move {
        match bridge.run(&sink).await {
            CheckoutOutcome::Unavailable(reason) => {
                log::error!("[checkout] widget unavailable: {}", reason);
                fatal.set(Some(reason));
            }
            CheckoutOutcome::Abandoned => log::info!("[checkout] left before finishing"),
            outcome => log::debug!("[checkout] outcome {:?}", outcome),
        }
    });

    let amount = format_amount(order.amount, &order.currency);

    view! {
        <Show
            when=move || fatal.with(|f| f.is_none())
            fallback=move || view! { <FatalError message=fatal.get().unwrap_or_default() /> }
        >
            <section class="page checkout-page">
                <h2>"Checkout"</h2>
                <div class="order-summary">
                    <div class="order-title">{order.material_title.clone()}</div>
                    <div class="order-amount">{amount.clone()}</div>
                    <div class="muted">{format!("Order {}", order.order_id)}</div>
                </div>
                <p class="checkout-status">{move || status.get()}</p>
            </section>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destinations() {
        assert_eq!(destination_route(Destination::Library), Route::StudentLibrary);
        assert_eq!(destination_route(Destination::Browse), Route::StudentBrowse);
    }
}
