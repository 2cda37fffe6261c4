//! Payment Checkout
//!
//! The state machine is plain Rust and fully testable; the bridge runs it
//! against a `WidgetProvider`, and `razorpay` is the browser provider.

mod bridge;
mod machine;
mod razorpay;
mod script;

pub use bridge::{CheckoutBridge, CheckoutWidget, EffectSink, WidgetProvider};
pub use machine::{
    CheckoutEffect, CheckoutEvent, CheckoutMachine, CheckoutOutcome, CheckoutPhase, Destination,
    NoticeLevel, DISMISSED_NOTICE, FAILED_NOTICE, SUCCESS_NOTICE,
};
pub use razorpay::{CheckoutOptions, RazorpayProvider, RazorpayWidget};
