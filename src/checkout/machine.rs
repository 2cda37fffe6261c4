//! Checkout State Machine
//!
//! idle → script-loading → ready → modal-open → completed | dismissed | failed
//!
//! The machine is pure: it turns widget and lifecycle events into effects for
//! the page to run. Once a terminal state is reached every further event is
//! ignored, so a provider that fires callbacks twice still yields one close
//! and one navigation.

use crate::models::PaymentReceipt;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    Idle,
    ScriptLoading,
    Ready,
    ModalOpen,
    Completed,
    Dismissed,
    Failed,
    /// The provider script or payment session is unavailable
    LoadFailed(String),
    TornDown,
}

impl CheckoutPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutPhase::Completed
                | CheckoutPhase::Dismissed
                | CheckoutPhase::Failed
                | CheckoutPhase::LoadFailed(_)
                | CheckoutPhase::TornDown
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutEvent {
    Mount { script_present: bool },
    ScriptLoaded,
    ScriptFailed(String),
    Opened,
    OpenFailed(String),
    Succeeded(PaymentReceipt),
    PaymentFailed(String),
    Dismissed,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutEffect {
    LoadScript,
    OpenWidget,
    CloseWidget,
    VerifyPayment(PaymentReceipt),
    ClearOrder,
    Notify(NoticeLevel, String),
    /// Leave the checkout page after the configured delay
    NavigateAway(Destination),
}

/// Where the student lands once checkout is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Library,
    Browse,
}

/// How a checkout ended
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Completed(PaymentReceipt),
    Dismissed,
    Failed(String),
    Unavailable(String),
    Abandoned,
}

pub const DISMISSED_NOTICE: &str =
    "Payment was not completed. If any amount was charged it will be refunded.";
pub const FAILED_NOTICE: &str = "Payment failed";
pub const SUCCESS_NOTICE: &str = "Payment successful! The material is now in your library.";

#[derive(Debug, Clone)]
pub struct CheckoutMachine {
    phase: CheckoutPhase,
    outcome: Option<CheckoutOutcome>,
}

impl Default for CheckoutMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutMachine {
    pub fn new() -> Self {
        Self {
            phase: CheckoutPhase::Idle,
            outcome: None,
        }
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<&CheckoutOutcome> {
        self.outcome.as_ref()
    }

    fn finish(&mut self, phase: CheckoutPhase, outcome: CheckoutOutcome) {
        self.phase = phase;
        self.outcome = Some(outcome);
    }

    /// Advance on `event`; returns the effects to run, in order
    pub fn handle(&mut self, event: CheckoutEvent) -> Vec<CheckoutEffect> {
        use CheckoutEffect::*;

        if self.phase.is_terminal() {
            log::debug!("[checkout] ignoring {:?} in {:?}", event, self.phase);
            return Vec::new();
        }

        match (&self.phase, event) {
            (CheckoutPhase::Idle, CheckoutEvent::Mount { script_present }) => {
                if script_present {
                    self.phase = CheckoutPhase::Ready;
                    vec![OpenWidget]
                } else {
                    self.phase = CheckoutPhase::ScriptLoading;
                    vec![LoadScript]
                }
            }
            (CheckoutPhase::ScriptLoading, CheckoutEvent::ScriptLoaded) => {
                self.phase = CheckoutPhase::Ready;
                vec![OpenWidget]
            }
            (CheckoutPhase::ScriptLoading, CheckoutEvent::ScriptFailed(reason))
            | (CheckoutPhase::Ready, CheckoutEvent::OpenFailed(reason)) => {
                self.finish(
                    CheckoutPhase::LoadFailed(reason.clone()),
                    CheckoutOutcome::Unavailable(reason),
                );
                Vec::new()
            }
            (CheckoutPhase::Ready, CheckoutEvent::Opened) => {
                self.phase = CheckoutPhase::ModalOpen;
                Vec::new()
            }
            (CheckoutPhase::ModalOpen, CheckoutEvent::Succeeded(receipt)) => {
                self.finish(CheckoutPhase::Completed, CheckoutOutcome::Completed(receipt.clone()));
                vec![
                    CloseWidget,
                    VerifyPayment(receipt),
                    ClearOrder,
                    Notify(NoticeLevel::Success, SUCCESS_NOTICE.to_string()),
                    NavigateAway(Destination::Library),
                ]
            }
            (CheckoutPhase::ModalOpen, CheckoutEvent::Dismissed) => {
                self.finish(CheckoutPhase::Dismissed, CheckoutOutcome::Dismissed);
                vec![
                    CloseWidget,
                    ClearOrder,
                    Notify(NoticeLevel::Info, DISMISSED_NOTICE.to_string()),
                    NavigateAway(Destination::Browse),
                ]
            }
            (CheckoutPhase::ModalOpen, CheckoutEvent::PaymentFailed(reason)) => {
                let text = if reason.trim().is_empty() {
                    FAILED_NOTICE.to_string()
                } else {
                    format!("{}: {}", FAILED_NOTICE, reason)
                };
                self.finish(CheckoutPhase::Failed, CheckoutOutcome::Failed(reason));
                vec![
                    CloseWidget,
                    ClearOrder,
                    Notify(NoticeLevel::Error, text),
                    NavigateAway(Destination::Browse),
                ]
            }
            (phase, CheckoutEvent::Teardown) => {
                let open = *phase == CheckoutPhase::ModalOpen;
                self.finish(CheckoutPhase::TornDown, CheckoutOutcome::Abandoned);
                if open {
                    vec![CloseWidget]
                } else {
                    Vec::new()
                }
            }
            (phase, event) => {
                log::warn!("[checkout] unexpected {:?} in {:?}", event, phase);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> PaymentReceipt {
        PaymentReceipt {
            razorpay_payment_id: "pay_1".into(),
            razorpay_order_id: "order_1".into(),
            razorpay_signature: "sig".into(),
        }
    }

    fn open_machine() -> CheckoutMachine {
        let mut m = CheckoutMachine::new();
        assert_eq!(m.handle(CheckoutEvent::Mount { script_present: false }), vec![CheckoutEffect::LoadScript]);
        assert_eq!(*m.phase(), CheckoutPhase::ScriptLoading);
        assert_eq!(m.handle(CheckoutEvent::ScriptLoaded), vec![CheckoutEffect::OpenWidget]);
        assert!(m.handle(CheckoutEvent::Opened).is_empty());
        assert_eq!(*m.phase(), CheckoutPhase::ModalOpen);
        m
    }

    fn closes(effects: &[CheckoutEffect]) -> usize {
        effects.iter().filter(|e| **e == CheckoutEffect::CloseWidget).count()
    }

    fn navigations(effects: &[CheckoutEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, CheckoutEffect::NavigateAway(_)))
            .count()
    }

    #[test]
    fn test_script_already_present_skips_loading() {
        let mut m = CheckoutMachine::new();
        assert_eq!(m.handle(CheckoutEvent::Mount { script_present: true }), vec![CheckoutEffect::OpenWidget]);
        assert_eq!(*m.phase(), CheckoutPhase::Ready);
    }

    #[test]
    fn test_success_closes_verifies_and_leaves() {
        let mut m = open_machine();
        let effects = m.handle(CheckoutEvent::Succeeded(receipt()));
        assert_eq!(effects[0], CheckoutEffect::CloseWidget);
        assert!(effects.contains(&CheckoutEffect::VerifyPayment(receipt())));
        assert_eq!(effects.last(), Some(&CheckoutEffect::NavigateAway(Destination::Library)));
        assert_eq!(*m.phase(), CheckoutPhase::Completed);
        assert_eq!(m.outcome(), Some(&CheckoutOutcome::Completed(receipt())));
    }

    #[test]
    fn test_each_terminal_event_closes_and_navigates_once() {
        let terminals = vec![
            CheckoutEvent::Succeeded(receipt()),
            CheckoutEvent::Dismissed,
            CheckoutEvent::PaymentFailed("card declined".into()),
        ];
        for terminal in terminals {
            let mut m = open_machine();
            let mut effects = m.handle(terminal.clone());
            // provider fires again, plus every other terminal callback
            effects.extend(m.handle(terminal));
            effects.extend(m.handle(CheckoutEvent::Dismissed));
            effects.extend(m.handle(CheckoutEvent::PaymentFailed("again".into())));
            effects.extend(m.handle(CheckoutEvent::Succeeded(receipt())));
            effects.extend(m.handle(CheckoutEvent::Teardown));

            assert_eq!(closes(&effects), 1);
            assert_eq!(navigations(&effects), 1);
        }
    }

    #[test]
    fn test_dismiss_notice_mentions_refund() {
        let mut m = open_machine();
        let effects = m.handle(CheckoutEvent::Dismissed);
        assert!(effects.contains(&CheckoutEffect::Notify(NoticeLevel::Info, DISMISSED_NOTICE.to_string())));
        assert!(effects.contains(&CheckoutEffect::ClearOrder));
    }

    #[test]
    fn test_failure_reason_in_notice() {
        let mut m = open_machine();
        let effects = m.handle(CheckoutEvent::PaymentFailed("card declined".into()));
        assert!(effects.contains(&CheckoutEffect::Notify(
            NoticeLevel::Error,
            "Payment failed: card declined".to_string()
        )));
        assert_eq!(m.outcome(), Some(&CheckoutOutcome::Failed("card declined".into())));
    }

    #[test]
    fn test_script_failure_is_fatal() {
        let mut m = CheckoutMachine::new();
        m.handle(CheckoutEvent::Mount { script_present: false });
        let effects = m.handle(CheckoutEvent::ScriptFailed("blocked".into()));
        assert!(effects.is_empty());
        assert_eq!(*m.phase(), CheckoutPhase::LoadFailed("blocked".into()));
        assert!(m.handle(CheckoutEvent::Opened).is_empty());
    }

    #[test]
    fn test_teardown_force_closes_open_widget() {
        let mut m = open_machine();
        assert_eq!(m.handle(CheckoutEvent::Teardown), vec![CheckoutEffect::CloseWidget]);
        assert_eq!(m.outcome(), Some(&CheckoutOutcome::Abandoned));
        // late provider callback after unmount does nothing
        assert!(m.handle(CheckoutEvent::Succeeded(receipt())).is_empty());
    }

    #[test]
    fn test_teardown_before_open_closes_nothing() {
        let mut m = CheckoutMachine::new();
        m.handle(CheckoutEvent::Mount { script_present: false });
        assert!(m.handle(CheckoutEvent::Teardown).is_empty());
        assert_eq!(*m.phase(), CheckoutPhase::TornDown);
    }

    #[test]
    fn test_out_of_order_event_ignored() {
        let mut m = CheckoutMachine::new();
        assert!(m.handle(CheckoutEvent::Dismissed).is_empty());
        assert_eq!(*m.phase(), CheckoutPhase::Idle);
    }
}
