//! Runs a `CheckoutMachine` against a real (or fake) payment widget.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use super::machine::{CheckoutEffect, CheckoutEvent, CheckoutMachine, CheckoutOutcome, CheckoutPhase};
use crate::error::AppResult;

/// An opened payment modal
pub trait CheckoutWidget {
    fn open(&self) -> AppResult<()>;
    /// Must be safe to call more than once
    fn close(&self);
}

/// Loads the provider and builds widgets that report into `events`
#[async_trait(?Send)]
pub trait WidgetProvider {
    type Widget: CheckoutWidget;

    fn is_loaded(&self) -> bool;
    async fn load(&self) -> AppResult<()>;
    fn create(&self, events: UnboundedSender<CheckoutEvent>) -> AppResult<Self::Widget>;
}

/// Side effects that belong to the page: notices, storage, navigation
pub trait EffectSink {
    fn apply(&self, effect: CheckoutEffect);
}

pub struct CheckoutBridge<P: WidgetProvider> {
    provider: P,
    machine: RefCell<CheckoutMachine>,
    widget: RefCell<Option<P::Widget>>,
    sender: UnboundedSender<CheckoutEvent>,
    receiver: RefCell<Option<UnboundedReceiver<CheckoutEvent>>>,
}

impl<P: WidgetProvider> CheckoutBridge<P> {
    pub fn new(provider: P) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            provider,
            machine: RefCell::new(CheckoutMachine::new()),
            widget: RefCell::new(None),
            sender,
            receiver: RefCell::new(Some(receiver)),
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.machine.borrow().phase().clone()
    }

    fn handle(&self, event: CheckoutEvent) -> Vec<CheckoutEffect> {
        self.machine.borrow_mut().handle(event)
    }

    fn close_widget(&self) {
        if let Some(widget) = self.widget.borrow().as_ref() {
            widget.close();
        }
    }

    fn open_widget(&self) -> CheckoutEvent {
        let opened = self
            .provider
            .create(self.sender.clone())
            .and_then(|widget| widget.open().map(|_| widget));
        match opened {
            Ok(widget) => {
                *self.widget.borrow_mut() = Some(widget);
                CheckoutEvent::Opened
            }
            Err(err) => CheckoutEvent::OpenFailed(err.user_message()),
        }
    }

    /// Drive the checkout until it reaches a terminal phase
    pub async fn run(&self, sink: &impl EffectSink) -> CheckoutOutcome {
        let Some(mut receiver) = self.receiver.borrow_mut().take() else {
            log::warn!("[checkout] bridge already ran");
            return CheckoutOutcome::Abandoned;
        };

        let mut pending: VecDeque<CheckoutEffect> = self
            .handle(CheckoutEvent::Mount {
                script_present: self.provider.is_loaded(),
            })
            .into();

        loop {
            while let Some(effect) = pending.pop_front() {
                match effect {
                    CheckoutEffect::LoadScript => {
                        let event = match self.provider.load().await {
                            Ok(()) => CheckoutEvent::ScriptLoaded,
                            Err(err) => CheckoutEvent::ScriptFailed(err.user_message()),
                        };
                        pending.extend(self.handle(event));
                    }
                    CheckoutEffect::OpenWidget => {
                        let event = self.open_widget();
                        pending.extend(self.handle(event));
                    }
                    CheckoutEffect::CloseWidget => self.close_widget(),
                    other => sink.apply(other),
                }
            }

            if let Some(outcome) = self.machine.borrow().outcome() {
                log::info!("[checkout] finished: {:?}", outcome);
                return outcome.clone();
            }

            match receiver.next().await {
                Some(event) => pending.extend(self.handle(event)),
                None => {
                    let outcome = self.machine.borrow().outcome().cloned();
                    return outcome.unwrap_or(CheckoutOutcome::Abandoned);
                }
            }
        }
    }

    /// Page is going away: close an open modal and release `run`
    pub fn teardown(&self) {
        for effect in self.handle(CheckoutEvent::Teardown) {
            if effect == CheckoutEffect::CloseWidget {
                self.close_widget();
            }
        }
        self.sender.close_channel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::PaymentReceipt;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        loads: Cell<u32>,
        opens: Cell<u32>,
        closes: Cell<u32>,
    }

    struct FakeWidget {
        counters: Rc<Counters>,
    }

    impl CheckoutWidget for FakeWidget {
        fn open(&self) -> AppResult<()> {
            self.counters.opens.set(self.counters.opens.get() + 1);
            Ok(())
        }

        fn close(&self) {
            self.counters.closes.set(self.counters.closes.get() + 1);
        }
    }

    /// Replays `script` into the widget channel as soon as it is created
    struct FakeProvider {
        loaded: bool,
        load_error: Option<String>,
        script: Vec<CheckoutEvent>,
        counters: Rc<Counters>,
    }

    impl FakeProvider {
        fn new(script: Vec<CheckoutEvent>) -> Self {
            Self {
                loaded: false,
                load_error: None,
                script,
                counters: Rc::new(Counters::default()),
            }
        }
    }

    #[async_trait(?Send)]
    impl WidgetProvider for FakeProvider {
        type Widget = FakeWidget;

        fn is_loaded(&self) -> bool {
            self.loaded
        }

        async fn load(&self) -> AppResult<()> {
            self.counters.loads.set(self.counters.loads.get() + 1);
            match &self.load_error {
                Some(msg) => Err(AppError::External(msg.clone())),
                None => Ok(()),
            }
        }

        fn create(&self, events: UnboundedSender<CheckoutEvent>) -> AppResult<FakeWidget> {
            for event in &self.script {
                let _ = events.unbounded_send(event.clone());
            }
            Ok(FakeWidget {
                counters: self.counters.clone(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        effects: RefCell<Vec<CheckoutEffect>>,
    }

    impl EffectSink for RecordingSink {
        fn apply(&self, effect: CheckoutEffect) {
            self.effects.borrow_mut().push(effect);
        }
    }

    fn receipt() -> PaymentReceipt {
        PaymentReceipt {
            razorpay_payment_id: "pay_1".into(),
            razorpay_order_id: "order_1".into(),
            razorpay_signature: "sig".into(),
        }
    }

    #[test]
    fn test_duplicate_success_callbacks_close_once() {
        let provider = FakeProvider::new(vec![
            CheckoutEvent::Succeeded(receipt()),
            CheckoutEvent::Succeeded(receipt()),
            CheckoutEvent::Dismissed,
        ]);
        let counters = provider.counters.clone();
        let bridge = CheckoutBridge::new(provider);
        let sink = RecordingSink::default();

        let outcome = block_on(bridge.run(&sink));

        assert_eq!(outcome, CheckoutOutcome::Completed(receipt()));
        assert_eq!(counters.loads.get(), 1);
        assert_eq!(counters.opens.get(), 1);
        assert_eq!(counters.closes.get(), 1);
        let navigations = sink
            .effects
            .borrow()
            .iter()
            .filter(|e| matches!(e, CheckoutEffect::NavigateAway(_)))
            .count();
        assert_eq!(navigations, 1);
        assert!(sink.effects.borrow().contains(&CheckoutEffect::VerifyPayment(receipt())));
    }

    #[test]
    fn test_preloaded_script_is_not_reloaded() {
        let mut provider = FakeProvider::new(vec![CheckoutEvent::Dismissed]);
        provider.loaded = true;
        let counters = provider.counters.clone();
        let bridge = CheckoutBridge::new(provider);

        let outcome = block_on(bridge.run(&RecordingSink::default()));

        assert_eq!(outcome, CheckoutOutcome::Dismissed);
        assert_eq!(counters.loads.get(), 0);
    }

    #[test]
    fn test_script_failure_reports_unavailable() {
        let mut provider = FakeProvider::new(Vec::new());
        provider.load_error = Some("Could not load the payment provider".into());
        let counters = provider.counters.clone();
        let bridge = CheckoutBridge::new(provider);
        let sink = RecordingSink::default();

        let outcome = block_on(bridge.run(&sink));

        assert_eq!(outcome, CheckoutOutcome::Unavailable("Could not load the payment provider".into()));
        assert_eq!(counters.opens.get(), 0);
        assert!(sink.effects.borrow().is_empty());
        assert!(matches!(bridge.phase(), CheckoutPhase::LoadFailed(_)));
    }

    #[test]
    fn test_teardown_releases_pending_run() {
        let provider = FakeProvider::new(Vec::new());
        let counters = provider.counters.clone();
        let bridge = CheckoutBridge::new(provider);

        // no widget events queued: run parks on the channel until teardown
        let sink = RecordingSink::default();
        let outcome = block_on(async {
            let run = bridge.run(&sink);
            futures::pin_mut!(run);
            assert!(futures::poll!(run.as_mut()).is_pending());
            bridge.teardown();
            run.await
        });

        assert_eq!(outcome, CheckoutOutcome::Abandoned);
        assert_eq!(counters.closes.get(), 1);
        assert_eq!(bridge.phase(), CheckoutPhase::TornDown);
    }

    #[test]
    fn test_run_only_once() {
        let bridge = CheckoutBridge::new(FakeProvider::new(vec![CheckoutEvent::Dismissed]));
        let sink = RecordingSink::default();
        block_on(bridge.run(&sink));
        assert_eq!(block_on(bridge.run(&sink)), CheckoutOutcome::Abandoned);
    }
}
