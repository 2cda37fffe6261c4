//! Debounced Values
//!
//! A raw value only becomes the settled value after it has been stable for
//! the configured delay. Each new raw value arms the gate again, so timers
//! started for older values find their ticket stale and do nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

/// Identifies one armed timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counter shared between the input side and pending timers
#[derive(Debug, Default)]
pub struct DebounceGate {
    generation: AtomicU64,
    closed: AtomicBool,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any pending timer and hand out a ticket for a new one
    pub fn arm(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// A timer may emit only if nothing armed after it and the gate is open
    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Discard every pending timer for good (owner torn down)
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Follow `source` and settle on its value once it has not changed for `delay`.
///
/// The returned signal starts at the current value of `source`. Pending
/// updates are dropped when the owning component is cleaned up.
pub fn use_debounced<T>(source: Signal<T>, delay: Duration) -> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let (settled, set_settled) = signal(source.get_untracked());
    let gate = Arc::new(DebounceGate::new());
    let delay_ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);

    let timer_gate = gate.clone();
    Effect::new(move |_| {
        let value = source.get();
        let ticket = timer_gate.arm();
        let gate = timer_gate.clone();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(delay_ms).await;
            if gate.is_current(ticket) && settled.get_untracked() != value {
                set_settled.set(value);
            }
        });
    });

    on_cleanup(move || gate.close());
    settled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_emits() {
        let gate = DebounceGate::new();
        // "c", "a", "l" typed within the window: three timers armed
        let typed = ["c", "ca", "cal"];
        let tickets: Vec<(Ticket, &str)> = typed.iter().map(|v| (gate.arm(), *v)).collect();

        let emitted: Vec<&str> = tickets
            .iter()
            .filter(|(ticket, _)| gate.is_current(*ticket))
            .map(|(_, value)| *value)
            .collect();

        assert_eq!(emitted, vec!["cal"]);
    }

    #[test]
    fn test_new_input_after_pause_emits_again() {
        let gate = DebounceGate::new();
        let first = gate.arm();
        assert!(gate.is_current(first));

        let second = gate.arm();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn test_closed_gate_drops_pending() {
        let gate = DebounceGate::new();
        let ticket = gate.arm();
        gate.close();
        assert!(gate.is_closed());
        assert!(!gate.is_current(ticket));
        assert!(!gate.is_current(gate.arm()));
    }
}
