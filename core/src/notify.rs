//! Transient success/error notifications.
//!
//! Two single-slot messages that exclude each other. Each visible message
//! has a deadline; `Notifier::expire` reports which slots are past theirs so
//! the controller can hide them. Time comes from a `Clock` so hosts and tests
//! can drive it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn other(self) -> MessageKind {
        match self {
            MessageKind::Success => MessageKind::Error,
            MessageKind::Error => MessageKind::Success,
        }
    }
}

#[derive(Debug)]
pub struct Notifier<C> {
    clock: C,
    success_duration: Duration,
    error_duration: Duration,
    success_deadline: Option<Instant>,
    error_deadline: Option<Instant>,
}

impl<C: Clock> Notifier<C> {
    pub fn new(clock: C, success_duration: Duration, error_duration: Duration) -> Self {
        Self {
            clock,
            success_duration,
            error_duration,
            success_deadline: None,
            error_deadline: None,
        }
    }

    /// Arm the deadline for `kind`, replacing any previous one, and disarm
    /// the other slot.
    pub fn show(&mut self, kind: MessageKind) {
        let now = self.clock.now();
        match kind {
            MessageKind::Success => {
                self.success_deadline = Some(now + self.success_duration);
                self.error_deadline = None;
            }
            MessageKind::Error => {
                self.error_deadline = Some(now + self.error_duration);
                self.success_deadline = None;
            }
        }
    }

    pub fn is_armed(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::Success => self.success_deadline.is_some(),
            MessageKind::Error => self.error_deadline.is_some(),
        }
    }

    /// Disarm and return every slot whose deadline has passed.
    pub fn expire(&mut self) -> Vec<MessageKind> {
        let now = self.clock.now();
        let mut expired = Vec::new();
        for (kind, deadline) in [
            (MessageKind::Success, &mut self.success_deadline),
            (MessageKind::Error, &mut self.error_deadline),
        ] {
            if deadline.is_some_and(|at| at <= now) {
                *deadline = None;
                expired.push(kind);
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(clock: &ManualClock) -> Notifier<ManualClock> {
        Notifier::new(clock.clone(), Duration::from_secs(3), Duration::from_secs(5))
    }

    #[test]
    fn success_expires_after_three_seconds() {
        let clock = ManualClock::new();
        let mut n = notifier(&clock);
        n.show(MessageKind::Success);
        clock.advance(Duration::from_millis(2999));
        assert!(n.expire().is_empty());
        clock.advance(Duration::from_millis(1));
        assert_eq!(n.expire(), vec![MessageKind::Success]);
        assert!(n.expire().is_empty());
    }

    #[test]
    fn error_expires_after_five_seconds() {
        let clock = ManualClock::new();
        let mut n = notifier(&clock);
        n.show(MessageKind::Error);
        clock.advance(Duration::from_secs(4));
        assert!(n.expire().is_empty());
        clock.advance(Duration::from_secs(1));
        assert_eq!(n.expire(), vec![MessageKind::Error]);
    }

    #[test]
    fn showing_one_disarms_the_other() {
        let clock = ManualClock::new();
        let mut n = notifier(&clock);
        n.show(MessageKind::Error);
        n.show(MessageKind::Success);
        assert!(n.is_armed(MessageKind::Success));
        assert!(!n.is_armed(MessageKind::Error));
    }

    #[test]
    fn repeat_notification_resets_timer() {
        let clock = ManualClock::new();
        let mut n = notifier(&clock);
        n.show(MessageKind::Success);
        clock.advance(Duration::from_secs(2));
        n.show(MessageKind::Success);
        clock.advance(Duration::from_secs(2));
        assert!(n.expire().is_empty());
        clock.advance(Duration::from_secs(1));
        assert_eq!(n.expire(), vec![MessageKind::Success]);
    }
}
