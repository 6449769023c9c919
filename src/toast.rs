//! Toast Notification System
//!
//! A single-slot notification store with one auto-dismiss deadline, plus the
//! [`Notifier`] handle pages use to reach it. A new toast replaces the current
//! one outright; nothing is queued.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default display time for a toast
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Toast notification severity/type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (yellow)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastKind {
    /// Parse a kind name. Unknown names fall back to [`ToastKind::Info`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "warning" | "warn" => ToastKind::Warning,
            "error" => ToastKind::Error,
            _ => ToastKind::Info,
        }
    }

    /// Get the icon for this toast kind
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Info => "ℹ",
            ToastKind::Warning => "⚠",
            ToastKind::Error => "✖",
        }
    }

    /// Get the color for this toast kind
    pub fn color(&self, colors: &crate::themes::ColorPalette) -> ratatui::style::Color {
        match self {
            ToastKind::Success => colors.green.to_ratatui(),
            ToastKind::Info => colors.blue.to_ratatui(),
            ToastKind::Warning => colors.yellow.to_ratatui(),
            ToastKind::Error => colors.red.to_ratatui(),
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The message to display
    pub message: String,
    /// The kind of toast
    pub kind: ToastKind,
    /// How long to display the toast
    pub duration: Duration,
}

impl Notification {
    pub fn new(kind: ToastKind, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            // Durations are strictly positive
            duration: duration.max(Duration::from_millis(1)),
        }
    }
}

/// The visible notification together with its armed deadline
#[derive(Debug, Clone)]
struct ActiveToast {
    notification: Notification,
    shown_at: Instant,
    deadline: Instant,
    generation: u64,
}

/// Holds at most one notification and the single deadline that dismisses it.
///
/// Every time-dependent method takes `now` explicitly; [`Notifier`] supplies
/// the wall clock for callers that don't care.
#[derive(Debug, Default)]
pub struct ToastStore {
    active: Option<ActiveToast>,
    /// Incremented every time a deadline is armed
    generation: u64,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing and arm a fresh deadline.
    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.generation += 1;
        let deadline = now + notification.duration;
        tracing::debug!(
            kind = ?notification.kind,
            generation = self.generation,
            "showing toast: {}",
            notification.message
        );
        self.active = Some(ActiveToast {
            notification,
            shown_at: now,
            deadline,
            generation: self.generation,
        });
    }

    /// Clear the current notification and disarm its deadline. No-op when idle.
    pub fn dismiss(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!(generation = active.generation, "toast dismissed");
        }
    }

    /// Expire the notification once its deadline has passed.
    /// Returns true if a toast was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.active {
            Some(active) if now >= active.deadline => {
                tracing::debug!(generation = active.generation, "toast expired");
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.active.as_ref().map(|a| &a.notification)
    }

    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    /// Deadline of the armed timer, if any. There is never more than one.
    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.deadline)
    }

    /// Generation of the armed timer, if any
    pub fn armed_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// Total number of deadlines armed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get remaining time as a fraction (1.0 = full, 0.0 = expired)
    pub fn remaining_fraction(&self, now: Instant) -> f32 {
        match &self.active {
            Some(active) => {
                let elapsed = now.saturating_duration_since(active.shown_at).as_secs_f32();
                let total = active.notification.duration.as_secs_f32();
                (1.0 - elapsed / total).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }
}

/// Cloneable handle to the application's toast store.
///
/// Handed to every page through its context so nothing reaches for a global.
#[derive(Debug, Clone)]
pub struct Notifier {
    store: Rc<RefCell<ToastStore>>,
    default_duration: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION)
    }

    pub fn with_default_duration(default_duration: Duration) -> Self {
        Self {
            store: Rc::new(RefCell::new(ToastStore::new())),
            default_duration,
        }
    }

    /// Show a toast, replacing any current one
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) {
        self.store
            .borrow_mut()
            .show(Notification::new(kind, message, duration), Instant::now());
    }

    /// Show a toast whose kind is given by name; unknown names render as info
    pub fn show_toast_str(&self, message: impl Into<String>, kind: &str, duration: Duration) {
        self.show_toast(message, ToastKind::parse_lenient(kind), duration);
    }

    /// Add an info toast with the default duration
    pub fn info(&self, message: impl Into<String>) {
        self.show_toast(message, ToastKind::Info, self.default_duration);
    }

    /// Add a success toast with the default duration
    pub fn success(&self, message: impl Into<String>) {
        self.show_toast(message, ToastKind::Success, self.default_duration);
    }

    /// Add a warning toast with the default duration
    pub fn warning(&self, message: impl Into<String>) {
        self.show_toast(message, ToastKind::Warning, self.default_duration);
    }

    /// Add an error toast with the default duration
    pub fn error(&self, message: impl Into<String>) {
        self.show_toast(message, ToastKind::Error, self.default_duration);
    }

    pub fn dismiss(&self) {
        self.store.borrow_mut().dismiss();
    }

    pub fn tick(&self, now: Instant) -> bool {
        self.store.borrow_mut().tick(now)
    }

    pub fn current(&self) -> Option<Notification> {
        self.store.borrow().current().cloned()
    }

    pub fn remaining_fraction(&self, now: Instant) -> f32 {
        self.store.borrow().remaining_fraction(now)
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(msg: &str, ms: u64) -> Notification {
        Notification::new(ToastKind::Info, msg, Duration::from_millis(ms))
    }

    #[test]
    fn test_latest_show_wins_with_single_deadline() {
        let start = Instant::now();
        let mut store = ToastStore::new();

        store.show(note("first", 3000), start);
        store.show(note("second", 3000), start + Duration::from_millis(500));
        store.show(note("third", 1000), start + Duration::from_millis(900));

        assert_eq!(store.current().unwrap().message, "third");
        assert_eq!(store.armed_generation(), Some(3));
        assert_eq!(store.deadline(), Some(start + Duration::from_millis(1900)));

        // The first toast's deadline would have been 3000ms; it must not matter
        assert!(store.tick(start + Duration::from_millis(1900)));
        assert!(!store.is_visible());
        assert!(!store.tick(start + Duration::from_millis(3000)));
    }

    #[test]
    fn test_replacement_resets_timer() {
        let start = Instant::now();
        let mut store = ToastStore::new();

        store.show(note("a", 1000), start);
        store.show(note("b", 1000), start + Duration::from_millis(800));

        // Past a's deadline, but b was armed later
        assert!(!store.tick(start + Duration::from_millis(1200)));
        assert_eq!(store.current().unwrap().message, "b");
        assert!(store.tick(start + Duration::from_millis(1800)));
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut store = ToastStore::new();
        store.dismiss();
        assert!(!store.is_visible());
        assert_eq!(store.generation(), 0);

        store.show(note("hello", 3000), Instant::now());
        store.dismiss();
        store.dismiss();
        assert!(store.current().is_none());
        assert!(store.deadline().is_none());
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_tick_before_deadline_keeps_toast() {
        let start = Instant::now();
        let mut store = ToastStore::new();
        store.show(note("still here", 3000), start);
        assert!(!store.tick(start + Duration::from_millis(2999)));
        assert!(store.is_visible());
    }

    #[test]
    fn test_remaining_fraction() {
        let start = Instant::now();
        let mut store = ToastStore::new();
        assert_eq!(store.remaining_fraction(start), 0.0);

        store.show(note("half", 2000), start);
        let half = store.remaining_fraction(start + Duration::from_millis(1000));
        assert!((half - 0.5).abs() < 0.01);
        assert_eq!(store.remaining_fraction(start + Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let n = Notification::new(ToastKind::Error, "boom", Duration::ZERO);
        assert!(n.duration > Duration::ZERO);
    }

    #[test]
    fn test_kind_parse_falls_back_to_info() {
        assert_eq!(ToastKind::parse_lenient("success"), ToastKind::Success);
        assert_eq!(ToastKind::parse_lenient("ERROR"), ToastKind::Error);
        assert_eq!(ToastKind::parse_lenient("warning"), ToastKind::Warning);
        assert_eq!(ToastKind::parse_lenient("sparkly"), ToastKind::Info);
        assert_eq!(ToastKind::parse_lenient(""), ToastKind::Info);
    }

    #[test]
    fn test_notifier_handles_share_one_store() {
        let notifier = Notifier::new();
        let clone = notifier.clone();

        notifier.success("saved");
        clone.show_toast_str("careful", "warning", Duration::from_millis(5000));

        let current = notifier.current().unwrap();
        assert_eq!(current.message, "careful");
        assert_eq!(current.kind, ToastKind::Warning);
        assert_eq!(current.duration, Duration::from_millis(5000));

        clone.dismiss();
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_notifier_default_duration() {
        let notifier = Notifier::new();
        notifier.info("hi");
        assert_eq!(notifier.current().unwrap().duration, DEFAULT_TOAST_DURATION);

        let notifier = Notifier::with_default_duration(Duration::from_millis(750));
        notifier.error("bad");
        assert_eq!(notifier.current().unwrap().duration, Duration::from_millis(750));
    }
}
