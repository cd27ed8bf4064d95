use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// Describes the state reached after a toggle.
    Toggle,
    /// Contextual help while hovering the title or a collapsed TOC.
    Hover,
    /// One-time instructions shown on the first visit.
    FirstVisit,
}

/// A floating hint message. Times are offsets on the page clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Hint {
    pub message: String,
    pub kind: HintKind,
    pub shown_at: Duration,
    pub timeout: Duration,
}

impl Hint {
    pub fn new(message: impl Into<String>, kind: HintKind, shown_at: Duration, timeout: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at,
            timeout,
        }
    }

    pub fn expires_at(&self) -> Duration {
        self.shown_at + self.timeout
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at()
    }

    pub fn remaining_time(&self, now: Duration) -> Duration {
        self.expires_at().saturating_sub(now)
    }
}

#[derive(Debug, Default, Clone)]
pub struct HintManager {
    current: Option<Hint>,
    shown_count: usize,
}

impl HintManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is showing; the new hint runs its own timeout.
    pub fn show(&mut self, hint: Hint) {
        log::debug!("Showing {:?} hint: {}", hint.kind, hint.message);
        self.current = Some(hint);
        self.shown_count += 1;
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Hint> {
        self.current.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Total number of hints shown so far.
    pub fn shown_count(&self) -> usize {
        self.shown_count
    }

    /// Drop the current hint if it has expired. Returns true when something was dismissed.
    ///
    /// A dismiss timer left over from a replaced hint is harmless: the newer
    /// hint has a later deadline and survives.
    pub fn update(&mut self, now: Duration) -> bool {
        if let Some(ref hint) = self.current {
            if hint.is_expired(now) {
                self.current = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_hint_expiry() {
        let hint = Hint::new("hello", HintKind::Toggle, ms(1000), ms(2000));
        assert!(!hint.is_expired(ms(2999)));
        assert!(hint.is_expired(ms(3000)));
        assert_eq!(hint.remaining_time(ms(2500)), ms(500));
        assert_eq!(hint.remaining_time(ms(9000)), Duration::ZERO);
    }

    #[test]
    fn test_stale_timer_keeps_newer_hint() {
        let mut hints = HintManager::new();
        hints.show(Hint::new("first", HintKind::Toggle, ms(0), ms(2000)));
        hints.show(Hint::new("second", HintKind::Toggle, ms(1500), ms(2000)));

        // The first hint's deadline passes, the second is still live.
        assert!(!hints.update(ms(2000)));
        assert_eq!(hints.current().unwrap().message, "second");

        assert!(hints.update(ms(3500)));
        assert!(!hints.is_showing());
        assert_eq!(hints.shown_count(), 2);
    }

    #[test]
    fn test_dismiss() {
        let mut hints = HintManager::new();
        hints.show(Hint::new("bye", HintKind::Hover, ms(0), ms(2000)));
        hints.dismiss();
        assert!(hints.current().is_none());
        assert!(!hints.update(ms(5000)));
    }
}
