//! Timing windows over the wrapping millisecond tick counter.
//!
//! A [`Window`] remembers when a transient activation started (light on,
//! display awake, intrusion reported). It is "running" while the time since
//! opening is within the caller-supplied duration and "expired" otherwise.
//! An inactive window is always expired.
//!
//! The tick counter is a `u32` that wraps roughly every 49.7 days. If a
//! window's start lies in the future relative to `now`, the counter wrapped
//! after the window opened and the window is treated as inactive. This
//! heuristic misjudges a window opened just before a wrap and still running
//! just after it.

/// A debounce / auto-expiry interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    start_ms: Option<u32>,
}

impl Window {
    /// A window that has never been opened.
    pub const INACTIVE: Self = Self { start_ms: None };

    /// (Re)open the window at `now`.
    pub fn open(&mut self, now: u32) {
        self.start_ms = Some(now);
    }

    /// Deactivate the window.
    pub fn close(&mut self) {
        self.start_ms = None;
    }

    pub fn is_open(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn start_ms(&self) -> Option<u32> {
        self.start_ms
    }

    /// Milliseconds since the window opened.
    ///
    /// `None` when the window is inactive or the clock wrapped since it
    /// opened (`start > now`).
    pub fn elapsed(&self, now: u32) -> Option<u32> {
        match self.start_ms {
            Some(start) if start <= now => Some(now - start),
            _ => None,
        }
    }

    /// `true` once more than `duration_ms` has passed since opening, or if
    /// the window is inactive.
    pub fn is_expired(&self, now: u32, duration_ms: u32) -> bool {
        self.elapsed(now).is_none_or(|e| e > duration_ms)
    }

    pub fn is_running(&self, now: u32, duration_ms: u32) -> bool {
        !self.is_expired(now, duration_ms)
    }

    /// Apply the wrap guard: close the window if its start lies after `now`.
    pub fn normalize(&mut self, now: u32) {
        if self.start_ms.is_some_and(|start| start > now) {
            self.close();
        }
    }

    /// Reopen the window if it has expired. Returns `true` when reopened.
    pub fn reopen_if_expired(&mut self, now: u32, duration_ms: u32) -> bool {
        self.normalize(now);
        if self.is_expired(now, duration_ms) {
            self.open(now);
            true
        } else {
            false
        }
    }
}
