use instant::Instant;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMsg {
    pub kind: StatusKind,
    pub text: String,
    pub at: Instant,
    pub timeout_ms: u128,
}

impl StatusMsg {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.at).as_millis() > self.timeout_ms
    }
}

/// Transient notifications shown on top of the central panel.
#[derive(Debug, Default)]
pub struct StatusQueue {
    q: VecDeque<StatusMsg>,
}

impl StatusQueue {
    pub fn new() -> Self {
        Self { q: VecDeque::new() }
    }

    pub fn push_custom(&mut self, kind: StatusKind, text: impl Into<String>, timeout_ms: u128) {
        let text = text.into();
        match kind {
            StatusKind::Warning => log::warn!("{text}"),
            StatusKind::Error => log::error!("{text}"),
            StatusKind::Info | StatusKind::Success => log::info!("{text}"),
        }
        self.q.push_back(StatusMsg {
            kind,
            text,
            at: Instant::now(),
            timeout_ms,
        });
    }

    pub fn push_info(&mut self, text: impl Into<String>) {
        self.push_custom(StatusKind::Info, text, 3000);
    }
    pub fn push_success(&mut self, text: impl Into<String>) {
        self.push_custom(StatusKind::Success, text, 3500);
    }
    pub fn push_warning(&mut self, text: impl Into<String>) {
        self.push_custom(StatusKind::Warning, text, 6000);
    }
    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push_custom(StatusKind::Error, text, 6000);
    }

    pub fn retain_active(&mut self) {
        self.retain_active_now(Instant::now());
    }

    pub fn retain_active_now(&mut self, now: Instant) {
        self.q.retain(|m| !m.is_expired_at(now));
    }

    /// Most recent non-expired message.
    pub fn latest(&self) -> Option<&StatusMsg> {
        self.q.back()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}
