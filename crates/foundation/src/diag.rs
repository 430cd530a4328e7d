/// A single diagnostic event.
///
/// For now this is structured text; consumers that need machine-readable
/// payloads encode them into the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagEvent {
    pub kind: &'static str,
    pub message: String,
}

/// Bounded in-memory diagnostics log.
///
/// Everything non-fatal lands here: data-quality findings, rejected taps,
/// gesture skips. The cap drops the oldest entries first.
#[derive(Debug)]
pub struct DiagnosticsLog {
    events: Vec<DiagEvent>,
    cap: usize,
}

impl DiagnosticsLog {
    pub const DEFAULT_CAP: usize = 300;

    pub fn new() -> Self {
        Self::with_cap(Self::DEFAULT_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            events: Vec::new(),
            cap: cap.max(1),
        }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.events.push(DiagEvent {
            kind,
            message: message.into(),
        });
        if self.events.len() > self.cap {
            let overflow = self.events.len() - self.cap;
            self.events.drain(..overflow);
        }
    }

    pub fn events(&self) -> &[DiagEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DiagEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new()
    }
}
