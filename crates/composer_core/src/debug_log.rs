use std::collections::VecDeque;

/// Default cap for the operator debug log.
pub const DEBUG_LOG_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

/// One recorded endpoint attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    /// Caller-formatted timestamp (the core stays clock-free).
    pub at: String,
    pub detail: String,
    pub outcome: AttemptOutcome,
}

/// Bounded ring of endpoint-attempt entries for operator troubleshooting.
/// Newest entries first; the oldest are dropped past the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugLog {
    cap: usize,
    entries: VecDeque<DebugEntry>,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::with_cap(DEBUG_LOG_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, entry: DebugEntry) {
        self.entries.push_front(entry);
        while self.entries.len() > self.cap {
            self.entries.pop_back();
        }
    }

    /// Entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &DebugEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}
