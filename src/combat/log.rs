//! Ring-buffer combat log.

/// Maximum retained messages.
pub(crate) const LOG_CAP: usize = 100;
/// Maximum message length in bytes; longer writes are truncated.
pub(crate) const MSG_CAP: usize = 256;

/// Fixed-capacity message ring. Writes never fail; overflow silently
/// overwrites the oldest entry. Retrieval is most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatLog {
    slots: Vec<String>,
    head: usize,
}

impl CombatLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        CombatLog {
            slots: Vec::with_capacity(LOG_CAP),
            head: 0,
        }
    }

    /// Append a message, truncating to 256 bytes on a char boundary.
    pub fn push(&mut self, message: impl Into<String>) {
        let mut message = message.into();
        if message.len() > MSG_CAP {
            let mut cut = MSG_CAP;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        if self.slots.len() < LOG_CAP {
            self.slots.push(message);
            self.head = self.slots.len() % LOG_CAP;
        } else {
            self.slots[self.head] = message;
            self.head = (self.head + 1) % LOG_CAP;
        }
    }

    /// The `n` most recent messages, most recent first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&str> {
        let count = n.min(self.slots.len());
        let mut out = Vec::with_capacity(count);
        let mut idx = self.head;
        for _ in 0..count {
            idx = if idx == 0 { self.slots.len() - 1 } else { idx - 1 };
            out.push(self.slots[idx].as_str());
        }
        out
    }

    /// Number of retained messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
