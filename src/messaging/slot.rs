// ---------------------------------------------------------------------------
// Single-value mailbox: each read sees the most recent write
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MessageSlot<T> {
    latest: Option<T>,
    writes: u64,
}

impl<T: Copy> MessageSlot<T> {
    pub fn new() -> Self {
        Self { latest: None, writes: 0 }
    }

    /// Slot that already holds `msg`, like a message written before the run starts.
    pub fn written(msg: T) -> Self {
        Self { latest: Some(msg), writes: 1 }
    }

    pub fn write(&mut self, msg: T) {
        self.latest = Some(msg);
        self.writes += 1;
    }

    pub fn read_latest(&self) -> Option<T> {
        self.latest
    }

    pub fn is_written(&self) -> bool {
        self.latest.is_some()
    }

    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Drop the held value; readers see the input as absent until the next write.
    pub fn clear(&mut self) {
        self.latest = None;
    }
}

impl<T: Copy> Default for MessageSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
