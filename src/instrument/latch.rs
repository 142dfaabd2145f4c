// ---------------------------------------------------------------------------
// Imaging latch: one activation per access opportunity
// ---------------------------------------------------------------------------

/// Set when the controller commands the device; only an external reset clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagingLatch {
    imaged: bool,
}

impl ImagingLatch {
    pub fn new() -> Self {
        Self { imaged: false }
    }

    pub fn is_imaged(&self) -> bool {
        self.imaged
    }

    /// Re-arm after the ground confirms the image was acquired.
    pub fn reset(&mut self) {
        self.imaged = false;
    }

    pub(super) fn mark_imaged(&mut self) {
        self.imaged = true;
    }
}
