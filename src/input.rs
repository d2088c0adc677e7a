//! Text being composed by the user

/// Holds the draft until it is submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the current content, leaving the buffer empty
    pub fn consume(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Submission needs non-blank text and no request in flight
    pub fn can_submit(&self, pending: bool) -> bool {
        !pending && !self.is_blank()
    }
}
