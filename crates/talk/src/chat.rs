//! General Talk message log.

/// Shown when the endpoint returned neither an answer nor an error.
pub const NO_RESPONSE: &str = "No response.";
/// Shown when the request itself failed.
pub const FETCH_FAILED: &str = "Failed to fetch response.";

/// One exchange in the side chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// What the user sent
    pub user: String,
    /// Reply, `None` while waiting
    pub response: Option<String>,
}

/// Ordered chat history with at most one request in flight.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    waiting: Option<usize>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending message and return its index.
    ///
    /// Returns `None` for blank input or while another message is waiting.
    pub fn begin(&mut self, input: &str) -> Option<usize> {
        if input.trim().is_empty() || self.waiting.is_some() {
            return None;
        }
        let index = self.messages.len();
        self.messages.push(ChatMessage {
            user: input.to_string(),
            response: None,
        });
        self.waiting = Some(index);
        Some(index)
    }

    /// Store the reply for the message at `index`.
    ///
    /// Other messages are never touched. Returns false for an unknown index.
    pub fn resolve(&mut self, index: usize, response: impl Into<String>) -> bool {
        let Some(message) = self.messages.get_mut(index) else {
            return false;
        };
        message.response = Some(response.into());
        if self.waiting == Some(index) {
            self.waiting = None;
        }
        true
    }

    /// Mark the message at `index` as failed.
    pub fn fail(&mut self, index: usize) -> bool {
        self.resolve(index, FETCH_FAILED)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_rejected() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin("   "), None);
        assert!(log.is_empty());
    }

    #[test]
    fn test_second_send_blocked_while_waiting() {
        let mut log = ChatLog::new();
        assert_eq!(log.begin("hello"), Some(0));
        assert_eq!(log.begin("again"), None);
        assert!(log.is_waiting());

        assert!(log.resolve(0, "hi"));
        assert!(!log.is_waiting());
        assert_eq!(log.begin("again"), Some(1));
    }

    #[test]
    fn test_resolve_targets_only_its_index() {
        let mut log = ChatLog::new();
        log.begin("first");
        log.resolve(0, "one");
        log.begin("second");

        log.fail(1);
        assert_eq!(log.messages()[0].response.as_deref(), Some("one"));
        assert_eq!(log.messages()[1].response.as_deref(), Some(FETCH_FAILED));
    }

    #[test]
    fn test_resolve_unknown_index() {
        let mut log = ChatLog::new();
        assert!(!log.resolve(3, "x"));
    }
}
