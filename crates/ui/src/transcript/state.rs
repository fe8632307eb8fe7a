use radar_core::Message;

/// Ordered message list shown in the chat pane
///
/// Messages are only ever appended, except that a trailing status
/// placeholder may be rewritten in place and the whole list may be swapped
/// when a scripted execution finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace every message at once
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Rewrite a trailing placeholder, or append a new one
    ///
    /// Returns `true` when an existing placeholder was rewritten.
    pub fn replace_or_append_status(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        match self.messages.last_mut() {
            Some(last) if last.is_model() && last.is_status_placeholder => {
                last.text = text;
                true
            }
            _ => {
                self.messages.push(Message::status(text));
                false
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages with status placeholders removed
    pub fn content_messages(&self) -> Vec<Message> {
        self.messages.iter().filter(|m| !m.is_status_placeholder).cloned().collect()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
