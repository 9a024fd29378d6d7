//! Chat client state
//!
//! Pure state machine for the terminal client: the transcript, the input
//! buffer and the single in-flight request guard. Rendering and I/O live
//! elsewhere so this can be tested without a terminal.

use crate::llm::Message;

/// Assistant message shown when a request fails for any reason
pub const FAILURE_MESSAGE: &str = "Sorry, I couldn't get a response. Please check the logs.";

#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<Message>,
    input: String,
    /// A submission is in flight
    busy: bool,
    /// Lines scrolled up from the newest message; 0 follows the bottom
    scroll_from_bottom: u16,
    should_quit: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn scroll_from_bottom(&self) -> u16 {
        self.scroll_from_bottom
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether the submit action is currently possible
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.busy {
            self.input.push(c);
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        if !self.busy {
            self.input.push_str(s);
        }
    }

    pub fn delete_char_before(&mut self) {
        if !self.busy {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        if !self.busy {
            self.input.clear();
        }
    }

    /// Accept the current input as a prompt
    ///
    /// Returns the prompt to send, or `None` when the input is blank or a
    /// request is already in flight. On accept the user message is appended,
    /// the input is cleared and the client becomes busy.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        let prompt = std::mem::take(&mut self.input);
        self.push_message(Message::user(prompt.clone()));
        self.busy = true;
        Some(prompt)
    }

    pub fn on_success(&mut self, response: impl Into<String>) {
        self.push_message(Message::assistant(response));
        self.busy = false;
    }

    pub fn on_failure(&mut self, error: &str) {
        tracing::error!("Failed to fetch from agent API: {}", error);
        self.push_message(Message::assistant(FAILURE_MESSAGE));
        self.busy = false;
    }

    /// Apply the result of an in-flight request
    pub fn finish(&mut self, result: Result<String, String>) {
        match result {
            Ok(response) => self.on_success(response),
            Err(error) => self.on_failure(&error),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Every transcript change snaps the view back to the newest message
    fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_from_bottom = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn blank_input_is_not_submitted() {
        let mut state = ChatState::new();
        assert_eq!(state.submit(), None);

        state.insert_str("   \t");
        assert_eq!(state.submit(), None);
        assert!(state.messages().is_empty());
        assert!(!state.is_busy());
    }

    #[test]
    fn submit_appends_user_message_and_sets_busy() {
        let mut state = ChatState::new();
        state.insert_str("Tell me a random fact");

        assert_eq!(state.submit().as_deref(), Some("Tell me a random fact"));
        assert!(state.is_busy());
        assert_eq!(state.input(), "");
        assert_eq!(state.messages(), &[Message::user("Tell me a random fact")]);
    }

    #[test]
    fn submit_while_busy_is_a_no_op() {
        let mut state = ChatState::new();
        state.insert_str("first");
        assert!(state.submit().is_some());

        // Input is locked while busy
        state.insert_str("second");
        assert_eq!(state.input(), "");
        assert_eq!(state.submit(), None);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn success_appends_assistant_message_and_clears_busy() {
        let mut state = ChatState::new();
        state.insert_str("Tell me a random fact");
        state.submit();
        state.finish(Ok("Here's a fact: Octopuses have three hearts.".to_string()));

        assert!(!state.is_busy());
        let last = state.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Here's a fact: Octopuses have three hearts.");
    }

    #[test]
    fn failure_appends_apology_and_clears_busy() {
        let mut state = ChatState::new();
        state.insert_str("hello");
        state.submit();
        state.finish(Err("connection refused".to_string()));

        assert!(!state.is_busy());
        assert_eq!(state.messages().last().unwrap().content, FAILURE_MESSAGE);

        // Input is usable again
        state.insert_str("again");
        assert!(state.can_submit());
    }

    #[test]
    fn new_messages_scroll_to_bottom() {
        let mut state = ChatState::new();
        state.scroll_up(5);
        assert_eq!(state.scroll_from_bottom(), 5);

        state.insert_str("hi");
        state.submit();
        assert_eq!(state.scroll_from_bottom(), 0);

        state.scroll_up(3);
        state.scroll_down(1);
        assert_eq!(state.scroll_from_bottom(), 2);
        state.on_success("hello");
        assert_eq!(state.scroll_from_bottom(), 0);
    }

    #[test]
    fn raw_prompt_is_sent_untrimmed() {
        let mut state = ChatState::new();
        state.insert_str("  spaced out  ");
        assert_eq!(state.submit().as_deref(), Some("  spaced out  "));
    }

    #[test]
    fn backspace_edits_input() {
        let mut state = ChatState::new();
        state.insert_str("factz");
        state.delete_char_before();
        assert_eq!(state.input(), "fact");
        state.clear_input();
        assert_eq!(state.input(), "");
    }
}
