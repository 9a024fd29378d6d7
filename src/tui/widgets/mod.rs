//! Widgets for the chat client

mod input;
mod message_list;

pub use input::{InputWidget, BUSY_LABEL, PLACEHOLDER};
pub use message_list::{transcript_lines, wrap_text, MessageList};
