//! Message list widget for displaying the chat transcript
//!
//! Text is wrapped here rather than by `Paragraph` so the total height is
//! known exactly and the view can be pinned to the newest message.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::llm::{Message, Role};

const EMPTY_HINT: &str = "Ask me for a random fact!";

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
        Role::Tool => "Tool",
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
        Role::Tool => Color::Magenta,
    }
}

/// Greedy word wrap by display width; words wider than `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw_line.split_whitespace() {
            let mut word = word;

            while UnicodeWidthStr::width(word) > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let split = split_at_width(word, width);
                lines.push(word[..split].to_string());
                word = &word[split..];
            }

            let word_width = UnicodeWidthStr::width(word);
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

/// Byte index of the longest prefix of `word` that fits in `width` columns
///
/// Always consumes at least one char so a glyph wider than the box still
/// makes progress.
fn split_at_width(word: &str, width: usize) -> usize {
    let mut used = 0usize;
    for (idx, c) in word.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return if idx == 0 { c.len_utf8() } else { idx };
        }
        used += w;
    }
    word.len()
}

/// Build the transcript as display lines for a given inner width
pub fn transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let alignment = if msg.role == Role::User {
            Alignment::Right
        } else {
            Alignment::Left
        };

        lines.push(
            Line::from(Span::styled(
                role_label(msg.role),
                Style::default()
                    .fg(role_color(msg.role))
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(alignment),
        );

        for text_line in wrap_text(&msg.content, width) {
            lines.push(Line::from(text_line).alignment(alignment));
        }
    }

    lines
}

/// Scrollable transcript that sticks to the bottom unless scrolled up
pub struct MessageList<'a> {
    messages: &'a [Message],
    scroll_from_bottom: u16,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            scroll_from_bottom: 0,
        }
    }

    pub fn scroll_from_bottom(mut self, lines: u16) -> Self {
        self.scroll_from_bottom = lines;
        self
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.messages.is_empty() {
            let top = inner.y + inner.height / 2;
            let hint_area = Rect::new(inner.x, top, inner.width, 1.min(inner.height));
            Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .render(hint_area, buf);
            return;
        }

        let lines = transcript_lines(self.messages, inner.width as usize);
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let bottom_offset = total.saturating_sub(inner.height);
        let offset = bottom_offset.saturating_sub(self.scroll_from_bottom);

        Paragraph::new(lines)
            .scroll((offset, 0))
            .render(inner, buf);
    }
}
