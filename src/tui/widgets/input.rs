//! Prompt input widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PLACEHOLDER: &str = "e.g., Tell me a random fact";
pub const BUSY_LABEL: &str = "Thinking...";
const KEY_HELP: &str = " Enter send | Esc clear | PgUp/PgDn scroll | Ctrl+C quit ";

/// Single-line prompt box; locked and labelled while a request is in flight
pub struct InputWidget<'a> {
    content: &'a str,
    busy: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            busy: false,
        }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

/// Longest suffix of `content` that fits in `max_width` columns
fn visible_tail(content: &str, max_width: usize) -> &str {
    if UnicodeWidthStr::width(content) <= max_width {
        return content;
    }

    let mut used = 0usize;
    let mut start = content.len();
    for (idx, c) in content.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = idx;
    }
    &content[start..]
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.busy {
            Color::DarkGray
        } else {
            Color::Cyan
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Prompt ")
            .title_bottom(Line::from(Span::styled(
                KEY_HELP,
                Style::default().fg(Color::DarkGray),
            )));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let line = if self.busy {
            Line::from(Span::styled(
                BUSY_LABEL,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else if self.content.is_empty() {
            Line::from(vec![
                Span::styled(" ", Style::default().bg(Color::White)),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            // Keep the tail visible when the prompt is wider than the box
            let max = (inner.width as usize).saturating_sub(1);
            let visible = visible_tail(self.content, max);
            Line::from(vec![
                Span::raw(visible),
                Span::styled(" ", Style::default().bg(Color::White)),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(widget: InputWidget<'_>, width: u16) -> String {
        let backend = TestBackend::new(width, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(widget, f.area()))
            .unwrap();

        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_placeholder_when_empty() {
        let line = render_to_string(InputWidget::new(""), 60);
        assert!(line.contains(PLACEHOLDER));
    }

    #[test]
    fn shows_thinking_while_busy() {
        let line = render_to_string(InputWidget::new("ignored").busy(true), 60);
        assert!(line.contains(BUSY_LABEL));
        assert!(!line.contains("ignored"));
    }

    #[test]
    fn tail_is_trimmed_by_display_width() {
        assert_eq!(visible_tail("abc", 5), "abc");
        assert_eq!(visible_tail("ab日本語", 5), "本語");
        assert_eq!(UnicodeWidthStr::width(visible_tail("🐙🐙🐙", 5)), 4);
    }

    #[test]
    fn long_input_shows_the_tail() {
        let line = render_to_string(InputWidget::new("abcdefghijklmnopqrstuvwxyz"), 12);
        assert!(line.contains("stuvwxyz"));
        assert!(!line.contains("abc"));
    }
}
