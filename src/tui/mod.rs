//! Terminal chat client for the agent endpoint
//!
//! One prompt may be in flight at a time. The request runs on a background
//! task and reports back over a channel so the event loop keeps drawing.

pub mod app;
pub mod client;
pub mod widgets;

pub use app::{ChatState, FAILURE_MESSAGE};
pub use client::AgentClient;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;
use tokio::sync::mpsc;

use widgets::{InputWidget, MessageList};

const TITLE: &str = "MCP Agent Interface";
const SCROLL_PAGE: u16 = 10;

type ChatTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive chat until the user quits
pub async fn run_chat(client: AgentClient) -> Result<()> {
    tracing::info!("Chat client using {}", client.endpoint());

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, client).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(terminal: &mut ChatTerminal, client: AgentClient) -> Result<()> {
    let mut state = ChatState::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, String>>();

    while !state.should_quit() {
        while let Ok(result) = rx.try_recv() {
            state.finish(result);
        }

        terminal.draw(|f| draw(f, &state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(prompt) = handle_key(&mut state, key) {
                    spawn_request(client.clone(), prompt, tx.clone());
                }
            }
            Event::Paste(text) => state.insert_str(&single_line(&text)),
            _ => {}
        }
    }

    Ok(())
}

/// Apply a key press; returns a prompt when one was submitted
fn handle_key(state: &mut ChatState, key: KeyEvent) -> Option<String> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.quit();
            None
        }
        (KeyCode::Enter, _) => state.submit(),
        (KeyCode::Backspace, _) => {
            state.delete_char_before();
            None
        }
        (KeyCode::Esc, _) => {
            state.clear_input();
            None
        }
        (KeyCode::PageUp, _) => {
            state.scroll_up(SCROLL_PAGE);
            None
        }
        (KeyCode::PageDown, _) => {
            state.scroll_down(SCROLL_PAGE);
            None
        }
        (KeyCode::Up, _) => {
            state.scroll_up(1);
            None
        }
        (KeyCode::Down, _) => {
            state.scroll_down(1);
            None
        }
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            state.insert_char(c);
            None
        }
        _ => None,
    }
}

/// Pasted line breaks become spaces so a paste never submits on its own
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Send the prompt on a background task
///
/// The outcome is always delivered, including when the request task panics,
/// so the busy state is cleared on every path.
fn spawn_request(
    client: AgentClient,
    prompt: String,
    tx: mpsc::UnboundedSender<Result<String, String>>,
) {
    tokio::spawn(async move {
        let request = tokio::spawn(async move { client.ask(&prompt).await });
        let result = match request.await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(format!("{:#}", e)),
            Err(e) => Err(format!("request task failed: {}", e)),
        };
        let _ = tx.send(result);
    });
}

fn draw(f: &mut Frame, state: &ChatState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    f.render_widget(
        MessageList::new(state.messages()).scroll_from_bottom(state.scroll_from_bottom()),
        chunks[1],
    );
    f.render_widget(InputWidget::new(state.input()).busy(state.is_busy()), chunks[2]);
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> Result<ChatTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut ChatTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
