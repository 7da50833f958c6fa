use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::document::{Align, ListKind};
use crate::editor::Direction;
use crate::format::FormatCommand;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Paste(text) => {
                crate::perf::log_event("event.paste", format!("bytes={}", text.len()));
                Some(Message::Paste(text.clone()))
            }
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(prompt) = model.color_prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::ColorPromptCancel),
                KeyCode::Enter => Some(Message::ColorPromptSubmit),
                KeyCode::Backspace => {
                    let mut next = prompt.clone();
                    next.pop();
                    Some(Message::ColorPromptInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.clone();
                    next.push(c);
                    Some(Message::ColorPromptInput(next))
                }
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Self::handle_control_key(key);
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return Self::handle_format_key(key, model);
        }

        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, extend)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, extend)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, extend)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, extend)),
            KeyCode::Home => Some(Message::MoveHome(extend)),
            KeyCode::End => Some(Message::MoveEnd(extend)),
            KeyCode::PageUp => Some(Message::FocusPrevPage),
            KeyCode::PageDown => Some(Message::FocusNextPage),
            KeyCode::Enter => Some(Message::Newline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    fn handle_control_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('q' | 'c') => Some(Message::Quit),
            KeyCode::Char('s') => Some(Message::Save),
            KeyCode::Char('l') => Some(Message::Clear),
            KeyCode::Char('n') => Some(Message::AddPage),
            KeyCode::Char('d') => Some(Message::DeletePage),
            KeyCode::Char('a') => Some(Message::SelectAll),
            _ => None,
        }
    }

    fn handle_format_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let command = match key.code {
            KeyCode::Char('b') => FormatCommand::Bold,
            KeyCode::Char('i') => FormatCommand::Italic,
            KeyCode::Char('u') => FormatCommand::Underline,
            KeyCode::Char('l') => FormatCommand::Justify(Align::Left),
            KeyCode::Char('e') => FormatCommand::Justify(Align::Center),
            KeyCode::Char('r') => FormatCommand::Justify(Align::Right),
            KeyCode::Char('7') => FormatCommand::List(ListKind::Ordered),
            KeyCode::Char('8') => FormatCommand::List(ListKind::Unordered),
            KeyCode::Char('f') => FormatCommand::FontName(model.toolbar.font.next()),
            KeyCode::Char('s') => FormatCommand::FontSize(model.toolbar.size.larger()),
            KeyCode::Char('S') => FormatCommand::FontSize(model.toolbar.size.smaller()),
            KeyCode::Char('c') => return Some(Message::OpenColorPrompt),
            _ => return None,
        };
        Some(Message::Format(command))
    }

    pub(super) fn view(model: &Model, frame: &mut ratatui::Frame) {
        crate::ui::render(model, frame);
    }
}
