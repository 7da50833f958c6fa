use crate::app::{Model, ToastLevel};
use crate::document::{Fragment, InlineStyle};
use crate::editor::{Cursor, Direction};
use crate::format::{self, FormatCommand, FormatTarget};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character at the cursor
    InsertChar(char),
    /// Split the block at the cursor (Enter)
    Newline,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Move cursor, extending the selection when the flag is set
    MoveCursor(Direction, bool),
    /// Move cursor to the start of the block (Home)
    MoveHome(bool),
    /// Move cursor to the end of the block (End)
    MoveEnd(bool),
    /// Select the whole focused page
    SelectAll,
    /// Bracketed paste: append plain text to the last page and paginate
    Paste(String),

    // Formatting
    /// Apply a formatting command to the selection
    Format(FormatCommand),
    /// Apply a formatting command by name; unknown names are ignored
    ExecCommand(String, Option<String>),
    /// Open the text color prompt
    OpenColorPrompt,
    /// Update the text typed into the color prompt
    ColorPromptInput(String),
    /// Apply the color typed into the prompt
    ColorPromptSubmit,
    /// Close the color prompt without applying
    ColorPromptCancel,

    // Pages
    /// Append an empty page and focus it
    AddPage,
    /// Delete the focused page
    DeletePage,
    /// Focus the previous page
    FocusPrevPage,
    /// Focus the next page
    FocusNextPage,

    // Persistence
    /// Save all pages to local storage
    Save,
    /// Reset to a single empty page and remove the saved record
    Clear,

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the quit confirmation on any action other than the confirmed one.
    // Save preserves it so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(c) => {
            let mut buf = [0; 4];
            let text: &str = c.encode_utf8(&mut buf);
            edit(&mut model, |cursor, fragment, typing| {
                cursor.insert(fragment, text, typing);
                true
            });
        }
        Message::Newline => {
            edit(&mut model, |cursor, fragment, typing| {
                cursor.newline(fragment, typing);
                true
            });
        }
        Message::DeleteBack => {
            if edit(&mut model, |cursor, fragment, _| cursor.delete_back(fragment)) {
                model.sync_typing_style();
            }
        }
        Message::DeleteForward => {
            if edit(&mut model, |cursor, fragment, _| {
                cursor.delete_forward(fragment)
            }) {
                model.sync_typing_style();
            }
        }
        Message::MoveCursor(direction, extend) => {
            let page = focused_index(&model);
            model.cursor.move_cursor(
                &model.document.pages()[page].content,
                direction,
                extend,
            );
            model.sync_typing_style();
        }
        Message::MoveHome(extend) => {
            let page = focused_index(&model);
            model
                .cursor
                .move_home(&model.document.pages()[page].content, extend);
            model.sync_typing_style();
        }
        Message::MoveEnd(extend) => {
            let page = focused_index(&model);
            model
                .cursor
                .move_end(&model.document.pages()[page].content, extend);
            model.sync_typing_style();
        }
        Message::SelectAll => {
            let page = focused_index(&model);
            model
                .cursor
                .select_all(&model.document.pages()[page].content);
        }
        Message::Paste(text) => paste(&mut model, &text),

        // Formatting
        Message::Format(command) => {
            with_format_target(&mut model, |target| format::apply(target, command));
        }
        Message::ExecCommand(name, value) => {
            with_format_target(&mut model, |target| {
                format::dispatch(target, &name, value.as_deref());
            });
        }
        Message::OpenColorPrompt => {
            model.color_prompt = Some(model.toolbar.color.to_string());
        }
        Message::ColorPromptInput(text) => {
            if model.color_prompt.is_some() {
                model.color_prompt = Some(text);
            }
        }
        Message::ColorPromptSubmit => {
            if let Some(value) = model.color_prompt.take() {
                with_format_target(&mut model, |target| {
                    format::dispatch(target, "foreColor", Some(&value));
                });
            }
        }
        Message::ColorPromptCancel => model.color_prompt = None,

        // Pages
        Message::AddPage => {
            let id = model.document.add_page();
            model.focus_last_page();
            model.dirty = true;
            model.show_toast(ToastLevel::Info, format!("Added page {id}"));
        }
        Message::DeletePage => {
            let index = focused_index(&model);
            let id = model.document.pages()[index].id;
            if model.document.delete_page(id) {
                model.focus_page(index.min(model.document.len() - 1));
                model.dirty = true;
                model.show_toast(ToastLevel::Info, format!("Deleted page {id}"));
            }
        }
        Message::FocusPrevPage => {
            let index = focused_index(&model);
            if index > 0 {
                model.focus_page(index - 1);
            }
        }
        Message::FocusNextPage => {
            let index = focused_index(&model);
            if index + 1 < model.document.len() {
                model.focus_page(index + 1);
            }
        }

        // Writing to storage happens in the side-effect handler.
        Message::Save => {}
        Message::Clear => {
            model.document.reset();
            model.cursor = Cursor::new();
            model.typing = InlineStyle::default();
            model.focus_last_page();
            model.dirty = false;
        }

        // Window
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => model.size = (width, height),

        // Application
        Message::Quit => {
            if model.dirty && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn focused_index(model: &Model) -> usize {
    model.cursor.page.min(model.document.len() - 1)
}

/// Run an edit against the focused page. Marks the model dirty when `f`
/// reports a change.
fn edit(
    model: &mut Model,
    f: impl FnOnce(&mut Cursor, &mut Fragment, &InlineStyle) -> bool,
) -> bool {
    let page = focused_index(model);
    model.cursor.page = page;
    let fragment = &mut model.document.pages_mut()[page].content;
    let changed = f(&mut model.cursor, fragment, &model.typing);
    model.dirty |= changed;
    changed
}

fn with_format_target(model: &mut Model, f: impl FnOnce(&mut FormatTarget<'_>)) {
    let page = focused_index(model);
    let before = model.document.pages()[page].content.clone();
    let mut target = FormatTarget {
        fragment: &mut model.document.pages_mut()[page].content,
        selection: model.cursor.selection(),
        typing: &mut model.typing,
        toolbar: &mut model.toolbar,
    };
    f(&mut target);
    if model.document.pages()[page].content != before {
        model.dirty = true;
    }
}

fn paste(model: &mut Model, text: &str) {
    let outcome = model.paginator.paste(&mut model.document, text);
    if outcome.pasted_chars == 0 {
        return;
    }
    model.dirty = true;
    model.focus_last_page();
    if outcome.capped {
        model.show_toast(
            ToastLevel::Warning,
            "Paste too large: stopped splitting pages early",
        );
    } else if outcome.overflowed() {
        let count = outcome.created.len();
        let noun = if count == 1 { "page" } else { "pages" };
        model.show_toast(ToastLevel::Info, format!("Pasted text overflowed into {count} new {noun}"));
    }
}
