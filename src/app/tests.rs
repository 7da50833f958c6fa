use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

use crate::document::{Document, FontSize, Fragment, Page, TextColor};
use crate::editor::Direction;
use crate::format::FormatCommand;
use crate::paginate::{Paginator, PixelLayout};

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, ToastLevel, update};

fn create_test_model() -> Model {
    let pages = vec![
        Page::new(1, Fragment::from_plain_text("first page")),
        Page::new(2, Fragment::from_plain_text("Hello world")),
    ];
    Model::new(Document::from_pages(pages).unwrap(), Paginator::default(), (80, 24))
}

fn type_text(mut model: Model, text: &str) -> Model {
    for c in text.chars() {
        model = update(model, Message::InsertChar(c));
    }
    model
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_new_model_focuses_last_page_end() {
    let model = create_test_model();
    assert_eq!(model.cursor.page, 1);
    assert_eq!(model.cursor.offset, "Hello world".len());
    assert!(!model.dirty);
}

#[test]
fn test_typing_edits_focused_page_and_marks_dirty() {
    let model = type_text(create_test_model(), "!");
    assert_eq!(model.focused().plain_text(), "Hello world!");
    assert_eq!(model.document.pages()[0].content.plain_text(), "first page");
    assert!(model.dirty);
}

#[test]
fn test_newline_and_backspace() {
    let mut model = update(Model::default(), Message::InsertChar('a'));
    model = update(model, Message::Newline);
    model = update(model, Message::InsertChar('b'));
    assert_eq!(model.focused().plain_text(), "a\nb");

    model = update(model, Message::DeleteBack);
    model = update(model, Message::DeleteBack);
    assert_eq!(model.focused().plain_text(), "a");
}

#[test]
fn test_cursor_moves_do_not_mark_dirty() {
    let mut model = create_test_model();
    model = update(model, Message::MoveCursor(Direction::Left, false));
    model = update(model, Message::MoveHome(false));
    assert_eq!(model.cursor.offset, 0);
    assert!(!model.dirty);
}

#[test]
fn test_fitting_paste_stays_on_last_page() {
    let model = update(create_test_model(), Message::Paste(", again".to_string()));
    assert_eq!(model.document.len(), 2);
    assert_eq!(model.focused().plain_text(), "Hello world, again");
    assert!(model.dirty);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_overflowing_paste_creates_pages_and_toasts() {
    let paginator = Paginator::new(PixelLayout::default(), 50);
    let model = Model::new(Document::new(), paginator, (80, 24));
    let model = update(model, Message::Paste("a\r\nb\r\nc\r\nd\r\ne".to_string()));

    assert!(model.document.len() >= 2);
    for index in 0..model.document.len() {
        assert!(!model.page_overflows(index), "page {index} overflows");
    }
    assert_eq!(model.cursor.page, model.document.len() - 1);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Info);
    assert!(message.contains("overflowed"));
}

#[test]
fn test_paste_goes_to_last_page_even_when_focus_is_earlier() {
    let mut model = update(create_test_model(), Message::FocusPrevPage);
    assert_eq!(model.cursor.page, 0);
    model = update(model, Message::Paste(" tail".to_string()));
    assert_eq!(model.document.pages()[0].content.plain_text(), "first page");
    assert_eq!(model.document.last().content.plain_text(), "Hello world tail");
}

#[test]
fn test_empty_paste_is_ignored() {
    let model = update(create_test_model(), Message::Paste(String::new()));
    assert!(!model.dirty);
}

#[test]
fn test_add_and_delete_page() {
    let mut model = update(create_test_model(), Message::AddPage);
    assert_eq!(model.document.len(), 3);
    assert_eq!(model.cursor.page, 2);
    assert_eq!(model.document.last().id, 3);
    assert!(model.dirty);

    model = update(model, Message::DeletePage);
    assert_eq!(model.document.len(), 2);
    assert_eq!(model.cursor.page, 1);
    let ids: Vec<_> = model.document.pages().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_delete_only_page_leaves_fresh_page() {
    let model = type_text(Model::default(), "gone");
    let model = update(model, Message::DeletePage);
    assert_eq!(model.document.len(), 1);
    assert!(model.focused().is_empty());
    assert_eq!(model.document.last().id, 2);
}

#[test]
fn test_focus_moves_between_pages_and_clamps() {
    let mut model = create_test_model();
    model = update(model, Message::FocusNextPage);
    assert_eq!(model.cursor.page, 1);
    model = update(model, Message::FocusPrevPage);
    assert_eq!(model.cursor.page, 0);
    assert_eq!(model.cursor.offset, "first page".len());
    model = update(model, Message::FocusPrevPage);
    assert_eq!(model.cursor.page, 0);
}

#[test]
fn test_bold_on_selection() {
    let mut model = update(create_test_model(), Message::SelectAll);
    model = update(model, Message::Format(FormatCommand::Bold));
    let len = model.focused().char_len();
    assert!(model.focused().all_styled(0..len, |s| s.bold));
    assert!(model.dirty);

    model = update(model, Message::Format(FormatCommand::Bold));
    assert!(model.focused().all_styled(0..len, |s| !s.bold));
}

#[test]
fn test_format_without_selection_sets_typing_style() {
    let mut model = update(Model::default(), Message::Format(FormatCommand::Italic));
    assert!(model.typing.italic);
    assert!(!model.dirty);
    model = type_text(model, "x");
    assert!(model.focused().all_styled(0..1, |s| s.italic));
}

#[test]
fn test_unknown_exec_command_is_ignored() {
    let before = update(create_test_model(), Message::SelectAll);
    let expected = before.focused().clone();
    let after = update(before, Message::ExecCommand("strikeThrough".to_string(), None));
    assert_eq!(after.focused(), &expected);
    assert!(!after.dirty);
}

#[test]
fn test_exec_command_font_size() {
    let mut model = update(create_test_model(), Message::SelectAll);
    model = update(
        model,
        Message::ExecCommand("fontSize".to_string(), Some("5".to_string())),
    );
    assert_eq!(model.toolbar.size, FontSize::new(5).unwrap());
    assert!(model.dirty);
}

#[test]
fn test_color_prompt_applies_color() {
    let mut model = update(create_test_model(), Message::SelectAll);
    model = update(model, Message::OpenColorPrompt);
    assert_eq!(model.color_prompt.as_deref(), Some("#000000"));

    model = update(model, Message::ColorPromptInput("#ff0000".to_string()));
    model = update(model, Message::ColorPromptSubmit);
    let red = TextColor::new(255, 0, 0);
    let len = model.focused().char_len();
    assert!(model.color_prompt.is_none());
    assert_eq!(model.toolbar.color, red);
    assert!(model.focused().all_styled(0..len, |s| s.color == Some(red)));
}

#[test]
fn test_color_prompt_ignores_bad_color_and_cancel() {
    let mut model = update(create_test_model(), Message::SelectAll);
    model = update(model, Message::OpenColorPrompt);
    model = update(model, Message::ColorPromptInput("not a color".to_string()));
    model = update(model, Message::ColorPromptSubmit);
    assert!(!model.dirty);

    model = update(model, Message::OpenColorPrompt);
    model = update(model, Message::ColorPromptCancel);
    assert!(model.color_prompt.is_none());
}

#[test]
fn test_clear_resets_model() {
    let mut model = type_text(update(create_test_model(), Message::AddPage), "x");
    model = update(model, Message::Format(FormatCommand::Bold));
    model = update(model, Message::Clear);
    assert_eq!(model.document, Document::new());
    assert_eq!(model.cursor.page, 0);
    assert_eq!(model.cursor.offset, 0);
    assert!(!model.typing.bold);
    assert!(!model.dirty);
}

#[test]
fn test_toggle_help_changes_visibility() {
    let model = create_test_model();
    assert!(!model.help_visible);

    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);

    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_toast_lifecycle() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Warning, "disk full");
    let (msg, level) = model.active_toast().expect("toast should be set");
    assert_eq!(msg, "disk full");
    assert_eq!(level, ToastLevel::Warning);
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_quit_sets_should_quit() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_unsaved_changes_needs_confirmation() {
    let model = type_text(create_test_model(), "!");
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Warning));

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_resets_quit_confirmation() {
    let model = type_text(create_test_model(), "!");
    let model = update(model, Message::Quit);
    let model = update(model, Message::MoveHome(false));
    assert!(!model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_resize_updates_size() {
    let model = update(create_test_model(), Message::Resize(120, 50));
    assert_eq!(model.size, (120, 50));
}

#[test]
fn test_save_side_effect_writes_and_clears_dirty() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().to_path_buf());
    let mut model = type_text(create_test_model(), "!");
    model = update(model, Message::Save);
    app.handle_message_side_effects(&mut model, &Message::Save);

    assert!(!model.dirty);
    assert_eq!(
        model.active_toast(),
        Some(("Content saved locally!", ToastLevel::Info))
    );
    assert!(dir.path().join("editorPages.json").exists());
}

#[test]
fn test_save_allows_pending_quit_to_complete() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().to_path_buf());
    let mut model = update(type_text(create_test_model(), "!"), Message::Quit);
    model = update(model, Message::Save);
    app.handle_message_side_effects(&mut model, &Message::Save);
    model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_save_failure_shows_error_toast() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let app = App::new(blocker);
    let mut model = type_text(create_test_model(), "!");
    app.handle_message_side_effects(&mut model, &Message::Save);

    assert!(model.dirty);
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Error));
}

#[test]
fn test_initial_model_restores_saved_pages() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().to_path_buf()).with_page_height(Some(900));
    let mut model = create_test_model();
    app.handle_message_side_effects(&mut model, &Message::Save);

    let restored = app.initial_model((80, 24));
    assert_eq!(restored.document, model.document);
    assert_eq!(restored.paginator.max_height(), 900);
    assert_eq!(restored.cursor.page, 1);
    assert_eq!(
        restored.active_toast(),
        Some(("Restored 2 saved page(s)", ToastLevel::Info))
    );
}

#[test]
fn test_initial_model_without_record_is_default() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().to_path_buf());
    let model = app.initial_model((80, 24));
    assert_eq!(model.document, Document::new());
    assert!(model.active_toast().is_none());
    assert_eq!(model.data_dir.as_deref(), Some(dir.path()));
}

#[test]
fn test_clear_side_effect_removes_record() {
    let dir = tempdir().unwrap();
    let app = App::new(dir.path().to_path_buf());
    let mut model = create_test_model();
    app.handle_message_side_effects(&mut model, &Message::Save);

    model = update(model, Message::Clear);
    app.handle_message_side_effects(&mut model, &Message::Clear);
    assert!(!dir.path().join("editorPages.json").exists());
    assert_eq!(model.active_toast(), Some(("Content cleared!", ToastLevel::Info)));
    assert!(app.initial_model((80, 24)).active_toast().is_none());
}

#[test]
fn test_control_keys_map_to_page_and_storage_messages() {
    let model = create_test_model();
    let ctrl = KeyModifiers::CONTROL;
    let cases = [
        ('n', Message::AddPage),
        ('d', Message::DeletePage),
        ('s', Message::Save),
        ('l', Message::Clear),
        ('q', Message::Quit),
        ('a', Message::SelectAll),
    ];
    for (c, expected) in cases {
        assert_eq!(App::handle_key(key(KeyCode::Char(c), ctrl), &model), Some(expected));
    }
}

#[test]
fn test_alt_keys_map_to_format_commands() {
    let model = create_test_model();
    let alt = KeyModifiers::ALT;
    assert_eq!(
        App::handle_key(key(KeyCode::Char('b'), alt), &model),
        Some(Message::Format(FormatCommand::Bold))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('s'), alt), &model),
        Some(Message::Format(FormatCommand::FontSize(
            model.toolbar.size.larger()
        )))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('c'), alt), &model),
        Some(Message::OpenColorPrompt)
    );
}

#[test]
fn test_shift_arrow_extends_selection() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Left, KeyModifiers::SHIFT), &model),
        Some(Message::MoveCursor(Direction::Left, true))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT), &model),
        Some(Message::InsertChar('A'))
    );
}

#[test]
fn test_help_mode_any_key_closes_help() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_color_prompt_captures_keys() {
    let model = update(create_test_model(), Message::OpenColorPrompt);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('f'), KeyModifiers::NONE), &model),
        Some(Message::ColorPromptInput("#000000f".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace, KeyModifiers::NONE), &model),
        Some(Message::ColorPromptInput("#00000".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc, KeyModifiers::NONE), &model),
        Some(Message::ColorPromptCancel)
    );
}

#[test]
fn test_paste_event_becomes_paste_message() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(&Event::Paste("text".to_string()), &model, 0, &mut debouncer);
    assert_eq!(msg, Some(Message::Paste("text".to_string())));
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert_eq!(
        App::handle_event(&Event::Key(release), &model, 0, &mut debouncer),
        None
    );
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model();
    let mut debouncer = ResizeDebouncer::new(100);
    assert_eq!(
        App::handle_event(&Event::Resize(100, 30), &model, 0, &mut debouncer),
        None
    );
    assert!(debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_waits_for_quiet_period() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(120, 40, 0);

    assert!(debouncer.take_ready(50).is_none());
    assert_eq!(debouncer.take_ready(100), Some((120, 40)));
}

#[test]
fn test_resize_debouncer_uses_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(120, 40, 0);
    debouncer.queue(140, 50, 20);

    assert!(debouncer.take_ready(80).is_none());
    assert_eq!(debouncer.take_ready(120), Some((140, 50)));
}
