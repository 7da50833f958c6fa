//! Formatting commands applied to a page fragment.

use std::ops::Range;

use crate::document::{Align, FontFamily, FontSize, Fragment, InlineStyle, ListKind, TextColor};

/// A formatting command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Justify(Align),
    List(ListKind),
    ForeColor(TextColor),
    FontName(FontFamily),
    FontSize(FontSize),
}

impl FormatCommand {
    /// Map a command name and optional value to a command.
    ///
    /// Returns `None` for unknown names and for values the command cannot use.
    pub fn from_name(name: &str, value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim);
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "justifyLeft" => Some(Self::Justify(Align::Left)),
            "justifyCenter" => Some(Self::Justify(Align::Center)),
            "justifyRight" => Some(Self::Justify(Align::Right)),
            "insertOrderedList" => Some(Self::List(ListKind::Ordered)),
            "insertUnorderedList" => Some(Self::List(ListKind::Unordered)),
            "foreColor" => value.and_then(TextColor::parse).map(Self::ForeColor),
            "fontName" => value.and_then(FontFamily::from_name).map(Self::FontName),
            "fontSize" => value.and_then(FontSize::parse).map(Self::FontSize),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Justify(Align::Left) => "justifyLeft",
            Self::Justify(Align::Center) => "justifyCenter",
            Self::Justify(Align::Right) => "justifyRight",
            Self::List(ListKind::Ordered) => "insertOrderedList",
            Self::List(ListKind::Unordered) => "insertUnorderedList",
            Self::ForeColor(_) => "foreColor",
            Self::FontName(_) => "fontName",
            Self::FontSize(_) => "fontSize",
        }
    }

    /// Whether the command acts on blocks rather than characters.
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Justify(_) | Self::List(_))
    }
}

/// Current picker values shown in the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toolbar {
    pub color: TextColor,
    pub font: FontFamily,
    pub size: FontSize,
}

impl Toolbar {
    /// Track the picker a command changed.
    pub fn record(&mut self, command: FormatCommand) {
        match command {
            FormatCommand::ForeColor(color) => self.color = color,
            FormatCommand::FontName(font) => self.font = font,
            FormatCommand::FontSize(size) => self.size = size,
            _ => {}
        }
    }
}

/// Everything a command may touch.
#[derive(Debug)]
pub struct FormatTarget<'a> {
    pub fragment: &'a mut Fragment,
    /// Selected character range; collapsed when `start == end`.
    pub selection: Range<usize>,
    /// Style the next typed text receives.
    pub typing: &'a mut InlineStyle,
    pub toolbar: &'a mut Toolbar,
}

/// Look up a command by name and apply it. Unknown commands are ignored.
pub fn dispatch(target: &mut FormatTarget<'_>, name: &str, value: Option<&str>) {
    if let Some(command) = FormatCommand::from_name(name, value) {
        apply(target, command);
    } else {
        tracing::debug!(name, ?value, "ignoring unsupported format command");
    }
}

/// Apply `command` to the target's selection.
pub fn apply(target: &mut FormatTarget<'_>, command: FormatCommand) {
    target.toolbar.record(command);
    let range = target.selection.clone();

    if command.is_block() {
        apply_block(target.fragment, range, command);
        return;
    }

    if range.is_empty() {
        toggle_or_set(target.typing, command, None);
        return;
    }

    let setting = match command {
        FormatCommand::Bold => Some(!target.fragment.all_styled(range.clone(), |s| s.bold)),
        FormatCommand::Italic => Some(!target.fragment.all_styled(range.clone(), |s| s.italic)),
        FormatCommand::Underline => {
            Some(!target.fragment.all_styled(range.clone(), |s| s.underline))
        }
        _ => None,
    };
    target
        .fragment
        .restyle(range.clone(), |style| toggle_or_set(style, command, setting));
    *target.typing = target.fragment.style_at(range.end);
}

/// Update one style. `setting` forces the toggled flag; `None` flips it.
fn toggle_or_set(style: &mut InlineStyle, command: FormatCommand, setting: Option<bool>) {
    match command {
        FormatCommand::Bold => style.bold = setting.unwrap_or(!style.bold),
        FormatCommand::Italic => style.italic = setting.unwrap_or(!style.italic),
        FormatCommand::Underline => style.underline = setting.unwrap_or(!style.underline),
        FormatCommand::ForeColor(color) => style.color = Some(color),
        FormatCommand::FontName(font) => style.font = Some(font),
        FormatCommand::FontSize(size) => style.size = Some(size),
        FormatCommand::Justify(_) | FormatCommand::List(_) => {}
    }
}

fn apply_block(fragment: &mut Fragment, range: Range<usize>, command: FormatCommand) {
    let blocks = fragment.blocks_in(range);
    match command {
        FormatCommand::Justify(align) => {
            for idx in blocks {
                if let Some(block) = fragment.block_mut(idx) {
                    block.align = align;
                }
            }
        }
        FormatCommand::List(kind) => {
            let all_listed = fragment.blocks()[blocks.clone()]
                .iter()
                .all(|b| b.list == Some(kind));
            let list = if all_listed { None } else { Some(kind) };
            for idx in blocks {
                if let Some(block) = fragment.block_mut(idx) {
                    block.list = list;
                }
            }
        }
        _ => {}
    }
}
