//! Reading and writing the marked-up form of a page.
//!
//! Pages are stored as a small HTML subset: `<div>` paragraphs, `<ol>`/`<ul>`
//! lists of `<li>` items, `<b>`, `<i>`, `<u>` and a `<span style>` carrying
//! color, font family and font size. Reading is lenient so content written by
//! other editors still loads: unknown tags are dropped with their text kept,
//! stray `<` and unknown entities are literal text, and unbalanced closing
//! tags are ignored.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Align, Block, FontFamily, FontSize, Fragment, InlineStyle, ListKind, TextColor};

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*(?:=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(color|font-family|font-size|text-align|font-weight|font-style|text-decoration)\s*:\s*([^;]+)")
        .expect("declaration pattern is valid")
});

/// Serialize a fragment. An empty fragment serializes to the empty string.
pub fn to_markup(fragment: &Fragment) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;
    for block in fragment.blocks() {
        if open_list != block.list {
            if let Some(kind) = open_list {
                let _ = write!(out, "</{}>", kind.tag());
            }
            if let Some(kind) = block.list {
                let _ = write!(out, "<{}>", kind.tag());
            }
            open_list = block.list;
        }
        let tag = if block.list.is_some() { "li" } else { "div" };
        out.push('<');
        out.push_str(tag);
        if block.align != Align::Left {
            let _ = write!(out, " style=\"text-align: {}\"", block.align.css());
        }
        out.push('>');
        if block.is_empty() {
            out.push_str("<br>");
        }
        for run in block.runs() {
            write_run(&mut out, &run.text, &run.style);
        }
        let _ = write!(out, "</{tag}>");
    }
    if let Some(kind) = open_list {
        let _ = write!(out, "</{}>", kind.tag());
    }
    out
}

fn write_run(out: &mut String, text: &str, style: &InlineStyle) {
    let mut declarations = Vec::new();
    if let Some(color) = style.color {
        declarations.push(format!("color: {color}"));
    }
    if let Some(font) = style.font {
        declarations.push(format!("font-family: {}", font.name()));
    }
    if let Some(size) = style.size {
        declarations.push(format!("font-size: {}px", size.px()));
    }

    if style.bold {
        out.push_str("<b>");
    }
    if style.italic {
        out.push_str("<i>");
    }
    if style.underline {
        out.push_str("<u>");
    }
    if !declarations.is_empty() {
        let _ = write!(out, "<span style=\"{}\">", declarations.join("; "));
    }
    escape_into(out, text);
    if !declarations.is_empty() {
        out.push_str("</span>");
    }
    if style.underline {
        out.push_str("</u>");
    }
    if style.italic {
        out.push_str("</i>");
    }
    if style.bold {
        out.push_str("</b>");
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Parse marked-up content. Never fails; malformed markup degrades to text.
pub fn parse_markup(source: &str) -> Fragment {
    let mut builder = Builder::default();
    let mut rest = source;
    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            builder.text(rest);
            break;
        };
        builder.text(&rest[..lt]);
        rest = &rest[lt..];
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }
        match read_tag(rest) {
            Some((tag, consumed)) => {
                builder.tag(&tag);
                rest = &rest[consumed..];
            }
            None => {
                builder.text("<");
                rest = &rest[1..];
            }
        }
    }
    builder.finish()
}

#[derive(Debug, PartialEq, Eq)]
struct Tag {
    name: String,
    closing: bool,
    attrs: Vec<(String, String)>,
}

impl Tag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn declarations(&self) -> Vec<(String, String)> {
        let Some(style) = self.attr("style") else {
            return Vec::new();
        };
        DECLARATION
            .captures_iter(style)
            .map(|caps| (caps[1].to_ascii_lowercase(), caps[2].trim().to_string()))
            .collect()
    }

    fn align(&self) -> Option<Align> {
        self.declarations()
            .iter()
            .find(|(key, _)| key == "text-align")
            .and_then(|(_, value)| Align::from_css(value))
            .or_else(|| self.attr("align").and_then(Align::from_css))
    }
}

/// Read a tag at the start of `input` (which begins with `<`).
///
/// Returns the tag and the number of bytes consumed, or `None` when the text
/// is not a tag.
fn read_tag(input: &str) -> Option<(Tag, usize)> {
    let body = &input[1..];
    let (closing, body) = body
        .strip_prefix('/')
        .map_or((false, body), |b| (true, b));
    if body.starts_with('!') || body.starts_with('?') {
        let end = input.find('>')?;
        return Some((
            Tag {
                name: String::new(),
                closing: false,
                attrs: Vec::new(),
            },
            end + 1,
        ));
    }
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();

    let mut quote: Option<char> = None;
    let mut end = None;
    for (idx, c) in body[name_len..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => {
                end = Some(name_len + idx);
                break;
            }
            None => {}
        }
    }
    let end = end?;
    let attr_text = body[name_len..end].trim_end_matches('/');
    let attrs = ATTRIBUTE
        .captures_iter(attr_text)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (caps[1].to_ascii_lowercase(), decode_entities(value))
        })
        .collect();
    let prefix = if closing { 2 } else { 1 };
    Some((
        Tag {
            name,
            closing,
            attrs,
        },
        prefix + end + 1,
    ))
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        if let Some((c, semi)) = decoded {
            out.push(c);
            rest = &rest[semi + 1..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<ListKind>,
    aligns: Vec<(String, Align)>,
    styles: Vec<(String, InlineStyle)>,
}

impl Builder {
    fn style(&self) -> InlineStyle {
        self.styles
            .last()
            .map(|(_, style)| style.clone())
            .unwrap_or_default()
    }

    fn align(&self) -> Align {
        self.aligns.last().map_or(Align::Left, |(_, align)| *align)
    }

    fn break_block(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
    }

    fn open_block(&mut self, list: Option<ListKind>, align: Align) {
        self.break_block();
        self.current = Some(Block::new(align, list));
    }

    fn current_block(&mut self) -> &mut Block {
        let list = self.lists.last().copied();
        let align = self.align();
        self.current.get_or_insert_with(|| Block::new(align, list))
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode_entities(raw).replace('\r', "");
        let style = self.style();
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            if !first.is_empty() {
                self.current_block().push_text(first, &style);
            }
        }
        for line in lines {
            self.current_block();
            self.break_block();
            self.current_block().push_text(line, &style);
        }
    }

    fn tag(&mut self, tag: &Tag) {
        match (tag.name.as_str(), tag.closing) {
            ("div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote", false) => {
                let align = tag.align().unwrap_or_else(|| self.align());
                self.aligns.push((tag.name.clone(), align));
                let list = self.lists.last().copied();
                self.open_block(list, align);
            }
            ("div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote", true) => {
                self.break_block();
                pop_named(&mut self.aligns, &tag.name);
            }
            ("ol", false) | ("ul", false) => {
                self.break_block();
                self.lists.push(if tag.name == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                });
            }
            ("ol" | "ul", true) => {
                self.break_block();
                self.lists.pop();
            }
            ("li", false) => {
                let list = Some(self.lists.last().copied().unwrap_or(ListKind::Unordered));
                let align = tag.align().unwrap_or_else(|| self.align());
                self.open_block(list, align);
            }
            ("li", true) => self.break_block(),
            ("br", _) => {
                self.current_block();
                self.break_block();
            }
            (name @ ("b" | "strong" | "i" | "em" | "u" | "ins" | "span" | "font"), false) => {
                let mut style = self.style();
                apply_inline_tag(&mut style, name, tag);
                self.styles.push((name.to_string(), style));
            }
            (name @ ("b" | "strong" | "i" | "em" | "u" | "ins" | "span" | "font"), true) => {
                pop_named(&mut self.styles, name);
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Fragment {
        self.break_block();
        Fragment::from_blocks(self.blocks)
    }
}

fn pop_named<T>(stack: &mut Vec<(String, T)>, name: &str) {
    if let Some(pos) = stack.iter().rposition(|(n, _)| n == name) {
        stack.truncate(pos);
    }
}

fn apply_inline_tag(style: &mut InlineStyle, name: &str, tag: &Tag) {
    match name {
        "b" | "strong" => style.bold = true,
        "i" | "em" => style.italic = true,
        "u" | "ins" => style.underline = true,
        "font" => {
            if let Some(color) = tag.attr("color").and_then(TextColor::parse) {
                style.color = Some(color);
            }
            if let Some(font) = tag.attr("face").and_then(FontFamily::from_name) {
                style.font = Some(font);
            }
            if let Some(size) = tag.attr("size").and_then(FontSize::parse) {
                style.size = Some(size);
            }
        }
        _ => {}
    }
    for (key, value) in tag.declarations() {
        let value = value.as_str();
        match key.as_str() {
            "color" => {
                if let Some(color) = TextColor::parse(value) {
                    style.color = Some(color);
                }
            }
            "font-family" => {
                if let Some(font) = FontFamily::from_name(value) {
                    style.font = Some(font);
                }
            }
            "font-size" => {
                if let Some(size) = FontSize::parse(value) {
                    style.size = Some(size);
                }
            }
            "font-weight" => style.bold = matches!(value, "bold" | "bolder" | "700" | "800" | "900"),
            "font-style" => style.italic = value == "italic",
            "text-decoration" => style.underline = value.contains("underline"),
            _ => {}
        }
    }
}
