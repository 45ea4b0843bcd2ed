//! Extraction of infobox cells and paragraph texts from article HTML.

use factcheck_core::TableEvidence;
use regex::{Match, Regex};
use std::sync::OnceLock;

struct Patterns {
    table_open: Regex,
    table_tag: Regex,
    class_attr: Regex,
    row_tag: Regex,
    cell_tag: Regex,
    paragraph: Regex,
    hidden: Regex,
    tag: Regex,
    entity: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns are guaranteed to be valid"
)]
fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let compile =
            |p: &str| Regex::new(p).expect("Static regex pattern is guaranteed to be valid");
        Patterns {
            table_open: compile(r"(?i)<table\b[^>]*>"),
            table_tag: compile(r"(?i)</?table\b[^>]*>"),
            class_attr: compile(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#),
            row_tag: compile(r"(?i)</?tr\b[^>]*>"),
            cell_tag: compile(r"(?i)</?t[hd]\b[^>]*>"),
            paragraph: compile(r"(?is)<p\b[^>]*>(.*?)</p\s*>"),
            hidden: compile(
                r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
            ),
            tag: compile(r"(?s)<[^>]*>"),
            entity: compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);"),
        }
    })
}

/// Parse the first infobox of a page.
///
/// Every row with at least two header/data cells maps the text of its first
/// cell to the text of its last cell. Rows and cells of nested tables count
/// too, so a value holding a nested table ends with its innermost last cell.
/// A page without an infobox yields [`TableEvidence::NoTable`].
#[must_use]
pub fn parse_infobox(html: &str) -> TableEvidence {
    let Some(table) = find_infobox(html) else {
        return TableEvidence::NoTable;
    };

    let p = patterns();
    let cells = elements(table, &p.row_tag).filter_map(|row| {
        let cols: Vec<String> = elements(row, &p.cell_tag).map(element_text).collect();
        match cols.as_slice() {
            [label, .., value] => Some((label.clone(), value.clone())),
            _ => None,
        }
    });
    TableEvidence::from_cells(cells)
}

/// Text of every `<p>` element, in document order.
#[must_use]
pub fn parse_paragraphs(html: &str) -> Vec<String> {
    let html = strip_hidden(html);
    patterns()
        .paragraph
        .captures_iter(&html)
        .map(|p| element_text(&p[1]))
        .collect()
}

/// Inner HTML of the first `<table>` whose class list contains `infobox`.
fn find_infobox(html: &str) -> Option<&str> {
    let p = patterns();
    let open = p.table_open.find_iter(html).find(|tag| {
        p.class_attr.captures(tag.as_str()).is_some_and(|class| {
            class
                .get(1)
                .or_else(|| class.get(2))
                .is_some_and(|list| list.as_str().split_whitespace().any(|c| c == "infobox"))
        })
    })?;
    Some(inner(html, &open, &p.table_tag))
}

/// Inner HTML of every element whose tags `tags` matches, nested ones
/// included, in document order.
fn elements<'a>(html: &'a str, tags: &'a Regex) -> impl Iterator<Item = &'a str> {
    tags.find_iter(html)
        .filter(|tag| !tag.as_str().starts_with("</"))
        .map(move |open| inner(html, &open, tags))
}

/// Inner HTML of the element opened by `open`, up to its balanced closing
/// tag. An unclosed element runs to the end of `html`.
fn inner<'a>(html: &'a str, open: &Match<'_>, tags: &Regex) -> &'a str {
    let mut depth = 0usize;
    for tag in tags.find_iter(&html[open.start()..]) {
        if tag.as_str().starts_with("</") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return &html[open.end()..open.start() + tag.start()];
            }
        } else {
            depth += 1;
        }
    }
    &html[open.end()..]
}

fn strip_hidden(html: &str) -> String {
    patterns().hidden.replace_all(html, "").into_owned()
}

/// Visible text of an HTML fragment: tags dropped, entities decoded.
fn element_text(fragment: &str) -> String {
    let p = patterns();
    let visible = strip_hidden(fragment);
    let text = p.tag.replace_all(&visible, "");
    p.entity
        .replace_all(&text, |caps: &regex::Captures<'_>| {
            decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "minus" => '\u{2212}',
        "thinsp" => '\u{2009}',
        "ensp" => '\u{2002}',
        "emsp" => '\u{2003}',
        "hellip" => '\u{2026}',
        "middot" => '\u{b7}',
        "times" => '\u{d7}',
        "deg" => '\u{b0}',
        _ => return None,
    };
    Some(c)
}
