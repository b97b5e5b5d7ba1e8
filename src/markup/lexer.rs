//! Markup Lexer
//!
//! Streaming extraction of open/close tag events from raw markup.
//! Text, comments, declarations and processing instructions produce no events.

use crate::markup::event::{Position, TagEvent};
use crate::profile::Profile;

/// Byte offset plus the line/column it corresponds to
#[derive(Debug, Clone)]
struct Cursor<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    /// Move forward `len` bytes. `len` must land on a char boundary.
    fn advance(&mut self, len: usize) {
        let target = (self.offset + len).min(self.src.len());
        for ch in self.src[self.offset..target].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
    }

    fn advance_to_end(&mut self) {
        self.advance(self.src.len() - self.offset);
    }
}

/// What the lexer found at a `<`
enum Scan {
    Event(TagEvent),
    /// Markup with no structural meaning (comment, doctype, `</>`)
    Skipped,
    /// A bare `<` that is just text
    Text,
    /// Construct left open at end of input; the remainder is text
    Unterminated,
}

/// Pull-based tokenizer yielding [`TagEvent`]s in document order.
///
/// Self-closing tags and void elements yield an `Open` immediately followed
/// by a `Close` at the same position, so they are balanced by construction.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    profile: &'a Profile,
    pending: Option<TagEvent>,
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(markup: &'a str, profile: &'a Profile) -> Self {
        Self {
            cursor: Cursor::new(markup),
            profile,
            pending: None,
            raw_text: None,
        }
    }

    /// Current position of the cursor in the input
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    fn scan_markup(&mut self) -> Scan {
        let rest = self.cursor.rest();

        if rest.starts_with("<!--") {
            return self.skip_past(4, "-->");
        }
        if rest.starts_with("<![CDATA[") {
            return self.skip_past(9, "]]>");
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            return self.skip_past(2, ">");
        }
        if let Some(after) = rest.strip_prefix("</") {
            return match after.chars().next() {
                Some(c) if c.is_ascii_alphabetic() => self.scan_end_tag(),
                Some(_) => self.skip_past(2, ">"),
                None => Scan::Unterminated,
            };
        }

        match rest[1..].chars().next() {
            Some(c) if c.is_ascii_alphabetic() => self.scan_start_tag(),
            _ => Scan::Text,
        }
    }

    /// Skip everything up to and including `terminator`, searching from `from`
    fn skip_past(&mut self, from: usize, terminator: &str) -> Scan {
        match self.cursor.rest()[from..].find(terminator) {
            Some(idx) => {
                self.cursor.advance(from + idx + terminator.len());
                Scan::Skipped
            }
            None => Scan::Unterminated,
        }
    }

    fn scan_start_tag(&mut self) -> Scan {
        let rest = self.cursor.rest();
        let position = self.cursor.position();

        let name_len = tag_name_len(&rest[1..]);
        let raw_name = &rest[1..1 + name_len];

        let Some((end, self_closing)) = find_start_tag_end(rest, 1 + name_len) else {
            return Scan::Unterminated;
        };

        let name = self.profile.normalize_name(raw_name);
        self.cursor.advance(end + 1);

        if self_closing || self.profile.is_void(&name) {
            self.pending = Some(TagEvent::Close {
                name: name.clone(),
                position,
            });
        } else if self.profile.is_raw_text(&name) {
            self.raw_text = Some(name.clone());
        }

        Scan::Event(TagEvent::Open { name, position })
    }

    fn scan_end_tag(&mut self) -> Scan {
        let rest = self.cursor.rest();
        let position = self.cursor.position();

        let name_len = tag_name_len(&rest[2..]);
        let raw_name = &rest[2..2 + name_len];

        let Some(end) = rest[2 + name_len..].find('>') else {
            return Scan::Unterminated;
        };

        let name = self.profile.normalize_name(raw_name);
        self.cursor.advance(2 + name_len + end + 1);

        if self.profile.is_void(&name) {
            return Scan::Skipped;
        }

        Scan::Event(TagEvent::Close { name, position })
    }

    /// Consume raw text content up to the matching `</name`
    fn skip_raw_text(&mut self, name: &str) {
        let rest = self.cursor.rest();
        for (idx, _) in rest.match_indices("</") {
            let candidate = &rest[idx + 2..];
            let Some(prefix) = candidate.get(..name.len()) else {
                continue;
            };
            if !prefix.eq_ignore_ascii_case(name) {
                continue;
            }
            let boundary = candidate[name.len()..].chars().next();
            if matches!(boundary, None | Some('>' | '/'))
                || boundary.is_some_and(char::is_whitespace)
            {
                self.cursor.advance(idx);
                return;
            }
        }
        self.cursor.advance_to_end();
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = TagEvent;

    fn next(&mut self) -> Option<TagEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        if let Some(name) = self.raw_text.take() {
            self.skip_raw_text(&name);
        }

        while !self.cursor.is_eof() {
            let Some(lt) = self.cursor.rest().find('<') else {
                self.cursor.advance_to_end();
                break;
            };
            self.cursor.advance(lt);

            match self.scan_markup() {
                Scan::Event(event) => return Some(event),
                Scan::Skipped => continue,
                Scan::Text => self.cursor.advance(1),
                Scan::Unterminated => self.cursor.advance_to_end(),
            }
        }

        None
    }
}

/// Length in bytes of the tag name at the start of `s`
fn tag_name_len(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '/' || c == '>' || c == '\0')
        .unwrap_or(s.len())
}

/// Find the `>` closing a start tag, ignoring any inside attribute values.
///
/// Also reports whether the tag closes itself: a `/` directly before the `>`
/// counts only when it is not the tail of an unquoted value (`href=/a/>`).
fn find_start_tag_end(tag: &str, from: usize) -> Option<(usize, bool)> {
    let mut quote: Option<char> = None;
    let mut unquoted_value = false;
    let mut after_equals = false;
    let mut trailing_slash = false;

    for (idx, ch) in tag[from..].char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }

        if unquoted_value {
            match ch {
                '>' => return Some((from + idx, false)),
                c if c.is_whitespace() => unquoted_value = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '>' => return Some((from + idx, trailing_slash)),
            c if c.is_whitespace() => {
                trailing_slash = false;
                continue;
            }
            '=' => {
                after_equals = true;
                trailing_slash = false;
                continue;
            }
            '"' | '\'' if after_equals => quote = Some(ch),
            _ if after_equals => unquoted_value = true,
            _ => {}
        }
        trailing_slash = ch == '/' && !unquoted_value;
        after_equals = false;
    }

    None
}

/// Tokenize a whole document with the given profile
pub fn tokenize(markup: &str, profile: &Profile) -> Vec<TagEvent> {
    Tokenizer::new(markup, profile).collect()
}
