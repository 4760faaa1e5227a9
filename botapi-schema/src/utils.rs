//! Token splitting that respects quotes and brackets.

/// Split `s` at every `sep` that is not inside `"…"`, `<…>`, `{…}` or `[…]`.
///
/// Whitespace around the pieces is trimmed.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    split_where(s, |c| c == sep)
}

/// Split `s` into whitespace-separated tokens, keeping quoted strings and
/// bracketed groups together (`{status="left chat"}` is one token).
pub(crate) fn tokens(s: &str) -> Vec<&str> {
    split_where(s, char::is_whitespace).into_iter().filter(|t| !t.is_empty()).collect()
}

/// The byte offset of the first top-level `c` in `s`.
pub(crate) fn find_top_level(s: &str, c: char) -> Option<usize> {
    let mut scan = Scanner::default();
    s.char_indices().find(|&(_, ch)| scan.feed(ch) && ch == c).map(|(i, _)| i)
}

fn split_where(s: &str, mut is_sep: impl FnMut(char) -> bool) -> Vec<&str> {
    let mut out = Vec::new();
    let mut scan = Scanner::default();
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if scan.feed(ch) && is_sep(ch) {
            out.push(s[start..i].trim());
            start = i + ch.len_utf8();
        }
    }
    out.push(s[start..].trim());
    out
}

/// Tracks nesting depth and string state one character at a time.
#[derive(Default)]
struct Scanner {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Scanner {
    /// Consume `ch`; returns `true` if it sits at the top level.
    fn feed(&mut self, ch: char) -> bool {
        if self.in_string {
            match ch {
                _ if self.escaped => self.escaped = false,
                '\\' => self.escaped = true,
                '"' => self.in_string = false,
                _ => {}
            }
            return false;
        }
        match ch {
            '"' => {
                self.in_string = true;
                false
            }
            '<' | '{' | '[' => {
                self.depth += 1;
                false
            }
            '>' | '}' | ']' => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            _ => self.depth == 0,
        }
    }
}
