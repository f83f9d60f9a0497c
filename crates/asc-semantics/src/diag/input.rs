// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Source text positions for diagnostics.

use std::rc::Rc;

/// Returns true for characters that end a line of source text.
const fn is_line_end(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\0' | '\u{2028}' | '\u{2029}')
}

/// Source text with a line map for offset to line/column translation.
///
/// Offsets are character offsets into the text. Lines and columns are
/// 1-based.
#[derive(Debug)]
pub struct InputBuffer {
    origin: String,
    text: String,
    /// (char offset, byte offset) of each line start.
    line_starts: Vec<(usize, usize)>,
}

impl InputBuffer {
    /// Creates a buffer for `text` read from `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![(0, 0)];
        let mut chars = text.char_indices().enumerate().peekable();
        while let Some((ci, (bi, c))) = chars.next() {
            let ends = match c {
                '\r' => !matches!(chars.peek(), Some((_, (_, '\n')))),
                '\n' | '\u{2028}' | '\u{2029}' => true,
                _ => false,
            };
            if ends {
                line_starts.push((ci + 1, bi + c.len_utf8()));
            }
        }
        Self {
            origin: origin.into(),
            text,
            line_starts,
        }
    }

    /// Name of the file or stream the text came from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index into the line map of the line containing `pos`.
    fn line_index(&self, pos: usize) -> usize {
        self.line_starts
            .partition_point(|&(start, _)| start <= pos)
            .saturating_sub(1)
    }

    /// 1-based line number of the character at `pos`.
    #[must_use]
    pub fn line(&self, pos: usize) -> usize {
        self.line_index(pos) + 1
    }

    /// 1-based column of the character at `pos`.
    #[must_use]
    pub fn column(&self, pos: usize) -> usize {
        let (start, _) = self.line_starts[self.line_index(pos)];
        pos - start + 1
    }

    /// Text of the line containing `pos`, without its terminator.
    #[must_use]
    pub fn line_text(&self, pos: usize) -> &str {
        let (_, byte) = self.line_starts[self.line_index(pos)];
        let rest = &self.text[byte..];
        let end = rest.find(is_line_end).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Pointer line `....^` marking column `col`.
    #[must_use]
    pub fn line_pointer(col: usize) -> String {
        let mut out = ".".repeat(col.saturating_sub(1));
        out.push('^');
        out
    }
}

/// Origin and input of the text currently being compiled.
///
/// This is the small state record swapped when a compilation diverts into
/// an included file and back.
#[derive(Clone, Debug, Default)]
pub struct SourceFrame {
    /// Name of the file being compiled.
    pub origin: String,
    /// Fully qualified origin, if the host provides one.
    pub qualified_origin: String,
    /// Source text for line and column lookup.
    pub input: Option<Rc<InputBuffer>>,
}

impl SourceFrame {
    /// Creates a frame for an input buffer, taking the origin from it.
    #[must_use]
    pub fn for_input(input: Rc<InputBuffer>) -> Self {
        Self {
            origin: input.origin().to_string(),
            qualified_origin: String::new(),
            input: Some(input),
        }
    }

    /// Creates a frame with an origin but no source text.
    #[must_use]
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Qualified origin, falling back to the plain origin.
    #[must_use]
    pub fn qualified_origin(&self) -> &str {
        if self.qualified_origin.is_empty() {
            &self.origin
        } else {
            &self.qualified_origin
        }
    }
}
