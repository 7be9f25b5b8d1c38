//! Tokenization for template engine
//!
//! Splits template text into literal spans and directive spans.

use crate::config::Meta;

/// A literal span or the content of one directive
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// Text copied to the output as is
    Literal(&'a str),

    /// Text strictly between a left and right metacharacter
    Directive {
        /// Directive content without metacharacters
        content: &'a str,
        /// Whether a newline right after the directive was consumed
        newline: bool,
        /// Line number where the directive starts (for error messages)
        line: usize,
    },
}

/// Outcome of trying to match a directive at a left metacharacter
#[derive(Debug, Clone, PartialEq)]
enum Match {
    /// Directive found; `end` is past the right metacharacter and any newline
    Found {
        content_start: usize,
        content_end: usize,
        end: usize,
        newline: bool,
    },
    /// No directive can start before `resume`
    Skip { resume: usize },
}

/// Iterator over tokens in a template string
///
/// A directive is a left metacharacter, at least one character that is not a
/// newline, and the first right metacharacter on the same line. A newline
/// directly after the right metacharacter belongs to the directive.
///
/// # Performance
///
/// The position of the next right metacharacter is remembered, so the search
/// for it never revisits text. When a newline comes before that position, no
/// left metacharacter ahead of the newline can open a directive, and scanning
/// resumes at the newline. Every byte is searched a bounded number of times.
pub(crate) struct TokenStream<'a> {
    /// Zero-copy template text
    text: &'a str,
    left: &'a str,
    right: &'a str,
    /// Start of text not yet returned as a token
    pos: usize,
    /// Where to search for the next left metacharacter
    scan: usize,
    /// Line number at `pos`
    line: usize,
    /// Directive found while a literal before it is returned first
    pending: Option<Token<'a>>,
    /// Result of the last right-metacharacter search, `Some(None)` when there is none left
    next_right: Option<Option<usize>>,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str, meta: &'a Meta) -> Self {
        Self {
            text,
            left: &meta.left,
            right: &meta.right,
            pos: 0,
            scan: 0,
            line: 1,
            pending: None,
            next_right: None,
        }
    }

    /// Record step for performance verification in tests
    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    #[cfg(test)]
    #[inline]
    fn record_test_scan(bytes: usize) {
        test_counter::scanned(bytes);
    }

    /// First right metacharacter at or after `from`
    ///
    /// `from` never decreases between calls, so a remembered hit at or past
    /// it is still the first one.
    fn find_right(&mut self, from: usize) -> Option<usize> {
        match self.next_right {
            Some(None) => return None,
            Some(Some(hit)) if hit >= from => return Some(hit),
            _ => {}
        }
        let found = self.text[from..].find(self.right).map(|offset| from + offset);
        #[cfg(test)]
        Self::record_test_scan(found.map_or(self.text.len(), |hit| hit + self.right.len()) - from);
        self.next_right = Some(found);
        found
    }

    /// Try to match a directive whose left metacharacter starts at `start`
    fn match_directive(&mut self, start: usize) -> Match {
        let content_start = start + self.left.len();
        let rest = &self.text[content_start..];

        let first = match rest.chars().next() {
            None => return Match::Skip { resume: self.text.len() },
            Some('\n') => return Match::Skip { resume: content_start },
            Some(c) => c,
        };

        let search_start = content_start + first.len_utf8();
        let Some(content_end) = self.find_right(search_start) else {
            // No right metacharacter anywhere ahead, so no directive either
            return Match::Skip { resume: self.text.len() };
        };

        let newline_at = self.text[content_start..content_end].find('\n');
        #[cfg(test)]
        Self::record_test_scan(newline_at.map_or(content_end - content_start, |offset| offset + 1));
        if let Some(offset) = newline_at {
            return Match::Skip {
                resume: content_start + offset,
            };
        }

        let mut end = content_end + self.right.len();
        let newline = self.text[end..].starts_with('\n');
        if newline {
            end += 1;
        }
        Match::Found {
            content_start,
            content_end,
            end,
            newline,
        }
    }

    /// Return the remaining text as a final literal
    fn finish(&mut self) -> Option<Token<'a>> {
        let rest = &self.text[self.pos..];
        self.pos = self.text.len();
        self.scan = self.text.len();
        (!rest.is_empty()).then_some(Token::Literal(rest))
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        loop {
            #[cfg(test)]
            Self::record_test_step();

            if self.scan >= self.text.len() {
                return self.finish();
            }

            let Some(offset) = self.text[self.scan..].find(self.left) else {
                return self.finish();
            };
            #[cfg(test)]
            Self::record_test_scan(offset + self.left.len());
            let start = self.scan + offset;

            match self.match_directive(start) {
                Match::Skip { resume } => self.scan = resume,
                Match::Found {
                    content_start,
                    content_end,
                    end,
                    newline,
                } => {
                    let literal = &self.text[self.pos..start];
                    let directive_line = self.line + count_newlines(literal);
                    let directive = Token::Directive {
                        content: &self.text[content_start..content_end],
                        newline,
                        line: directive_line,
                    };

                    self.line = directive_line + usize::from(newline);
                    self.pos = end;
                    self.scan = end;

                    if literal.is_empty() {
                        return Some(directive);
                    }
                    self.pending = Some(directive);
                    return Some(Token::Literal(literal));
                }
            }
        }
    }
}

/// Count newlines in text
fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
