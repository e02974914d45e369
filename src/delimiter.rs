//! Delimiter records and the boundary checks that decide where a markup span
//! may open and close.
//!
//! Boundaries are plain character predicates evaluated at candidate byte
//! offsets, so no look-behind support is needed from a regex engine.

/// What may sit directly outside a delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Anything.
    Any,
    /// Text edge or a character other than `[A-Za-z0-9]`.
    NotAlphanumeric,
    /// Like [`Boundary::NotAlphanumeric`], also rejecting `'` and `` ` ``.
    NotAlphanumericOrQuote,
    /// Start of the text or right after a newline. Opening side only.
    LineStart,
}

impl Boundary {
    /// `neighbour` is the character outside the delimiter, `None` at a text edge.
    fn admits(self, neighbour: Option<char>, at_line_start: bool) -> bool {
        match self {
            Boundary::Any => true,
            Boundary::NotAlphanumeric => neighbour.is_none_or(|c| !c.is_ascii_alphanumeric()),
            Boundary::NotAlphanumericOrQuote => {
                neighbour.is_none_or(|c| !c.is_ascii_alphanumeric() && c != '\'' && c != '`')
            }
            Boundary::LineStart => at_line_start,
        }
    }
}

/// How a span ends.
///
/// Structural closes must still fall inside the window the opening sits in.
/// A window cut short by an earlier code span never reaches its line or text
/// end, so a quote line holding an inline code span stays unquoted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Closing {
    /// The delimiter literal again, with `boundary` checked after it.
    /// `whitespace` lets whitespace sit between the content and the literal.
    Literal { boundary: Boundary, whitespace: bool },
    /// The next newline, or the end of the text. The newline is kept.
    EndOfLine,
    /// The end of the text.
    EndOfText,
}

/// Where whitespace captured next to the delimiters is re-emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
    /// Between the tags, as part of the content.
    Inside,
    /// Before the opening tag and after the closing tag.
    Outside,
}

/// One markup kind: its literal, boundary policy and HTML replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiter {
    pub literal: &'static str,
    pub opening: Boundary,
    /// Whitespace may sit between the opening literal and the content.
    pub opening_whitespace: bool,
    pub closing: Closing,
    pub padding: Padding,
    pub open_tag: &'static str,
    pub close_tag: &'static str,
    /// Extend to the farthest closing literal not separated from the first
    /// valid one by whitespace.
    pub greedy: bool,
    /// Protect the emitted replacement from every later match.
    pub disable_nested: bool,
    /// Emit newlines inside the span as line-break tags.
    pub replace_newlines: bool,
}

/// A valid opening delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opening {
    pub start: usize,
    /// Just past the literal.
    pub literal_end: usize,
    /// First non-whitespace byte after the literal.
    pub content_start: usize,
}

/// A valid closing boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Close {
    /// Where the content ends.
    pub start: usize,
    /// Just past whatever the span consumes.
    pub end: usize,
    /// Consumed text that is re-emitted before the closing tag.
    pub retained: usize,
}

impl Delimiter {
    /// The close is structural (end of line or text) rather than a repeated literal.
    pub fn is_asymmetric(&self) -> bool {
        !matches!(self.closing, Closing::Literal { .. })
    }

    /// Try to open at `start`, where `text` holds the literal.
    pub fn opening_at(&self, text: &str, start: usize) -> Option<Opening> {
        self.open(text, start, false)
    }

    /// `line_start` forces the line-start check to pass, for offsets that
    /// follow an emitted closing tag which swallowed a newline.
    fn open(&self, text: &str, start: usize, line_start: bool) -> Option<Opening> {
        if !text.get(start..)?.starts_with(self.literal) {
            return None;
        }
        let before = text.get(..start)?;
        let neighbour = before.chars().next_back();
        let at_line_start = line_start || neighbour.is_none_or(|c| c == '\n');
        if !self.opening.admits(neighbour, at_line_start) {
            return None;
        }

        let literal_end = start + self.literal.len();
        let after = text.get(literal_end..)?;
        let padding = if self.opening_whitespace {
            after.len() - after.trim_start().len()
        } else {
            0
        };
        let content_start = literal_end + padding;
        match text.get(content_start..)?.chars().next() {
            Some(c) if !c.is_whitespace() => Some(Opening {
                start,
                literal_end,
                content_start,
            }),
            _ => None,
        }
    }

    /// First valid opening in `text[from..limit]`.
    ///
    /// `line_start` names an offset that begins a line of the source text even
    /// though no newline directly precedes it in the working text.
    pub fn find_opening(
        &self,
        text: &str,
        from: usize,
        limit: usize,
        line_start: Option<usize>,
    ) -> Option<Opening> {
        let mut pos = from;
        while let Some(offset) = text.get(pos..limit)?.find(self.literal) {
            let start = pos + offset;
            if let Some(opening) = self.open(text, start, line_start == Some(start)) {
                return Some(opening);
            }
            pos = start + 1;
        }
        None
    }

    /// Closing partner for `opening` that ends no later than `limit`.
    pub fn find_closing(&self, text: &str, opening: &Opening, limit: usize) -> Option<Close> {
        let from = opening.content_start;
        match self.closing {
            Closing::Literal {
                boundary,
                whitespace,
            } => self.find_literal_closing(text, from, limit, boundary, whitespace),
            Closing::EndOfLine => {
                let rest = text.get(from..)?;
                let close = match rest.find('\n') {
                    Some(offset) => Close {
                        start: from + offset,
                        end: from + offset + 1,
                        retained: 1,
                    },
                    None => Close {
                        start: text.len(),
                        end: text.len(),
                        retained: 0,
                    },
                };
                (close.start > from && close.end <= limit).then_some(close)
            }
            Closing::EndOfText => (text.len() > from && text.len() <= limit).then_some(Close {
                start: text.len(),
                end: text.len(),
                retained: 0,
            }),
        }
    }

    fn find_literal_closing(
        &self,
        text: &str,
        from: usize,
        limit: usize,
        boundary: Boundary,
        whitespace: bool,
    ) -> Option<Close> {
        let len = self.literal.len();
        let mut first: Option<usize> = None;
        let mut best: Option<Close> = None;
        let mut pos = from;
        while let Some(offset) = text.get(pos..limit).and_then(|s| s.find(self.literal)) {
            let start = pos + offset;
            if let Some(first) = first
                && text
                    .get(first..start)
                    .is_none_or(|gap| gap.contains(char::is_whitespace))
            {
                break;
            }
            if self.closes_at(text, from, start, boundary, whitespace) {
                let close = Close {
                    start,
                    end: start + len,
                    retained: 0,
                };
                if !self.greedy {
                    return Some(close);
                }
                first.get_or_insert(start);
                best = Some(close);
            }
            pos = start + 1;
        }
        best
    }

    fn closes_at(
        &self,
        text: &str,
        content_start: usize,
        start: usize,
        boundary: Boundary,
        whitespace: bool,
    ) -> bool {
        if start <= content_start {
            return false;
        }
        let before = text.get(..start).and_then(|s| s.chars().next_back());
        if !whitespace && before.is_some_and(char::is_whitespace) {
            return false;
        }
        let after = text
            .get(start + self.literal.len()..)
            .and_then(|s| s.chars().next());
        boundary.admits(after, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAR: Delimiter = Delimiter {
        literal: "*",
        opening: Boundary::NotAlphanumeric,
        opening_whitespace: false,
        closing: Closing::Literal {
            boundary: Boundary::NotAlphanumeric,
            whitespace: true,
        },
        padding: Padding::Outside,
        open_tag: "<b>",
        close_tag: "</b>",
        greedy: false,
        disable_nested: false,
        replace_newlines: false,
    };

    const FENCE: Delimiter = Delimiter {
        literal: "```",
        opening: Boundary::NotAlphanumericOrQuote,
        opening_whitespace: true,
        closing: Closing::Literal {
            boundary: Boundary::NotAlphanumericOrQuote,
            whitespace: true,
        },
        padding: Padding::Inside,
        open_tag: "<pre>",
        close_tag: "</pre>",
        greedy: true,
        disable_nested: true,
        replace_newlines: true,
    };

    const QUOTE: Delimiter = Delimiter {
        literal: "&gt;",
        opening: Boundary::LineStart,
        opening_whitespace: true,
        closing: Closing::EndOfLine,
        padding: Padding::Inside,
        open_tag: "<q>",
        close_tag: "</q>",
        greedy: false,
        disable_nested: false,
        replace_newlines: false,
    };

    fn span(d: &Delimiter, text: &str) -> Option<(usize, usize)> {
        let opening = d.find_opening(text, 0, text.len(), None)?;
        let close = d.find_closing(text, &opening, text.len())?;
        Some((opening.start, close.end))
    }

    #[test]
    fn test_opening_rejects_alphanumeric_neighbour() {
        assert_eq!(STAR.opening_at("a*b*", 1), None);
        assert!(STAR.opening_at(" *b*", 1).is_some());
    }

    #[test]
    fn test_opening_requires_content() {
        assert_eq!(STAR.opening_at("* b*", 0), None);
        assert_eq!(STAR.opening_at("*", 0), None);
    }

    #[test]
    fn test_opening_whitespace_is_skipped_to_content() {
        let opening = FENCE.opening_at("```  code```", 0);
        assert_eq!(
            opening,
            Some(Opening {
                start: 0,
                literal_end: 3,
                content_start: 5,
            })
        );
    }

    #[test]
    fn test_line_start_anchor() {
        assert!(QUOTE.opening_at("&gt;quote", 0).is_some());
        assert!(QUOTE.opening_at("line\n&gt;quote", 5).is_some());
        assert_eq!(QUOTE.opening_at("an &gt;quote", 3), None);
    }

    #[test]
    fn test_line_start_hint() {
        let text = "</q>&gt;next";
        assert_eq!(QUOTE.find_opening(text, 0, text.len(), None), None);
        assert_eq!(
            QUOTE
                .find_opening(text, 0, text.len(), Some(4))
                .map(|o| o.start),
            Some(4)
        );
    }

    #[test]
    fn test_closing_word_boundary() {
        assert_eq!(span(&STAR, "*bold*with*more*"), Some((0, 16)));
        assert_eq!(span(&STAR, "*bold*with"), None);
    }

    #[test]
    fn test_empty_interior_never_matches() {
        assert_eq!(span(&STAR, "**"), None);
    }

    #[test]
    fn test_greedy_stops_at_whitespace() {
        assert_eq!(span(&FENCE, "```a``` ```b```"), Some((0, 7)));
        assert_eq!(span(&FENCE, "````a````"), Some((0, 9)));
    }

    #[test]
    fn test_end_of_line_keeps_newline() {
        let text = "&gt;one\ntwo";
        let opening = QUOTE.find_opening(text, 0, text.len(), None);
        let close = opening.and_then(|o| QUOTE.find_closing(text, &o, text.len()));
        assert_eq!(
            close,
            Some(Close {
                start: 7,
                end: 8,
                retained: 1,
            })
        );
    }

    #[test]
    fn test_closing_must_fit_in_limit() {
        let text = "*bold* tail";
        let opening = STAR.find_opening(text, 0, text.len(), None);
        assert!(opening.is_some_and(|o| STAR.find_closing(text, &o, 5).is_none()));
    }
}
