use crate::delimiter::{Boundary, Closing, Delimiter, Padding};
use crate::replace::replace_in_windows;
use crate::window::WindowSet;

/// Substitutions allowed per markup kind in one [`expand`] call.
pub const DEFAULT_MAX_REPLACEMENTS: usize = 100;

const CLOSING_SPAN: &str = "</span>";
const CLOSING_DIV: &str = "</div>";

pub const BLOCK_CODE: Delimiter = Delimiter {
    literal: "```",
    opening: Boundary::NotAlphanumericOrQuote,
    opening_whitespace: true,
    closing: Closing::Literal {
        boundary: Boundary::NotAlphanumericOrQuote,
        whitespace: true,
    },
    padding: Padding::Inside,
    open_tag: r#"<div class="slack_code">"#,
    close_tag: CLOSING_DIV,
    greedy: true,
    disable_nested: true,
    replace_newlines: true,
};

pub const INLINE_CODE: Delimiter = Delimiter {
    literal: "`",
    opening: Boundary::Any,
    opening_whitespace: true,
    closing: Closing::Literal {
        boundary: Boundary::Any,
        whitespace: true,
    },
    padding: Padding::Inside,
    open_tag: r#"<span class="slack_code">"#,
    close_tag: CLOSING_SPAN,
    greedy: false,
    disable_nested: true,
    replace_newlines: false,
};

pub const BOLD: Delimiter = Delimiter {
    literal: "*",
    opening: Boundary::NotAlphanumeric,
    opening_whitespace: false,
    closing: Closing::Literal {
        boundary: Boundary::NotAlphanumeric,
        whitespace: true,
    },
    padding: Padding::Outside,
    open_tag: r#"<span class="slack_bold">"#,
    close_tag: CLOSING_SPAN,
    greedy: false,
    disable_nested: false,
    replace_newlines: false,
};

pub const STRIKETHROUGH: Delimiter = Delimiter {
    literal: "~",
    opening: Boundary::NotAlphanumeric,
    opening_whitespace: true,
    closing: Closing::Literal {
        boundary: Boundary::NotAlphanumeric,
        whitespace: false,
    },
    padding: Padding::Outside,
    open_tag: r#"<span class="slack_strikethrough">"#,
    close_tag: CLOSING_SPAN,
    greedy: false,
    disable_nested: false,
    replace_newlines: false,
};

pub const ITALIC: Delimiter = Delimiter {
    literal: "_",
    opening: Boundary::NotAlphanumeric,
    opening_whitespace: true,
    closing: Closing::Literal {
        boundary: Boundary::NotAlphanumeric,
        whitespace: true,
    },
    padding: Padding::Outside,
    open_tag: r#"<span class="slack_italics">"#,
    close_tag: CLOSING_SPAN,
    greedy: false,
    disable_nested: false,
    replace_newlines: false,
};

pub const BLOCK_QUOTE: Delimiter = Delimiter {
    literal: "&gt;&gt;&gt;",
    opening: Boundary::LineStart,
    opening_whitespace: true,
    closing: Closing::EndOfText,
    padding: Padding::Inside,
    open_tag: r#"<div class="slack_block">"#,
    close_tag: CLOSING_DIV,
    greedy: false,
    disable_nested: false,
    replace_newlines: true,
};

pub const INLINE_QUOTE: Delimiter = Delimiter {
    literal: "&gt;",
    opening: Boundary::LineStart,
    opening_whitespace: true,
    closing: Closing::EndOfLine,
    padding: Padding::Inside,
    open_tag: r#"<span class="slack_block">"#,
    close_tag: CLOSING_SPAN,
    greedy: false,
    disable_nested: false,
    replace_newlines: false,
};

/// Passes in precedence order. Code runs first so nothing else matches
/// inside it; quotes run last over whatever the inline kinds left.
pub const PASSES: [&Delimiter; 7] = [
    &BLOCK_CODE,
    &INLINE_CODE,
    &BOLD,
    &STRIKETHROUGH,
    &ITALIC,
    &BLOCK_QUOTE,
    &INLINE_QUOTE,
];

/// Expand Slack markdown in `text` into HTML.
pub fn expand(text: &str) -> String {
    expand_with_budget(text, DEFAULT_MAX_REPLACEMENTS)
}

/// [`expand`] with an explicit per-pass replacement budget.
pub fn expand_with_budget(text: &str, max_replacements: usize) -> String {
    let seed = (text.to_owned(), WindowSet::spanning(text.len()));
    let (text, _) = PASSES
        .iter()
        .fold(seed, |(text, windows), delimiter| {
            replace_in_windows(text, windows, delimiter, max_replacements)
        });
    text
}
