//! Render Slack message markup as HTML.
//!
//! Slack delivers message text with `&`, `<` and `>` already entity-escaped,
//! its own markdown dialect (`*bold*`, `_italic_`, `~strike~`, code and
//! quotes), bracketed control sequences for mentions and links, and
//! `:shortcode:` emoji. [`escape_for_slack`] turns all of that into an HTML
//! fragment.
//!
//! ```
//! use slackdown::{Options, escape_for_slack_with_markdown};
//!
//! let options = Options::default().with_user("U123", "alice");
//! assert_eq!(
//!     escape_for_slack_with_markdown("*hi* <@U123> :wave:", &options),
//!     r#"<span class="slack_bold">hi</span> @alice &#x1F44B"#
//! );
//! ```

mod control;
mod delimiter;
mod emoji;
mod error;
mod markdown;
mod options;
mod replace;
mod window;

pub use control::replace_control_sequences;
pub use delimiter::{Boundary, Close, Closing, Delimiter, Opening, Padding};
pub use emoji::replace_emoji;
pub use error::Error;
pub use markdown::{
    BLOCK_CODE, BLOCK_QUOTE, BOLD, DEFAULT_MAX_REPLACEMENTS, INLINE_CODE, INLINE_QUOTE, ITALIC,
    PASSES, STRIKETHROUGH, expand, expand_with_budget,
};
pub use options::Options;
pub use replace::{LINE_BREAK, replace_in_windows};
pub use window::{Window, WindowSet};

/// Render Slack message text as HTML.
///
/// Markdown is expanded only when [`Options::markdown`] is set; mentions,
/// links, commands and emoji are always resolved. Absent text renders as the
/// empty string.
pub fn escape_for_slack<'a>(text: impl Into<Option<&'a str>>, options: &Options) -> String {
    render(text.into(), options, options.markdown)
}

/// [`escape_for_slack`] with markdown expansion forced on.
pub fn escape_for_slack_with_markdown<'a>(
    text: impl Into<Option<&'a str>>,
    options: &Options,
) -> String {
    render(text.into(), options, true)
}

fn render(text: Option<&str>, options: &Options, expand_markdown: bool) -> String {
    let text = text.unwrap_or_default();
    if text.is_empty() {
        return String::new();
    }

    let expanded = if expand_markdown {
        markdown::expand_with_budget(text, options.max_replacements)
    } else {
        text.to_owned()
    };
    let resolved = control::replace_control_sequences(&expanded, options);
    emoji::replace_emoji(&resolved, &options.custom_emoji)
}
