use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{error, warn};

/// Aliases followed before a chain is treated as broken.
const MAX_ALIAS_DEPTH: usize = 16;

struct Patterns {
    shortcode: Regex,
    alias: Regex,
    url: Regex,
}

static RE: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    shortcode: compile(r":([^\s,:]+):"),
    alias: compile(r"^alias:(\S+)$"),
    url: compile(r"https?://\S+"),
});

/// Slack short names to unified code points, checked before the shortcode
/// registry so Slack's spelling wins where the two disagree.
static STATIC_EMOJI: LazyLock<im::HashMap<String, String>> = LazyLock::new(|| {
    match serde_json::from_str::<HashMap<String, String>>(include_str!("emoji.json")) {
        Ok(table) => table.into_iter().collect(),
        Err(e) => {
            error!("static emoji table is invalid: {}", e);
            im::HashMap::new()
        }
    }
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("emoji pattern is valid")
}

/// Expand `:name:` shortcodes into HTML code point entities, or an `<img>`
/// tag for custom emoji backed by a URL.
///
/// `custom` entries shadow the static table, which shadows the full shortcode
/// registry. Unknown names are left as written.
pub fn replace_emoji(text: &str, custom: &HashMap<String, String>) -> String {
    if !text.contains(':') {
        return text.to_owned();
    }
    let table = with_custom(custom);

    RE.shortcode
        .replace_all(text, |caps: &Captures| {
            let key = &caps[1];
            match resolve(&table, key) {
                Some(value) if RE.url.is_match(&value) => {
                    format!(r#"<img alt="{key}" src="{value}" class="slack_emoji" />"#)
                }
                Some(value) => value
                    .split('-')
                    .map(|code| format!("&#x{code}"))
                    .collect(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

/// The static table shares structure with the clone; only custom entries are copied.
fn with_custom(custom: &HashMap<String, String>) -> im::HashMap<String, String> {
    let mut table = STATIC_EMOJI.clone();
    table.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    table
}

/// Follow `alias:NAME` values until a code point or URL is reached.
fn resolve<'a>(table: &'a im::HashMap<String, String>, key: &str) -> Option<Cow<'a, str>> {
    let mut value = lookup(table, key)?;
    for _ in 0..MAX_ALIAS_DEPTH {
        let Some(target) = alias_target(&value) else {
            return Some(value);
        };
        value = lookup(table, &target)?;
    }
    warn!(key, depth = MAX_ALIAS_DEPTH, "emoji alias chain does not resolve");
    None
}

fn lookup<'a>(table: &'a im::HashMap<String, String>, name: &str) -> Option<Cow<'a, str>> {
    match table.get(name) {
        Some(value) => Some(Cow::Borrowed(value.as_str())),
        None => emojis::get_by_shortcode(name).map(|emoji| Cow::Owned(code_points(emoji.as_str()))),
    }
}

fn alias_target(value: &str) -> Option<String> {
    RE.alias
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// `"👍🏽"` becomes `"1F44D-1F3FD"`, the shape of the static table values.
fn code_points(glyph: &str) -> String {
    glyph
        .chars()
        .map(|c| format!("{:X}", u32::from(c)))
        .collect::<Vec<_>>()
        .join("-")
}
