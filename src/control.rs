use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::options::Options;

struct Patterns {
    user_mention: Regex,
    channel_mention: Regex,
    link: Regex,
    mailto: Regex,
    subteam_command: Regex,
    command: Regex,
}

// https://api.slack.com/docs/message-formatting
static RE: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    user_mention: compile(r"<@(?:(?P<id>U[^|>]+)(?:\|(?P<name>[^>]+))?|(?P<bare>[^>]+))>"),
    channel_mention: compile(r"<#(?:(?P<id>C[^|>]+)(?:\|(?P<name>[^>]+))?|(?P<bare>[^>]+))>"),
    link: compile(r"<(?P<url>https?:[^|>]+)(?:\|(?P<label>[^>]+))?>"),
    mailto: compile(r"<mailto:(?P<address>[^|>]+)(?:\|(?P<label>[^>]+))?>"),
    subteam_command: compile(r"<!subteam\^(?P<id>S[^|>]+)(?:\|(?P<name>[^>]+))?>"),
    command: compile(r"<!(?P<literal>[^|>]+)(?:\|(?P<name>[^>]+))?>"),
});

const KNOWN_COMMANDS: [&str; 4] = ["here", "channel", "group", "everyone"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("control sequence pattern is valid")
}

/// Resolve Slack's `<...>` control sequences into display text and links.
///
/// Sequences that cannot be resolved are escaped as `&lt;...&gt;` so they
/// never reach the output as raw tags.
pub fn replace_control_sequences(text: &str, options: &Options) -> String {
    let text = RE
        .user_mention
        .replace_all(text, |caps: &Captures| {
            match mention_name(caps, &options.users) {
                Some(name) => format!("@{name}"),
                None => escape_tags(&caps[0]),
            }
        })
        .into_owned();

    let text = RE
        .channel_mention
        .replace_all(&text, |caps: &Captures| {
            match mention_name(caps, &options.channels) {
                Some(name) => format!("#{name}"),
                None => escape_tags(&caps[0]),
            }
        })
        .into_owned();

    let text = RE
        .link
        .replace_all(&text, |caps: &Captures| {
            let url = &caps["url"];
            let label = caps.name("label").map_or(url, |m| m.as_str());
            anchor(url, label)
        })
        .into_owned();

    let text = RE
        .mailto
        .replace_all(&text, |caps: &Captures| {
            let address = &caps["address"];
            let label = caps.name("label").map_or(address, |m| m.as_str());
            anchor(&format!("mailto:{address}"), label)
        })
        .into_owned();

    let text = RE
        .subteam_command
        .replace_all(&text, |caps: &Captures| {
            let name = caps
                .name("name")
                .map(|m| m.as_str())
                .or_else(|| options.usergroups.get(&caps["id"]).map(String::as_str));
            match name {
                Some(name) => name.to_owned(),
                None => escape_tags(&caps[0]),
            }
        })
        .into_owned();

    RE.command
        .replace_all(&text, |caps: &Captures| {
            let literal = &caps["literal"];
            if KNOWN_COMMANDS.contains(&literal) {
                return format!("@{literal}");
            }
            match caps.name("name") {
                Some(name) => name.as_str().to_owned(),
                None => escape_tags(&caps[0]),
            }
        })
        .into_owned()
}

/// Label first, then a bare name, then the lookup table by id.
fn mention_name<'a>(caps: &'a Captures, table: &'a HashMap<String, String>) -> Option<&'a str> {
    caps.name("name")
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str())
        .or_else(|| {
            caps.name("id")
                .and_then(|id| table.get(id.as_str()))
                .map(String::as_str)
        })
}

fn anchor(href: &str, label: &str) -> String {
    format!(r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{label}</a>"#)
}

/// `<...>` becomes `&lt;...&gt;`.
fn escape_tags(sequence: &str) -> String {
    let inner = sequence
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(sequence);
    format!("&lt;{inner}&gt;")
}
