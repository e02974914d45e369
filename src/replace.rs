use tracing::{debug, trace};

use crate::delimiter::{Close, Delimiter, Opening, Padding};
use crate::window::WindowSet;

pub const LINE_BREAK: &str = "<br />";

/// Replace every matched pair of `delimiter` inside the eligible windows.
///
/// Windows are visited in order. Within a window the scan resumes after each
/// emitted replacement until no pair is left, then moves to the next window.
/// At most `max_replacements` substitutions are made; pairs beyond the budget
/// stay as literal text.
pub fn replace_in_windows(
    mut text: String,
    mut windows: WindowSet,
    delimiter: &Delimiter,
    max_replacements: usize,
) -> (String, WindowSet) {
    let mut remaining = max_replacements;
    let mut index = 0;
    let mut resume_at: Option<usize> = None;
    // Just past an emitted close that swallowed a newline.
    let mut line_start: Option<usize> = None;

    while let Some(window) = windows.get(index).copied() {
        if window.is_inert() {
            index += 1;
            resume_at = None;
            continue;
        }
        if remaining == 0 {
            debug!(
                delimiter = delimiter.literal,
                max_replacements, "replacement budget exhausted"
            );
            break;
        }

        let from = resume_at.take().unwrap_or(window.start).max(window.start);
        let Some((opening, close)) = find_pair(&text, delimiter, from, window.end, line_start)
        else {
            index += 1;
            continue;
        };

        let replacement = render(&text, delimiter, &opening, &close);
        let keeps_newline = text[close.start..close.start + close.retained].ends_with('\n');
        let delta = replacement.len() as isize - (close.end - opening.start) as isize;
        trace!(
            delimiter = delimiter.literal,
            start = opening.start,
            end = close.end,
            asymmetric = delimiter.is_asymmetric(),
            delta,
            "replaced"
        );
        text.replace_range(opening.start..close.end, &replacement);
        windows.grow(index, delta);
        windows.shift_from(index + 1, delta);
        remaining -= 1;

        let emitted_end = opening.start + replacement.len();
        line_start = keeps_newline.then_some(emitted_end);
        if delimiter.disable_nested {
            windows.split_at(index, opening.start, emitted_end);
            windows.disable(index + 1);
            index += 2;
        } else {
            resume_at = Some(emitted_end);
        }
        debug_assert!(windows.is_consistent(), "windows out of order: {windows:?}");
    }

    (text, windows)
}

/// First opening in `text[from..limit]` and its closing partner.
///
/// A closing position depends on its opening only through the content
/// start, so once the first opening finds no partner before `limit`, no
/// later opening in the window can. The scan of a window is linear.
fn find_pair(
    text: &str,
    delimiter: &Delimiter,
    from: usize,
    limit: usize,
    line_start: Option<usize>,
) -> Option<(Opening, Close)> {
    let opening = delimiter.find_opening(text, from, limit, line_start)?;
    let close = delimiter.find_closing(text, &opening, limit)?;
    Some((opening, close))
}

fn render(text: &str, delimiter: &Delimiter, opening: &Opening, close: &Close) -> String {
    let retained = &text[close.start..close.start + close.retained];
    let (leading, interior, trailing) = match delimiter.padding {
        Padding::Inside => ("", &text[opening.literal_end..close.start], ""),
        Padding::Outside => {
            let body = &text[opening.content_start..close.start];
            let content = body.trim_end();
            (
                &text[opening.literal_end..opening.content_start],
                content,
                &body[content.len()..],
            )
        }
    };

    let mut out = String::with_capacity(
        leading.len()
            + delimiter.open_tag.len()
            + interior.len()
            + retained.len()
            + delimiter.close_tag.len()
            + trailing.len(),
    );
    out.push_str(leading);
    out.push_str(delimiter.open_tag);
    if delimiter.replace_newlines {
        out.push_str(&interior.replace('\n', LINE_BREAK));
    } else {
        out.push_str(interior);
    }
    out.push_str(retained);
    out.push_str(delimiter.close_tag);
    out.push_str(trailing);
    out
}
