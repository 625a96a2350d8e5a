use crate::stats::RatingEvent;

/// Parses one chat line of the form `Name: 1200 → 1215 (+15)`.
///
/// The line must carry a name segment (everything up to the first `:`,
/// trimmed, non-empty) followed somewhere in the remainder by a rating-change
/// pattern: digits, the `→` arrow, digits, then a signed integer in
/// parentheses. The two numbers around the arrow are not checked against the
/// parenthesized delta; only the delta is extracted.
///
/// Returns `None` for anything that does not match. Never panics, holds no
/// state, and is safe to call from any number of tasks at once.
pub fn parse_line(line: &str) -> Option<RatingEvent> {
    let (name, remainder) = split_name(line)?;
    let delta = find_rating_delta(remainder)?;
    Some(RatingEvent {
        player: name.to_string(),
        delta,
    })
}

/// Splits off the name segment before the first `:`. Fails if there is no
/// colon or the name trims to nothing.
fn split_name(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let name = line[..colon].trim();
    if name.is_empty() {
        return None;
    }
    Some((name, &line[colon + 1..]))
}

/// Finds the first `<digits> → <digits> (<signed digits>)` occurrence and
/// returns the parenthesized delta.
fn find_rating_delta(text: &str) -> Option<i64> {
    for (position, arrow) in text.match_indices('→') {
        if !ends_with_digits(&text[..position]) {
            continue;
        }
        if let Some(delta) = delta_after_arrow(&text[position + arrow.len()..]) {
            return Some(delta);
        }
    }
    None
}

fn ends_with_digits(before: &str) -> bool {
    before
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Matches `\s*\d+\s*\(([-+]?\d+)\)` against the text after an arrow. No
/// whitespace is allowed inside the parentheses.
fn delta_after_arrow(after: &str) -> Option<i64> {
    let rest = after.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].trim_start();
    let rest = rest.strip_prefix('(')?;
    let close = rest.find(')')?;
    parse_signed(&rest[..close])
}

fn parse_signed(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}
