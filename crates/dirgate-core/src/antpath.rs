//! Ant-style path pattern matching.
//!
//! Registered services are stored with an Ant-style callback-URL pattern;
//! the authorization resolver tests the nearest proxy's identifier against
//! each pattern to decide which attribute grants apply.
//!
//! Supported wildcards:
//! - `?` matches exactly one character within a segment
//! - `*` matches any run of characters within a segment (never `/`)
//! - `**` matches zero or more whole segments

/// Test whether `candidate` matches the Ant-style `pattern`.
///
/// Both are slash-delimited path-like strings and may carry a scheme/host
/// prefix (`https://app.example.edu/cb`). A trailing slash on either side
/// does not change the outcome.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<&str> = split_segments(pattern);
    let candidate: Vec<&str> = split_segments(candidate);
    match_segments(&pattern, &candidate)
}

fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    trimmed.split('/').collect()
}

fn match_segments(pattern: &[&str], candidate: &[&str]) -> bool {
    match pattern.split_first() {
        None => candidate.is_empty(),
        Some((&"**", rest)) => {
            // Backtracking search: consume zero segments, then one, then more,
            // until the remaining pattern matches the remaining suffix.
            (0..=candidate.len()).any(|skip| match_segments(rest, &candidate[skip..]))
        }
        Some((seg, rest)) => match candidate.split_first() {
            Some((cand, cand_rest)) if segment_matches(seg, cand) => {
                match_segments(rest, cand_rest)
            }
            _ => false,
        },
    }
}

/// Match a single segment, honoring `*` and `?`.
fn segment_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    match_chars(&pattern, &text)
}

fn match_chars(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| match_chars(rest, &text[skip..])),
        Some(('?', rest)) => match text.split_first() {
            Some((_, text_rest)) => match_chars(rest, text_rest),
            None => false,
        },
        Some((ch, rest)) => match text.split_first() {
            Some((tc, text_rest)) if tc == ch => match_chars(rest, text_rest),
            _ => false,
        },
    }
}
