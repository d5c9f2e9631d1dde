//! Text normalization applied to raw page content before splitting.
//!
//! Extraction from layout-heavy formats (PDF in particular) leaves text
//! littered with hard line breaks, escape characters, markdown fragments and
//! repeated punctuation. [`clean_string`] flattens all of that into a form
//! the splitter can chunk evenly.

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Cleans raw extracted text. Pure and deterministic; never fails for
/// well-formed string input, and `clean_string(clean_string(x)) ==
/// clean_string(x)` for every `x`.
///
/// Transformations, in order:
/// 1. every newline becomes a space;
/// 2. whitespace runs collapse to a single space, leading/trailing
///    whitespace is trimmed;
/// 3. backslashes are removed;
/// 4. every `#` becomes a space;
/// 5. a run of the *same* repeated non-alphanumeric, non-whitespace
///    character collapses to one occurrence (`"!!!"` becomes `"!"`; a mixed
///    run like `"!?!"` stays as-is because the characters differ);
/// 6. whitespace introduced by step 4 is collapsed again.
pub fn clean_string(text: &str) -> String {
    let text = text.replace('\n', " ");
    let text = whitespace_run().replace_all(text.trim(), " ");
    let text = text.replace('\\', "");
    let text = text.replace('#', " ");
    let text = collapse_repeated_marks(&text);
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

/// `true` for characters eligible for run collapsing: anything that is not a
/// word character (alphanumeric or `_`) and not whitespace.
fn is_collapsible(ch: char) -> bool {
    !ch.is_alphanumeric() && ch != '_' && !ch.is_whitespace()
}

/// Collapses each maximal run of one repeated collapsible character into a
/// single occurrence. The `regex` crate has no backreferences, so the
/// equivalent of `([^\w\s])\1*` is done with a single pass over the chars.
fn collapse_repeated_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if prev == Some(ch) && is_collapsible(ch) {
            continue;
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}
