//! Strip/restore of the legacy `<script type="text/javascript">...</script>`
//! envelope.
//!
//! Trivial by design (`spec.md` §1 calls this out as an external
//! collaborator to the interesting tokenizer/emitter work) but still part
//! of the crate's documented external interface (`spec.md` §6).

const OPEN_TAG: &str = "<script type=\"text/javascript\">";
const CLOSE_TAG: &str = "</script>";

/// Removes one occurrence of the opening and closing script tag if *both*
/// literal substrings are present. Returns the (possibly) stripped source
/// and whether stripping actually happened, so the caller knows whether to
/// re-wrap the output.
///
/// The detection test is "total length changed after replacing both
/// substrings" — a source that merely contains `</script>` without the
/// exact opening tag (or vice versa) is left untouched.
pub fn strip(source: &str) -> (String, bool) {
    if !source.contains(OPEN_TAG) || !source.contains(CLOSE_TAG) {
        return (source.to_owned(), false);
    }

    let stripped = source.replacen(OPEN_TAG, "", 1).replacen(CLOSE_TAG, "", 1);
    let changed = stripped.len() != source.len();
    (stripped, changed)
}

/// Re-wraps formatted output in the script tag envelope.
pub fn restore(output: &str) -> String {
    format!("{OPEN_TAG}{output}{CLOSE_TAG}")
}
