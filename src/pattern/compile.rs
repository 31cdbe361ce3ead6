use memchr::memchr;

/// Capture fragment the identifier shorthand markers expand to.
const ID_PATTERN: &str = "/([a-zA-Z0-9_-]+)";

/// Shorthand markers and their regex replacements, in substitution order.
const SHORTHAND: [(&str, &str); 6] = [
    ("/:module", ID_PATTERN),
    ("/:controller", ID_PATTERN),
    ("/:namespace", ID_PATTERN),
    ("/:action", ID_PATTERN),
    ("/:params", "(/.*)*"),
    ("/:int", "/([0-9]+)"),
];

/// Replaces shorthand placeholders in a route pattern and anchors the result
/// as a delimited regular expression when it contains regex syntax.
///
/// Patterns with no `:` skip substitution entirely. Afterwards, a `(` or `[`
/// anywhere in the result marks it as a regular expression and it is wrapped
/// as `#^...$#`; a pure literal path is returned unchanged. Both probes are
/// byte heuristics, not regex parsing, and a literal `[` in a path will
/// trigger wrapping.
#[tracing::instrument(level = "trace")]
pub fn compile_pattern(pattern: &str) -> String {
    let mut compiled = pattern.to_string();

    if memchr(b':', compiled.as_bytes()).is_some() {
        for (marker, replacement) in SHORTHAND {
            if compiled.contains(marker) {
                compiled = compiled.replace(marker, replacement);
            }
        }
    }

    let bytes = compiled.as_bytes();
    if memchr(b'(', bytes).is_some() || memchr(b'[', bytes).is_some() {
        format!("#^{compiled}$#")
    } else {
        compiled
    }
}
