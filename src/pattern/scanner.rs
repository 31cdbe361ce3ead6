use crate::errors::{RouteError, RouterResult};
use crate::paths::{Paths, PathValue};
use memchr::memchr;

/// How the scanner treats malformed input.
///
/// Under `Lenient` an invalid parameter token is re-emitted literally and an
/// unterminated brace silently drops the buffered tail. `Strict` promotes
/// both cases to errors; it never changes the output produced for input that
/// `Lenient` accepts cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    #[default]
    Lenient,
    Strict,
}

/// Result of a successful extraction: the pattern with every `{...}` token
/// rewritten into a capture group, and the name → group-ordinal mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub pattern: String,
    pub matches: Paths,
}

/// Counters for the single-pass scan. Depths double as the scanner state:
/// `bracket_depth > 0` means inside a `{...}` token, `paren_depth > 0` means
/// inside a caller-authored `(...)` group where braces are literal text.
#[derive(Debug, Default)]
struct ScanState {
    bracket_depth: i32,
    paren_depth: i32,
    match_count: usize,
    marker: usize,
    intermediate: usize,
}

/// Single-pass scanner that rewrites `{name}` / `{name:regex}` tokens in a
/// route pattern into regular-expression capture groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedParamScanner {
    policy: ScanPolicy,
}

impl NamedParamScanner {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn lenient() -> Self {
        Self::new(ScanPolicy::Lenient)
    }

    pub fn strict() -> Self {
        Self::new(ScanPolicy::Strict)
    }

    /// Scans `pattern` left to right and returns the rewritten pattern plus
    /// the ordered name → capture-ordinal mapping, or `None` for empty input.
    ///
    /// Anonymous `(...)` groups written directly by the caller also consume a
    /// match ordinal, so the mapping stays aligned with the regex engine's
    /// own group numbering. With the lenient policy this function cannot
    /// fail; the `Err` arm is only reachable under [`ScanPolicy::Strict`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn extract(&self, pattern: &str) -> RouterResult<Option<Extraction>> {
        if pattern.is_empty() {
            return Ok(None);
        }

        let mut route = String::with_capacity(pattern.len() + 16);
        let mut matches = Paths::new();
        let mut state = ScanState::default();

        for (cursor, ch) in pattern.char_indices() {
            if state.paren_depth == 0 {
                if ch == '{' {
                    if state.bracket_depth == 0 {
                        state.marker = cursor + 1;
                        state.intermediate = 0;
                    }
                    state.bracket_depth += 1;
                    if state.bracket_depth > 0 {
                        continue;
                    }
                }
                if ch == '}' {
                    state.bracket_depth -= 1;
                    if state.bracket_depth == 0 && state.intermediate > 0 {
                        state.match_count += 1;
                        let token = &pattern[state.marker..cursor];
                        self.emit_token(token, state.match_count, &mut route, &mut matches)?;
                        continue;
                    }
                }
            }

            if state.bracket_depth == 0 {
                if ch == '(' {
                    state.paren_depth += 1;
                } else if ch == ')' {
                    state.paren_depth -= 1;
                    if state.paren_depth == 0 {
                        // An anonymous group authored directly in the pattern
                        // consumes a match ordinal too.
                        state.match_count += 1;
                    }
                }
            }

            if state.bracket_depth > 0 {
                state.intermediate += 1;
            } else {
                route.push(ch);
            }
        }

        // A brace that never closes leaves its buffered tail out of the
        // rewritten pattern.
        if state.bracket_depth > 0 && self.policy == ScanPolicy::Strict {
            return Err(RouteError::UnterminatedBrace {
                pattern: pattern.to_string(),
            });
        }

        tracing::trace!(rewritten = %route, params = matches.len(), "extracted named parameters");
        Ok(Some(Extraction {
            pattern: route,
            matches,
        }))
    }

    /// Rewrites one brace-delimited token into the output accumulator.
    fn emit_token(
        &self,
        token: &str,
        ordinal: usize,
        route: &mut String,
        matches: &mut Paths,
    ) -> RouterResult<()> {
        let mut name = "";
        let mut regexp = "";
        let mut valid = true;

        for (index, byte) in token.bytes().enumerate() {
            if index == 0 && !byte.is_ascii_alphabetic() {
                valid = false;
                break;
            }
            if byte == b':' {
                name = &token[..index];
                regexp = &token[index + 1..];
                break;
            }
            if !(byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_') {
                valid = false;
                break;
            }
        }

        if !valid {
            if self.policy == ScanPolicy::Strict {
                return Err(RouteError::InvalidParamToken {
                    token: token.to_string(),
                });
            }
            // Error-tolerant fallback: the token goes through as literal text
            // and claims no mapping entry.
            route.push('{');
            route.push_str(token);
            route.push('}');
            return Ok(());
        }

        if !name.is_empty() && !regexp.is_empty() {
            if has_group(regexp) {
                route.push_str(regexp);
            } else {
                route.push('(');
                route.push_str(regexp);
                route.push(')');
            }
            matches.insert(name, PathValue::capture(ordinal));
        } else {
            route.push_str("([^/]*)");
            let key = if name.is_empty() { token } else { name };
            matches.insert(key, PathValue::capture(ordinal));
        }
        Ok(())
    }
}

/// Whether an inline constraint already carries its own `(...)` pair: first
/// `(` followed by a later `)`. A byte probe, not a balance check.
fn has_group(regexp: &str) -> bool {
    match memchr(b'(', regexp.as_bytes()) {
        Some(open) => memchr(b')', &regexp.as_bytes()[open + 1..]).is_some(),
        None => false,
    }
}
