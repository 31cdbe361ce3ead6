use crate::errors::{RouteError, RouterResult};
use crate::paths::{PathValue, Paths};
use crate::route::Route;
use regex::Regex;

/// Client side of the compiled-pattern contract: applies one route's
/// compiled pattern to a path through the `regex` engine.
///
/// Patterns the compiler left unwrapped are plain literals and compare by
/// equality; `#^...$#` patterns are compiled with the delimiters stripped
/// and the anchors kept. Route-table iteration and verb negotiation stay out
/// of scope here.
#[derive(Debug, Clone)]
pub enum RouteMatcher {
    Literal(String),
    Anchored(Regex),
}

impl RouteMatcher {
    pub fn for_route(route: &Route) -> RouterResult<RouteMatcher> {
        Self::from_compiled(route.compiled_pattern())
    }

    pub fn from_compiled(compiled: &str) -> RouterResult<RouteMatcher> {
        let delimited = compiled.len() >= 2 && compiled.starts_with('#') && compiled.ends_with('#');
        if !delimited {
            return Ok(RouteMatcher::Literal(compiled.to_string()));
        }
        let body = &compiled[1..compiled.len() - 1];
        let regex = Regex::new(body).map_err(|source| RouteError::InvalidCompiledRegex {
            pattern: compiled.to_string(),
            source,
        })?;
        Ok(RouteMatcher::Anchored(regex))
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RouteMatcher::Literal(literal) => literal == path,
            RouteMatcher::Anchored(regex) => regex.is_match(path),
        }
    }

    /// Applies the pattern and resolves the route's paths mapping against the
    /// match: capture ordinals become the matched group text, literal defaults
    /// pass through. `None` when the path does not match.
    pub fn resolve(&self, path: &str, paths: &Paths) -> Option<Vec<(String, String)>> {
        match self {
            RouteMatcher::Literal(literal) => {
                if literal != path {
                    return None;
                }
                let resolved = paths
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .as_literal()
                            .map(|literal| (name.to_string(), literal.to_string()))
                    })
                    .collect();
                Some(resolved)
            }
            RouteMatcher::Anchored(regex) => {
                let captures = regex.captures(path)?;
                let mut resolved = Vec::with_capacity(paths.len());
                for (name, value) in paths.iter() {
                    match value {
                        PathValue::Literal(literal) => {
                            resolved.push((name.to_string(), literal.clone()));
                        }
                        PathValue::Capture(index) => {
                            if let Some(group) = captures.get(*index) {
                                resolved.push((name.to_string(), group.as_str().to_string()));
                            }
                        }
                    }
                }
                Some(resolved)
            }
        }
    }
}
