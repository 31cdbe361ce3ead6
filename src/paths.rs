use crate::errors::{RouteError, RouterResult};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The value side of a paths entry: either a literal default supplied by the
/// caller (e.g. a controller name) or the 1-based capture-group ordinal of a
/// named parameter discovered during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathValue {
    Literal(String),
    Capture(usize),
}

impl PathValue {
    pub fn literal(value: impl Into<String>) -> Self {
        PathValue::Literal(value.into())
    }

    pub fn capture(index: usize) -> Self {
        PathValue::Capture(index)
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            PathValue::Literal(value) => Some(value),
            PathValue::Capture(_) => None,
        }
    }

    pub fn as_capture(&self) -> Option<usize> {
        match self {
            PathValue::Capture(index) => Some(*index),
            PathValue::Literal(_) => None,
        }
    }
}

pub type ReversedPaths = SmallVec<[(PathValue, String); 4]>;

/// Insertion-ordered name → value mapping. Route paths are tiny (a handful
/// of entries), so lookups stay linear over an inline vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paths {
    entries: SmallVec<[(String, PathValue); 4]>,
}

impl Paths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value in place when the key already exists, otherwise
    /// appends. A re-inserted key keeps its position, as in associative-array
    /// overwrites.
    pub fn insert(&mut self, name: impl Into<String>, value: PathValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&PathValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn capture_index(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(PathValue::as_capture)
    }

    /// Merges `other` into `self`; entries from `other` win on key collision.
    pub fn merge(&mut self, other: Paths) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// The mapping inverted: capture positions (or literal values) as keys,
    /// parameter names as values. A duplicate value keeps the last name.
    pub fn reversed(&self) -> ReversedPaths {
        let mut reversed = ReversedPaths::new();
        for (name, value) in &self.entries {
            if let Some(entry) = reversed.iter_mut().find(|(key, _)| key == value) {
                entry.1 = name.clone();
            } else {
                reversed.push((value.clone(), name.clone()));
            }
        }
        reversed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, PathValue)> for Paths {
    fn from_iter<I: IntoIterator<Item = (String, PathValue)>>(iter: I) -> Self {
        let mut paths = Paths::new();
        for (name, value) in iter {
            paths.insert(name, value);
        }
        paths
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = &'a (String, PathValue);
    type IntoIter = std::slice::Iter<'a, (String, PathValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The caller-facing paths argument of `reconfigure`: either the
/// `"Module::Controller::action"` shorthand or an explicit mapping.
/// The omitted-paths case is `Option::<PathsSpec>::None` at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum PathsSpec {
    Shorthand(String),
    Map(Paths),
}

impl PathsSpec {
    /// Dynamic boundary check for callers handing over untyped JSON
    /// configuration values. `Null` means "no paths supplied".
    pub fn from_value(value: &serde_json::Value) -> RouterResult<Option<PathsSpec>> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(shorthand) => {
                Ok(Some(PathsSpec::Shorthand(shorthand.clone())))
            }
            serde_json::Value::Object(map) => {
                let mut paths = Paths::new();
                for (name, value) in map {
                    let entry = match value {
                        serde_json::Value::String(literal) => PathValue::literal(literal),
                        serde_json::Value::Number(number) => match number.as_u64() {
                            Some(index) => PathValue::capture(index as usize),
                            None => {
                                return Err(RouteError::InvalidPaths {
                                    detail: format!(
                                        "value for '{name}' must be a capture index, got {number}"
                                    ),
                                });
                            }
                        },
                        other => {
                            return Err(RouteError::InvalidPaths {
                                detail: format!(
                                    "value for '{name}' must be a string or capture index, got {other}"
                                ),
                            });
                        }
                    };
                    paths.insert(name.clone(), entry);
                }
                Ok(Some(PathsSpec::Map(paths)))
            }
            other => Err(RouteError::InvalidPaths {
                detail: format!("paths must be a string or a mapping, got {other}"),
            }),
        }
    }
}

impl From<&str> for PathsSpec {
    fn from(shorthand: &str) -> Self {
        PathsSpec::Shorthand(shorthand.to_string())
    }
}

impl From<String> for PathsSpec {
    fn from(shorthand: String) -> Self {
        PathsSpec::Shorthand(shorthand)
    }
}

impl From<Paths> for PathsSpec {
    fn from(paths: Paths) -> Self {
        PathsSpec::Map(paths)
    }
}
