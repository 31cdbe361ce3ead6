use crate::errors::{RouteError, RouterResult};
use crate::methods::MethodSet;
use crate::paths::{Paths, PathValue, PathsSpec, ReversedPaths};
use crate::pattern::{NamedParamScanner, compile_pattern};
use hashbrown::HashMap;
use memchr::memchr;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Hook invoked when a route matches; returning `false` rejects the match.
pub type BeforeMatch = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Transformer applied to one captured parameter value.
pub type Converter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The derived state of a route: the authored pattern, its compiled
/// regular-expression form, and the paths mapping. Built as a whole by
/// [`RouteConfig::build`], so a reconfiguration either fully replaces the
/// triple or leaves the previous one untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteConfig {
    pattern: String,
    compiled_pattern: String,
    paths: Paths,
}

impl RouteConfig {
    /// Compiles `pattern` and resolves `paths` into a new config.
    ///
    /// A pattern already delimited with `#` is stored verbatim as its own
    /// compiled form. Otherwise `{...}` tokens are extracted first (their
    /// name → ordinal entries merged over the caller-declared paths) and the
    /// rewritten pattern is handed to [`compile_pattern`].
    #[tracing::instrument(level = "trace")]
    pub fn build(pattern: &str, paths: Option<PathsSpec>) -> RouterResult<RouteConfig> {
        let mut route_paths = match paths {
            Some(PathsSpec::Shorthand(shorthand)) => parse_shorthand(&shorthand),
            Some(PathsSpec::Map(map)) => map,
            None => Paths::new(),
        };

        let compiled_pattern = if pattern.starts_with('#') {
            pattern.to_string()
        } else if memchr(b'{', pattern.as_bytes()).is_some() {
            match NamedParamScanner::lenient().extract(pattern)? {
                Some(extraction) => {
                    route_paths.merge(extraction.matches);
                    compile_pattern(&extraction.pattern)
                }
                None => compile_pattern(pattern),
            }
        } else {
            compile_pattern(pattern)
        };

        Ok(RouteConfig {
            pattern: pattern.to_string(),
            compiled_pattern,
            paths: route_paths,
        })
    }

    /// Dynamically-typed variant of [`RouteConfig::build`] for callers
    /// handing over untyped configuration values. A non-string pattern is
    /// rejected with [`RouteError::InvalidPattern`], non-mapping paths with
    /// [`RouteError::InvalidPaths`].
    pub fn from_values(
        pattern: &serde_json::Value,
        paths: &serde_json::Value,
    ) -> RouterResult<RouteConfig> {
        let pattern = pattern.as_str().ok_or_else(|| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "the pattern must be a string".to_string(),
        })?;
        let spec = PathsSpec::from_value(paths)?;
        Self::build(pattern, spec)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn compiled_pattern(&self) -> &str {
        &self.compiled_pattern
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }
}

/// One registered route: the compiled configuration plus passive matching
/// metadata (method constraint, hostname, name, hooks, converters).
#[derive(Clone)]
pub struct Route {
    id: u32,
    config: RouteConfig,
    methods: Option<MethodSet>,
    hostname: Option<String>,
    name: Option<String>,
    before_match: Option<BeforeMatch>,
    converters: HashMap<String, Converter>,
}

impl Route {
    pub fn new(
        pattern: &str,
        paths: Option<PathsSpec>,
        methods: Option<MethodSet>,
    ) -> RouterResult<Route> {
        let config = RouteConfig::build(pattern, paths)?;
        Ok(Route {
            id: 0,
            config,
            methods,
            hostname: None,
            name: None,
            before_match: None,
            converters: HashMap::new(),
        })
    }

    /// Replaces the pattern/compiled-pattern/paths triple. The new config is
    /// built before anything is stored, so a failure leaves the route as it
    /// was.
    pub fn reconfigure(&mut self, pattern: &str, paths: Option<PathsSpec>) -> RouterResult<()> {
        self.config = RouteConfig::build(pattern, paths)?;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn pattern(&self) -> &str {
        self.config.pattern()
    }

    pub fn compiled_pattern(&self) -> &str {
        self.config.compiled_pattern()
    }

    pub fn paths(&self) -> &Paths {
        self.config.paths()
    }

    /// The paths mapping inverted: positions as keys, names as values.
    pub fn reversed_paths(&self) -> ReversedPaths {
        self.config.paths().reversed()
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Constrains matching to one or more HTTP methods.
    pub fn via(&mut self, methods: MethodSet) -> &mut Self {
        self.methods = Some(methods);
        self
    }

    /// Alias of [`Route::via`].
    pub fn set_methods(&mut self, methods: MethodSet) -> &mut Self {
        self.methods = Some(methods);
        self
    }

    pub fn methods(&self) -> Option<MethodSet> {
        self.methods
    }

    pub fn set_hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets a hook that runs when the route matches; returning `false` makes
    /// the route count as not matched.
    pub fn set_before_match(
        &mut self,
        callback: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.before_match = Some(Arc::new(callback));
        self
    }

    pub fn before_match(&self) -> Option<&BeforeMatch> {
        self.before_match.as_ref()
    }

    /// Registers a transformer for one captured parameter.
    pub fn convert(
        &mut self,
        name: impl Into<String>,
        converter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.converters.insert(name.into(), Arc::new(converter));
        self
    }

    pub fn converter(&self, name: &str) -> Option<&Converter> {
        self.converters.get(name)
    }

    pub fn converters(&self) -> &HashMap<String, Converter> {
        &self.converters
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("methods", &self.methods)
            .field("hostname", &self.hostname)
            .field("name", &self.name)
            .field("before_match", &self.before_match.is_some())
            .field(
                "converters",
                &self.converters.keys().collect::<Vec<&String>>(),
            )
            .finish()
    }
}

/// Resolves the `"Module::Controller::action"` shorthand into a paths
/// mapping. Three parts set module/controller/action, two set
/// controller/action, one sets controller only; any other part count leaves
/// all three unset. A controller carrying a `\` namespace prefix is split,
/// and the bare class name is stored in its underscored form.
fn parse_shorthand(shorthand: &str) -> Paths {
    let parts: Vec<&str> = shorthand.split("::").collect();
    let (module, controller, action) = match parts.len() {
        3 => (Some(parts[0]), Some(parts[1]), Some(parts[2])),
        2 => (None, Some(parts[0]), Some(parts[1])),
        1 => (None, Some(parts[0]), None),
        _ => (None, None, None),
    };

    let mut paths = Paths::new();
    if let Some(module) = module {
        paths.insert("module", PathValue::literal(module));
    }
    if let Some(controller) = controller {
        let class_name = match controller.rfind('\\') {
            Some(position) => {
                let namespace = &controller[..position];
                if !namespace.is_empty() {
                    paths.insert("namespace", PathValue::literal(namespace));
                }
                &controller[position + 1..]
            }
            None => controller,
        };
        paths.insert("controller", PathValue::Literal(uncamelize(class_name)));
    }
    if let Some(action) = action {
        paths.insert("action", PathValue::literal(action));
    }
    paths
}

/// `CamelCase` → `camel_case`. Underscores are inserted before interior
/// uppercase letters; everything is lowercased.
fn uncamelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.char_indices() {
        if ch.is_ascii_uppercase() && index > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncamelize_lowers_and_underscores() {
        assert_eq!(uncamelize("Posts"), "posts");
        assert_eq!(uncamelize("BlogPosts"), "blog_posts");
        assert_eq!(uncamelize("already_snake"), "already_snake");
        assert_eq!(uncamelize(""), "");
    }

    #[test]
    fn shorthand_with_four_parts_sets_nothing() {
        let paths = parse_shorthand("A::B::C::D");
        assert!(paths.is_empty());
    }
}
