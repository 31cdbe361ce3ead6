pub mod errors;
pub mod matcher;
pub mod methods;
pub mod paths;
pub mod pattern;
pub mod route;
mod router;

pub use errors::{RouteError, RouterResult};
pub use matcher::RouteMatcher;
pub use methods::MethodSet;
pub use paths::{PathValue, Paths, PathsSpec, ReversedPaths};
pub use pattern::{Extraction, NamedParamScanner, ScanPolicy, compile_pattern};
pub use route::{BeforeMatch, Converter, Route, RouteConfig};
pub use router::Router;
