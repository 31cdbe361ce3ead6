use crate::errors::RouterResult;
use crate::methods::MethodSet;
use crate::paths::PathsSpec;
use crate::route::Route;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct RouterState {
    routes: Vec<Route>,
    next_id: u32,
}

/// Registration-time route table. Assigns each route a monotonic id and
/// stores the entity; matching against incoming requests is not part of this
/// crate. Reads and writes go through an internal lock, but reconfiguration
/// of an individual route assumes a single writer.
#[derive(Debug, Default)]
pub struct Router {
    inner: RwLock<RouterState>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and registers a route, returning its id.
    pub fn add(&self, pattern: &str, paths: Option<PathsSpec>) -> RouterResult<u32> {
        self.register(Route::new(pattern, paths, None)?)
    }

    /// Like [`Router::add`] with an HTTP-method constraint.
    pub fn add_via(
        &self,
        pattern: &str,
        paths: Option<PathsSpec>,
        methods: MethodSet,
    ) -> RouterResult<u32> {
        self.register(Route::new(pattern, paths, Some(methods))?)
    }

    fn register(&self, mut route: Route) -> RouterResult<u32> {
        let mut guard = self.inner.write();
        let id = guard.next_id;
        route.assign_id(id);
        guard.next_id += 1;
        tracing::debug!(id, pattern = route.pattern(), "registered route");
        guard.routes.push(route);
        Ok(id)
    }

    pub fn route(&self, id: u32) -> Option<Route> {
        let guard = self.inner.read();
        guard.routes.iter().find(|route| route.id() == id).cloned()
    }

    pub fn route_by_name(&self, name: &str) -> Option<Route> {
        let guard = self.inner.read();
        guard
            .routes
            .iter()
            .find(|route| route.name() == Some(name))
            .cloned()
    }

    /// Runs `f` against the stored route with the given id.
    pub fn update<R>(&self, id: u32, f: impl FnOnce(&mut Route) -> R) -> Option<R> {
        let mut guard = self.inner.write();
        guard
            .routes
            .iter_mut()
            .find(|route| route.id() == id)
            .map(f)
    }

    pub fn len(&self) -> usize {
        self.inner.read().routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().routes.is_empty()
    }
}
