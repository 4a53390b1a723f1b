//! Route handlers organized by resource

pub mod health;
pub mod timeline;
pub mod profile;
pub mod tweets;
pub mod users;
pub mod follows;

use axum::routing::MethodRouter;
use axum::Router;

/// Registration helpers shared by the resource routers
pub(crate) trait RouterExt<S> {
    /// Route a trailing-slash `path` and its bare form to the same handlers,
    /// so `/timeline` and `/timeline/` both resolve.
    fn route_slash_tolerant(self, path: &str, method_router: MethodRouter<S>) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route_slash_tolerant(self, path: &str, method_router: MethodRouter<S>) -> Self {
        let bare = path.trim_end_matches('/');
        self.route(path, method_router.clone())
            .route(bare, method_router)
    }
}
