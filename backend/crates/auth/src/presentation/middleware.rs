//! Session Middleware
//!
//! Resolves the caller once per request and stores it in the request
//! extensions. Never rejects: handlers decide what anonymous callers may do.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;

use crate::application::session::SessionContext;

pub async fn attach_caller(
    State(session): State<SessionContext>,
    mut req: Request,
    next: Next,
) -> Response {
    let caller = session.resolve(req.headers());
    req.extensions_mut().insert(caller);
    next.run(req).await
}

/// Apply [`attach_caller`] to every route of `router`
pub fn with_session<S>(router: Router<S>, session: SessionContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(session, attach_caller))
}
