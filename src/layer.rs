use std::{error::Error, sync::Arc};

use axum::{
    body::Body,
    extract::Request,
    http::header,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::{ErrorEvent, ErrorResponder};

/// The failure behind an error response, carried in the response extensions
/// so the error-page middleware can log it.
///
/// Handlers and middleware that convert an error into a response can attach
/// the original error here; [CannedError] removes it before the response goes
/// out.
#[derive(Debug, Clone)]
pub struct ErrorCause(Arc<dyn Error + Send + Sync>);

impl ErrorCause {
    /// Wrap an error for insertion into response extensions.
    pub fn new(cause: impl Error + Send + Sync + 'static) -> Self {
        ErrorCause(Arc::new(cause))
    }

    /// The wrapped error.
    pub fn into_inner(self) -> Arc<dyn Error + Send + Sync> {
        self.0
    }
}

/// A layer that replaces the body of error responses with an
/// [ErrorResponder]'s canned content.
#[derive(Debug, Clone)]
pub struct CannedErrorLayer {
    responder: Arc<ErrorResponder>,
}

impl CannedErrorLayer {
    /// Create a new `CannedErrorLayer` around the given responder.
    pub fn new(responder: ErrorResponder) -> CannedErrorLayer {
        CannedErrorLayer {
            responder: Arc::new(responder),
        }
    }
}

impl<S: Service<Request<Body>>> Layer<S> for CannedErrorLayer {
    type Service = CannedError<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CannedError {
            inner,
            responder: self.responder.clone(),
        }
    }
}

/// The middleware that swaps error bodies for the canned content
#[derive(Debug, Clone)]
pub struct CannedError<S> {
    inner: S,
    responder: Arc<ErrorResponder>,
}

impl<S> Service<Request> for CannedError<S>
where
    S: Service<Request> + Send + 'static,
    S::Future: Send + 'static,
    S::Response: IntoResponse + Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let responder = self.responder.clone();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let mut res = fut.await?.into_response();

            // The cause is diagnostic state for the log line; it never
            // leaves the server, whatever the status
            let cause = res.extensions_mut().remove::<ErrorCause>();

            let status = res.status();
            if !status.is_client_error() && !status.is_server_error() {
                return Ok(res);
            }

            let mut event = ErrorEvent::from_status(status);
            if let Some(cause) = cause {
                event.cause = Some(cause.into_inner());
            }

            let Some(content) = responder.handle(&event) else {
                // A challenge response keeps the body the authentication
                // layer wrote
                return Ok(res);
            };

            let new_res = (
                status,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                content,
            )
                .into_response();

            Ok(new_res)
        })
    }
}
