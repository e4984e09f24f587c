#![warn(missing_docs)]
//! Canned error pages for axum services
//!
//! When a request fails, most deployments want to send the client a fixed,
//! pre-rendered HTML page rather than whatever detail the failing handler
//! produced. [`ErrorResponder`] holds that canned body and decides, per error
//! event, whether to emit it and whether to log the failure. 401 Unauthorized
//! responses pass through untouched so the authentication layer's challenge
//! body and headers survive.
//!
//! [`CannedErrorLayer`] installs a responder into an axum router:
//!
//! ```
//! use axum::{routing::get, Router};
//! use gangway::{CannedErrorLayer, ErrorResponder};
//!
//! let responder = ErrorResponder::new("<html><body>Something went wrong</body></html>");
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(CannedErrorLayer::new(responder));
//! ```

mod event;
mod layer;
mod responder;
#[cfg(test)]
mod test_util;

pub use event::*;
pub use layer::*;
pub use responder::*;
