//! Link activation interception.

use tracing::{debug, trace};

/// Marker distinguishing internal link targets from external ones.
const PATH_ROOT: char = '/';

/// How a link activation should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Internal target: default navigation is suppressed and the path is
    /// forwarded to the host.
    Intercepted(String),
    /// External target: left to default handling. Opening in a separate
    /// context is a possible extension, not implemented.
    PassThrough,
    /// No usable target.
    Ignored,
}

/// Classifies anchor activations inside the isolated context.
#[derive(Debug, Default)]
pub struct NavigationInterceptor;

impl NavigationInterceptor {
    /// Creates an interceptor.
    pub fn new() -> Self {
        Self
    }

    /// Classifies one activation by its `href` target.
    pub fn intercept(&self, href: &str) -> Disposition {
        if href.is_empty() {
            trace!("activation without target ignored");
            return Disposition::Ignored;
        }
        if href.starts_with(PATH_ROOT) {
            debug!(href, "internal link intercepted");
            return Disposition::Intercepted(href.to_string());
        }
        trace!(href, "external link passed through");
        Disposition::PassThrough
    }
}
