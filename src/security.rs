//! Authentication callbacks for ajax clients
//!
//! Instead of redirecting to a login page, these handlers answer with a status code only, which is all a single page application needs to decide what to show.
pub use self::response_writer::ResponseWriter;
pub use self::success_handler::{AuthenticationSuccessHandler, StatusSuccessHandler};
pub use self::failure_handler::{AuthenticationFailureHandler, UnauthorizedFailureHandler, UNAUTHORIZED_MESSAGE};
mod response_writer;
mod success_handler;
mod failure_handler;

use std::any::Any;
use crate::Error;

/// Outcome of an authentication attempt, as reported by the host framework
pub enum AuthenticationEvent<'a> {
    /// The authenticated principal, whatever its type
    Success(&'a dyn Any),
    /// The reason the authentication was rejected
    Failure(&'a dyn std::error::Error)
}

/// Pair of handlers answering both authentication outcomes
///
/// By default, success is answered by [StatusSuccessHandler] and failure by [UnauthorizedFailureHandler].
pub struct AuthenticationEventResponder {
    success_handler: Box<dyn AuthenticationSuccessHandler>,
    failure_handler: Box<dyn AuthenticationFailureHandler>
}

impl AuthenticationEventResponder {
    pub fn new() -> AuthenticationEventResponder {
        AuthenticationEventResponder {
            success_handler: Box::new(StatusSuccessHandler),
            failure_handler: Box::new(UnauthorizedFailureHandler)
        }
    }

    /// Replaces the handler called on success
    pub fn success_handler<H: 'static + AuthenticationSuccessHandler>(mut self, handler: H) -> Self {
        self.success_handler = Box::new(handler);
        self
    }

    /// Replaces the handler called on failure
    pub fn failure_handler<H: 'static + AuthenticationFailureHandler>(mut self, handler: H) -> Self {
        self.failure_handler = Box::new(handler);
        self
    }

    pub fn on_success(&self, response: &mut dyn ResponseWriter, authentication: &dyn Any) -> Result<(), Error> {
        self.success_handler.on_authentication_success(response, authentication)
    }

    pub fn on_failure(&self, response: &mut dyn ResponseWriter, cause: &dyn std::error::Error) -> Result<(), Error> {
        #[cfg(feature = "full_log")]
        log::debug!("authentication rejected, answering with 401");
        self.failure_handler.on_authentication_failure(response, cause)
    }

    /// Dispatches the event to the matching handler
    pub fn respond(&self, response: &mut dyn ResponseWriter, event: AuthenticationEvent) -> Result<(), Error> {
        match event {
            AuthenticationEvent::Success(authentication) => self.on_success(response, authentication),
            AuthenticationEvent::Failure(cause) => self.on_failure(response, cause)
        }
    }
}

impl Default for AuthenticationEventResponder {
    fn default() -> Self {
        AuthenticationEventResponder::new()
    }
}
