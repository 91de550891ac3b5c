use std::any::Any;
use crate::{Error, security::ResponseWriter};

/// Callback for a successful authentication
pub trait AuthenticationSuccessHandler: Send + Sync {
    /// Called once the authentication went through, `authentication` is whatever the host framework authenticated
    fn on_authentication_success(&self, response: &mut dyn ResponseWriter, authentication: &dyn Any) -> Result<(), Error>;
}

/// Answers a successful authentication with a bare 200, for ajax clients that only look at the status
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusSuccessHandler;

impl AuthenticationSuccessHandler for StatusSuccessHandler {
    fn on_authentication_success(&self, response: &mut dyn ResponseWriter, _authentication: &dyn Any) -> Result<(), Error> {
        response.set_status(200)
    }
}
