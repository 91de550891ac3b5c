use crate::{Error, security::ResponseWriter};

/// Message sent along with the 401 status
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: the requested resource requires an authentication that was not correctly supplied.";

/// Callback for a failed authentication
pub trait AuthenticationFailureHandler: Send + Sync {
    /// Called once the authentication was rejected, `cause` is the reason given by the host framework
    fn on_authentication_failure(&self, response: &mut dyn ResponseWriter, cause: &dyn std::error::Error) -> Result<(), Error>;
}

/// Answers a failed authentication with a 401 and [UNAUTHORIZED_MESSAGE]
#[derive(Clone, Copy, Debug, Default)]
pub struct UnauthorizedFailureHandler;

impl AuthenticationFailureHandler for UnauthorizedFailureHandler {
    fn on_authentication_failure(&self, response: &mut dyn ResponseWriter, _cause: &dyn std::error::Error) -> Result<(), Error> {
        response.send_error(401, UNAUTHORIZED_MESSAGE)
    }
}
