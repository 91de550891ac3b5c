use crate::Error;
use cookie::Cookie;

/// Write access to the cookies of an outgoing response
pub trait CookieSink {
    /// Adds a `Set-Cookie` for the given cookie, failing if the response can no longer be modified
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<(), Error>;
}
