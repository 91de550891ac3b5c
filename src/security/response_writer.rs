use crate::Error;

/// Ability to write an http status into a response
///
/// Both methods report failures of the underlying response (already committed, closed stream) as errors, the authentication handlers hand them back to their caller untouched.
pub trait ResponseWriter {
    /// Sets the status code, without touching the body
    fn set_status(&mut self, code: u32) -> Result<(), Error>;
    /// Reports an error to the client, with the given status code and message
    fn send_error(&mut self, code: u32, message: &str) -> Result<(), Error>;
}
