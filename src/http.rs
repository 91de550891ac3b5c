//! Minimal http model used by the resolver and the authentication responders
//!
//! Host servers with their own request and response types only need to implement [CookieSource](crate::CookieSource), [CookieSink](crate::CookieSink) and [ResponseWriter](crate::security::ResponseWriter) for them.
pub use self::request::Request;
pub use self::response::Response;
pub use self::stream::ResponseStream;

mod request;
mod response;
mod stream;
