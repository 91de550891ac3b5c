use crate::http::Request;
use cookie::Cookie;

/// Read access to the cookies of an incoming request
///
/// Implement it for the request type of your server to use the [CookieLocaleResolver](crate::CookieLocaleResolver) with it.
pub trait CookieSource {
    /// Raw value of the first cookie with the given name, as sent by the client (no percent decoding)
    fn cookie(&self, name: &str) -> Option<String>;
    /// Languages the client prefers, most preferred first
    ///
    /// Only consulted when the resolver has no default locale configured.
    fn preferred_languages(&self) -> Vec<String> {
        Vec::new()
    }
}

impl CookieSource for Request {
    fn cookie(&self, name: &str) -> Option<String> {
        self.header_values("Cookie").into_iter()
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| Cookie::parse(pair.trim()).ok())
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.accepted_languages()
    }
}
