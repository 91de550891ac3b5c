//! Locale and time zone resolution from the Angular translate cookie
//!
//! The Angular client stores its language choice as `%22fr%22` (the value wrapped in url encoded double quotes), optionally followed by a time zone: `%22fr-FR Europe/Paris%22`. The [CookieLocaleResolver] reads that format back, falling back to configured defaults for whatever is missing, and writes it quoted so the client can keep reading its own cookie.
pub use self::cookie_value::{CookieLocaleValue, QUOTE, quote, unquote, parse};
pub use self::cookie_source::CookieSource;
pub use self::cookie_sink::CookieSink;
pub use self::request_scope::RequestScope;
mod cookie_value;
mod cookie_source;
mod cookie_sink;
mod request_scope;

use crate::{Error, Locale, TimeZone};
use cookie::{Cookie, time::Duration};

/// Name of the cookie written by the Angular translate module
pub const DEFAULT_COOKIE_NAME: &str = "NG_TRANSLATE_LANG_KEY";

/// Default cookie path, the whole site
pub const DEFAULT_COOKIE_PATH: &str = "/";

/// Locale and time zone in effect for a request
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedLocaleContext {
    pub locale: Locale,
    pub time_zone: TimeZone
}

/// Builder for the [CookieLocaleResolver]
pub struct CookieLocaleResolverBuilder {
    cookie_name: String,
    cookie_path: String,
    cookie_domain: Option<String>,
    cookie_max_age: Option<i64>,
    cookie_secure: bool,
    cookie_http_only: bool,
    default_locale: Option<Locale>,
    default_time_zone: Option<TimeZone>
}

impl CookieLocaleResolverBuilder {
    /// Creates a builder with the Angular cookie name and no defaults
    pub fn new() -> CookieLocaleResolverBuilder {
        CookieLocaleResolverBuilder {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
            cookie_domain: None,
            cookie_max_age: None,
            cookie_secure: false,
            cookie_http_only: false,
            default_locale: None,
            default_time_zone: None
        }
    }

    /// Creates a builder configured from environment variables
    ///
    /// `LOCALE_DEFAULT` (like `en-GB`), `LOCALE_TIME_ZONE` (like `Europe/London`) and `LOCALE_COOKIE_NAME` are read, unset variables keep the builder defaults.
    pub fn from_env() -> Result<CookieLocaleResolverBuilder, Error> {
        let mut builder = CookieLocaleResolverBuilder::new();
        if let Ok(locale) = std::env::var("LOCALE_DEFAULT") {
            builder = builder.default_locale(locale.replace('-', "_").parse::<Locale>()?);
        }
        if let Ok(time_zone) = std::env::var("LOCALE_TIME_ZONE") {
            builder = builder.default_time_zone(TimeZone::parse(time_zone)?);
        }
        if let Ok(cookie_name) = std::env::var("LOCALE_COOKIE_NAME") {
            builder = builder.cookie_name(cookie_name);
        }
        Ok(builder)
    }

    /// Name of the cookie to read and write
    pub fn cookie_name<A: Into<String>>(mut self, name: A) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Path attribute of the written cookie
    pub fn cookie_path<A: Into<String>>(mut self, path: A) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Domain attribute of the written cookie
    pub fn cookie_domain<A: Into<String>>(mut self, domain: A) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    /// Max-Age of the written cookie, in seconds. Without it, the cookie lasts for the browser session
    pub fn cookie_max_age(mut self, seconds: i64) -> Self {
        self.cookie_max_age = Some(seconds);
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Marks the cookie as http only. Keep it off if the Angular client has to read the cookie
    pub fn cookie_http_only(mut self, http_only: bool) -> Self {
        self.cookie_http_only = http_only;
        self
    }

    /// Locale used when the cookie is missing or carries `-`
    ///
    /// If it is never set, the first usable `Accept-Language` entry of the request is used, and english after that.
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = Some(locale);
        self
    }

    /// Time zone used when the cookie carries none. If it is never set, UTC is used
    pub fn default_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.default_time_zone = Some(time_zone);
        self
    }

    pub fn build(self) -> CookieLocaleResolver {
        CookieLocaleResolver {
            cookie_name: self.cookie_name,
            cookie_path: self.cookie_path,
            cookie_domain: self.cookie_domain,
            cookie_max_age: self.cookie_max_age,
            cookie_secure: self.cookie_secure,
            cookie_http_only: self.cookie_http_only,
            default_locale: self.default_locale,
            default_time_zone: self.default_time_zone
        }
    }
}

impl Default for CookieLocaleResolverBuilder {
    fn default() -> Self {
        CookieLocaleResolverBuilder::new()
    }
}

/// Resolves the locale of a request from a cookie in the Angular translate format
///
/// The resolver holds configuration only, it can be shared between requests. Per request state lives in the [RequestScope].
///
/// ```rust
/// # use web_helpers::{CookieLocaleResolver, Locale, RequestScope, http::Request};
/// let resolver = CookieLocaleResolver::builder().default_locale(Locale::new("en", "GB", "")).build();
/// let request = Request::new("GET", "http://localhost/").unwrap()
///     .header("Cookie", "NG_TRANSLATE_LANG_KEY=%22fr-FR%22");
/// let mut scope = RequestScope::new();
/// let locale = resolver.resolve_locale(&request, &mut scope).unwrap();
/// assert_eq!(locale, Locale::new("fr", "FR", ""));
/// ```
pub struct CookieLocaleResolver {
    cookie_name: String,
    cookie_path: String,
    cookie_domain: Option<String>,
    cookie_max_age: Option<i64>,
    cookie_secure: bool,
    cookie_http_only: bool,
    default_locale: Option<Locale>,
    default_time_zone: Option<TimeZone>
}

impl CookieLocaleResolver {
    /// Short for CookieLocaleResolverBuilder's `new` function
    pub fn builder() -> CookieLocaleResolverBuilder {
        CookieLocaleResolverBuilder::new()
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Locale of the request, see [resolve_locale_context](CookieLocaleResolver::resolve_locale_context)
    pub fn resolve_locale<S: CookieSource + ?Sized>(&self, request: &S, scope: &mut RequestScope) -> Result<Locale, Error> {
        Ok(self.resolve_locale_context(request, scope)?.locale)
    }

    /// Locale and time zone of the request
    ///
    /// The cookie is parsed at most once per scope. A missing cookie gives the defaults, a malformed one is an error.
    pub fn resolve_locale_context<S: CookieSource + ?Sized>(&self, request: &S, scope: &mut RequestScope) -> Result<ResolvedLocaleContext, Error> {
        if let Some(resolved) = scope.resolved() {
            return Ok(resolved.clone());
        }

        let parsed = match request.cookie(&self.cookie_name) {
            Some(raw) => {
                let parsed = CookieLocaleValue::parse(&raw)?;
                log::trace!(
                    "Parsed cookie value [{}] into locale '{}'{}",
                    raw,
                    parsed.locale.as_ref().map(|l| l.to_string()).unwrap_or_else(|| "-".to_string()),
                    parsed.time_zone.as_ref().map(|tz| format!(" and time zone '{}'", tz.id())).unwrap_or_default()
                );
                parsed
            },
            None => CookieLocaleValue::default()
        };

        let resolved = self.complete(request, parsed);
        scope.store(resolved.clone());
        Ok(resolved)
    }

    /// Stores a new locale context in the cookie, and makes it the one in effect for the rest of the request
    ///
    /// With `None`, the cookie is removed and the defaults apply.
    pub fn set_locale_context<S, K>(&self, request: &S, scope: &mut RequestScope, response: &mut K, context: Option<CookieLocaleValue>) -> Result<(), Error> where
        S: CookieSource + ?Sized,
        K: CookieSink + ?Sized {
        let context = match context {
            Some(context) => {
                self.add_cookie(response, context.to_cookie_value())?;
                context
            },
            None => {
                self.remove_cookie(response)?;
                CookieLocaleValue::default()
            }
        };
        scope.store(self.complete(request, context));
        Ok(())
    }

    /// Same as [set_locale_context](CookieLocaleResolver::set_locale_context), without time zone
    pub fn set_locale<S, K>(&self, request: &S, scope: &mut RequestScope, response: &mut K, locale: Option<Locale>) -> Result<(), Error> where
        S: CookieSource + ?Sized,
        K: CookieSink + ?Sized {
        self.set_locale_context(request, scope, response, locale.map(|locale| CookieLocaleValue::new(Some(locale), None)))
    }

    /// Writes the cookie with the given value, quoted for the Angular client
    pub fn add_cookie<K: CookieSink + ?Sized, A: AsRef<str>>(&self, response: &mut K, value: A) -> Result<(), Error> {
        let mut cookie = self.cookie(quote(value));
        if let Some(max_age) = self.cookie_max_age {
            cookie.set_max_age(Duration::seconds(max_age));
        }
        log::trace!("Added cookie [{}={}]", cookie.name(), cookie.value());
        response.add_cookie(cookie)
    }

    /// Expires the cookie in the client
    pub fn remove_cookie<K: CookieSink + ?Sized>(&self, response: &mut K) -> Result<(), Error> {
        let mut cookie = self.cookie(String::new());
        cookie.set_max_age(Duration::seconds(0));
        log::trace!("Removed cookie [{}]", cookie.name());
        response.add_cookie(cookie)
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), value)
            .path(self.cookie_path.clone())
            .secure(self.cookie_secure)
            .http_only(self.cookie_http_only)
            .finish();
        if let Some(domain) = &self.cookie_domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    fn complete<S: CookieSource + ?Sized>(&self, request: &S, value: CookieLocaleValue) -> ResolvedLocaleContext {
        ResolvedLocaleContext {
            locale: value.locale.unwrap_or_else(|| self.determine_default_locale(request)),
            time_zone: value.time_zone.unwrap_or_else(|| self.determine_default_time_zone())
        }
    }

    fn determine_default_locale<S: CookieSource + ?Sized>(&self, request: &S) -> Locale {
        if let Some(locale) = &self.default_locale {
            return locale.clone();
        }
        request.preferred_languages().into_iter()
            .find_map(|language| Locale::parse(language.replace('-', "_")).ok().flatten())
            .unwrap_or_else(|| Locale::new("en", "", ""))
    }

    fn determine_default_time_zone(&self) -> TimeZone {
        self.default_time_zone.unwrap_or_default()
    }
}
