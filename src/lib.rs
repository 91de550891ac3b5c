//! # Web helpers
//!
//! Small pieces for http services that serve an Angular front end:
//!
//! - a [CookieLocaleResolver] that understands the quoted `NG_TRANSLATE_LANG_KEY` cookie, locale and optional time zone included,
//! - ajax friendly authentication callbacks in [security], that answer with a status code instead of a redirect.
//!
//! ```rust
//! use web_helpers::{CookieLocaleResolver, Locale, TimeZone, RequestScope, http::Request};
//!
//! let resolver = CookieLocaleResolver::builder()
//!     .default_locale(Locale::new("en", "GB", ""))
//!     .default_time_zone(TimeZone::parse("Europe/London").unwrap())
//!     .build();
//!
//! let request = Request::new("GET", "http://localhost/").unwrap()
//!     .header("Cookie", "NG_TRANSLATE_LANG_KEY=%22fr-FR GMT%22");
//! let context = resolver.resolve_locale_context(&request, &mut RequestScope::new()).unwrap();
//! assert_eq!(context.locale.to_string(), "fr_FR");
//! assert_eq!(context.time_zone.id(), "GMT");
//! ```
pub use self::error::Error;
mod error;

pub use self::locale::Locale;
mod locale;

pub use self::time_zone::TimeZone;
mod time_zone;

pub use self::locale_resolver::{
    CookieLocaleResolver,
    CookieLocaleResolverBuilder,
    CookieLocaleValue,
    ResolvedLocaleContext,
    RequestScope,
    CookieSource,
    CookieSink
};
pub mod locale_resolver;

pub mod security;

pub mod http;

pub use self::logger::SimpleLogger;
mod logger;
