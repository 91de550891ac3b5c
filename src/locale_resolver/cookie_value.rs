use crate::{Error, Locale, TimeZone, locale_resolver::ResolvedLocaleContext};

/// Marker that the Angular translate module puts around every cookie it writes
pub const QUOTE: &str = "%22";

/// Locale that stands for "no locale, use the default one"
const NO_LOCALE: &str = "-";

/// Wraps a value in the quote marker, so the Angular client can read back its own format
pub fn quote<A: AsRef<str>>(value: A) -> String {
    format!("{}{}{}", QUOTE, value.as_ref(), QUOTE)
}

/// Removes every quote marker in the value, wherever it is placed
pub fn unquote<A: AsRef<str>>(value: A) -> String {
    value.as_ref().replace(QUOTE, "")
}

/// Content of a locale cookie, either half may be missing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CookieLocaleValue {
    pub locale: Option<Locale>,
    pub time_zone: Option<TimeZone>
}

impl CookieLocaleValue {
    pub fn new(locale: Option<Locale>, time_zone: Option<TimeZone>) -> CookieLocaleValue {
        CookieLocaleValue {
            locale,
            time_zone
        }
    }

    /// Parses a raw cookie value, quoted or not
    ///
    /// The format is `<locale>[ <time zone>]`, where the locale is written with hyphens or underscores (`en-GB`, `en_GB`) or is a single `-` to leave it unset. A malformed locale or an unknown time zone is an error, there is no fallback for present but broken input.
    pub fn parse<A: AsRef<str>>(raw: A) -> Result<CookieLocaleValue, Error> {
        let value = unquote(raw);

        let (locale_part, time_zone_part) = match value.find(' ') {
            Some(idx) => (&value[..idx], Some(&value[idx + 1..])),
            None => (&value[..], None)
        };

        let locale = if locale_part == NO_LOCALE {
            None
        } else {
            Locale::parse(locale_part.replace('-', "_"))?
        };

        let time_zone = match time_zone_part {
            Some(part) if !part.is_empty() => Some(TimeZone::parse(part)?),
            _ => None
        };

        Ok(CookieLocaleValue {
            locale,
            time_zone
        })
    }

    /// Fills the missing halves with the given defaults
    pub fn resolve(self, default_locale: &Locale, default_time_zone: &TimeZone) -> ResolvedLocaleContext {
        ResolvedLocaleContext {
            locale: self.locale.unwrap_or_else(|| default_locale.clone()),
            time_zone: self.time_zone.unwrap_or(*default_time_zone)
        }
    }

    /// Unquoted cookie representation, `fr-FR GMT`, `- Europe/Paris` or simply `fr-FR`
    ///
    /// The locale is written as a language tag. A variant without a country does not survive reading it back: `fr-POSIX` is parsed as language `fr` and country `POSIX`.
    pub fn to_cookie_value(&self) -> String {
        let mut value = match &self.locale {
            Some(locale) => locale.to_language_tag(),
            None => NO_LOCALE.to_string()
        };
        if let Some(time_zone) = &self.time_zone {
            value.push(' ');
            value += &time_zone.id();
        }
        value
    }
}

/// Parses a raw cookie value and completes it with the defaults
pub fn parse<A: AsRef<str>>(raw: A, default_locale: &Locale, default_time_zone: &TimeZone) -> Result<ResolvedLocaleContext, Error> {
    Ok(CookieLocaleValue::parse(raw)?.resolve(default_locale, default_time_zone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn defaults() -> (Locale, TimeZone) {
        (Locale::new("en", "GB", ""), TimeZone::parse("GMT+01:00").unwrap())
    }

    #[test]
    fn locale_only() {
        let (locale, time_zone) = defaults();
        let resolved = parse("fr_FR", &locale, &time_zone).unwrap();
        assert_eq!(resolved.locale, Locale::new("fr", "FR", ""));
        assert_eq!(resolved.time_zone, time_zone);
    }

    #[test]
    fn hyphenated_locale() {
        let parsed = CookieLocaleValue::parse("en-GB").unwrap();
        assert_eq!(parsed.locale, Some(Locale::new("en", "GB", "")));
        assert_eq!(parsed.time_zone, None);
    }

    #[test]
    fn quoted_locale_and_time_zone() {
        let (locale, time_zone) = defaults();
        let resolved = parse("%22fr_FR GMT%22", &locale, &time_zone).unwrap();
        assert_eq!(resolved.locale, Locale::new("fr", "FR", ""));
        assert_eq!(resolved.time_zone, TimeZone::Named(Tz::GMT));
    }

    #[test]
    fn dash_keeps_default_locale() {
        let (locale, time_zone) = defaults();
        assert_eq!(parse("-", &locale, &time_zone).unwrap(), ResolvedLocaleContext{locale: locale.clone(), time_zone});
        let resolved = parse("- GMT", &locale, &time_zone).unwrap();
        assert_eq!(resolved.locale, locale);
        assert_eq!(resolved.time_zone, TimeZone::Named(Tz::GMT));
    }

    #[test]
    fn trailing_space_has_no_time_zone() {
        assert_eq!(CookieLocaleValue::parse("de ").unwrap().time_zone, None);
    }

    #[test]
    fn quote_marker_is_stripped_anywhere() {
        assert_eq!(unquote("%22fr%22_FR%22"), "fr_FR");
        assert_eq!(CookieLocaleValue::parse("fr%22_FR").unwrap().locale, Some(Locale::new("fr", "FR", "")));
    }

    #[test]
    fn quoting_is_transparent() {
        let (locale, time_zone) = defaults();
        for value in ["fr_FR", "- GMT", "en-GB Europe/London", "-", "de GMT+02:00"] {
            assert_eq!(
                parse(quote(value), &locale, &time_zone).unwrap(),
                parse(value, &locale, &time_zone).unwrap()
            );
        }
    }

    #[test]
    fn malformed_locale_is_an_error() {
        match CookieLocaleValue::parse("\"fr\"") {
            Err(Error::MalformedLocale(_)) => (),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn unknown_time_zone_is_an_error() {
        match CookieLocaleValue::parse("fr Nowhere/Atlantis") {
            Err(Error::MalformedTimeZone(_)) => (),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn cookie_value_reads_back() {
        let value = CookieLocaleValue::new(Some(Locale::new("pt", "BR", "")), Some(TimeZone::parse("America/Sao_Paulo").unwrap()));
        assert_eq!(value.to_cookie_value(), "pt-BR America/Sao_Paulo");
        assert_eq!(CookieLocaleValue::parse(quote(value.to_cookie_value())).unwrap(), value);
        assert_eq!(CookieLocaleValue::new(None, None).to_cookie_value(), "-");
    }

    #[test]
    fn variant_without_country_reads_back_as_country() {
        let value = CookieLocaleValue::new(Some(Locale::new("fr", "", "POSIX")), None);
        assert_eq!(value.to_cookie_value(), "fr-POSIX");
        assert_eq!(CookieLocaleValue::parse(value.to_cookie_value()).unwrap().locale, Some(Locale::new("fr", "POSIX", "")));
    }
}
