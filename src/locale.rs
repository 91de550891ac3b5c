use crate::Error;

/// Language, country and variant triple
///
/// The language is stored lower case and the country upper case, so `fr_fr` and `fr_FR` are the same locale.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: String,
    variant: String
}

impl Locale {
    pub fn new<A: AsRef<str>, B: AsRef<str>, C: Into<String>>(language: A, country: B, variant: C) -> Locale {
        Locale {
            language: language.as_ref().to_lowercase(),
            country: country.as_ref().to_uppercase(),
            variant: variant.into()
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Hyphen separated form, like `fr-FR`, as browsers expect it
    pub fn to_language_tag(&self) -> String {
        [&self.language, &self.country, &self.variant].iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Parses an underscore (or space) separated locale string, like `en_GB`
    ///
    /// An empty string, or one with no language, gives back `None`. Characters other than letters, digits, `-` and `#` make the whole string malformed.
    pub fn parse<A: AsRef<str>>(source: A) -> Result<Option<Locale>, Error> {
        let tokens: Vec<&str> = source.as_ref()
            .split(|c: char| c == '_' || c == ' ')
            .filter(|token| !token.is_empty())
            .collect();

        let language = tokens.get(0).copied().unwrap_or("");
        let mut country = tokens.get(1).copied().unwrap_or("");
        validate_locale_part(language)?;
        validate_locale_part(country)?;

        let mut variant = if tokens.len() > 2 {
            tokens[2..].join("_")
        } else {
            String::new()
        };
        // `#` introduces script extensions, it never names a country
        if variant.is_empty() && country.starts_with('#') {
            variant = country.to_string();
            country = "";
        }

        if language.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Locale::new(language, country, variant)))
        }
    }
}

fn validate_locale_part(part: &str) -> Result<(), Error> {
    if part.chars().all(|c| c == '-' || c == '#' || c.is_alphanumeric()) {
        Ok(())
    } else {
        Err(Error::MalformedLocale(format!("locale part \"{}\" contains invalid characters", part)))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{}", self.language)?;
        if !self.country.is_empty() || !self.variant.is_empty() {
            write!(formatter, "_{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(formatter, "_{}", self.variant)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Locale {
    type Err = Error;

    fn from_str(source: &str) -> Result<Locale, Error> {
        Locale::parse(source)?.ok_or_else(|| Error::MalformedLocale(format!("\"{}\" has no language", source)))
    }
}

impl serde::Serialize for Locale {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
