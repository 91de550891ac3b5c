use crate::Error;
use chrono::FixedOffset;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CUSTOM_OFFSET: Regex = Regex::new(r"^GMT([+-])(\d{1,2})(?::?(\d{2}))?$").unwrap();
}

/// Time zone carried by a locale cookie
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeZone {
    /// Zone from the tz database, like `Europe/Paris` or `GMT`
    Named(Tz),
    /// Custom offset from GMT, written `GMT+01:00`
    Offset(FixedOffset)
}

impl TimeZone {
    /// Parses a time zone identifier
    ///
    /// Custom offsets are accepted in the `GMT+h`, `GMT+hh`, `GMT+hhmm` and `GMT+hh:mm` forms, with hours up to 23.
    pub fn parse<A: AsRef<str>>(source: A) -> Result<TimeZone, Error> {
        let source = source.as_ref();
        if let Some(captures) = CUSTOM_OFFSET.captures(source) {
            let hours: i32 = captures[2].parse().map_err(|e| Error::MalformedTimeZone(format!("{}: {}", source, e)))?;
            let minutes: i32 = match captures.get(3) {
                Some(m) => m.as_str().parse().map_err(|e| Error::MalformedTimeZone(format!("{}: {}", source, e)))?,
                None => 0
            };
            if hours > 23 || minutes > 59 {
                return Err(Error::MalformedTimeZone(format!("{}: offset out of range", source)));
            }
            let seconds = (hours * 60 + minutes) * 60;
            let seconds = if &captures[1] == "-" { -seconds } else { seconds };
            return FixedOffset::east_opt(seconds)
                .map(TimeZone::Offset)
                .ok_or_else(|| Error::MalformedTimeZone(format!("{}: offset out of range", source)));
        }

        source.parse::<Tz>()
            .map(TimeZone::Named)
            .map_err(|_| Error::MalformedTimeZone(format!("\"{}\" is not a known time zone", source)))
    }

    /// Canonical identifier of the zone, the value written back into cookies
    pub fn id(&self) -> String {
        match self {
            TimeZone::Named(tz) => tz.name().to_string(),
            TimeZone::Offset(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.abs() / 60;
                format!("GMT{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
            }
        }
    }
}

impl Default for TimeZone {
    fn default() -> TimeZone {
        TimeZone::Named(Tz::UTC)
    }
}

impl std::fmt::Display for TimeZone {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{}", self.id())
    }
}

impl std::str::FromStr for TimeZone {
    type Err = Error;

    fn from_str(source: &str) -> Result<TimeZone, Error> {
        TimeZone::parse(source)
    }
}

impl serde::Serialize for TimeZone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::TimeZone;
    use chrono_tz::Tz;

    #[test]
    fn named_zones() {
        assert_eq!(TimeZone::parse("GMT").unwrap(), TimeZone::Named(Tz::GMT));
        assert_eq!(TimeZone::parse("Europe/Paris").unwrap().id(), "Europe/Paris");
    }

    #[test]
    fn custom_offsets_are_normalized() {
        assert_eq!(TimeZone::parse("GMT+1").unwrap().id(), "GMT+01:00");
        assert_eq!(TimeZone::parse("GMT-0530").unwrap().id(), "GMT-05:30");
        assert_eq!(TimeZone::parse("GMT+01:00").unwrap(), TimeZone::parse("GMT+1").unwrap());
    }

    #[test]
    fn out_of_range_offset() {
        assert!(TimeZone::parse("GMT+24:00").is_err());
        assert!(TimeZone::parse("GMT+01:75").is_err());
    }

    #[test]
    fn unknown_zone() {
        assert!(TimeZone::parse("Mars/Olympus_Mons").is_err());
        assert!(TimeZone::parse("").is_err());
    }
}
