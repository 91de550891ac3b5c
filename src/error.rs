use crate::http::Response;

/// Errors returned by this library
#[derive(Debug)]
pub enum Error {
    /// Standard io error
    Io(std::io::Error),
    /// Could not parse properly the http request, malformed
    Parse(String),
    /// Error from url parsing
    Url(url::ParseError),
    /// The locale part of a cookie could not be turned into a locale
    MalformedLocale(String),
    /// The time zone part of a cookie is not a known time zone
    MalformedTimeZone(String),
    /// The response could not be written (already committed, closed stream, ...)
    ResponseWrite(std::io::Error),
    /// Custom error, try to avoid its use
    Custom(String)
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    detail: String
}

impl Error {
    /// Creates a custom error with a custom message
    pub fn custom<A: Into<String>>(message: A) -> Error {
        Error::Custom(message.into())
    }

    /// Builds the response that a host server should send back when this error reaches it
    pub fn as_response(&self) -> Response {
        let mut base_response = match self {
            Error::Parse(_) | Error::Url(_) => Response::bad_request(),
            _ => Response::internal_server_error()
        };

        let content = match serde_json::to_string(&ErrorResponse{detail: format!("{}", self)}) {
            Ok(v) => v,
            Err(_) => {
                base_response = Response::internal_server_error();
                format!("{{\"detail\": \"serialization\"}}")
            }
        };

        base_response.header("Content-Type", "application/json").body(content)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let content = match self {
            Error::Io(inner_error) => format!("io error: {}", inner_error),
            Error::Parse(detail) => format!("parse error: {}", detail),
            Error::Url(detail) => format!("url parse error: {}", detail),
            Error::MalformedLocale(detail) => format!("malformed locale: {}", detail),
            Error::MalformedTimeZone(detail) => format!("malformed time zone: {}", detail),
            Error::ResponseWrite(inner_error) => format!("could not write response: {}", inner_error),
            Error::Custom(e) => format!("{}", e)
        };
        write!(formatter, "{}", content)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) | Error::ResponseWrite(e) => Some(e),
            Error::Url(e) => Some(e),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn malformed_locale_is_a_server_error() {
        let response = Error::MalformedLocale("Locale part \"f%r\" contains invalid characters".into()).as_response();
        assert_eq!(response.status_code(), 500);
        let body = String::from_utf8(response.content.clone()).unwrap();
        assert!(body.starts_with("{\"detail\":\"malformed locale:"));
    }

    #[test]
    fn parse_errors_are_bad_requests() {
        let response = Error::Parse("no end of header was found".into()).as_response();
        assert_eq!(response.status_code(), 400);
    }
}
