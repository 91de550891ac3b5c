use std::collections::HashMap;
use crate::{Error, CookieSink, security::ResponseWriter};
use cookie::Cookie;

/// Contains the data of an http response
#[derive(Debug)]
pub struct Response {
    protocol: String,
    pub(crate) status: (u32, String),
    pub(crate) headers: HashMap<String, Vec<String>>,
    pub content: Vec<u8>,
    /// Set once the response has been sent, or an error has been reported through it
    pub(crate) committed: bool
}

impl<A: Into<String>> From<(u32, A)> for Response {
    fn from(source: (u32, A)) -> Response {
        Response {
            protocol: "HTTP/1.1".into(),
            status: (source.0, source.1.into()),
            headers: HashMap::new(),
            content: Vec::new(),
            committed: false
        }
    }
}

impl Response {
    const OK: (u32, &'static str) = (200, "OK");
    const BAD_REQUEST: (u32, &'static str) = (400, "Bad Request");
    const UNAUTHORIZED: (u32, &'static str) = (401, "Unauthorized");
    const FORBIDDEN: (u32, &'static str) = (403, "Forbidden");
    const NOT_FOUND: (u32, &'static str) = (404, "Not Found");
    const INTERNAL_SERVER_ERROR: (u32, &'static str) = (500, "Internal Server Error");

    /// Creates an Ok response, with a 200 status code
    pub fn ok() -> Response { Response::OK.into() }
    /// Creates a Bad Request response, with a 400 status code
    pub fn bad_request() -> Response { Response::BAD_REQUEST.into() }
    /// Creates an Unauthorized response, with a 401 status code
    pub fn unauthorized() -> Response { Response::UNAUTHORIZED.into() }
    /// Creates a Forbidden response, with a 403 status code
    pub fn forbidden() -> Response { Response::FORBIDDEN.into() }
    /// Creates a Not Found response, with a 404 status code
    pub fn not_found() -> Response { Response::NOT_FOUND.into() }
    /// Creates an Internal Server Error response, with a 500 status code
    pub fn internal_server_error() -> Response { Response::INTERNAL_SERVER_ERROR.into() }

    /// Creates a new response, with default response status 200
    pub fn new() -> Response {
        Response::OK.into()
    }

    /// Reason phrase for the status codes this crate writes
    fn reason_phrase(code: u32) -> &'static str {
        match code {
            200 => Response::OK.1,
            400 => Response::BAD_REQUEST.1,
            401 => Response::UNAUTHORIZED.1,
            403 => Response::FORBIDDEN.1,
            404 => Response::NOT_FOUND.1,
            500 => Response::INTERNAL_SERVER_ERROR.1,
            _ => ""
        }
    }

    /// Inserts a header into the response
    pub fn header<A: Into<String>, B: Into<String>>(mut self, key: A, value: B) -> Response {
        self.append_header(key, value);
        self
    }

    /// Inserts a body in the response
    pub fn body<T: AsRef<[u8]>>(mut self, body: T) -> Response {
        self.content = Vec::from(body.as_ref());
        self
    }

    /// Appends a header value without consuming the response
    pub fn append_header<A: Into<String>, B: Into<String>>(&mut self, key: A, value: B) {
        self.headers.entry(key.into()).or_insert_with(|| Vec::new()).push(value.into());
    }

    /// Returns all the values of a header
    pub fn header_values<A: AsRef<str>>(&self, name: A) -> Vec<&str> {
        self.headers.get(name.as_ref()).map(|values| values.iter().map(|v| v.as_str()).collect()).unwrap_or_default()
    }

    /// Returns the status code contained in the response
    pub fn status_code(&self) -> u32 {
        self.status.0
    }

    /// Indicates if the response can no longer be modified
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Serializes the response to be sent to the client
    pub(crate) fn serialize(&mut self) -> Vec<u8> {
        let mut response = format!("{} {} {}\r\n", self.protocol, self.status.0, self.status.1);

        self.headers.insert("Content-Length".to_string(), vec![format!("{}", self.content.len())]);
        for (header_name, headers) in &self.headers {
            for header in headers {
                response += &format!("{}: {}\r\n", header_name, header);
            }
        }
        #[cfg(feature = "full_log")]
        log::trace!("serializing http response with headers: {}", response);
        response += "\r\n";
        let mut response = response.into_bytes();
        response.extend_from_slice(&self.content);
        response
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.committed {
            Err(Error::ResponseWrite(std::io::Error::new(std::io::ErrorKind::Other, "response already committed")))
        } else {
            Ok(())
        }
    }
}

impl ResponseWriter for Response {
    fn set_status(&mut self, code: u32) -> Result<(), Error> {
        self.ensure_open()?;
        self.status = (code, Response::reason_phrase(code).to_string());
        Ok(())
    }

    fn send_error(&mut self, code: u32, message: &str) -> Result<(), Error> {
        self.ensure_open()?;
        self.status = (code, Response::reason_phrase(code).to_string());
        self.headers.insert("Content-Type".to_string(), vec!["text/plain; charset=utf-8".to_string()]);
        self.content = message.as_bytes().to_vec();
        self.committed = true;
        Ok(())
    }
}

impl CookieSink for Response {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<(), Error> {
        self.ensure_open()?;
        // Display keeps the value as is, the quote marker must reach the client untouched
        self.append_header("Set-Cookie", cookie.to_string());
        Ok(())
    }
}
