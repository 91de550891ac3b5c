use std::collections::HashMap;
use crate::Error;
use url::Url;

/// Contains the data from an http request.
#[derive(Clone, Debug)]
pub struct Request {
    /// Method that the request used, as sent by the client
    pub(crate) method: String,
    /// Route that the user requested
    pub(crate) url: Url,
    /// Header map for the request
    pub(crate) headers: HashMap<String, Vec<String>>,
    pub(crate) content: Vec<u8>
}

impl Request {
    /// Creates a request from scratch, without any header
    pub fn new<A: Into<String>, B: AsRef<str>>(method: A, url: B) -> Result<Request, Error> {
        Ok(Request {
            method: method.into(),
            url: Url::parse(url.as_ref()).map_err(Error::Url)?,
            headers: HashMap::new(),
            content: Vec::new()
        })
    }

    /// Sets up a header to the request
    pub fn header<A: Into<String>, B: Into<String>>(mut self, key: A, value: B) -> Self {
        self.headers.entry(key.into()).or_insert_with(|| Vec::new()).push(value.into());
        self
    }

    /// Returns the method of the request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the [Url](https://docs.rs/url/latest/url/struct.Url.html) object for this request
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns all the values of a header, the header name is matched case insensitively
    pub fn header_values<A: AsRef<str>>(&self, name: A) -> Vec<&str> {
        self.headers.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name.as_ref()))
            .flat_map(|(_, values)| values.iter().map(|v| v.as_str()))
            .collect()
    }

    /// Returns the body as bytes of the content
    pub fn body(&self) -> &Vec<u8> {
        &self.content
    }

    /// Language ranges from the `Accept-Language` header, in the order the client sent them
    ///
    /// Quality values are dropped, as well as the `*` wildcard.
    pub fn accepted_languages(&self) -> Vec<String> {
        self.header_values("Accept-Language").into_iter()
            .flat_map(|value| value.split(','))
            .filter_map(|range| range.split(';').next())
            .map(|range| range.trim())
            .filter(|range| !range.is_empty() && *range != "*")
            .map(|range| range.to_string())
            .collect()
    }

    /// Parses a raw http request
    pub fn parse(mut source: Vec<u8>) -> Result<Request, Error> {
        let split_index = source.windows(4).position(|window| window == b"\r\n\r\n")
            .ok_or(Error::Parse(format!("no end of header was found")))?;

        // Whatever follows the empty line is the body
        let content: Vec<_> = source.drain(split_index..).skip(4).collect();
        let header_string = String::from_utf8(source).map_err(|e| Error::Parse(format!("{}", e)))?;

        let mut lines = header_string.split("\r\n");
        let first_line = lines.next().ok_or(Error::Parse("request has no first line".into()))?;
        let tokens = first_line.split(" ").collect::<Vec<_>>();
        let (method, path, version) = if tokens.len() != 3 {
            return Err(Error::Parse("request's first line has incorrect format".into()));
        } else {
            (tokens[0], tokens[1], tokens[2])
        };

        if !version.starts_with("HTTP") {
            return Err(Error::Parse("unsupported protocol".into()))
        }

        let mut headers = HashMap::new();
        for line in lines {
            let idx = line.find(":").ok_or(Error::Parse(format!("corrupted header missing colon")))?;
            let (key, value) = line.split_at(idx);
            let (key, value) = (key.to_string(), value.trim_start_matches(":").trim().to_string());
            headers.entry(key).or_insert_with(|| Vec::new()).push(value);
        }

        let host = headers.get("Host").and_then(|h: &Vec<String>| h.get(0)).map(|v| &v[..]).unwrap_or("missing.host");
        let url = Url::parse(&format!("http://{}{}", host, path)).map_err(Error::Url)?;

        Ok(Request {
            method: method.to_string(),
            url,
            headers,
            content
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Request;

    #[test]
    fn parses_headers_and_body() {
        let raw = b"POST /login?next=%2F HTTP/1.1\r\nHost: localhost:8000\r\nCookie: NG_TRANSLATE_LANG_KEY=%22fr%22\r\n\r\nuser=admin".to_vec();
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.url().path(), "/login");
        assert_eq!(request.header_values("cookie"), vec!["NG_TRANSLATE_LANG_KEY=%22fr%22"]);
        assert_eq!(request.body(), &b"user=admin".to_vec());
    }

    #[test]
    fn missing_header_end_is_rejected() {
        assert!(Request::parse(b"GET / HTTP/1.1\r\nHost: localhost".to_vec()).is_err());
    }

    #[test]
    fn accepted_languages_drop_weights() {
        let request = Request::new("GET", "http://localhost/").unwrap()
            .header("Accept-Language", "fr-CH, fr;q=0.9, *;q=0.5");
        assert_eq!(request.accepted_languages(), vec!["fr-CH".to_string(), "fr".to_string()]);
    }
}
