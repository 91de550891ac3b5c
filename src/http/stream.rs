use std::io::Write;
use bytes::Buf;
use cookie::Cookie;
use crate::{Error, CookieSink, http::Response, security::ResponseWriter};

const RESPONSE_CHUNK_SIZE: usize = 4_096;

/// Response bound to an output stream
///
/// Status and cookies are buffered in a pending [Response] until an error is reported through [send_error](ResponseWriter::send_error) or the stream is [finished](ResponseStream::finish). Any failure of the underlying writer surfaces as [Error::ResponseWrite].
pub struct ResponseStream<W: Write> {
    inner: W,
    pending: Response
}

impl<W: Write> ResponseStream<W> {
    pub fn new(inner: W) -> ResponseStream<W> {
        ResponseStream {
            inner,
            pending: Response::new()
        }
    }

    /// Access to the response that is still to be written
    pub fn pending(&mut self) -> &mut Response {
        &mut self.pending
    }

    /// Writes the pending response, unless it was already sent
    pub fn finish(mut self) -> Result<W, Error> {
        if !self.pending.committed {
            self.write_pending()?;
        }
        Ok(self.inner)
    }

    fn write_pending(&mut self) -> Result<(), Error> {
        let serialized_response = self.pending.serialize();
        self.pending.committed = true;
        #[cfg(feature = "full_log")]
        log::trace!("writting {} bytes in chunks of maximum {} bytes each", serialized_response.len(), RESPONSE_CHUNK_SIZE);
        for chunk in serialized_response.chunks(RESPONSE_CHUNK_SIZE) {
            let mut current_chunk = chunk;
            while current_chunk.has_remaining() {
                match self.inner.write(current_chunk) {
                    Ok(0) => return Err(Error::ResponseWrite(std::io::Error::new(std::io::ErrorKind::WriteZero, "stream closed while writing response"))),
                    Ok(n) => current_chunk.advance(n),
                    Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(Error::ResponseWrite(e))
                }
            }
        }
        self.inner.flush().map_err(Error::ResponseWrite)
    }
}

impl<W: Write> ResponseWriter for ResponseStream<W> {
    fn set_status(&mut self, code: u32) -> Result<(), Error> {
        self.pending.set_status(code)
    }

    fn send_error(&mut self, code: u32, message: &str) -> Result<(), Error> {
        self.pending.send_error(code, message)?;
        self.write_pending()
    }
}

impl<W: Write> CookieSink for ResponseStream<W> {
    fn add_cookie(&mut self, cookie: Cookie<'static>) -> Result<(), Error> {
        self.pending.add_cookie(cookie)
    }
}
