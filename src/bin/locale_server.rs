//! Demo server for the locale resolver and the authentication responders
//!
//! - `GET /locale` answers the locale context of the request, as json
//! - `GET /locale/change?lang=fr-FR&tz=Europe/Paris` stores a new context in the cookie (`lang=-` keeps the default locale, no parameter at all removes the cookie)
//! - `GET /authenticate` answers 200 with `Authorization: Bearer demo`, 401 otherwise
//!
//! Listens on `LOCALE_SERVER_ADDRESS`, `127.0.0.1:8000` by default.
use web_helpers::{
    CookieLocaleResolver, CookieLocaleResolverBuilder, CookieLocaleValue, Error, Locale, RequestScope, SimpleLogger, TimeZone,
    http::{Request, Response, ResponseStream},
    security::{AuthenticationEvent, AuthenticationEventResponder, ResponseWriter}
};
use tokio::{io::AsyncReadExt, net::TcpStream, net::TcpListener, sync::watch};
use log::{info, error, debug};
use std::sync::Arc;

const MAX_HEADER_SIZE: usize = 16_384;
const READ_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Error> {
    SimpleLogger::from_env().init().map_err(|e| Error::custom(format!("{}", e)))?;

    let resolver = Arc::new(CookieLocaleResolverBuilder::from_env()?.build());
    let responder = Arc::new(AuthenticationEventResponder::new());

    let address = std::env::var("LOCALE_SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let listener = TcpListener::bind(&address).await.map_err(Error::Io)?;
    info!("Listening on {}", address);

    // ctrlc requires a sync callback, a watch channel can be written from there
    let (tx, mut rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        if tx.send(true).is_err() {
            error!("could not complete shut down request");
        }
    }).map_err(|e| Error::custom(format!("{}", e)))?;

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    debug!("connection from {}", addr);
                    let (resolver, responder) = (resolver.clone(), responder.clone());
                    tokio::spawn(async move {
                        if let Err(e) = serve(stream, resolver, responder).await {
                            error!("{}", e);
                        }
                    });
                },
                Err(e) => error!("{}", e)
            },
            _ = rx.changed() => {
                info!("Shut down requested");
                break Ok(());
            }
        }
    }
}

async fn serve(mut stream: TcpStream, resolver: Arc<CookieLocaleResolver>, responder: Arc<AuthenticationEventResponder>) -> Result<(), Error> {
    let raw = match tokio::time::timeout(READ_TIMEOUT, read_header(&mut stream)).await {
        Ok(raw) => raw?,
        Err(_) => return Err(Error::custom("timeout reached while reading the request"))
    };
    let stream = stream.into_std().map_err(Error::Io)?;
    stream.set_nonblocking(false).map_err(Error::Io)?;

    // Everything past this point is synchronous
    tokio::task::spawn_blocking(move || {
        let mut response = ResponseStream::new(stream);
        if let Err(e) = Request::parse(raw).and_then(|request| route(&request, &resolver, &responder, &mut response)) {
            debug!("request failed: {}", e);
            if response.pending().is_committed() {
                return Err(e);
            }
            *response.pending() = e.as_response();
        }
        response.finish().map(|_| ())
    }).await.map_err(|e| Error::custom(format!("{}", e)))?
}

async fn read_header(stream: &mut TcpStream) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1_024];
    loop {
        let n = stream.read(&mut chunk).await.map_err(Error::Io)?;
        if n == 0 {
            return Err(Error::Parse("connection closed before the end of the header".into()));
        }
        buffer.extend_from_slice(&chunk[..n]);
        if buffer.windows(4).any(|window| window == b"\r\n\r\n") {
            return Ok(buffer);
        }
        if buffer.len() > MAX_HEADER_SIZE {
            return Err(Error::Parse("header too large".into()));
        }
    }
}

fn route(request: &Request, resolver: &CookieLocaleResolver, responder: &AuthenticationEventResponder, response: &mut ResponseStream<std::net::TcpStream>) -> Result<(), Error> {
    let mut scope = RequestScope::new();
    match request.url().path() {
        "/locale" => {
            let context = resolver.resolve_locale_context(request, &mut scope)?;
            json(response.pending(), &context)
        },
        "/locale/change" => {
            let mut lang = None;
            let mut tz = None;
            for (key, value) in request.url().query_pairs() {
                match key.as_ref() {
                    "lang" => lang = Some(value.into_owned()),
                    "tz" => tz = Some(value.into_owned()),
                    _ => ()
                }
            }
            let context = if lang.is_none() && tz.is_none() {
                None
            } else {
                let locale = match lang.as_deref() {
                    None | Some("-") => None,
                    Some(lang) => Some(lang.replace('-', "_").parse::<Locale>()?)
                };
                let time_zone = tz.map(TimeZone::parse).transpose()?;
                Some(CookieLocaleValue::new(locale, time_zone))
            };
            resolver.set_locale_context(request, &mut scope, response, context)?;
            let resolved = resolver.resolve_locale_context(request, &mut scope)?;
            json(response.pending(), &resolved)
        },
        "/authenticate" => {
            let token = request.header_values("Authorization").into_iter().next().map(|v| v.to_string());
            match token.as_deref() {
                Some("Bearer demo") => responder.respond(response, AuthenticationEvent::Success(&"demo".to_string())),
                _ => {
                    let cause = Error::custom("missing or invalid bearer token");
                    responder.respond(response, AuthenticationEvent::Failure(&cause))
                }
            }
        },
        _ => {
            *response.pending() = Response::not_found();
            Ok(())
        }
    }
}

fn json<T: serde::Serialize>(response: &mut Response, content: &T) -> Result<(), Error> {
    let body = serde_json::to_string(content).map_err(|e| Error::custom(format!("{}", e)))?;
    response.set_status(200)?;
    response.append_header("Content-Type", "application/json");
    response.content = body.into_bytes();
    Ok(())
}
