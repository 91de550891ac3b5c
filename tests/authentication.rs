use web_helpers::{
    Error,
    http::{Response, ResponseStream},
    security::{
        AuthenticationEvent, AuthenticationEventResponder, AuthenticationFailureHandler, AuthenticationSuccessHandler,
        ResponseWriter, StatusSuccessHandler, UnauthorizedFailureHandler, UNAUTHORIZED_MESSAGE
    }
};
use log::LevelFilter;

mod support;

/// Writer that remembers every call made to it, and can be told to fail
#[derive(Default)]
struct SpyWriter {
    statuses: Vec<u32>,
    errors: Vec<(u32, String)>,
    fail_with: Option<std::io::ErrorKind>
}

impl ResponseWriter for SpyWriter {
    fn set_status(&mut self, code: u32) -> Result<(), Error> {
        self.statuses.push(code);
        Ok(())
    }

    fn send_error(&mut self, code: u32, message: &str) -> Result<(), Error> {
        if let Some(kind) = self.fail_with {
            return Err(Error::ResponseWrite(std::io::Error::new(kind, "Eek")));
        }
        self.errors.push((code, message.to_string()));
        Ok(())
    }
}

fn cause() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "bad credentials")
}

#[test]
fn on_authentication_success() {
    let mut response = SpyWriter::default();

    StatusSuccessHandler.on_authentication_success(&mut response, &()).unwrap();

    assert_eq!(response.statuses, vec![200]);
    assert!(response.errors.is_empty());
}

#[test]
fn on_authentication_failure() {
    let mut response = SpyWriter::default();

    UnauthorizedFailureHandler.on_authentication_failure(&mut response, &cause()).unwrap();

    assert!(response.statuses.is_empty());
    assert_eq!(response.errors, vec![(401, UNAUTHORIZED_MESSAGE.to_string())]);
}

#[test]
fn on_authentication_failure_with_exception() {
    let mut response = SpyWriter {
        fail_with: Some(std::io::ErrorKind::BrokenPipe),
        ..SpyWriter::default()
    };

    let caught = UnauthorizedFailureHandler.on_authentication_failure(&mut response, &cause());

    match caught {
        Err(Error::ResponseWrite(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe);
            assert_eq!(e.to_string(), "Eek");
        },
        other => panic!("unexpected result {:?}", other)
    }
}

#[test]
fn unauthorized_message() {
    assert_eq!(
        UNAUTHORIZED_MESSAGE,
        "Unauthorized: the requested resource requires an authentication that was not correctly supplied."
    );
}

#[test]
fn responder_dispatches_events() {
    let responder = AuthenticationEventResponder::new();

    let mut success = Response::new();
    responder.respond(&mut success, AuthenticationEvent::Success(&"admin")).unwrap();
    assert_eq!(success.status_code(), 200);
    assert!(success.content.is_empty());
    assert!(!success.is_committed());

    let mut failure = Response::new();
    let cause = cause();
    responder.respond(&mut failure, AuthenticationEvent::Failure(&cause)).unwrap();
    assert_eq!(failure.status_code(), 401);
    assert_eq!(failure.content, UNAUTHORIZED_MESSAGE.as_bytes().to_vec());
    assert!(failure.is_committed());
}

#[test]
fn failure_on_committed_response_propagates() {
    let responder = AuthenticationEventResponder::new();
    let mut response = Response::new();
    responder.on_failure(&mut response, &cause()).unwrap();

    assert!(matches!(responder.on_failure(&mut response, &cause()), Err(Error::ResponseWrite(_))));
    assert!(matches!(responder.on_success(&mut response, &()), Err(Error::ResponseWrite(_))));
}

#[test]
fn failure_is_written_to_the_stream() {
    let responder = AuthenticationEventResponder::new();
    let mut stream = ResponseStream::new(Vec::new());

    responder.on_failure(&mut stream, &cause()).unwrap();

    let written = String::from_utf8(stream.finish().unwrap()).unwrap();
    assert!(written.starts_with("HTTP/1.1 401 Unauthorized\r\n"));
    assert!(written.ends_with(UNAUTHORIZED_MESSAGE));
}

#[test]
fn failure_cause_is_not_logged() {
    support::capture(LevelFilter::Trace);
    let responder = AuthenticationEventResponder::new();

    responder.on_failure(&mut SpyWriter::default(), &cause()).unwrap();

    assert!(support::play().iter().all(|event| !event.message.contains("bad credentials")));
}

struct TeapotHandler;

impl AuthenticationSuccessHandler for TeapotHandler {
    fn on_authentication_success(&self, response: &mut dyn ResponseWriter, _authentication: &dyn std::any::Any) -> Result<(), Error> {
        response.set_status(418)
    }
}

#[test]
fn custom_success_handler() {
    let responder = AuthenticationEventResponder::new().success_handler(TeapotHandler);
    let mut response = SpyWriter::default();

    responder.on_success(&mut response, &()).unwrap();

    assert_eq!(response.statuses, vec![418]);
}
