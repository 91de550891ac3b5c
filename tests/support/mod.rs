//! Records the log events emitted by the crate, per test thread
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

#[derive(Clone, Debug)]
pub struct Event {
    pub level: Level,
    pub message: String
}

static INIT: Once = Once::new();

thread_local! {
    static CAPTURED: RefCell<Option<(LevelFilter, Vec<Event>)>> = RefCell::new(None);
}

struct Recorder;

impl Log for Recorder {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("web_helpers")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        CAPTURED.with(|captured| {
            if let Some((level, events)) = captured.borrow_mut().as_mut() {
                if record.level() <= *level {
                    events.push(Event {
                        level: record.level(),
                        message: format!("{}", record.args())
                    });
                }
            }
        });
    }

    fn flush(&self) {}
}

/// Starts recording, in the current thread, every event at `level` or more severe
pub fn capture(level: LevelFilter) {
    INIT.call_once(|| {
        log::set_boxed_logger(Box::new(Recorder)).expect("no other logger in tests");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| *captured.borrow_mut() = Some((level, Vec::new())));
}

/// Events recorded since the last call to `capture`
pub fn play() -> Vec<Event> {
    CAPTURED.with(|captured| captured.borrow().as_ref().map(|(_, events)| events.clone()).unwrap_or_default())
}
