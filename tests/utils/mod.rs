use log::kv::Key;
use log::{set_max_level, Level, Log, Metadata, Record};
use rand::distr::{Alphanumeric, SampleString};
use std::cell::RefCell;

use devcycle::{Client, ClientBuilder};

pub fn rand_sdk_key() -> String {
    format!("dvc_server_{}", rand_str(24))
}

pub fn rand_user_id() -> String {
    format!("user-{}", rand_str(8))
}

pub fn builder_for(url: &str, sdk_key: &str) -> ClientBuilder {
    Client::builder(sdk_key).bucketing_api_uri(url)
}

fn rand_str(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), len)
}

pub struct RecordingLogger {}

impl RecordingLogger {
    thread_local!(pub static LOGS: RefCell<String> = RefCell::new(String::default()));

    pub fn take() -> String {
        Self::LOGS.with_borrow_mut(std::mem::take)
    }
}

impl Log for RecordingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("devcycle")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        let event_id = record
            .key_values()
            .get(Key::from("event_id"))
            .and_then(|id| id.to_i64())
            .unwrap_or(0);
        Self::LOGS.with_borrow_mut(|l| {
            l.push_str(format!("{level} [{event_id}] {}\n", record.args()).as_str())
        });
    }

    fn flush(&self) {}
}

pub fn log_record_init() {
    set_max_level(log::LevelFilter::Info);
    _ = log::set_logger(&RecordingLogger {});
}
