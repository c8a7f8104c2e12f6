use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to set logger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// How many identical entries in a row get written before the rest of the run
/// is folded into a single "repeated" summary line.
const REPEAT_LIMIT: u32 = 3;

#[derive(Debug)]
struct Sink {
    file: Option<File>,
    last_line: Option<String>,
    repeats: u32,
}

impl Sink {
    fn write(&mut self, line: &str) {
        println!("{line}");
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{line}") {
                eprintln!("Failed to write log entry: {e}");
            }
        }
    }

    fn flush_repeats(&mut self) {
        if self.repeats > REPEAT_LIMIT {
            let folded = self.repeats - REPEAT_LIMIT;
            self.write(&format!("(last message repeated {folded} more times)"));
        }
        self.repeats = 0;
    }
}

/// Logs to stdout and optionally a file, timestamped, folding runs of
/// identical entries so a failing background persist can't flood the log.
/// Gateway internals below our own crate's level are dropped by target.
pub struct BotLogger {
    sink: Mutex<Sink>,
}

impl BotLogger {
    pub fn new(log_file: Option<&str>) -> Result<BotLogger, std::io::Error> {
        let file = match log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };

        Ok(BotLogger {
            sink: Mutex::new(Sink {
                file,
                last_line: None,
                repeats: 0,
            }),
        })
    }

    pub fn init(log_file: Option<&str>) -> Result<(), LoggerError> {
        let logger = BotLogger::new(log_file)?;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(LevelFilter::Info);
        Ok(())
    }
}

impl Log for BotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > Level::Info {
            return false;
        }
        // Gateway and websocket internals are only interesting at warn+.
        let noisy = metadata.target().starts_with("serenity")
            || metadata.target().starts_with("tungstenite");
        !(noisy && metadata.level() > Level::Warn)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        );
        // The timestamp would defeat the duplicate check, so compare without it.
        let body = format!("[{}] {}", record.level(), record.args());

        let mut sink = self.sink.lock().expect("logger mutex poisoned");

        if sink.last_line.as_deref() == Some(&body) {
            sink.repeats = sink.repeats.saturating_add(1);
            if sink.repeats <= REPEAT_LIMIT {
                sink.write(&line);
            }
            return;
        }

        sink.flush_repeats();
        sink.write(&line);
        sink.last_line = Some(body);
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.flush_repeats();
            if let Some(file) = sink.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}
