//! Logger for tests. Logs to stdout, which the test harness captures.
use std::io::{self, Write};

use chrono::prelude::*;
use colored::*;
use log::{Level, Log, Metadata, Record};

struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().green(),
            Level::Debug => record.level().to_string().white(),
            Level::Trace => record.level().to_string().white().dimmed(),
        };
        // Use `println!` so that the test harness captures the output.
        println!(
            "test> {} {:<5} {} {}",
            Local::now()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .white(),
            level,
            record.target().bold(),
            record.args()
        );
    }

    fn flush(&self) {
        io::stdout().flush().ok();
    }
}

/// Initialize the test logger. Safe to call more than once.
pub fn init(level: Level) {
    let logger = Logger { level };

    log::set_boxed_logger(Box::new(logger)).ok();
    log::set_max_level(level.to_level_filter());
}
