use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub enum LogTarget {
    Stdout,
    Stderr,
    File(String),
}

enum Output {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

pub struct Logger {
    prefix: Option<String>,
    output: Output,
}

impl Logger {
    fn new(prefix: Option<String>, output: Output) -> Self {
        Self { prefix, output }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let formatted = if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        };

        match &self.output {
            Output::Stdout => println!("{}", formatted),
            Output::Stderr => eprintln!("{}", formatted),
            Output::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", formatted);
                }
            }
        }
    }
}

pub fn init_logger(prefix: Option<String>, target: LogTarget) -> Result<(), String> {
    let output = match target {
        LogTarget::Stdout => Output::Stdout,
        LogTarget::Stderr => Output::Stderr,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("Failed to open log file {}: {}", path, e))?;
            Output::File(Mutex::new(file))
        }
    };
    LOGGER.get_or_init(|| Logger::new(prefix, output));
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
