//! # Application context
//!
//! ## Purpose
//! Holds the process-level data the rest of the crate may need: directories searched
//! for input files, a stack of error messages and a buffered message log. The context
//! is an explicit value created with [`AppContext::new`] and passed where needed; the
//! search directories are set up lazily on first use.
//!
//! ## Search directories
//! - `.` is always searched first
//! - then `$ZEROD_DATA` if the variable is set
//! - then every directory added with [`AppContext::add_directory`]
//!
//! Names containing `/` or `\` are treated as paths and returned unchanged.
//!
//! ## Log buffer
//! Messages written with [`AppContext::write_log`] are accumulated and wrapped once a
//! line grows past 70 characters. Each completed line is forwarded to `log::info!`.
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// environment variable naming an extra data directory
pub const DATA_DIR_VAR: &str = "ZEROD_DATA";
const LINE_WIDTH: usize = 70;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("input file '{name}' not found in directories {searched}")]
    InputFileNotFound { name: String, searched: String },
    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
struct ErrorRecord {
    routine: String,
    message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    input_dirs: Vec<PathBuf>,
    dirs_ready: bool,
    /// used instead of `$ZEROD_DATA` when set
    data_dir: Option<PathBuf>,
    errors: Vec<ErrorRecord>,
    msglog: String,
    line_len: usize,
    /// forward completed log lines to the `log` facade
    pub forward_log: bool,
    pub options: HashMap<String, String>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            forward_log: true,
            ..Default::default()
        }
    }

    /// Context whose data directory is `dir` regardless of the environment.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::new()
        }
    }

    /// Starts a terminal logger, or a file logger when `log_file` is given.
    pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), ContextError> {
        match log_file {
            Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?)?,
            None => TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?,
        }
        Ok(())
    }

    fn ensure_default_dirs(&mut self) {
        if self.dirs_ready {
            return;
        }
        self.dirs_ready = true;
        let mut defaults = vec![PathBuf::from(".")];
        match &self.data_dir {
            Some(dir) => defaults.push(dir.clone()),
            None => {
                if let Ok(dir) = std::env::var(DATA_DIR_VAR) {
                    defaults.push(PathBuf::from(dir));
                }
            }
        }
        defaults.append(&mut self.input_dirs);
        self.input_dirs = defaults;
    }

    pub fn add_directory(&mut self, dir: impl AsRef<Path>) {
        self.ensure_default_dirs();
        let cleaned: String = dir
            .as_ref()
            .to_string_lossy()
            .chars()
            .filter(|c| !c.is_control())
            .collect();
        self.input_dirs.push(PathBuf::from(cleaned.trim()));
    }

    pub fn input_dirs(&mut self) -> &[PathBuf] {
        self.ensure_default_dirs();
        &self.input_dirs
    }

    /// First readable match of `name` in the search directories.
    pub fn find_input_file(&mut self, name: &str) -> Result<PathBuf, ContextError> {
        if name.contains('/') || name.contains('\\') {
            return Ok(PathBuf::from(name));
        }
        self.ensure_default_dirs();
        for dir in &self.input_dirs {
            let candidate = dir.join(name);
            if File::open(&candidate).is_ok() {
                return Ok(candidate);
            }
        }
        let searched = self
            .input_dirs
            .iter()
            .map(|d| format!("'{}'", d.display()))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ContextError::InputFileNotFound {
            name: name.to_string(),
            searched,
        })
    }

    pub fn set_error(&mut self, routine: &str, message: &str) {
        self.errors.push(ErrorRecord {
            routine: routine.to_string(),
            message: message.to_string(),
        });
    }

    pub fn pop_error(&mut self) {
        self.errors.pop();
    }

    pub fn n_errors(&self) -> usize {
        self.errors.len()
    }

    pub fn last_error_message(&self) -> String {
        self.errors
            .last()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "<no error>".to_string())
    }

    /// Writes all stacked errors to `out` and clears the stack.
    pub fn show_errors(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        writeln!(out, "\n************************************************")?;
        writeln!(out, "                 Reactor Error!                 ")?;
        writeln!(out, "************************************************\n")?;
        for e in &self.errors {
            writeln!(out, "Procedure: {}", e.routine)?;
            writeln!(out, "Error:     {}\n", e.message)?;
        }
        self.errors.clear();
        Ok(())
    }

    pub fn write_log(&mut self, msg: &str) {
        if msg.is_empty() {
            return;
        }
        self.msglog.push_str(msg);
        self.line_len += msg.len();
        if msg.ends_with('\n') {
            self.line_len = 0;
        }
        if self.line_len > LINE_WIDTH {
            self.msglog.push('\n');
            self.line_len = 0;
        }
        if self.forward_log {
            while let Some(pos) = self.msglog.find('\n') {
                let line: String = self.msglog.drain(..=pos).collect();
                info!("{}", line.trim_end());
            }
        }
    }

    /// buffered log text not yet forwarded
    pub fn log(&self) -> &str {
        &self.msglog
    }

    pub fn clear_log(&mut self) {
        self.msglog.clear();
        self.line_len = 0;
    }

    /// Forwards whatever remains in the log buffer and resets the context.
    pub fn teardown(&mut self) {
        if self.forward_log && !self.msglog.is_empty() {
            info!("{}", self.msglog.trim_end());
        }
        *self = Self {
            forward_log: self.forward_log,
            data_dir: self.data_dir.take(),
            ..Default::default()
        };
    }
}
