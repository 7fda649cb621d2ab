//! Handing a finished URL to something that can open it.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler accepted {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Status { program: String, status: ExitStatus },
    #[error("open_command is empty")]
    EmptyCommand,
}

/// Something that can take a URL string and open it.
pub trait UrlDispatcher {
    fn open_url(&self, url: &str) -> Result<(), DispatchError>;

    /// Short name for logs and the status bar.
    fn describe(&self) -> String;
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default)]
pub struct SystemDispatcher;

impl UrlDispatcher for SystemDispatcher {
    fn open_url(&self, url: &str) -> Result<(), DispatchError> {
        open::that(url).map_err(|source| DispatchError::Open {
            url: url.to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        "system handler".to_string()
    }
}

/// Runs a configured program with the URL appended as its last argument,
/// e.g. `adb shell am start -a android.intent.action.VIEW -d <url>`.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    argv: Vec<String>,
}

impl CommandDispatcher {
    pub fn new(argv: Vec<String>) -> Result<Self, DispatchError> {
        if argv.first().is_none_or(|p| p.is_empty()) {
            return Err(DispatchError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    fn program(&self) -> &str {
        &self.argv[0]
    }
}

impl UrlDispatcher for CommandDispatcher {
    fn open_url(&self, url: &str) -> Result<(), DispatchError> {
        let program = self.program().to_string();
        // Output would tear through the TUI
        let status = Command::new(&program)
            .args(&self.argv[1..])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| DispatchError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(DispatchError::Status { program, status });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.argv.join(" ")
    }
}

/// Pick the dispatcher for an optional `open_command` setting.
pub fn from_config(open_command: Option<&[String]>) -> Result<Box<dyn UrlDispatcher>, DispatchError> {
    match open_command {
        Some(argv) => Ok(Box::new(CommandDispatcher::new(argv.to_vec())?)),
        None => Ok(Box::new(SystemDispatcher)),
    }
}
