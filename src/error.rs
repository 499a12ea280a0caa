use std::ffi::NulError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("expected argument to \"{command}\"")]
    MissingArgument { command: &'static str },

    #[error("{command}: {}: {source}", .path.display())]
    Io {
        command: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}: an error occurred reading the working directory")]
    NoWorkingDirectory(&'static str),

    #[error("{0}: {1}")]
    Lookup(&'static str, String),

    #[error("failed to spawn process: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),

    #[error("write failed: {0}")]
    Output(#[from] io::Error),

    #[error("argument contains a null byte")]
    NulByte(#[from] NulError),
}

impl ShellError {
    pub fn io<P: Into<PathBuf>>(command: &'static str, path: P, source: io::Error) -> Self {
        ShellError::Io { command, path: path.into(), source }
    }
}
