use std::env;
use std::path::{Path, PathBuf};

use crate::error::ShellError;

/// The shell's record of the process working directory.
///
/// Captured from the OS once at startup and changed only by `cd`, which
/// moves the process itself first. Builtins resolve relative paths against
/// it; external commands inherit the process directory. `None` when the
/// startup query failed.
#[derive(Debug, Clone)]
pub struct WorkingDir {
    path: Option<PathBuf>,
}

impl WorkingDir {
    pub fn from_process() -> Self {
        match env::current_dir() {
            Ok(path) => Self { path: Some(path) },
            Err(err) => {
                tracing::warn!(%err, "could not read the working directory");
                Self { path: None }
            }
        }
    }

    #[cfg(test)]
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: Some(path.into()) }
    }

    #[cfg(test)]
    pub fn unknown() -> Self {
        Self { path: None }
    }

    pub fn get(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        match &self.path {
            Some(base) => base.join(path),
            None => path.as_ref().to_path_buf(),
        }
    }

    /// Changes the process directory to `target`.
    ///
    /// The recorded path is only updated once `chdir` succeeded.
    pub fn change(&mut self, target: &str) -> Result<(), ShellError> {
        env::set_current_dir(self.resolve(target))
            .map_err(|err| ShellError::io("cd", target, err))?;

        self.path = env::current_dir().ok();
        tracing::debug!(dir = ?self.path, "changed directory");
        Ok(())
    }
}

/// Serializes tests that move the process directory and puts it back
/// afterwards.
#[cfg(test)]
pub struct ProcessDirGuard {
    original: PathBuf,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ProcessDirGuard {
    pub fn hold() -> Self {
        static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

        let lock = LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self { original: env::current_dir().unwrap(), _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ProcessDirGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}
