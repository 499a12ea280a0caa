use crate::cwd::WorkingDir;
use crate::utils;

/// Shown in place of any part of the prompt that could not be looked up.
pub const PLACEHOLDER: &str = "?";

/// `user@host:cwd$ `. User and host are fixed at startup; the directory is
/// read every time the prompt is drawn.
#[derive(Debug, Clone)]
pub struct Prompt {
    user: String,
    host: String,
}

impl Prompt {
    pub fn lookup () -> Self {
        let user = utils::get_login().unwrap_or_else(|err| {
            tracing::warn!("{err:#}");
            PLACEHOLDER.to_string()
        });
        let host = utils::get_hostname().unwrap_or_else(|err| {
            tracing::warn!("{err:#}");
            PLACEHOLDER.to_string()
        });

        Self { user, host }
    }

    pub fn render (&self, cwd: &WorkingDir) -> String {
        let dir = cwd.get()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        format!("{}@{}:{}$ ", self.user, self.host, dir)
    }
}
