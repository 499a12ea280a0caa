use std::fs::{self, DirBuilder, File};
use std::io::{self, Write};
use std::os::unix::fs::DirBuilderExt;

use crate::cwd::WorkingDir;
use crate::error::ShellError;
use crate::interpreter::Status;
use crate::utils;

/// Permission bits for directories made by `mkdir`.
const DIR_MODE: u32 = 0o700;

/// Commands run inside the shell process instead of being spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Help,
    Ls,
    Echo,
    Cat,
    Pwd,
    Mkdir,
    Touch,
    Rm,
    Whoami,
    Rmdir,
    Exit,
}

pub const BUILTINS: [(&str, Builtin); 12] = [
    ("cd", Builtin::Cd),
    ("help", Builtin::Help),
    ("ls", Builtin::Ls),
    ("echo", Builtin::Echo),
    ("cat", Builtin::Cat),
    ("pwd", Builtin::Pwd),
    ("mkdir", Builtin::Mkdir),
    ("touch", Builtin::Touch),
    ("rm", Builtin::Rm),
    ("whoami", Builtin::Whoami),
    ("rmdir", Builtin::Rmdir),
    ("exit", Builtin::Exit),
];

pub fn lookup (name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|(builtin, _)| *builtin == name).map(|&(_, builtin)| builtin)
}

fn required<'a> (args: &[&'a str], command: &'static str) -> Result<&'a str, ShellError> {
    args.get(1).copied().ok_or(ShellError::MissingArgument { command })
}

impl Builtin {
    pub fn name (self) -> &'static str {
        BUILTINS.iter().find(|&&(_, builtin)| builtin == self).map_or("", |&(name, _)| name)
    }

    /// Runs the builtin. `args[0]` is the command name itself.
    ///
    /// Every builtin asks the loop to continue except `exit`.
    pub fn run (self, args: &[&str], cwd: &mut WorkingDir, out: &mut dyn Write) -> Result<Status, ShellError> {
        match self {
            Builtin::Cd => {
                let target = required(args, "cd")?;
                cwd.change(target)?;
            }
            Builtin::Help => {
                writeln!(out, "tsh - a tiny shell")?;
                writeln!(out, "Type program names and arguments, and hit enter.")?;
                writeln!(out, "The following are built in:")?;
                for (name, _) in BUILTINS {
                    writeln!(out, "  {name}")?;
                }
                writeln!(out, "Use the man command for information on other programs.")?;
            }
            Builtin::Ls => {
                let target = args.get(1).copied().unwrap_or(".");
                let entries = utils::read_directory(cwd.resolve(target))
                    .map_err(|err| ShellError::io("ls", target, err))?;

                for entry in entries {
                    writeln!(out, "  {entry}")?;
                }
            }
            Builtin::Echo => {
                writeln!(out, "{}", args[1..].join(" "))?;
            }
            Builtin::Cat => {
                let target = required(args, "cat")?;
                let mut file = File::open(cwd.resolve(target))
                    .map_err(|err| ShellError::io("cat", target, err))?;

                io::copy(&mut file, out).map_err(|err| ShellError::io("cat", target, err))?;
            }
            Builtin::Pwd => {
                let dir = cwd.get().ok_or(ShellError::NoWorkingDirectory("pwd"))?;
                writeln!(out, "{}", dir.display())?;
            }
            Builtin::Mkdir => {
                let target = required(args, "mkdir")?;
                let path = cwd.resolve(target);

                if !path.exists() {
                    DirBuilder::new()
                        .mode(DIR_MODE)
                        .create(&path)
                        .map_err(|err| ShellError::io("mkdir", target, err))?;
                }
            }
            Builtin::Touch => {
                let target = required(args, "touch")?;
                File::create(cwd.resolve(target)).map_err(|err| ShellError::io("touch", target, err))?;
            }
            Builtin::Rm => {
                let target = required(args, "rm")?;
                let path = cwd.resolve(target);

                let removed = match fs::symlink_metadata(&path) {
                    Ok(meta) if meta.is_dir() => fs::remove_dir(&path),
                    _ => fs::remove_file(&path),
                };
                removed.map_err(|err| ShellError::io("rm", target, err))?;

                writeln!(out, "{target} deleted successfully.")?;
            }
            Builtin::Whoami => {
                let user = utils::get_login()
                    .map_err(|err| ShellError::Lookup("whoami", format!("{err:#}")))?;
                writeln!(out, "{user}")?;
            }
            Builtin::Rmdir => {
                let target = required(args, "rmdir")?;
                let path = cwd.resolve(target);

                if path.exists() {
                    fs::remove_dir(&path).map_err(|err| ShellError::io("rmdir", target, err))?;
                }
            }
            Builtin::Exit => return Ok(Status::Stop),
        }

        Ok(Status::Continue)
    }
}
