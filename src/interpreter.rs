use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::ptr;

use crate::builtins;
use crate::cwd::WorkingDir;
use crate::error::ShellError;

/// What the loop should do after a command.
///
/// The numeric codes are inverted relative to process exit codes: `0`
/// stops the shell, anything else keeps it going.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Stop = 0,
    Continue = 1,
}

impl Status {
    pub fn code (self) -> i32 {
        self as i32
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Exited(i32),
    Signaled(i32),
}

pub struct Interpreter<O, E> {
    name: String,
    cwd: WorkingDir,
    out: O,
    err: E,
}

impl<O: Write, E: Write> Interpreter<O, E> {
    pub fn new (name: impl Into<String>, cwd: WorkingDir, out: O, err: E) -> Self {
        Self { name: name.into(), cwd, out, err }
    }

    pub fn cwd (&self) -> &WorkingDir {
        &self.cwd
    }

    pub fn write_prompt (&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()
    }

    /// Writes `<name>: <message>` to the error stream.
    pub fn report (&mut self, message: &dyn std::fmt::Display) {
        let _ = writeln!(self.err, "{}: {message}", self.name);
        let _ = self.err.flush();
    }

    /// Runs one tokenized command line.
    ///
    /// An empty line is a no-op. Failures are reported and never stop
    /// the shell; only the `exit` builtin returns [`Status::Stop`].
    pub fn execute (&mut self, args: &[&str]) -> Status {
        let Some(&cmd) = args.first() else {
            return Status::Continue;
        };

        let result = match builtins::lookup(cmd) {
            Some(builtin) => {
                tracing::debug!(builtin = builtin.name(), argc = args.len(), "running builtin");
                builtin.run(args, &mut self.cwd, &mut self.out)
            }
            None => self.launch(args),
        };
        let _ = self.out.flush();

        match result {
            Ok(status) => status,
            Err(err) => {
                self.report(&err);
                Status::Continue
            }
        }
    }

    /// Starts `args[0]` as an external program and blocks until it ends.
    fn launch (&mut self, args: &[&str]) -> Result<Status, ShellError> {
        let pid = self.spawn(args)?;
        match wait_process(pid)? {
            ChildExit::Exited(code) => tracing::debug!(pid, code, "child exited"),
            ChildExit::Signaled(signal) => tracing::debug!(pid, signal, "child killed by signal"),
        }
        Ok(Status::Continue)
    }

    fn spawn (&mut self, args: &[&str]) -> Result<libc::pid_t, ShellError> {
        let c_args = args.iter()
            .map(|&arg| CString::new(arg))
            .collect::<Result<Vec<CString>, _>>()?;

        let mut argv: Vec<*const libc::c_char> = c_args.iter()
            .map(|arg| arg.as_ptr())
            .collect();
        argv.push(ptr::null());

        // Anything still buffered would be lost to the child or printed twice.
        self.out.flush()?;
        self.err.flush()?;

        let prefix = format!("{}: {}: ", self.name, args[0]);

        let pid = unsafe { libc::fork() };

        match pid {
            0 => unsafe { exec_child(&argv, prefix.as_bytes()) },
            pid if pid > 0 => {
                tracing::debug!(pid, program = args[0], "spawned child");
                Ok(pid)
            }
            _ => Err(ShellError::Spawn(io::Error::last_os_error())),
        }
    }
}

/// Child side of a fork: replace the image with `argv[0]`.
///
/// Never returns. If `execvp` fails, `prefix` and the OS error text go to
/// fd 2 and the child exits with a failure status. Nothing here allocates.
unsafe fn exec_child (argv: &[*const libc::c_char], prefix: &[u8]) -> ! {
    libc::execvp(argv[0], argv.as_ptr());

    let errno = *libc::__errno_location();
    let mut reason = [0 as libc::c_char; 128];
    if libc::strerror_r(errno, reason.as_mut_ptr(), reason.len()) != 0 {
        reason[0] = 0;
    }
    let reason = CStr::from_ptr(reason.as_ptr()).to_bytes();

    libc::write(libc::STDERR_FILENO, prefix.as_ptr().cast(), prefix.len());
    libc::write(libc::STDERR_FILENO, reason.as_ptr().cast(), reason.len());
    libc::write(libc::STDERR_FILENO, b"\n".as_ptr().cast(), 1);
    libc::_exit(libc::EXIT_FAILURE)
}

/// Blocks until `pid` exits or is killed by a signal.
///
/// Stops and interrupted waits are not terminal, so the wait is repeated.
pub fn wait_process (pid: libc::pid_t) -> Result<ChildExit, ShellError> {
    let mut status = 0;

    loop {
        let rc = unsafe { libc::waitpid(pid, &mut status, libc::WUNTRACED) };

        if rc == -1 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(ShellError::Wait(err));
        }

        if libc::WIFEXITED(status) {
            return Ok(ChildExit::Exited(libc::WEXITSTATUS(status)));
        }

        if libc::WIFSIGNALED(status) {
            return Ok(ChildExit::Signaled(libc::WTERMSIG(status)));
        }

        tracing::debug!(pid, "child stopped, waiting again");
    }
}
