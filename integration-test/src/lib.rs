//! Test driver for heatsite integration tests.
//!
//! Spawns a workspace binary with:
//! - stdout: a PTY of a chosen size, so the child sees a real terminal width
//! - stderr: a pipe, captured for assertions
//! - stdin: /dev/null

use nix::pty::{openpty, Winsize};
use std::io::Read;
use std::os::fd::{FromRawFd, IntoRawFd};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

/// Terminal width used when a test does not pick one.
pub const DEFAULT_COLUMNS: u16 = 80;

/// A running child process.
pub struct TestSession {
    child: Child,
    /// Captured stdout (from PTY master), populated by background thread.
    stdout_capture: Arc<Mutex<Vec<u8>>>,
    /// Captured stderr, populated by background thread.
    stderr_capture: Arc<Mutex<Vec<u8>>>,
    _stdout_thread: thread::JoinHandle<()>,
    _stderr_thread: thread::JoinHandle<()>,
}

impl TestSession {
    /// Spawn `binary` with `args` on an 80-column terminal.
    pub fn spawn(
        binary: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> std::io::Result<TestSession> {
        Self::spawn_in(binary, args, env, None, DEFAULT_COLUMNS)
    }

    /// Like `spawn`, with an optional working directory and terminal width.
    pub fn spawn_in(
        binary: &str,
        args: &[&str],
        env: &[(&str, &str)],
        cwd: Option<&str>,
        columns: u16,
    ) -> std::io::Result<TestSession> {
        let size = Winsize {
            ws_row: 24,
            ws_col: columns,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let pty = openpty(Some(&size), None)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let pty_master_fd = pty.master.into_raw_fd();
        let pty_slave_fd = pty.slave.into_raw_fd();

        let mut cmd = Command::new(binary);
        cmd.args(args);
        // Width and log level come from the test, not the caller's shell.
        cmd.env_remove("COLUMNS");
        cmd.env_remove("RUST_LOG");
        for (k, v) in env {
            cmd.env(k, v);
        }

        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        // In the child (pre_exec), point stdout at the PTY slave.
        unsafe {
            cmd.pre_exec(move || {
                if libc::dup2(pty_slave_fd, 1) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                if pty_slave_fd > 1 {
                    libc::close(pty_slave_fd);
                }
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;

        // Close the child-side fd in the parent.
        unsafe {
            libc::close(pty_slave_fd);
        }

        // Background thread to drain PTY master (prevents child blocking).
        let stdout_capture = Arc::new(Mutex::new(Vec::new()));
        let stdout_cap = Arc::clone(&stdout_capture);
        let stdout_thread = thread::spawn(move || {
            let mut master = unsafe { std::fs::File::from_raw_fd(pty_master_fd) };
            let mut buf = [0u8; 4096];
            loop {
                match master.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        stdout_cap.lock().unwrap().extend_from_slice(&buf[..n]);
                    }
                    Err(e) => {
                        // EIO is expected when the slave side closes.
                        if e.raw_os_error() == Some(libc::EIO) {
                            break;
                        }
                        eprintln!("stdout drain error: {e}");
                        break;
                    }
                }
            }
        });

        // Background thread to capture stderr.
        let stderr_capture = Arc::new(Mutex::new(Vec::new()));
        let stderr_cap = Arc::clone(&stderr_capture);
        let stderr_pipe = child.stderr.take().unwrap();
        let stderr_thread = thread::spawn(move || {
            let mut pipe = stderr_pipe;
            let mut buf = [0u8; 4096];
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        stderr_cap.lock().unwrap().extend_from_slice(&buf[..n]);
                    }
                    Err(e) => {
                        eprintln!("stderr drain error: {e}");
                        break;
                    }
                }
            }
        });

        Ok(TestSession {
            child,
            stdout_capture,
            stderr_capture,
            _stdout_thread: stdout_thread,
            _stderr_thread: stderr_thread,
        })
    }

    /// Wait for the child to exit and assert the exit code.
    pub fn wait_exit(mut self, expected_code: i32) -> SessionOutput {
        let status = self.child.wait().expect("failed to wait for child");
        let code = status.code().unwrap_or(-1);

        // (Capture threads finish once the child's fds close.)
        let _ = self._stdout_thread.join();
        let _ = self._stderr_thread.join();

        // The PTY line discipline turns "\n" into "\r\n".
        let stdout = String::from_utf8_lossy(&self.stdout_capture.lock().unwrap())
            .replace("\r\n", "\n");
        let stderr = String::from_utf8_lossy(&self.stderr_capture.lock().unwrap()).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        SessionOutput { stdout, stderr }
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SessionOutput {
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    pub fn stderr_lines(&self) -> Vec<&str> {
        self.stderr.lines().collect()
    }
}
