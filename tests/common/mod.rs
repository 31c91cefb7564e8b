//! Common test utilities for Onsave integration tests.
//!
//! Provides helpers to run the built `onsave` binary to completion (for
//! invocations that exit on their own) and to drive a long-running watch
//! process in the background.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Path to the onsave binary under test
pub fn onsave_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_onsave"))
}

/// Run onsave to completion in `cwd`.
///
/// Only for invocations expected to exit on their own (`--help`, startup
/// failures); a successful watch never returns.
pub fn run(cwd: &Path, args: &[&str]) -> Output {
    run_with_env(cwd, args, &[])
}

/// Run onsave to completion in `cwd` with extra env vars.
pub fn run_with_env(cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(onsave_bin());
    cmd.current_dir(cwd).args(args);
    for (key, value) in env_vars {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run onsave")
}

/// A watch process spawned in the background with captured output.
pub struct WatchProcess {
    child: Child,
}

impl WatchProcess {
    /// Spawn onsave in `cwd` with extra env vars.
    pub fn spawn(cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> Self {
        let mut cmd = Command::new(onsave_bin());
        cmd.current_dir(cwd)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let child = cmd.spawn().expect("failed to spawn onsave");
        Self { child }
    }

    /// Send SIGINT and collect the process output.
    pub fn interrupt(self) -> Output {
        let pid = self.child.id().to_string();
        let status = Command::new("kill")
            .args(["-INT", &pid])
            .status()
            .expect("failed to run kill");
        assert!(status.success(), "kill -INT failed");
        self.child
            .wait_with_output()
            .expect("failed to collect onsave output")
    }

    /// Kill the process outright and collect its output so far.
    pub fn kill(mut self) -> Output {
        let _ = self.child.kill();
        self.child
            .wait_with_output()
            .expect("failed to collect onsave output")
    }
}

/// Poll until `path` exists or the timeout elapses.
pub fn wait_for(path: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    path.exists()
}
