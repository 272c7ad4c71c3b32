#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = holdem_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8(out).expect("utf-8 stdout"),
        stderr: String::from_utf8(err).expect("utf-8 stderr"),
    }
}

/// A throwaway room store; every command runs with `--store <dir>`.
pub struct Table {
    dir: TempDir,
}

impl Table {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join("rooms")
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        let store = self.store_dir();
        let store = store.to_str().expect("utf-8 path");
        let mut all = vec!["--store", store];
        all.extend_from_slice(args);
        run_cli(&all)
    }

    /// Runs and asserts success.
    pub fn ok(&self, args: &[&str]) -> String {
        let res = self.run(args);
        assert_eq!(res.exit_code, 0, "{:?} failed: {}", args, res.stderr);
        res.stdout
    }

    /// Creates a room hosted by `p0` ("Ann") and seats `p1..pN`; returns the
    /// room id.
    pub fn room_with(&self, players: usize) -> String {
        let id = self.ok(&["room", "create", "--player", "p0", "--name", "Ann"]);
        let id = id.trim().to_string();
        for i in 1..players {
            let pid = format!("p{}", i);
            self.ok(&["room", "join", &id, "--player", &pid]);
        }
        id
    }

    pub fn room_json(&self, id: &str) -> serde_json::Value {
        let out = self.ok(&["show", id, "--json"]);
        serde_json::from_str(&out).expect("room json")
    }
}
