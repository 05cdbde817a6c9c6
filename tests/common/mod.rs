#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub store: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let store = tmp.path().join("store");

        Self {
            _tmp: tmp,
            home,
            store,
        }
    }

    /// Isolated HOME, no-op editor, default log level.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("promptctl");
        cmd.env("HOME", &self.home)
            .env("EDITOR", "true")
            .env_remove("VISUAL")
            .env_remove("PROMPTCTL_LOG");
        cmd
    }

    /// Runs against the temp store and parses the JSON envelope.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--store")
            .arg(&self.store)
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn store_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--store").arg(&self.store);
        cmd
    }

    pub fn write_settings(&self, body: &str) -> PathBuf {
        let path = self.home.join(".config/promptctl/config.toml");
        fs::create_dir_all(path.parent().expect("settings dir")).expect("create settings dir");
        fs::write(&path, body).expect("write settings");
        path
    }
}
