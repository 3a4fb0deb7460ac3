#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PETSTORE: &str = r#"openapi: "3.0.0"
info:
  title: Petstore
  version: "1.0"
paths:
  /a:
    get: {}
    post: {}
  /b:
    get: {}
"#;

pub const SWAGGER: &str = r#"swagger: "2.0"
openapi: "2.0"
paths:
  /pets:
    get: {}
"#;

/// A scratch working directory with an isolated HOME and the default
/// `openapi-directory/APIs` layout.
pub struct TestEnv {
    _tmp: TempDir,
    pub work: PathBuf,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let work = tmp.path().join("work");
        let home = tmp.path().join("home");
        fs::create_dir_all(work.join("openapi-directory").join("APIs")).expect("create api dir");
        fs::create_dir_all(&home).expect("create isolated home");

        Self {
            _tmp: tmp,
            work,
            home,
        }
    }

    pub fn api_root(&self) -> PathBuf {
        self.work.join("openapi-directory").join("APIs")
    }

    pub fn add_spec(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        write_file(&self.api_root(), rel, content)
    }

    pub fn cmd(&self, bin: &str) -> Command {
        let mut cmd = match bin {
            "count-api-specs" => cargo_bin_cmd!("count-api-specs"),
            _ => cargo_bin_cmd!("openapi-stats"),
        };
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_ok(&self, bin: &str, args: &[&str]) -> String {
        let out = self
            .cmd(bin)
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).expect("utf-8 stdout")
    }
}

pub fn write_file(root: &Path, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    fs::write(&path, content).expect("write file");
    path
}
