//! E2E tests for `civetman dev`
//!
//! The watcher runs as a child process; events are read from its NDJSON
//! stdout until the expected one arrives or the deadline passes.
#![cfg(unix)]

mod common;

use std::io::{BufRead, BufReader};
use std::process::{Child, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use common::TestEnv;
use serde_json::Value;

const WAIT: Duration = Duration::from_secs(10);

struct DevProcess {
    child: Child,
    events: Receiver<Value>,
}

impl DevProcess {
    fn spawn(env: &TestEnv) -> Self {
        let mut child = env
            .command(env.project_root.path())
            .args(["dev", "--json"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to start civetman dev");

        let stdout = child.stdout.take().unwrap();
        let (tx, events) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if let Ok(value) = serde_json::from_str::<Value>(&line) {
                    if tx.send(value).is_err() {
                        break;
                    }
                }
            }
        });

        Self { child, events }
    }

    /// Block until an event matching `pred` arrives.
    fn wait_for(&self, pred: impl Fn(&Value) -> bool) -> Value {
        let deadline = Instant::now() + WAIT;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.events.recv_timeout(left) {
                Ok(event) if pred(&event) => return event,
                Ok(_) => continue,
                Err(_) => panic!("timed out waiting for event"),
            }
        }
    }
}

impl Drop for DevProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn watch_env() -> TestEnv {
    let env = TestEnv::bare();
    env.write(
        "civetman.toml",
        "[compiler]\ncommand = \"cat\"\n\n[sync]\ndebounce_ms = 50\n",
    );
    env
}

#[test]
fn dev_builds_initial_sources() {
    let env = watch_env();
    env.write("a.civet", "a := 1\n");

    let dev = DevProcess::spawn(&env);

    let started = dev.wait_for(|e| e["event"] == "watch_started");
    assert_eq!(started["command"], "dev");
    assert_eq!(started["sources"], 1);

    let built = dev.wait_for(|e| e["event"] == "file_built");
    assert_eq!(built["trigger"], "initial");
    assert_eq!(built["output"], "a.ts");

    dev.wait_for(|e| e["event"] == "initial_build_complete");
    assert!(env.exists("a.ts"));
}

#[test]
fn dev_compiles_new_file_and_updates_gitignore() {
    let env = watch_env();
    let dev = DevProcess::spawn(&env);
    dev.wait_for(|e| e["event"] == "initial_build_complete");
    // The watcher is registered right after the initial build.
    thread::sleep(Duration::from_millis(300));

    env.write("b.civet", "b := 2\n");

    let built = dev.wait_for(|e| e["event"] == "file_built" && e["source"] == "b.civet");
    assert_eq!(built["trigger"], "add");
    dev.wait_for(|e| e["event"] == "side_file_synced" && e["file"] == ".gitignore");

    assert!(env.read("b.ts").ends_with("b := 2\n"));
    assert!(env.read(".gitignore").ends_with("\n/b.ts\n"));
}

#[test]
fn dev_removes_output_when_source_is_deleted() {
    let env = watch_env();
    env.write("gone.civet", "g := 1\n");
    let dev = DevProcess::spawn(&env);
    dev.wait_for(|e| e["event"] == "initial_build_complete");
    thread::sleep(Duration::from_millis(300));
    assert!(env.exists("gone.ts"));

    std::fs::remove_file(env.path("gone.civet")).unwrap();

    let removed = dev.wait_for(|e| e["event"] == "file_removed");
    assert_eq!(removed["output"], "gone.ts");
    assert!(!env.exists("gone.ts"));
}

#[test]
fn dev_builds_directory_moved_into_the_project() {
    let env = watch_env();
    let staging = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(staging.path().join("pkg/lib")).unwrap();
    std::fs::write(staging.path().join("pkg/a.civet"), "a := 1\n").unwrap();
    std::fs::write(staging.path().join("pkg/lib/b.civet"), "b := 2\n").unwrap();

    let dev = DevProcess::spawn(&env);
    dev.wait_for(|e| e["event"] == "initial_build_complete");
    thread::sleep(Duration::from_millis(300));

    std::fs::rename(staging.path().join("pkg"), env.path("pkg")).unwrap();

    dev.wait_for(|e| e["event"] == "file_built" && e["source"] == "pkg/lib/b.civet");
    dev.wait_for(|e| {
        e["event"] == "side_file_synced" && e["file"] == ".gitignore" && e["entries"] == 2
    });

    assert!(env.read("pkg/a.ts").ends_with("a := 1\n"));
    let gitignore = env.read(".gitignore");
    assert!(gitignore.contains("\n/pkg/a.ts\n"));
    assert!(gitignore.ends_with("\n/pkg/lib/b.ts\n"));
}

#[test]
fn dev_forgets_directory_moved_out_of_the_project() {
    let env = watch_env();
    env.write("keep.civet", "k := 1\n");
    env.write("pkg/a.civet", "a := 1\n");
    env.write("pkg/lib/b.civet", "b := 2\n");

    let dev = DevProcess::spawn(&env);
    dev.wait_for(|e| {
        e["event"] == "side_file_synced" && e["file"] == ".gitignore" && e["entries"] == 3
    });
    thread::sleep(Duration::from_millis(300));

    let staging = tempfile::tempdir().unwrap();
    std::fs::rename(env.path("pkg"), staging.path().join("pkg")).unwrap();

    let removed =
        dev.wait_for(|e| e["event"] == "file_removed" && e["source"] == "pkg/lib/b.civet");
    assert_eq!(removed["output"], "pkg/lib/b.ts");
    dev.wait_for(|e| {
        e["event"] == "side_file_synced" && e["file"] == ".gitignore" && e["entries"] == 1
    });

    let gitignore = env.read(".gitignore");
    assert!(!gitignore.contains("pkg/"));
    assert!(gitignore.ends_with("\n/keep.ts\n"));
    assert!(!env.read(".vscode/settings.json").contains("pkg/"));
}
