use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use tempfile::TempDir;

fn parquet_mirror_bin() -> &'static str {
    env!("CARGO_BIN_EXE_parquet-mirror")
}

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(100));
    }
    false
}

struct MirrorProcess {
    child: Child,
    base: PathBuf,
}

impl MirrorProcess {
    fn start(base: &Path) -> Self {
        let child = Command::new(parquet_mirror_bin())
            .env("BASE_DIR", base)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn parquet-mirror");
        Self {
            child,
            base: base.to_path_buf(),
        }
    }

    fn log_path(&self) -> PathBuf {
        self.base.join("logs").join("parquet-mirror.log")
    }

    /// Block until the service reports it is watching.
    fn wait_watching(&self) -> bool {
        let log = self.log_path();
        wait_until(Duration::from_secs(10), || {
            fs::read_to_string(&log)
                .map(|content| content.contains("watching source directory"))
                .unwrap_or(false)
        })
    }

    #[cfg(unix)]
    fn terminate(&self) {
        let _ = Command::new("kill")
            .args(["-TERM", &self.child.id().to_string()])
            .status();
    }

    fn wait_exit(&mut self, timeout: Duration) -> Option<std::process::ExitStatus> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(Some(status)) = self.child.try_wait() {
                return Some(status);
            }
            sleep(Duration::from_millis(50));
        }
        None
    }
}

impl Drop for MirrorProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn base_with_sync_dirs() -> TempDir {
    let base = TempDir::new().unwrap();
    fs::create_dir_all(base.path().join("parquet_raw")).unwrap();
    fs::create_dir_all(base.path().join("parquet_final")).unwrap();
    base
}

#[test]
fn missing_source_directory_exits_1_without_watching() {
    let base = TempDir::new().unwrap();
    // No parquet_raw / parquet_final created.
    let output = Command::new(parquet_mirror_bin())
        .env("BASE_DIR", base.path())
        .output()
        .expect("run parquet-mirror");
    assert_eq!(output.status.code(), Some(1));

    let log =
        fs::read_to_string(base.path().join("logs").join("parquet-mirror.log")).unwrap();
    assert!(
        log.contains("does not exist"),
        "startup failure should be logged: {log}"
    );
    assert!(
        !log.contains("watching source directory"),
        "service must not start watching: {log}"
    );
}

#[test]
fn missing_destination_directory_exits_1() {
    let base = TempDir::new().unwrap();
    fs::create_dir_all(base.path().join("parquet_raw")).unwrap();
    let output = Command::new(parquet_mirror_bin())
        .env("BASE_DIR", base.path())
        .output()
        .expect("run parquet-mirror");
    assert_eq!(output.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn sigterm_with_no_events_shuts_down_cleanly() {
    let base = base_with_sync_dirs();
    let mut mirror = MirrorProcess::start(base.path());
    assert!(mirror.wait_watching(), "service did not start in time");

    mirror.terminate();
    let status = mirror
        .wait_exit(Duration::from_secs(10))
        .expect("service should exit after SIGTERM");
    assert!(status.success(), "expected exit 0, got {status}");

    let log = fs::read_to_string(mirror.log_path()).unwrap();
    let shutdown_records = log.matches("shutting down gracefully").count();
    assert_eq!(
        shutdown_records, 1,
        "exactly one shutdown record expected: {log}"
    );
}

#[cfg(unix)]
#[test]
fn dropped_file_is_mirrored_and_survives_shutdown() {
    let base = base_with_sync_dirs();
    let mut mirror = MirrorProcess::start(base.path());
    assert!(mirror.wait_watching(), "service did not start in time");

    fs::write(base.path().join("parquet_raw").join("iris.parquet"), b"cols").unwrap();
    let mirrored = base.path().join("parquet_final").join("iris.parquet");
    assert!(
        wait_until(Duration::from_secs(10), || mirrored.exists()),
        "file should be mirrored into parquet_final"
    );
    assert_eq!(fs::read(&mirrored).unwrap(), b"cols");

    let log = fs::read_to_string(mirror.log_path()).unwrap();
    assert!(
        log.contains("synchronized source with destination"),
        "sync completion should be logged: {log}"
    );

    mirror.terminate();
    let status = mirror
        .wait_exit(Duration::from_secs(10))
        .expect("service should exit after SIGTERM");
    assert!(status.success());
    assert!(mirrored.exists(), "mirrored file survives shutdown");
}

#[cfg(unix)]
#[test]
fn deletion_in_source_is_pruned_from_destination() {
    let base = base_with_sync_dirs();
    let raw = base.path().join("parquet_raw");
    let fin = base.path().join("parquet_final");
    fs::write(fin.join("stale.parquet"), b"old").unwrap();

    let mut mirror = MirrorProcess::start(base.path());
    assert!(mirror.wait_watching(), "service did not start in time");

    // Any event triggers a full pass, which prunes the stale entry.
    fs::write(raw.join("fresh.parquet"), b"new").unwrap();
    assert!(
        wait_until(Duration::from_secs(10), || {
            fin.join("fresh.parquet").exists() && !fin.join("stale.parquet").exists()
        }),
        "pass should copy fresh.parquet and prune stale.parquet"
    );

    mirror.terminate();
    let _ = mirror.wait_exit(Duration::from_secs(10));
}
