//! Integration tests for flatdb

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Command isolated from the user's config and data directories
    fn flatdb(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("flatdb");
        cmd.env("FLATDB_CONFIG", dir.path().join("config.toml"))
            .env("FLATDB_DATA_DIR", dir.path().join("data"))
            .env_remove("FLATDB_NETWORK");
        cmd
    }

    fn cache_file(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("data").join("flatcache.dat")
    }

    fn put(dir: &TempDir, key: &str, value: &str) {
        flatdb(dir)
            .args(["cache", "put", key, value])
            .assert()
            .success();
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Checksummed single-object flat-file snapshots"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("flatdb"));
    }

    #[test]
    fn cache_put_and_get() {
        let dir = TempDir::new().unwrap();
        put(&dir, "greeting", "hello");

        assert!(cache_file(&dir).exists());
        flatdb(&dir)
            .args(["cache", "get", "greeting"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hello"));
    }

    #[test]
    fn cache_put_rejects_huge_ttl() {
        let dir = TempDir::new().unwrap();
        for ttl in ["9223372036854775807", "9223372036854775"] {
            flatdb(&dir)
                .args(["cache", "put", "k", "v", "--ttl", ttl])
                .assert()
                .failure()
                .stderr(predicate::str::contains("out of range"));
        }
        assert!(!cache_file(&dir).exists());
    }

    #[test]
    fn cache_get_missing_key() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir)
            .args(["cache", "get", "nothing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Key not found"));
    }

    #[test]
    fn cache_list_json() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");
        put(&dir, "b", "2");

        let output = flatdb(&dir)
            .args(["cache", "list", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 2);
        assert_eq!(entries[0]["key"], "a");
        assert_eq!(entries[1]["value"], "2");
    }

    #[test]
    fn cache_remove() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");

        flatdb(&dir)
            .args(["cache", "remove", "a"])
            .assert()
            .success();
        flatdb(&dir)
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn verify_written_cache() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");

        flatdb(&dir)
            .arg("verify")
            .arg(cache_file(&dir))
            .args(["--type-tag", "ExpiringCache", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("verified"));
    }

    #[test]
    fn verify_wrong_type_tag() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");

        flatdb(&dir)
            .arg("verify")
            .arg(cache_file(&dir))
            .args(["--type-tag", "GovernanceCache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid magic message"));
    }

    #[test]
    fn verify_wrong_network() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");

        flatdb(&dir)
            .args(["--network", "test", "verify"])
            .arg(cache_file(&dir))
            .args(["--type-tag", "ExpiringCache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid network magic number"));
    }

    #[test]
    fn verify_missing_file() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir)
            .args(["verify", "does-not-exist.dat", "--type-tag", "ExpiringCache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("file missing or unreadable"));
    }

    #[test]
    fn corrupt_cache_is_recreated() {
        let dir = TempDir::new().unwrap();
        put(&dir, "old", "1");

        let mut bytes = fs::read(cache_file(&dir)).unwrap();
        bytes[3] ^= 0x40;
        fs::write(cache_file(&dir), &bytes).unwrap();

        flatdb(&dir)
            .arg("verify")
            .arg(cache_file(&dir))
            .args(["--type-tag", "ExpiringCache"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("checksum mismatch"));

        put(&dir, "new", "2");
        flatdb(&dir)
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("new=2").and(predicate::str::contains("old").not()));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_cache_aborts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(cache_file(&dir)).unwrap();

        flatdb(&dir)
            .args(["cache", "put", "a", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("please fix it manually"));
        assert!(cache_file(&dir).is_dir());
    }

    #[test]
    fn inspect_json() {
        let dir = TempDir::new().unwrap();
        put(&dir, "a", "1");

        let output = flatdb(&dir)
            .arg("inspect")
            .arg(cache_file(&dir))
            .args(["--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["checksum_ok"], true);
        assert_eq!(report["type_tag"], "ExpiringCache");
        assert_eq!(report["network"], "main");
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let dir = TempDir::new().unwrap();
        flatdb(&dir).args(["config", "init"]).assert().success();
        assert!(dir.path().join("config.toml").exists());

        flatdb(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[network]"));
    }
}
