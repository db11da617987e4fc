use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn plate_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("plate");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let seed = env!("CARGO_MANIFEST_DIR");
    fs::copy(
        Path::new(seed).join("config/seed.example.json"),
        config_dir.join("seed.json"),
    )
    .unwrap();

    let config_content = r#"[catalog]
seed = "seed.json"

[catalog.collections]
"Date night" = ["Zuni Cafe", "Trick Dog", "Rintaro"]
"Coffee runs" = ["Sightglass Coffee", "Tartine Bakery"]

[catalog.overlays]
"Zuni Cafe" = { rating = 4.5 }
"Trick Dog" = { status = "wantToVisit" }

[location]
latitude = 37.7749
longitude = -122.4194

[search]
latency_ms = 5
"#;

    let config_path = config_dir.join("plate.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_plate(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = plate_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run plate binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_list_without_filters_prints_everything() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_plate(&config, &["list"]);
    assert!(ok, "list failed: {}", stderr);
    for name in ["Zuni Cafe", "Trick Dog", "Commis", "Burma Superstar"] {
        assert!(stdout.contains(name), "missing {}: {}", name, stdout);
    }
}

#[test]
fn test_list_category_then_price() {
    let (_tmp, config) = setup_test_env();

    let (stdout, _, ok) = run_plate(&config, &["list", "--category", "Cafe"]);
    assert!(ok);
    assert!(stdout.contains("Sightglass Coffee"));
    assert!(stdout.contains("Tartine Bakery"));
    assert!(!stdout.contains("Zuni Cafe"));

    let (stdout, _, ok) = run_plate(&config, &["list", "--category", "Cafe", "--price", "$$"]);
    assert!(ok);
    assert!(stdout.contains("Sightglass Coffee"));
    assert!(!stdout.contains("Tartine Bakery"));
}

#[test]
fn test_list_collection_keeps_collection_order() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_plate(&config, &["list", "--collection", "date night"]);
    assert!(ok, "list failed: {}", stderr);

    let zuni = stdout.find("Zuni Cafe").unwrap();
    let trick = stdout.find("Trick Dog").unwrap();
    let rintaro = stdout.find("Rintaro").unwrap();
    assert!(zuni < trick && trick < rintaro, "wrong order: {}", stdout);
    assert!(!stdout.contains("Commis"));
}

#[test]
fn test_list_json_output() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_plate(&config, &["list", "--price", "$$$$", "--json"]);
    assert!(ok);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Commis");
    assert_eq!(arr[0]["price"], "$$$$");
}

#[test]
fn test_list_within_uses_location() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_plate(&config, &["list", "--within", "1"]);
    assert!(ok);
    assert!(stdout.contains("Zuni Cafe"));
    assert!(!stdout.contains("Commis"));
    assert!(!stdout.contains("Burma Superstar"));
}

#[test]
fn test_list_rejects_unknown_option() {
    let (_tmp, config) = setup_test_env();
    let (_, stderr, ok) = run_plate(&config, &["list", "--price", "$$$$$"]);
    assert!(!ok);
    assert!(stderr.contains("unknown option"), "stderr: {}", stderr);
}

#[test]
fn test_facets_lists_collections() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_plate(&config, &["facets"]);
    assert!(ok);
    assert!(stdout.contains("category"));
    assert!(stdout.contains("Date night, Coffee runs"), "stdout: {}", stdout);
    assert!(stdout.contains("1 mi"));
}

#[test]
fn test_list_by_visit_status() {
    let (_tmp, config) = setup_test_env();

    let (stdout, stderr, ok) = run_plate(&config, &["list", "--status", "visited"]);
    assert!(ok, "list failed: {}", stderr);
    assert!(stdout.contains("Zuni Cafe"));
    assert!(!stdout.contains("Trick Dog"));
    assert!(!stdout.contains("Commis"));

    let (stdout, _, ok) = run_plate(
        &config,
        &["list", "--collection", "Date night", "--status", "want-to-visit"],
    );
    assert!(ok);
    assert!(stdout.contains("Trick Dog"));
    assert!(!stdout.contains("Zuni Cafe"));

    let (stdout, _, ok) = run_plate(&config, &["list", "--status", "unvisited"]);
    assert!(ok);
    assert!(stdout.contains("Commis"));
    assert!(!stdout.contains("Zuni Cafe"));
    assert!(!stdout.contains("Trick Dog"));
}

#[test]
fn test_list_rejects_unknown_status() {
    let (_tmp, config) = setup_test_env();
    let (_, stderr, ok) = run_plate(&config, &["list", "--status", "been"]);
    assert!(!ok);
    assert!(stderr.contains("unknown visit status"), "stderr: {}", stderr);
}

#[test]
fn test_search_fixture_provider() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_plate(&config, &["search", "ramen", "--latency-ms", "1"]);
    assert!(ok, "search failed: {}", stderr);
    assert!(stdout.contains("Mensho Tokyo"));

    let (stdout, _, ok) = run_plate(&config, &["search", "pizza"]);
    assert!(ok);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_blank_search_json_is_empty_array() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_plate(&config, &["search", "   ", "--json"]);
    assert!(ok, "search failed: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn test_detect_needs_no_config() {
    let missing = PathBuf::from("/nonexistent/plate.toml");
    let (stdout, _, ok) = run_plate(&missing, &["detect", "https://vm.tiktok.com/ZM123/"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "tiktok");
}

#[test]
fn test_missing_config_fails() {
    let missing = PathBuf::from("/nonexistent/plate.toml");
    let (_, stderr, ok) = run_plate(&missing, &["list"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to read config file"));
}
