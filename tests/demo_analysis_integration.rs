use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn collabnet_bin() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_collabnet") {
        return PathBuf::from(path);
    }

    let current_exe = std::env::current_exe().expect("resolve current test binary path");
    let target_dir = current_exe
        .parent()
        .and_then(|path| path.parent())
        .expect("derive cargo target dir from test binary path");
    let bin_name = if cfg!(windows) {
        "collabnet.exe"
    } else {
        "collabnet"
    };
    let fallback = target_dir.join(bin_name);

    if fallback.is_file() {
        fallback
    } else {
        panic!(
            "CARGO_BIN_EXE_collabnet is not set and fallback binary not found at {}",
            fallback.display()
        );
    }
}

fn demo_json(args: &[&str]) -> Value {
    let output = Command::new(collabnet_bin())
        .arg("demo")
        .args(args)
        .arg("--json")
        .output()
        .expect("run collabnet demo");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(
        output.status.success(),
        "demo command failed\nstdout:\n{stdout}\nstderr:\n{stderr}"
    );

    serde_json::from_slice(&output.stdout).expect("parse demo json")
}

#[test]
fn demo_summary_counts_the_seeded_network() {
    let summary = demo_json(&["summary"]);
    assert_eq!(summary["nodes"], 9);
    assert_eq!(summary["edges"], 4);
    assert_eq!(summary["components"], 5);
}

#[test]
fn demo_recommendations_are_cross_program_with_shared_interests() {
    let recs = demo_json(&["recommendations"]);
    let recs = recs.as_array().expect("recommendations array");
    assert!(!recs.is_empty());
    for rec in recs {
        assert_ne!(rec["program_a"], rec["program_b"]);
        let shared = rec["shared_interests"].as_array().expect("shared array");
        assert!(!shared.is_empty());
    }
}

#[test]
fn demo_resilience_flags_fragmentation_for_the_hub() {
    let impact = demo_json(&["resilience", "maria"]);
    assert_eq!(impact["removed"], "maria");
    assert_eq!(impact["components_before"], 5);
    assert_eq!(impact["components_after"], 7);
    assert_eq!(
        impact["lost_connections"].as_array().map(Vec::len),
        Some(3)
    );
    assert_eq!(impact["fragmented"], true);
    assert_eq!(impact["critical"], false);
}

#[test]
fn demo_resilience_rejects_unknown_people() {
    let output = Command::new(collabnet_bin())
        .args(["demo", "resilience", "nobody"])
        .output()
        .expect("run collabnet demo resilience");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nobody"), "stderr was: {stderr}");
}

#[test]
fn demo_gaps_ranks_the_hub_first() {
    let gaps = demo_json(&["gaps"]);
    let ranking = gaps["ranking"].as_array().expect("ranking array");
    assert_eq!(ranking.len(), 9);
    assert_eq!(ranking[0]["id"], "maria");

    let top = gaps["top_central"].as_array().expect("top_central array");
    assert_eq!(top.len(), 3);
    assert_eq!(top[0], "maria");

    let relevance: Vec<f64> = ranking
        .iter()
        .map(|entry| entry["relevance"].as_f64().expect("relevance number"))
        .collect();
    for pair in relevance.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}
