// Dweve PixBench - Benchmark Result Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn pixbench_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pixbench").expect("Failed to find pixbench binary");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

const RESULTS: &str = r#"{
  "metadata": {"timestamp": "2025-03-01T12:00:00", "totalExperiments": 4},
  "outputs": [
    {"experiment": "resolution_scaling", "mode": "normal", "resolution": 256, "colors": 8, "algorithmTime_ms": 10.0, "success": true, "outputImage": "r256_n.png"},
    {"experiment": "resolution_scaling", "mode": "normal", "resolution": 1024, "colors": 8, "algorithmTime_ms": 160.0, "success": true, "outputImage": "r1024_n.png"},
    {"experiment": "resolution_scaling", "mode": "heavy", "resolution": 256, "colors": 8, "algorithmTime_ms": 25.0, "success": true},
    {"experiment": "resolution_scaling", "mode": "heavy", "resolution": 1024, "colors": 16, "algorithmTime_ms": 400.0, "success": true},
    {"experiment": "color_depth_analysis", "mode": "heavy", "resolution": 256, "colors": 16, "algorithmTime_ms": 30.0, "success": true},
    {"experiment": "dithering_comparison", "mode": "normal", "dithering": "none", "algorithmTime_ms": 5.0, "success": true},
    {"experiment": "dithering_comparison", "mode": "heavy", "dithering": "none", "algorithmTime_ms": 9.0, "success": true},
    {"experiment": "resolution_scaling", "mode": "heavy", "resolution": 4096, "success": false, "error": "timeout"},
    {"experiment": "resolution_scaling", "mode": "normal", "resolution": 2048, "success": true}
  ]
}"#;

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    pixbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PixBench - benchmark result analysis"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_no_subcommand_fails() {
    pixbench_cmd().assert().failure();
}

// ===== Analyze Command Tests =====

#[test]
fn test_analyze_console() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("IMAGE PROCESSING BENCHMARK ANALYSIS"))
        .stdout(predicate::str::contains("RESOLUTION SCALING"))
        .stdout(predicate::str::contains("O(n^1.000)"))
        .stdout(predicate::str::contains("[WARN] record #8"))
        .stdout(predicate::str::contains("Benchmark run: 2025-03-01T12:00:00"));
}

#[test]
fn test_analyze_json() {
    let file = create_temp_file(RESULTS, ".json");

    let output = pixbench_cmd()
        .args(["analyze", "--format", "json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &doc["report"];
    assert_eq!(report["overview"]["total_records"], 9);
    assert_eq!(report["overview"]["successful"], 7);
    assert_eq!(report["overview"]["failed"], 1);
    assert_eq!(report["overview"]["malformed"], 1);
    assert_eq!(report["overview"]["saved_outputs"], 2);
    assert_eq!(report["quality"]["malformed"][0]["issue"]["kind"], "missing_time");
    assert!((report["complexity"]["normal"]["exponent"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(doc["metadata"]["totalExperiments"], 4);
}

#[test]
fn test_analyze_markdown_to_file() {
    let file = create_temp_file(RESULTS, ".json");
    let out = NamedTempFile::new().unwrap();

    pixbench_cmd()
        .args(["analyze", "--format", "markdown", "--output"])
        .arg(out.path())
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let md = fs::read_to_string(out.path()).unwrap();
    assert!(md.starts_with("# Image Processing Benchmark Analysis"));
    assert!(md.contains("## Resolution Scaling"));
    assert!(md.contains("| 256x256 | 10.00 | 25.00 | +150.0% | compared |"));
}

#[test]
fn test_analyze_with_yaml_config() {
    let file = create_temp_file(RESULTS, ".json");
    let config = create_temp_file("matrices: []\nparallel: false\n", ".yaml");

    let output = pixbench_cmd()
        .args(["analyze", "--format", "json", "--config"])
        .arg(config.path())
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["report"]["matrices"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_analyze_invalid_config() {
    let file = create_temp_file(RESULTS, ".json");
    let config = create_temp_file(
        r#"{"matrices": [{"name": "bad", "rows": "colors", "columns": "colors", "mode": "heavy"}]}"#,
        ".json",
    );

    pixbench_cmd()
        .args(["analyze", "--config"])
        .arg(config.path())
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("matrices.bad"));
}

#[test]
fn test_analyze_sequential() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["analyze", "--sequential"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPUTATIONAL COMPLEXITY"));
}

// ===== Input Contract Tests =====

#[test]
fn test_missing_outputs_field() {
    let file = create_temp_file(r#"{"metadata": {}}"#, ".json");

    pixbench_cmd()
        .arg("summary")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no 'outputs' field"));
}

#[test]
fn test_record_not_object() {
    let file = create_temp_file(r#"{"outputs": [{"algorithmTime_ms": 1.0}, 42]}"#, ".json");

    pixbench_cmd()
        .arg("summary")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 1 must be an object"));
}

#[test]
fn test_missing_file() {
    pixbench_cmd()
        .args(["summary", "/nonexistent/results.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_file_size_limit() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .env("PIXBENCH_MAX_FILE_SIZE", "16")
        .arg("summary")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== Summary Command Tests =====

#[test]
fn test_summary() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .arg("summary")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Successful:     7"))
        .stdout(predicate::str::contains("resolution_scaling: 1"))
        .stdout(predicate::str::contains("successful record has no algorithmTime_ms"))
        .stdout(predicate::str::contains("RESOLUTION SCALING").not());
}

// ===== Group Command Tests =====

#[test]
fn test_group_csv() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["group", "--by", "resolution,mode", "--format", "csv"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("resolution,mode,count,mean_ms"))
        .stdout(predicate::str::contains("256,normal,1,10,10,0,10,10"))
        .stdout(predicate::str::contains("1024,heavy,1,400,400,0,400,400"));
}

#[test]
fn test_group_with_filters() {
    let file = create_temp_file(RESULTS, ".json");

    let output = pixbench_cmd()
        .args(["group", "--by", "colors", "--mode", "heavy"])
        .args(["--contains", "color", "--format", "json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = stats["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["label"], "16");
    assert_eq!(rows[0]["stat"]["mean"], 30.0);
}

#[test]
fn test_group_unknown_dimension() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["group", "--by", "flavor"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_group_experiment_conflicts_with_contains() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["group", "--by", "mode", "--experiment", "a", "--contains", "b"])
        .arg(file.path())
        .assert()
        .failure();
}

// ===== Complexity Command Tests =====

#[test]
fn test_complexity_single_mode() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["complexity", "--mode", "normal", "--experiment", "resolution_scaling"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("normal: exponent 1.000"))
        .stdout(predicate::str::contains("heavy").not());
}

#[test]
fn test_complexity_degenerate() {
    let file = create_temp_file(
        r#"{"outputs": [{"mode": "heavy", "resolution": 512, "algorithmTime_ms": 3.0}]}"#,
        ".json",
    );

    pixbench_cmd()
        .args(["complexity", "--mode", "heavy"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("heavy: exponent 0.000 (undefined, 1 resolution(s))"));
}

// ===== Matrix Command Tests =====

#[test]
fn test_matrix_csv() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["matrix", "--rows", "colors", "--columns", "resolution", "--format", "csv"])
        .args(["--experiment", "resolution_scaling", "--experiment", "color_depth_analysis"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("colors\\resolution,256,1024"))
        .stdout(predicate::str::contains("\n8,25,"))
        .stdout(predicate::str::contains("16,30,400"));
}

#[test]
fn test_matrix_degenerate_axis() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["matrix", "--rows", "colors", "--columns", "resolution", "--mode", "normal"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No interaction matrix"));
}

#[test]
fn test_matrix_same_axes_rejected() {
    let file = create_temp_file(RESULTS, ".json");

    pixbench_cmd()
        .args(["matrix", "--rows", "colors", "--columns", "colors"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rows and columns"));
}
