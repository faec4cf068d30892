use std::{collections::HashSet, fs, path::Path};
use tracker_lib::{config::Config, pipeline::SkipReason, Pipeline};

const CONFIG_FILES: &[&str] = &["debris.toml", "example.toml"];

#[test]
fn example_scenario_config_file_list_matches_expected() {
    let cfg_files: HashSet<String> = fs::read_dir("../scenarios")
        .unwrap()
        .map(|d| d.unwrap())
        .filter(|d| d.file_type().unwrap().is_file())
        .map(|d| d.file_name().into_string().unwrap())
        .collect();
    let expected: HashSet<String> = CONFIG_FILES.iter().map(|f| f.to_string()).collect();
    assert_eq!(cfg_files, expected, "Example scenarios directory is missing an expected config file or contains a new config file that should be tested");
}

#[test]
fn example_scenario_config_files_parse() {
    let dir = Path::new("../scenarios");
    for cfg_file in CONFIG_FILES {
        let p = dir.join(cfg_file);
        let cfg = Config::load(&p).unwrap();
        for src in cfg.sources() {
            src.load().unwrap();
        }
    }
}

#[test]
fn example_scenario_runs() {
    let cfg = Config::load("../scenarios/example.toml").unwrap();
    let out = Pipeline::two_body(cfg.series_config().unwrap()).run(&cfg.sources());
    assert!(out.report.skipped.is_empty());
    assert_eq!(out.report.satellites_emitted, 4);
    assert_eq!(out.table.len(), 4 * 24);
}

#[test]
fn debris_scenario_keeps_repeated_sources() {
    let cfg = Config::load("../scenarios/debris.toml").unwrap();
    let out = Pipeline::two_body(cfg.series_config().unwrap()).run(&cfg.sources());

    // Each debris listing emits two satellites and skips the bad epoch
    assert_eq!(out.report.sources, 4);
    assert_eq!(out.report.satellites_emitted, 2 + 2 + 2 + 1);
    assert_eq!(out.table.len(), 7 * 12);
    assert_eq!(out.report.skipped.len(), 2);
    assert!(out
        .report
        .skipped
        .iter()
        .all(|s| s.source == "debris" && matches!(s.reason, SkipReason::Epoch(_))));

    let molniya: Vec<_> = out
        .table
        .rows()
        .iter()
        .filter(|r| r.satellite_name == "MOLNIYA DEMO")
        .collect();
    assert_eq!(molniya.len(), 24);
    assert_eq!(molniya[..12], molniya[12..]);
}
