//! Provider integration: HTTP and file providers feeding full runs.

use catseries_core::config::{ChartOptions, SourceLocations};
use catseries_core::domain::SourceId;
use catseries_core::pipeline::{run, PipelineError};
use catseries_core::source::{FetchError, FileProvider, HttpProvider};
use httpmock::prelude::*;
use std::path::PathBuf;

const NAMES: [&str; 3] = ["data1.json", "data2.json", "data3.json"];

fn fixture(name: &str) -> String {
    let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"));
    std::fs::read_to_string(dir.join(name)).unwrap()
}

fn locations_for(server: &MockServer) -> SourceLocations {
    SourceLocations {
        a: server.url("/data1.json"),
        b: server.url("/data2.json"),
        c: server.url("/data3.json"),
    }
}

#[test]
fn http_run_matches_file_run() {
    let server = MockServer::start();
    let mocks: Vec<_> = NAMES
        .iter()
        .map(|name| {
            let body = fixture(name);
            server.mock(|when, then| {
                when.method(GET).path(format!("/{name}"));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(&body);
            })
        })
        .collect();

    let http = HttpProvider::new(locations_for(&server)).unwrap();
    let over_http = run(&http, &ChartOptions::default()).unwrap();

    for mock in &mocks {
        mock.assert_calls(1);
    }

    let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"));
    let files = FileProvider::in_dir(dir);
    let from_files = run(&files, &ChartOptions::default()).unwrap();

    assert_eq!(over_http.fingerprint, from_files.fingerprint);
    assert_eq!(over_http.merged, from_files.merged);
    assert_eq!(over_http.grouped, from_files.grouped);
    assert_eq!(over_http.grand_total(), 2131.25);
}

#[test]
fn http_error_on_one_source_fails_the_run() {
    let server = MockServer::start();
    let ok_a = server.mock(|when, then| {
        when.method(GET).path("/data1.json");
        then.status(200).body(fixture("data1.json"));
    });
    let broken_b = server.mock(|when, then| {
        when.method(GET).path("/data2.json");
        then.status(500);
    });
    let ok_c = server.mock(|when, then| {
        when.method(GET).path("/data3.json");
        then.status(200).body(fixture("data3.json"));
    });

    let http = HttpProvider::new(locations_for(&server)).unwrap();
    let err = run(&http, &ChartOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::FetchFailure {
            origin: SourceId::B,
            error: FetchError::HttpStatus { status: 500, .. },
        }
    ));
    // No retry, and the healthy sources were still fetched.
    ok_a.assert_calls(1);
    broken_b.assert_calls(1);
    ok_c.assert_calls(1);
}

#[test]
fn file_provider_accepts_arbitrary_paths() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = ["first.json", "second.json", "third.json"]
        .iter()
        .zip(NAMES)
        .map(|(target, name)| {
            let path = dir.path().join(target);
            std::fs::write(&path, fixture(name)).unwrap();
            path
        })
        .collect();

    let provider = FileProvider::new(&paths[0], &paths[1], &paths[2]);
    assert_eq!(provider.path(SourceId::B), paths[1].as_path());

    let report = run(&provider, &ChartOptions { highlight: None }).unwrap();
    assert_eq!(report.canonical_count, 10);
    assert!(report.chart.pie.iter().all(|s| !s.highlighted));
}
