//! End-to-end load runs through the public API
//!
//! These tests drive `LoadRun` against real JSON lines sinks and check what
//! lands in each target's file.

use chaos_loadgen::application::{LoadRun, SinkStatus};
use chaos_loadgen::domain::{
    Dimension, ParagraphGenerator, RecordGenerator, SentenceCount, VectorGenerator,
};
use chaos_loadgen::infrastructure::{
    JsonLinesRecordSink, LoadTarget, MemorySink, RecordSink, TargetFileSink,
};
use chaos_loadgen::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::fs;

fn generator(dimension: usize) -> RecordGenerator {
    RecordGenerator::new(
        ParagraphGenerator::new(SentenceCount::try_new(2).unwrap()),
        VectorGenerator::new(Dimension::try_new(dimension).unwrap()),
    )
}

fn norm(components: &[f64]) -> f64 {
    components.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[test]
fn every_target_file_receives_the_full_batch() {
    let dir = tempfile::tempdir().unwrap();
    let targets = [LoadTarget::Sql2025, LoadTarget::Sql2022, LoadTarget::Postgres];
    let mut files: Vec<TargetFileSink> = targets
        .into_iter()
        .map(|target| TargetFileSink::new(dir.path(), target))
        .collect();
    let mut sinks: Vec<&mut dyn RecordSink> = files
        .iter_mut()
        .map(|sink| sink as &mut dyn RecordSink)
        .collect();

    let report = LoadRun::new(generator(16), 30, 10)
        .execute(&mut StdRng::seed_from_u64(42), &mut sinks)
        .unwrap();

    assert_eq!(report.generated, 30);
    assert!(report.sinks.iter().all(|outcome| outcome.written == 30));
    for file in &files {
        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().count(), 30);
    }
}

#[test]
fn sql_server_rows_carry_json_arrays_and_postgres_rows_carry_pgvector_literals() {
    let mut sql = JsonLinesRecordSink::new(LoadTarget::Sql2025, Vec::new());
    let mut postgres = JsonLinesRecordSink::new(LoadTarget::Postgres, Vec::new());

    LoadRun::new(generator(8), 5, 0)
        .execute(&mut StdRng::seed_from_u64(7), &mut [&mut sql, &mut postgres])
        .unwrap();

    let sql_rows = String::from_utf8(sql.into_inner()).unwrap();
    let postgres_rows = String::from_utf8(postgres.into_inner()).unwrap();
    for (sql_line, postgres_line) in sql_rows.lines().zip(postgres_rows.lines()) {
        let sql_row: Value = serde_json::from_str(sql_line).unwrap();
        let postgres_row: Value = serde_json::from_str(postgres_line).unwrap();
        assert_eq!(sql_row["content"], postgres_row["content"]);

        let sql_embedding: Vec<f64> =
            serde_json::from_str(sql_row["embedding"].as_str().unwrap()).unwrap();
        let literal = postgres_row["embedding"].as_str().unwrap();
        let postgres_embedding: Vec<f64> = literal
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|x| x.parse().unwrap())
            .collect();

        assert_eq!(sql_embedding.len(), 8);
        assert_eq!(postgres_embedding.len(), 8);
        assert!((norm(&sql_embedding) - 1.0).abs() < 1e-5);
        assert!((norm(&postgres_embedding) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn unwritable_target_directory_is_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();
    let mut broken = TargetFileSink::new(&blocked, LoadTarget::Sql2022);
    let mut healthy = MemorySink::new("memory");

    let report = LoadRun::new(generator(4), 12, 5)
        .execute(&mut StdRng::seed_from_u64(3), &mut [&mut broken, &mut healthy])
        .unwrap();

    assert!(matches!(
        report.outcome("sql2022").unwrap().status,
        SinkStatus::SetupFailed(_)
    ));
    assert_eq!(healthy.records().len(), 12);
}

#[test]
fn run_with_only_broken_targets_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();
    let mut broken = TargetFileSink::new(&blocked, LoadTarget::Postgres);

    let result = LoadRun::new(generator(4), 12, 5)
        .execute(&mut StdRng::seed_from_u64(3), &mut [&mut broken]);

    assert!(matches!(result, Err(Error::AllSinksFailed)));
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut first = MemorySink::new("first");
    let mut second = MemorySink::new("second");

    LoadRun::new(generator(32), 10, 0)
        .execute(&mut StdRng::seed_from_u64(99), &mut [&mut first])
        .unwrap();
    LoadRun::new(generator(32), 10, 0)
        .execute(&mut StdRng::seed_from_u64(99), &mut [&mut second])
        .unwrap();

    assert_eq!(first.records(), second.records());
}
