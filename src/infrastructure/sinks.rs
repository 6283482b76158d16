//! Destinations for generated records and events
//!
//! Sinks are the seam between the generators and whatever stores or shows
//! their output. Every failure is returned to the caller as an
//! [`Error::Sink`] naming the sink.

use crate::domain::{ChaosEvent, DocumentRecord};
use crate::infrastructure::targets::LoadTarget;
use crate::{Error, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives generated records, one at a time
pub trait RecordSink {
    fn name(&self) -> &str;

    /// Acquire whatever the sink needs before the first write
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, record: &DocumentRecord) -> Result<()>;

    /// Flush and release resources after the last write
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Receives generated chaos events
pub trait EventSink {
    fn emit(&mut self, event: &ChaosEvent) -> Result<()>;
}

impl EventSink for Vec<ChaosEvent> {
    fn emit(&mut self, event: &ChaosEvent) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    name: String,
    records: Vec<DocumentRecord>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, record: &DocumentRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[derive(Serialize)]
struct TargetRow<'a> {
    table: &'static str,
    column: &'static str,
    content: &'a str,
    embedding: String,
}

/// Writes one JSON object per record, embedding encoded for `target`
#[derive(Debug)]
pub struct JsonLinesRecordSink<W: Write> {
    target: LoadTarget,
    name: String,
    writer: W,
}

impl<W: Write> JsonLinesRecordSink<W> {
    pub fn new(target: LoadTarget, writer: W) -> Self {
        Self {
            target,
            name: target.to_string(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, record: &DocumentRecord) -> Result<()> {
        let encoded = record.encoded(self.target.encoding())?;
        let row = TargetRow {
            table: self.target.table(),
            column: self.target.embedding_column(),
            content: encoded.content,
            embedding: encoded.embedding,
        };
        serde_json::to_writer(&mut self.writer, &row)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> RecordSink for JsonLinesRecordSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, record: &DocumentRecord) -> Result<()> {
        self.write_row(record)
            .map_err(|e| Error::sink(&self.name, e))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::sink(&self.name, e))
    }
}

/// JSON lines file `<dir>/<target>.jsonl`, created on `prepare`
#[derive(Debug)]
pub struct TargetFileSink {
    target: LoadTarget,
    name: String,
    path: PathBuf,
    inner: Option<JsonLinesRecordSink<BufWriter<File>>>,
}

impl TargetFileSink {
    pub fn new(dir: &Path, target: LoadTarget) -> Self {
        Self {
            target,
            name: target.to_string(),
            path: dir.join(format!("{target}.jsonl")),
            inner: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for TargetFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn prepare(&mut self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::sink(&self.name, e))?;
        }
        let file = File::create(&self.path).map_err(|e| Error::sink(&self.name, e))?;
        self.inner = Some(JsonLinesRecordSink::new(self.target, BufWriter::new(file)));
        Ok(())
    }

    fn write(&mut self, record: &DocumentRecord) -> Result<()> {
        match self.inner.as_mut() {
            Some(sink) => sink.write(record),
            None => Err(Error::sink(&self.name, "written before prepare")),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self.inner.take() {
            Some(mut sink) => sink.finish(),
            None => Ok(()),
        }
    }
}

/// Writes each event as one JSON line
#[derive(Debug)]
pub struct JsonLinesEventSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesEventSink<W> {
    fn emit(&mut self, event: &ChaosEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dimension, ParagraphGenerator, RecordGenerator, VectorGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;

    fn record() -> DocumentRecord {
        RecordGenerator::new(
            ParagraphGenerator::default(),
            VectorGenerator::new(Dimension::from_len(3).unwrap()),
        )
        .generate(&mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_json_lines_sink_encodes_for_target() {
        let record = record();
        let mut sink = JsonLinesRecordSink::new(LoadTarget::Postgres, Vec::new());

        sink.write(&record).unwrap();
        sink.write(&record).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let row: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(row["table"], "consulting_docs");
        assert_eq!(row["column"], "embedding");
        assert_eq!(row["content"], record.content.as_str());
        assert_eq!(row["embedding"], record.embedding.to_pgvector_literal());
    }

    #[test]
    fn test_sql2022_rows_carry_json_text() {
        let record = record();
        let mut sink = JsonLinesRecordSink::new(LoadTarget::Sql2022, Vec::new());
        sink.write(&record).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let row: Value = serde_json::from_str(output.trim()).unwrap();
        let embedding: Vec<f32> =
            serde_json::from_str(row["embedding"].as_str().unwrap()).unwrap();

        assert_eq!(row["column"], "embedding_json");
        assert_eq!(embedding.as_slice(), record.embedding.as_slice());
    }

    #[test]
    fn test_target_file_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TargetFileSink::new(&dir.path().join("out"), LoadTarget::Sql2025);

        sink.prepare().unwrap();
        sink.write(&record()).unwrap();
        sink.finish().unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(sink.path().ends_with("out/sql2025.jsonl"));
    }

    #[test]
    fn test_target_file_sink_requires_prepare() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TargetFileSink::new(dir.path(), LoadTarget::Sql2025);

        let Err(Error::Sink { sink: name, .. }) = sink.write(&record()) else {
            panic!("expected sink error");
        };
        assert_eq!(name, "sql2025");
    }

    #[test]
    fn test_memory_sink_keeps_records() {
        let mut sink = MemorySink::new("memory");
        sink.write(&record()).unwrap();

        assert_eq!(sink.name(), "memory");
        assert_eq!(sink.records(), &[record()]);
    }
}
