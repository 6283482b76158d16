//! Text-and-embedding records seeded into vector tables

use crate::domain::text::ParagraphGenerator;
use crate::domain::vector::{UnitVector, VectorEncoding, VectorGenerator};
use crate::Result;
use rand::Rng;
use serde::Serialize;

/// One row destined for a `(content, embedding)` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub content: String,
    pub embedding: UnitVector,
}

impl DocumentRecord {
    /// The row as `(content, embedding)` with the embedding serialized for a
    /// text parameter
    pub fn encoded(&self, encoding: VectorEncoding) -> Result<EncodedRecord<'_>> {
        Ok(EncodedRecord {
            content: &self.content,
            embedding: self.embedding.encode(encoding)?,
        })
    }
}

/// A record whose embedding has been rendered to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedRecord<'a> {
    pub content: &'a str,
    pub embedding: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordGenerator {
    text: ParagraphGenerator,
    vectors: VectorGenerator,
}

impl RecordGenerator {
    pub fn new(text: ParagraphGenerator, vectors: VectorGenerator) -> Self {
        Self { text, vectors }
    }

    pub fn vectors(&self) -> &VectorGenerator {
        &self.vectors
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> DocumentRecord {
        DocumentRecord {
            content: self.text.generate(rng),
            embedding: self.vectors.generate(rng),
        }
    }
}
