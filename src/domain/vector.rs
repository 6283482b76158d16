//! Unit-norm random embedding vectors
//!
//! Vectors are sampled uniformly from the unit hypercube and scaled onto the
//! unit sphere, matching what an embedding model hands a vector database.

use crate::domain::validation_constants::vector;
use crate::{Error, Result};
use nutype::nutype;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Number of components in an embedding vector
///
/// Capped at the largest dimension a pgvector column can store.
#[nutype(
    validate(greater = 0, less_or_equal = 16_000),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        Display
    )
)]
pub struct Dimension(usize);

impl Dimension {
    /// Validate a raw length, mapping failures onto the crate error
    pub fn from_len(len: usize) -> Result<Self> {
        Self::try_new(len).map_err(|_| Error::InvalidDimension(len))
    }

    /// The 1536-wide embedding used by the load test tables
    pub fn default_embedding() -> Self {
        Self::try_new(vector::DEFAULT_DIMENSION).expect("default dimension is within bounds")
    }
}

/// How a vector is written into a storage column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorEncoding {
    /// JSON numeric list, e.g. `[0.1,0.2]`, stored as text or cast to `VECTOR`
    #[serde(rename = "json_array")]
    JsonArray,
    /// pgvector text literal
    #[serde(rename = "pgvector")]
    PgVector,
}

/// A vector with Euclidean norm 1.0
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UnitVector(Vec<f32>);

impl UnitVector {
    /// Standard basis vector `e0` of the given dimension
    pub fn basis(dimension: Dimension) -> Self {
        let mut components = vec![0.0; dimension.into_inner()];
        components[0] = 1.0;
        Self(components)
    }

    /// Scale `samples` onto the unit sphere; `None` when the norm is zero
    fn normalized(samples: &[f64]) -> Option<Self> {
        let norm = samples.iter().map(|x| x * x).sum::<f64>().sqrt();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        Some(Self(samples.iter().map(|x| (x / norm) as f32).collect()))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; dimensions are positive
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean norm, accumulated in `f64`
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    pub fn to_json_array(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn to_pgvector_literal(&self) -> String {
        let mut literal = String::with_capacity(self.0.len() * 12 + 2);
        literal.push('[');
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                literal.push(',');
            }
            let _ = write!(literal, "{component}");
        }
        literal.push(']');
        literal
    }

    pub fn encode(&self, encoding: VectorEncoding) -> Result<String> {
        match encoding {
            VectorEncoding::JsonArray => self.to_json_array(),
            VectorEncoding::PgVector => Ok(self.to_pgvector_literal()),
        }
    }
}

/// Draw a unit vector of `dimension` components from `rng`
///
/// An all-zero draw is resampled; if every attempt is all-zero the first
/// basis vector is returned.
pub fn generate_unit_vector<R: Rng>(rng: &mut R, dimension: Dimension) -> UnitVector {
    let len = dimension.into_inner();
    for _ in 0..vector::MAX_RESAMPLE_ATTEMPTS {
        let samples: Vec<f64> = (0..len).map(|_| rng.random::<f64>()).collect();
        if let Some(unit) = UnitVector::normalized(&samples) {
            return unit;
        }
    }
    UnitVector::basis(dimension)
}

/// Generator bound to one embedding dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorGenerator {
    dimension: Dimension,
}

impl VectorGenerator {
    pub fn new(dimension: Dimension) -> Self {
        Self { dimension }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> UnitVector {
        generate_unit_vector(rng, self.dimension)
    }
}

impl Default for VectorGenerator {
    fn default() -> Self {
        Self::new(Dimension::default_embedding())
    }
}
