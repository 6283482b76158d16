//! Generator domain for the chaos load generator
//!
//! Pure, synchronous generators for embedding records and chaos events. All
//! randomness comes from an `Rng` handle supplied by the caller.

pub mod event_generator;
pub mod event_profile;
pub mod events;
pub mod record;
pub mod templates;
pub mod text;
pub mod validation_constants;
pub mod vector;

pub use event_generator::EventGenerator;
pub use event_profile::{EventProfile, FractionRange, IntRange};
pub use events::{ChaosEvent, ErrorEvent, EventTimestamp, QueryEvent, Severity, WaitType};
pub use record::{DocumentRecord, EncodedRecord, RecordGenerator};
pub use templates::{Placeholder, TemplateId, TemplateTable};
pub use text::{ParagraphGenerator, SentenceCount};
pub use vector::{generate_unit_vector, Dimension, UnitVector, VectorEncoding, VectorGenerator};
