//! Batched persistence of extracted records
//!
//! Extracted records are buffered in memory and flushed to the sink as a
//! numbered batch once the threshold is reached, bounding peak memory
//! over arbitrarily long runs. Whatever remains when the input stream is
//! exhausted is flushed as a final short batch.

use crate::extract::TutorialRecord;
use crate::sink::ArtifactSink;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of records per batch artifact
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// A bounded group of records flushed together
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch: u32,
    pub extracted_at: DateTime<Utc>,
    pub tutorials: Vec<TutorialRecord>,
}

/// Returns the artifact name for a batch sequence number.
pub fn batch_file_name(sequence: u32) -> String {
    format!("content_batch_{sequence}.json")
}

/// Accumulates records and emits numbered batch artifacts
///
/// Sequence numbers are contiguous starting at 0; each batch is written
/// exactly once and never rewritten.
pub struct BatchWriter<'a> {
    sink: &'a dyn ArtifactSink,
    threshold: usize,
    buffer: Vec<TutorialRecord>,
    next_sequence: u32,
}

impl<'a> BatchWriter<'a> {
    pub fn new(sink: &'a dyn ArtifactSink, threshold: usize) -> Self {
        Self {
            sink,
            threshold,
            buffer: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Appends a record, flushing a full batch when the threshold is hit.
    pub fn append(&mut self, record: TutorialRecord) -> Result<()> {
        self.buffer.push(record);
        if self.buffer.len() >= self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Flushes any remainder and returns the total number of batches written.
    pub fn finish(mut self) -> Result<u32> {
        if !self.buffer.is_empty() {
            self.flush()?;
        }
        Ok(self.next_sequence)
    }

    fn flush(&mut self) -> Result<()> {
        let batch = Batch {
            batch: self.next_sequence,
            extracted_at: Utc::now(),
            tutorials: std::mem::take(&mut self.buffer),
        };

        let bytes = serde_json::to_vec_pretty(&batch)?;
        self.sink.write(&batch_file_name(batch.batch), &bytes)?;

        tracing::info!("Saved batch {} ({} tutorials)", batch.batch, batch.tutorials.len());
        self.next_sequence += 1;
        Ok(())
    }
}
