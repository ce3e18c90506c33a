//! # Last-Cut Stack
//!
//! Holds the batches removed by cut operations until they are pasted.
//!
//! - Each cut pushes one batch; each paste pops the most recent one
//! - A batch pastes as the concatenation of its records' texts, each
//!   followed by the separator
//! - With a depth limit, the oldest batch is dropped on overflow

use crate::record::NodeRecord;

/// Records removed together by one cut
#[derive(Debug, Default)]
pub struct CutBatch {
    /// Cut records in paste order
    pub records: Vec<NodeRecord>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl CutBatch {
    pub fn new(records: Vec<NodeRecord>) -> Self {
        Self {
            records,
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Text a paste inserts
    pub fn joined(&self, separator: &str) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(record.text.as_deref().unwrap_or_default());
            out.push_str(separator);
        }
        out
    }
}

/// Stack of pending cut batches
#[derive(Debug, Default)]
pub struct CutStack {
    /// Pending batches (most recent last)
    batches: Vec<CutBatch>,

    /// Maximum number of pending batches (0 = unlimited)
    max_batches: usize,
}

impl CutStack {
    /// Create an unlimited stack
    pub fn new() -> Self {
        Self::with_max_batches(0)
    }

    pub fn with_max_batches(max_batches: usize) -> Self {
        Self {
            batches: Vec::new(),
            max_batches,
        }
    }

    pub fn push(&mut self, batch: CutBatch) {
        self.batches.push(batch);

        if self.max_batches > 0 && self.batches.len() > self.max_batches {
            let dropped = self.batches.remove(0);
            tracing::debug!(
                records = dropped.len(),
                max_batches = self.max_batches,
                "dropping oldest cut batch"
            );
        }
    }

    pub fn pop(&mut self) -> Option<CutBatch> {
        self.batches.pop()
    }

    /// Batch the next paste would insert
    pub fn peek(&self) -> Option<&CutBatch> {
        self.batches.last()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }

    pub fn max_batches(&self) -> usize {
        self.max_batches
    }

    /// Description of the next batch to paste
    pub fn next_description(&self) -> Option<&str> {
        self.peek()?.description.as_deref()
    }
}
