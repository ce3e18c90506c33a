//! # Rearrange Engine
//!
//! Moves named sibling nodes through four stages:
//!
//! ```text
//! extract → arrange → cut → paste
//! ```
//!
//! 1. **Extract**: each node whose element type has a configured name
//!    attribute, and which carries a non-empty value for it, becomes a
//!    [`NodeRecord`] with markers over its source text.
//! 2. **Arrange**: a [`NameArranger`] picks which names to keep and in what
//!    order. Records sharing a name are kept or skipped together.
//! 3. **Cut**: kept records have their text captured and removed, in
//!    arranged order, and are pushed as one batch on the last-cut stack.
//! 4. **Paste**: the latest batch is popped and inserted, each record's
//!    text followed by the separator.
//!
//! Every marker minted by extraction is released by the time `cut`,
//! `move_to` or `release` returns, whether it succeeds or fails.

use crate::cut_stack::{CutBatch, CutStack};
use crate::host::{Bias, CandidateNode, HostDocument, PositionTracker, TextEdit};
use crate::path_config::PathConfig;
use crate::prompt::NameArranger;
use crate::record::{NodePosition, NodeRecord};
use crate::EditorError;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const DEFAULT_SEPARATOR: &str = "\n";

/// Result of the arrange step
#[derive(Debug, Default)]
pub struct Arrangement {
    /// Records to cut, in paste order
    pub kept: Vec<NodeRecord>,
    /// Records left in place, in document order
    pub skipped: Vec<NodeRecord>,
}

impl Arrangement {
    pub fn kept_names(&self) -> impl Iterator<Item = &str> {
        self.kept.iter().map(|r| r.name.as_str())
    }
}

/// What a paste inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// Insertion offset
    pub offset: usize,
    /// Bytes inserted
    pub len: usize,
    /// Names of the pasted records, in order
    pub names: Vec<String>,
}

/// Cut/paste engine with its last-cut stack
#[derive(Debug)]
pub struct RearrangeEngine {
    history: CutStack,
    separator: String,
}

impl Default for RearrangeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RearrangeEngine {
    pub fn new() -> Self {
        Self {
            history: CutStack::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Text appended after every pasted record
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_history(mut self, history: CutStack) -> Self {
        self.history = history;
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn history(&self) -> &CutStack {
        &self.history
    }

    /// Build records for the nodes that have a configured, non-empty name.
    ///
    /// `naming` maps element type to name attribute for the current
    /// document type. Output keeps input order.
    pub fn extract_candidates<'n, N, T>(
        nodes: impl IntoIterator<Item = &'n N>,
        naming: &PathConfig<String>,
        tracker: &mut T,
    ) -> Result<Vec<NodeRecord>, EditorError>
    where
        N: CandidateNode + 'n,
        T: PositionTracker + ?Sized,
    {
        let mut records = Vec::new();

        for node in nodes {
            let element_type = node.element_type();
            let Some(attribute) = naming.get(&[element_type]) else {
                debug!(element_type, "no name attribute configured, skipping node");
                continue;
            };
            let name = match node.attribute(attribute) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    debug!(element_type, attribute = %attribute, "node has no name, skipping");
                    continue;
                }
            };

            let (start, end) = node.text_span();
            if start >= end {
                debug!(name, start, end, "node has an empty span, skipping");
                continue;
            }

            match track_span(start, end, tracker) {
                Ok(position) => records.push(NodeRecord::new(name, position)),
                Err(err) => {
                    Self::release(records, tracker);
                    return Err(err);
                }
            }
        }

        debug!(candidates = records.len(), "extracted candidates");
        Ok(records)
    }

    /// Split records into kept and skipped according to the arranger.
    ///
    /// The first occurrence of each returned name pulls every record with
    /// that name into `kept`, in document order. Repeated and unknown names
    /// are ignored.
    ///
    /// Every record lands in exactly one of `kept` or `skipped`. Arrangers
    /// written against a duplicate-or-drop rule will see a difference here:
    /// naming a record twice does not paste it twice, and a record whose name
    /// sits between two occurrences of another name is not lost.
    pub fn arrange<A: NameArranger + ?Sized>(
        records: Vec<NodeRecord>,
        arranger: &mut A,
    ) -> Arrangement {
        let offered: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let chosen = arranger.arrange_names(&offered);

        let mut pending: Vec<Option<NodeRecord>> = records.into_iter().map(Some).collect();
        let mut kept = Vec::new();
        let mut seen = HashSet::new();

        for name in &chosen {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let before = kept.len();
            for slot in pending.iter_mut() {
                if slot.as_ref().is_some_and(|r| &r.name == name) {
                    kept.extend(slot.take());
                }
            }
            if kept.len() == before {
                debug!(name = %name, "arranger returned an unknown name");
            }
        }

        let skipped: Vec<NodeRecord> = pending.into_iter().flatten().collect();
        debug!(kept = kept.len(), skipped = skipped.len(), "arranged candidates");
        Arrangement { kept, skipped }
    }

    /// Cut the kept records and push them as one batch.
    ///
    /// Returns the number of records cut, or `None` when nothing was kept.
    /// If a position is lost part way, the records captured so far are
    /// still pushed and the error is returned.
    pub fn cut<H: HostDocument + ?Sized>(
        &mut self,
        arrangement: Arrangement,
        host: &mut H,
    ) -> Result<Option<usize>, EditorError> {
        let Arrangement { kept, skipped } = arrangement;

        if kept.is_empty() {
            Self::release(skipped, host);
            debug!("nothing kept, cut is a no-op");
            return Ok(None);
        }

        let mut captured = Vec::with_capacity(kept.len());
        let mut failure = None;
        let mut remaining = kept.into_iter();

        for mut record in remaining.by_ref() {
            let Some(position) = record.position.take() else {
                failure = Some(EditorError::PositionLost(record.name));
                break;
            };
            let result = capture(&position, &record.name, host);
            position.release(host);

            match result {
                Ok(text) => {
                    record.text = Some(text);
                    captured.push(record);
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        Self::release(remaining.chain(skipped), host);

        let count = captured.len();
        if count > 0 {
            let batch = CutBatch::new(captured);
            let description = format!("cut {}", batch.names().collect::<Vec<_>>().join(", "));
            self.history.push(batch.with_description(description));
        }

        match failure {
            Some(err) => {
                warn!(cut = count, error = %err, "cut stopped early");
                Err(err)
            }
            None => {
                info!(cut = count, pending = self.history.len(), "cut nodes");
                Ok(Some(count))
            }
        }
    }

    /// Pop the latest batch and insert it at `at`.
    ///
    /// The batch stays on the stack if the insertion fails.
    pub fn paste<H: TextEdit + ?Sized>(
        &mut self,
        host: &mut H,
        at: usize,
    ) -> Result<PasteReport, EditorError> {
        let batch = self.history.peek().ok_or(EditorError::EmptyHistory)?;
        let text = batch.joined(&self.separator);
        host.insert(at, &text)?;

        let batch = self.history.pop().ok_or(EditorError::EmptyHistory)?;
        let report = PasteReport {
            offset: at,
            len: text.len(),
            names: batch.names().map(str::to_string).collect(),
        };
        info!(offset = at, pasted = report.names.len(), "pasted nodes");
        Ok(report)
    }

    /// Cut the kept records and paste them at `to`, given in pre-cut
    /// coordinates.
    ///
    /// `to` may sit on a kept node's boundary but not strictly inside it.
    /// Returns `None` when nothing was kept.
    pub fn move_to<H: HostDocument + ?Sized>(
        &mut self,
        arrangement: Arrangement,
        to: usize,
        host: &mut H,
    ) -> Result<Option<PasteReport>, EditorError> {
        let target = match post_cut_target(&arrangement, to, &*host) {
            Ok(target) => target,
            Err(err) => {
                let Arrangement { kept, skipped } = arrangement;
                Self::release(kept.into_iter().chain(skipped), host);
                return Err(err);
            }
        };

        if self.cut(arrangement, host)?.is_none() {
            return Ok(None);
        }
        self.paste(host, target).map(Some)
    }

    /// Release the markers of records that will not be cut
    pub fn release<T: PositionTracker + ?Sized>(
        records: impl IntoIterator<Item = NodeRecord>,
        tracker: &mut T,
    ) {
        for mut record in records {
            record.release(tracker);
        }
    }
}

fn track_span<T: PositionTracker + ?Sized>(
    start: usize,
    end: usize,
    tracker: &mut T,
) -> Result<NodePosition, EditorError> {
    let start_marker = tracker.track(start, Bias::After)?;
    match tracker.track(end, Bias::Before) {
        Ok(end_marker) => Ok(NodePosition {
            start: start_marker,
            end: end_marker,
        }),
        Err(err) => {
            tracker.release(start_marker);
            Err(err)
        }
    }
}

fn resolve_span<H: PositionTracker + ?Sized>(
    position: &NodePosition,
    name: &str,
    host: &H,
) -> Result<(usize, usize), EditorError> {
    match (host.resolve(&position.start), host.resolve(&position.end)) {
        (Some(start), Some(end)) if start <= end => Ok((start, end)),
        _ => Err(EditorError::PositionLost(name.to_string())),
    }
}

/// Read and remove a record's text
fn capture<H: HostDocument + ?Sized>(
    position: &NodePosition,
    name: &str,
    host: &mut H,
) -> Result<String, EditorError> {
    let (start, end) = resolve_span(position, name, &*host)?;
    let text = host.slice(start, end)?;
    host.remove_range(start, end)?;
    debug!(name, start, end, "captured node text");
    Ok(text)
}

/// Where `to` ends up once the kept spans are removed
fn post_cut_target<H: HostDocument + ?Sized>(
    arrangement: &Arrangement,
    to: usize,
    host: &H,
) -> Result<usize, EditorError> {
    // Rejects offsets past the end or inside a character
    host.slice(to, to)?;

    let mut shift = 0;
    for record in &arrangement.kept {
        let Some(position) = &record.position else {
            continue;
        };
        let (start, end) = resolve_span(position, &record.name, host)?;
        if start < to && to < end {
            return Err(EditorError::TargetInsideCut(to));
        }
        if end <= to {
            shift += end - start;
        }
    }
    Ok(to - shift)
}
