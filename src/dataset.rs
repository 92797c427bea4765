//! Temporal reconstruction and length-bucketed aggregation.
//!
//! Archive entries arrive in stream order, which is *not* time order: the
//! time axis of an experiment is encoded in its filenames, not in entry
//! positions. The [`SequenceAggregator`] buffers the snapshots of the
//! directory currently being walked, reorders them by parsed time index at
//! each directory boundary, and buckets the finished sequence into a
//! [`Dataset`] keyed by sequence length. Downstream consumers want
//! fixed-length batches, so bucketing up front avoids a re-scan.
//!
//! One aggregator instance accompanies one archive walk; it is an explicit
//! accumulator, never global state.

use std::collections::BTreeMap;

use crate::grid::VolumetricGrid;

/// One decoded snapshot paired with the time index parsed from its
/// filename.
///
/// Transient: created by the extractor, consumed by the aggregator's
/// per-directory buffer, never persisted.
#[derive(Debug, Clone)]
pub struct TimedSnapshot {
    /// Non-negative timestep parsed from the entry name.
    pub time_index: usize,
    /// The decoded volumetric field.
    pub grid: VolumetricGrid,
}

/// One experiment's full temporal trace, sorted ascending by time index.
///
/// The reconstructed order *is* the time axis; the indices themselves are
/// discarded at the directory boundary.
pub type ExperimentSequence = Vec<VolumetricGrid>;

/// Sequences grouped by length.
///
/// Bucket key is the sequence length; insertion order within a bucket is
/// archive-encounter order. Owned by one pipeline invocation and handed to
/// analysis/export code as an in-memory structure.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    buckets: BTreeMap<usize, Vec<ExperimentSequence>>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sequence to the bucket matching its length, creating the
    /// bucket if this is the first sequence of that length.
    pub fn insert(&mut self, sequence: ExperimentSequence) {
        self.buckets.entry(sequence.len()).or_default().push(sequence);
    }

    /// The sequences of exactly this length, in encounter order.
    pub fn bucket(&self, length: usize) -> Option<&[ExperimentSequence]> {
        self.buckets.get(&length).map(Vec::as_slice)
    }

    /// Iterates buckets in ascending length order.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &[ExperimentSequence])> {
        self.buckets.iter().map(|(len, seqs)| (*len, seqs.as_slice()))
    }

    /// The distinct sequence lengths present, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of sequences across all buckets.
    pub fn num_sequences(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns `true` if no sequence has been inserted.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Removes the zero-length bucket, if present.
    ///
    /// Directories with no matching snapshot files produce zero-length
    /// sequences under key 0. They are kept by default so empty
    /// experiments stay visible; call this to discard them.
    pub fn drop_empty(&mut self) {
        self.buckets.remove(&0);
    }
}

/// Accumulator for one archive walk.
///
/// [`push`](Self::push) buffers snapshots of the currently open directory;
/// [`flush_directory`](Self::flush_directory) closes it out at the next
/// boundary; [`finish`](Self::finish) yields the dataset. The caller owns
/// the boundary events because only the walk knows when a directory ends.
#[derive(Debug, Default)]
pub struct SequenceAggregator {
    buffer: Vec<TimedSnapshot>,
    dataset: Dataset,
}

impl SequenceAggregator {
    /// Creates an aggregator with an empty buffer and dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers one snapshot of the currently open directory.
    pub fn push(&mut self, snapshot: TimedSnapshot) {
        self.buffer.push(snapshot);
    }

    /// Number of snapshots buffered since the last boundary.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Closes out the current directory.
    ///
    /// Sorts the buffer ascending by time index (stable, so snapshots with
    /// equal indices keep encounter order), strips the indices, buckets the
    /// sequence under its length, and clears the buffer for the next
    /// directory. An empty buffer yields a zero-length sequence under
    /// key 0.
    pub fn flush_directory(&mut self) {
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.sort_by_key(|snapshot| snapshot.time_index);

        let sequence: ExperimentSequence =
            buffer.into_iter().map(|snapshot| snapshot.grid).collect();
        self.dataset.insert(sequence);
    }

    /// Number of directories flushed so far.
    pub fn completed(&self) -> usize {
        self.dataset.num_sequences()
    }

    /// Consumes the aggregator and returns the dataset.
    ///
    /// Any still-buffered snapshots are discarded; the walk flushes the
    /// final directory before calling this.
    pub fn finish(self) -> Dataset {
        self.dataset
    }
}
