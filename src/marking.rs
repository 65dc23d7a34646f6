//! Deletion and segment-break flags shared by all filters of a pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flags for a single point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Marking {
    pub deleted: bool,
    /// The next surviving point must start a new segment
    pub segment_break: bool,
}

/// Per-point deletion decisions accumulated across a pipeline run.
///
/// Marks only ever get added: a deleted point stays deleted, a segment break
/// is only recorded together with a deletion, and the deletion count never
/// decreases. Queries and marks outside the track range are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkingData {
    markings: Vec<Marking>,
    num_deleted: usize,
}

impl MarkingData {
    /// Create unmarked flags for a track with `num_points` points.
    pub fn new(num_points: usize) -> Self {
        Self {
            markings: vec![Marking::default(); num_points],
            num_deleted: 0,
        }
    }

    pub fn num_points(&self) -> usize {
        self.markings.len()
    }

    pub fn num_deleted(&self) -> usize {
        self.num_deleted
    }

    pub fn is_deleted(&self, index: usize) -> bool {
        self.markings.get(index).is_some_and(|m| m.deleted)
    }

    pub fn is_segment_break(&self, index: usize) -> bool {
        self.markings.get(index).is_some_and(|m| m.segment_break)
    }

    /// Mark a point for deletion without a segment break.
    pub fn mark_for_deletion(&mut self, index: usize) {
        self.mark(index, true, false);
    }

    /// Mark a point for deletion and record that the next surviving point
    /// must start a new segment.
    pub fn mark_for_deletion_with_break(&mut self, index: usize) {
        self.mark(index, true, true);
    }

    /// Apply a deletion request. A `false` delete flag is a no-op, including
    /// any requested segment break.
    pub fn mark(&mut self, index: usize, delete: bool, segment_break: bool) {
        if !delete {
            return;
        }
        let Some(marking) = self.markings.get_mut(index) else {
            return;
        };
        if !marking.deleted {
            marking.deleted = true;
            self.num_deleted += 1;
        }
        if segment_break {
            marking.segment_break = true;
        }
    }

    /// Mark every point whose flag is set.
    pub fn mark_points_for_deletion(&mut self, delete_flags: &[bool]) {
        for (i, &delete) in delete_flags.iter().enumerate() {
            self.mark(i, delete, false);
        }
    }

    /// Mark every point whose delete flag is set, with the matching segment break.
    pub fn mark_points_with_breaks(&mut self, delete_flags: &[bool], break_flags: &[bool]) {
        for (i, &delete) in delete_flags.iter().enumerate() {
            self.mark(i, delete, break_flags.get(i).copied().unwrap_or(false));
        }
    }

    /// Indices of all points marked for deletion, in track order.
    pub fn deleted_indices(&self) -> Vec<usize> {
        self.markings
            .iter()
            .enumerate()
            .filter(|(_, m)| m.deleted)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn markings(&self) -> &[Marking] {
        &self.markings
    }
}
