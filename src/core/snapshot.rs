//! Snapshots of history state used by undo/redo.

use super::record::CalculationRecord;

/// Immutable copy of the full record sequence at one instant.
///
/// Only the history manager creates or restores snapshots. The copy is
/// structural, so later changes to the live history never reach it.
///
/// `appended` is the record added by the `add` this snapshot sits on either
/// side of, or `None` when the transition was a `clear`. Undo and redo
/// report it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snapshot {
    records: Vec<CalculationRecord>,
    appended: Option<CalculationRecord>,
}

impl Snapshot {
    pub(crate) fn capture(
        records: &[CalculationRecord],
        appended: Option<CalculationRecord>,
    ) -> Self {
        Self::from_records(records.to_vec(), appended)
    }

    /// Take ownership of a sequence that is being replaced wholesale.
    pub(crate) fn from_records(
        records: Vec<CalculationRecord>,
        appended: Option<CalculationRecord>,
    ) -> Self {
        Self { records, appended }
    }

    /// Consume the snapshot, yielding the record sequence and the record
    /// appended on leaving it.
    pub(crate) fn into_parts(self) -> (Vec<CalculationRecord>, Option<CalculationRecord>) {
        (self.records, self.appended)
    }
}
