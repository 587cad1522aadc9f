//! Keyed upsert of incoming records into a document.

use log::debug;

use crate::{
    document::Document,
    error::Result,
    line::LineKind,
    mapping::{Binding, TypedRecord, TypedRow},
    record::Record,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub appended: usize,
}

impl MergeSummary {
    pub fn total(&self) -> usize {
        self.updated + self.appended
    }
}

impl<S> Document<S> {
    /// Upserts `incoming` by the value of column `key`.
    ///
    /// The first data line whose key matches takes the incoming fields and
    /// columns; its identity, kind and comment stay. Unmatched records are
    /// appended as they are.
    pub fn merge_records<I>(&mut self, incoming: I, key: &str) -> MergeSummary
    where
        I: IntoIterator<Item = Record>,
    {
        let mut summary = MergeSummary::default();
        for record in incoming {
            let key_value = record.get_named(key);
            let existing = self.records.iter_mut().find(|candidate| {
                candidate.kind() == LineKind::Data && candidate.get_named(key) == key_value
            });
            match existing {
                Some(target) => {
                    debug!("Merge key {key}={key_value:?} updates {}", target.id());
                    target.overwrite_from(&record);
                    summary.updated += 1;
                }
                None => {
                    debug!("Merge key {key}={key_value:?} appended");
                    self.push(record);
                    summary.appended += 1;
                }
            }
        }
        debug!(
            "Merged on '{key}': {} updated, {} appended",
            summary.updated, summary.appended
        );
        summary
    }

    /// Typed form of [`Document::merge_records`]: each row is encoded before
    /// its key is compared.
    pub fn merge<T, I>(&mut self, incoming: I, key: &str) -> Result<MergeSummary>
    where
        T: TypedRecord,
        I: IntoIterator<Item = TypedRow<T>>,
    {
        Binding::of::<T>()?;
        Ok(self.merge_records(incoming.into_iter().map(TypedRow::into_record), key))
    }
}
