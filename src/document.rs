//! File-level store of records.
//!
//! A [`Document`] keeps every physical line of a file as a [`Record`], in
//! order, plus the canonical column list. Reading classifies each raw line;
//! writing turns each record back into text. Only data lines are re-derived
//! (realigned to the canonical columns); titles and other lines keep their
//! content, so comments and blank lines survive a save untouched.

use itertools::Itertools;
use log::debug;

use crate::{
    error::Result,
    line::{COMMENT_MARKER, FIELD_DELIMITER, LineKind, TITLE_MARKER, classify},
    record::{ColumnList, Record, RecordId},
    store::{LineStore, MemoryStore},
    table::{Row, Table},
};

#[derive(Debug, Default)]
pub struct Document<S = MemoryStore> {
    pub(crate) records: Vec<Record>,
    pub(crate) columns: ColumnList,
    store: S,
}

impl Document<MemoryStore> {
    /// An empty, unbacked document. Saving writes into a private
    /// [`MemoryStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document whose canonical columns are fixed up front; a title
    /// line found by a later read does not replace them.
    pub fn with_columns<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Document {
            records: Vec::new(),
            columns: ColumnList::new(columns.into_iter().map(Into::into).collect()),
            store: MemoryStore::new(),
        }
    }

    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut document = Self::new();
        document.read_lines(lines);
        document
    }
}

impl<S: LineStore> Document<S> {
    pub fn open(store: S) -> Result<Self> {
        let lines = store.read_all_lines()?;
        let mut document = Document {
            records: Vec::new(),
            columns: ColumnList::default(),
            store,
        };
        document.read_lines(lines);
        Ok(document)
    }

    pub fn open_with_columns<I, C>(store: S, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let lines = store.read_all_lines()?;
        let mut document = Document {
            records: Vec::new(),
            columns: ColumnList::new(columns.into_iter().map(Into::into).collect()),
            store,
        };
        document.read_lines(lines);
        Ok(document)
    }

    /// Builds a document from a table: a title line from the table's columns
    /// (when it has any) followed by every row. Whatever the store already
    /// holds is read first and kept ahead of the new lines.
    pub fn from_table(table: Table, store: S) -> Result<Self> {
        let mut document = Self::open(store)?;
        let (columns, rows) = table.into_parts();
        document.columns.replace(columns.clone());
        if !columns.is_empty() {
            let mut titles = Record::with_kind(LineKind::Titles);
            titles.set_fields(columns);
            titles.share_columns(&document.columns);
            document.records.push(titles);
        }
        document
            .records
            .extend(rows.into_iter().map(Row::into_record));
        Ok(document)
    }

    pub fn save(&mut self) -> Result<()> {
        let lines = self.write_lines();
        debug!("Saving {} line(s)", lines.len());
        self.store.write_all_lines(&lines)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> Document<S> {
    /// Classifies every raw line into a record, in order, one record per
    /// line. The first title line establishes the canonical columns unless
    /// they are already set.
    pub fn read_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        self.records.clear();
        for raw_line in lines {
            let classified = classify(raw_line.as_ref());
            if classified.kind == LineKind::Titles && self.columns.is_empty() {
                debug!("Canonical columns captured: {:?}", classified.fields);
                self.columns.replace(classified.fields.clone());
            }
            self.records.push(Record::from_parts(
                classified.fields,
                self.columns.clone(),
                classified.kind,
                classified.comment,
            ));
        }
        debug!(
            "Read {} line(s), {} data line(s)",
            self.records.len(),
            self.data_count()
        );
    }

    pub fn write_lines(&self) -> Vec<String> {
        let columns = self.columns.to_vec();
        self.records
            .iter()
            .map(|record| render_record(record, &columns))
            .collect()
    }

    pub fn columns(&self) -> Vec<String> {
        self.columns.to_vec()
    }

    pub fn column_list(&self) -> &ColumnList {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn data_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.kind() == LineKind::Data)
            .count()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    pub fn data_records(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|record| record.kind() == LineKind::Data)
    }

    /// Appends a record and binds it to the canonical columns.
    pub fn add(&mut self, mut record: Record) -> RecordId {
        record.share_columns(&self.columns);
        let id = record.id();
        self.records.push(record);
        id
    }

    /// Inserts a record as-is at `index` (clamped to the end).
    pub fn insert(&mut self, index: usize, record: Record) -> RecordId {
        let index = index.min(self.records.len());
        let id = record.id();
        self.records.insert(index, record);
        id
    }

    /// Appends a record as-is, without touching its columns.
    pub fn push(&mut self, record: Record) -> RecordId {
        let id = record.id();
        self.records.push(record);
        id
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn find_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    /// Materialized copy of the data lines, detached from this document.
    pub fn data(&self) -> Table {
        let mut table = Table::new(self.columns.to_vec());
        for record in self.data_records() {
            let mut row = Row::new();
            row.set_fields(record.fields().iter().cloned());
            row.set_columns(record.columns());
            table.push(row);
        }
        table
    }
}

impl<'a, S> IntoIterator for &'a Document<S> {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn render_record(record: &Record, columns: &[String]) -> String {
    let delimiter = FIELD_DELIMITER.to_string();
    let mut line = match record.kind() {
        LineKind::Titles => format!("{}{}", TITLE_MARKER, record.fields().join(&delimiter)),
        LineKind::Data if columns.is_empty() => record.fields().join(&delimiter),
        LineKind::Data => columns
            .iter()
            .map(|column| record.get_named(column))
            .join(&delimiter),
        LineKind::Other => String::new(),
    };

    let comment = record.comment();
    if !comment.is_empty() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(COMMENT_MARKER);
        line.push_str(comment);
    }
    line
}
