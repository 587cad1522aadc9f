//! Per-line data model.
//!
//! A [`Record`] holds one physical line: its positional fields, the column
//! names used for name-keyed access, a trailing comment and its [`LineKind`].
//! Records compare by identity, not by content.

use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::line::LineKind;

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    fn next() -> Self {
        RecordId(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Column-name list shared between a document and the records it created.
///
/// Clones share one buffer: extending the list through any handle is visible
/// through all of them.
#[derive(Clone, Default)]
pub struct ColumnList(Rc<RefCell<Vec<String>>>);

impl ColumnList {
    pub fn new(columns: Vec<String>) -> Self {
        ColumnList(Rc::new(RefCell::new(columns)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.borrow().iter().position(|column| column == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn replace(&self, columns: Vec<String>) {
        *self.0.borrow_mut() = columns;
    }

    /// Appends every name not already present; returns how many were added.
    pub fn extend_missing<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = self.0.borrow_mut();
        let before = columns.len();
        for name in names {
            let name = name.as_ref();
            if !columns.iter().any(|existing| existing == name) {
                columns.push(name.to_string());
            }
        }
        columns.len() - before
    }

    pub fn shares_with(&self, other: &ColumnList) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ColumnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

#[derive(Debug, Clone)]
enum Columns {
    Shared(ColumnList),
    Owned(Vec<String>),
}

impl Columns {
    fn position(&self, name: &str) -> Option<usize> {
        match self {
            Columns::Shared(list) => list.position(name),
            Columns::Owned(names) => names.iter().position(|column| column == name),
        }
    }

    fn to_vec(&self) -> Vec<String> {
        match self {
            Columns::Shared(list) => list.to_vec(),
            Columns::Owned(names) => names.clone(),
        }
    }

    /// Detaches from a shared list (if any) and appends `name`.
    fn push(&mut self, name: &str) -> usize {
        let mut names = match std::mem::replace(self, Columns::Owned(Vec::new())) {
            Columns::Shared(list) => list.to_vec(),
            Columns::Owned(names) => names,
        };
        names.push(name.to_string());
        let index = names.len() - 1;
        *self = Columns::Owned(names);
        index
    }
}

#[derive(Debug)]
pub struct Record {
    id: RecordId,
    fields: Vec<String>,
    columns: Columns,
    comment: String,
    kind: LineKind,
}

impl Record {
    /// Creates an empty data record, the most common reason to build one.
    pub fn new() -> Self {
        Self::with_kind(LineKind::Data)
    }

    pub fn with_kind(kind: LineKind) -> Self {
        Record {
            id: RecordId::next(),
            fields: Vec::new(),
            columns: Columns::Owned(Vec::new()),
            comment: String::new(),
            kind,
        }
    }

    pub(crate) fn from_parts(
        fields: Vec<String>,
        columns: ColumnList,
        kind: LineKind,
        comment: String,
    ) -> Self {
        Record {
            id: RecordId::next(),
            fields,
            columns: Columns::Shared(columns),
            comment,
            kind,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: LineKind) {
        self.kind = kind;
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn set_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
    }

    pub fn columns(&self) -> Vec<String> {
        self.columns.to_vec()
    }

    pub fn set_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Columns::Owned(columns.into_iter().map(Into::into).collect());
    }

    /// Binds the record to a shared column list instead of a private one.
    pub fn share_columns(&mut self, columns: &ColumnList) {
        self.columns = Columns::Shared(columns.clone());
    }

    pub fn shares_columns_with(&self, columns: &ColumnList) -> bool {
        matches!(&self.columns, Columns::Shared(list) if list.shares_with(columns))
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.position(name)
    }

    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Positional read with a fallback.
    ///
    /// The slot right after the last field reads as the comment when one is
    /// present, so a trailing comment can serve as an implicit last column.
    pub fn get_or<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        if let Some(value) = self.fields.get(index) {
            return value;
        }
        if index == self.fields.len() && !self.comment.is_empty() {
            return &self.comment;
        }
        default
    }

    pub fn get_named(&self, name: &str) -> &str {
        match self.columns.position(name) {
            Some(index) => self.get(index),
            None => "",
        }
    }

    pub fn get_named_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.columns.position(name) {
            Some(index) => self.get_or(index, default),
            None => default,
        }
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if index >= self.fields.len() {
            self.fields.resize(index + 1, String::new());
        }
        self.fields[index] = value.into();
    }

    /// Writes by column name, appending the name to this record's columns
    /// when it is not known yet.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) {
        let index = match self.columns.position(name) {
            Some(index) => index,
            None => self.columns.push(name),
        };
        self.set(index, value);
    }

    /// Copies fields and columns from `source`; identity, kind and comment
    /// stay as they are.
    pub(crate) fn overwrite_from(&mut self, source: &Record) {
        self.fields = source.fields.clone();
        self.columns = source.columns.clone();
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a distinct record: same content, fresh identity.
impl Clone for Record {
    fn clone(&self) -> Self {
        Record {
            id: RecordId::next(),
            fields: self.fields.clone(),
            columns: self.columns.clone(),
            comment: self.comment.clone(),
            kind: self.kind,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}
