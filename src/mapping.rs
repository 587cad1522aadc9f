//! Typed mapping between raw string fields and caller-defined record types.
//!
//! A typed record type declares its columns statically through
//! [`TypedRecord::FIELDS`]. That ordered list doubles as the title template
//! when a document is opened for the type. Decoding is tolerant: a value
//! that does not parse becomes the kind's zero value instead of an error.
//!
//! ```
//! use teabox_data::mapping::{FieldKind, FieldSpec, FieldValue, TypedRecord};
//!
//! #[derive(Debug, Default)]
//! struct Brick {
//!     id: String,
//!     amount: i64,
//! }
//!
//! impl TypedRecord for Brick {
//!     const FIELDS: &'static [FieldSpec] = &[
//!         FieldSpec::new("Brick", FieldKind::Text),
//!         FieldSpec::new("Amount", FieldKind::Integer),
//!     ];
//!
//!     fn value(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "Brick" => Some(FieldValue::Text(self.id.clone())),
//!             "Amount" => Some(FieldValue::Integer(self.amount)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_value(&mut self, name: &str, value: FieldValue) {
//!         match (name, value) {
//!             ("Brick", FieldValue::Text(v)) => self.id = v,
//!             ("Amount", FieldValue::Integer(v)) => self.amount = v,
//!             _ => {}
//!         }
//!     }
//! }
//! ```

use std::{
    fmt,
    ops::{Deref, DerefMut},
    str::FromStr,
};

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;

use crate::{
    document::Document,
    error::{FormatError, Result},
    line::LineKind,
    record::{Record, RecordId},
    store::LineStore,
};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

const RENDER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    Float,
    DateTime,
    Decimal,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Float => "float",
            FieldKind::DateTime => "datetime",
            FieldKind::Decimal => "decimal",
        }
    }

    /// Strict parse; `None` when `raw` is not a valid value of this kind.
    pub fn parse(&self, raw: &str) -> Option<FieldValue> {
        let trimmed = raw.trim();
        match self {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => trimmed.parse().ok().map(FieldValue::Integer),
            FieldKind::Boolean => parse_boolean(trimmed).map(FieldValue::Boolean),
            FieldKind::Float => trimmed.parse().ok().map(FieldValue::Float),
            FieldKind::DateTime => parse_date_time(trimmed).map(FieldValue::DateTime),
            FieldKind::Decimal => Decimal::from_str(trimmed).ok().map(FieldValue::Decimal),
        }
    }

    /// Tolerant parse: anything that does not parse is the zero value.
    pub fn decode(&self, raw: &str) -> FieldValue {
        self.parse(raw).unwrap_or_else(|| self.zero_value())
    }

    pub fn zero_value(&self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Integer => FieldValue::Integer(0),
            FieldKind::Boolean => FieldValue::Boolean(false),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::DateTime => FieldValue::DateTime(min_date_time()),
            FieldKind::Decimal => FieldValue::Decimal(Decimal::ZERO),
        }
    }

    /// Resolves a kind name as written in a schema file.
    pub fn resolve(column: &str, token: &str) -> Result<FieldKind> {
        let normalized = token.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(FieldKind::Text),
            "integer" | "int" => Ok(FieldKind::Integer),
            "boolean" | "bool" => Ok(FieldKind::Boolean),
            "float" | "double" => Ok(FieldKind::Float),
            "datetime" | "date-time" | "timestamp" | "date" => Ok(FieldKind::DateTime),
            "decimal" => Ok(FieldKind::Decimal),
            _ => Err(FormatError::UnsupportedFieldType {
                column: column.to_string(),
                kind: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The zero value for date-times: midnight, January 1st of year 1.
pub fn min_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn parse_boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Float(f64),
    DateTime(NaiveDateTime),
    Decimal(Decimal),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::DateTime(_) => FieldKind::DateTime,
            FieldValue::Decimal(_) => FieldKind::Decimal,
        }
    }

    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::DateTime(dt) => dt.format(RENDER_DATETIME_FORMAT).to_string(),
            FieldValue::Decimal(d) => d.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { name, kind }
    }
}

/// A record type with a statically declared, ordered column schema.
///
/// `value` returns `None` for an absent text value, which encodes as an
/// empty field. Every non-text field must always report a value of its
/// declared kind; [`Binding::of`] rejects the type otherwise.
pub trait TypedRecord: Default {
    const FIELDS: &'static [FieldSpec];

    fn value(&self, name: &str) -> Option<FieldValue>;

    fn set_value(&mut self, name: &str, value: FieldValue);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    pub name: String,
    pub kind: FieldKind,
}

/// A validated column schema, ready to decode and encode records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    fields: Vec<BoundField>,
}

impl Binding {
    pub fn of<T: TypedRecord>() -> Result<Self> {
        let sample = T::default();
        for spec in T::FIELDS {
            match sample.value(spec.name) {
                Some(value) if value.kind() != spec.kind => {
                    return Err(FormatError::UnsupportedFieldType {
                        column: spec.name.to_string(),
                        kind: format!("{} holding {}", spec.kind, value.kind()),
                    });
                }
                None if spec.kind != FieldKind::Text => {
                    return Err(FormatError::UnsupportedFieldType {
                        column: spec.name.to_string(),
                        kind: format!("{} without a value", spec.kind),
                    });
                }
                _ => {}
            }
        }
        Ok(Binding {
            fields: T::FIELDS
                .iter()
                .map(|spec| BoundField {
                    name: spec.name.to_string(),
                    kind: spec.kind,
                })
                .collect(),
        })
    }

    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = BoundField>,
    {
        Binding {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    /// The title template: column names in declaration order.
    pub fn titles(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    pub fn decode(&self, record: &Record) -> Vec<FieldValue> {
        self.fields
            .iter()
            .map(|field| field.kind.decode(record.get_named(&field.name)))
            .collect()
    }

    /// Named values that are non-empty yet fail the strict parse of their
    /// kind, i.e. the ones [`Binding::decode`] replaced by a zero value.
    pub fn fallbacks<'r>(&self, record: &'r Record) -> Vec<(&BoundField, &'r str)> {
        self.fields
            .iter()
            .filter_map(|field| {
                let raw = record.get_named(&field.name);
                if raw.trim().is_empty() || field.kind.parse(raw).is_some() {
                    None
                } else {
                    Some((field, raw))
                }
            })
            .collect()
    }
}

pub fn decode_into<T: TypedRecord>(record: &Record) -> T {
    let mut value = T::default();
    for spec in T::FIELDS {
        let raw = record.get_named(spec.name);
        value.set_value(spec.name, spec.kind.decode(raw));
    }
    value
}

pub fn encode_into<T: TypedRecord>(value: &T, record: &mut Record) {
    for spec in T::FIELDS {
        let rendered = value
            .value(spec.name)
            .map(|value| value.render())
            .unwrap_or_default();
        record.set_named(spec.name, rendered);
    }
}

/// A typed value together with the record that backs it.
///
/// Edits go to the typed value; [`TypedRow::encode`] copies them into the
/// record, which is what ends up in a document.
#[derive(Debug, Clone)]
pub struct TypedRow<T> {
    record: Record,
    value: T,
}

impl<T: TypedRecord> TypedRow<T> {
    pub fn new(value: T) -> Self {
        TypedRow {
            record: Record::new(),
            value,
        }
    }

    pub fn from_record(record: Record) -> Self {
        let value = decode_into(&record);
        TypedRow { record, value }
    }

    pub fn encode(&mut self) {
        encode_into(&self.value, &mut self.record);
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Encodes pending edits and hands over the backing record.
    pub fn into_record(mut self) -> Record {
        self.encode();
        self.record
    }
}

impl<T> Deref for TypedRow<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for TypedRow<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<S: LineStore> Document<S> {
    /// Opens `store` and imposes `template` as its titles.
    ///
    /// Existing titles gain the template columns they lack, appended in
    /// template order. A document without titles gets a title line prepended,
    /// unless it already holds data lines.
    pub fn open_with_schema<I, C>(store: S, template: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut document = Document::open(store)?;
        document.apply_template(template)?;
        Ok(document)
    }

    pub fn open_typed<T: TypedRecord>(store: S) -> Result<Self> {
        let binding = Binding::of::<T>()?;
        Self::open_with_schema(store, binding.titles())
    }
}

impl<S> Document<S> {
    pub fn apply_template<I, C>(&mut self, template: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let template = template
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>();

        if let Some(titles) = self
            .records
            .iter_mut()
            .find(|record| record.kind() == LineKind::Titles)
        {
            let added = self.columns.extend_missing(&template);
            titles.set_fields(self.columns.to_vec());
            debug!("Title template added {added} column(s)");
            return Ok(());
        }

        let data_lines = self.data_count();
        if data_lines > 0 {
            return Err(FormatError::SchemaConflict { data_lines });
        }

        self.columns.replace(template.clone());
        let mut titles = Record::with_kind(LineKind::Titles);
        titles.set_fields(template);
        titles.share_columns(&self.columns);
        self.records.insert(0, titles);
        debug!("Title line synthesized from template");
        Ok(())
    }

    /// Decodes every data line into a typed row backed by a copy of the line.
    pub fn rows_as<T: TypedRecord>(&self) -> Result<Vec<TypedRow<T>>> {
        Binding::of::<T>()?;
        Ok(self
            .data_records()
            .map(|record| TypedRow::from_record(record.clone()))
            .collect())
    }

    /// Runs `update` on the typed form of every data line and writes the
    /// result back into the line. Returns the number of lines visited.
    pub fn update_as<T, F>(&mut self, mut update: F) -> Result<usize>
    where
        T: TypedRecord,
        F: FnMut(&mut T),
    {
        Binding::of::<T>()?;
        let mut visited = 0usize;
        for record in self
            .records
            .iter_mut()
            .filter(|record| record.kind() == LineKind::Data)
        {
            let mut value = decode_into::<T>(record);
            update(&mut value);
            encode_into(&value, record);
            visited += 1;
        }
        Ok(visited)
    }

    /// Appends `value` as a data line bound to the canonical columns.
    pub fn add_typed<T: TypedRecord>(&mut self, value: &T) -> RecordId {
        let mut record = Record::new();
        record.share_columns(&self.columns);
        encode_into(value, &mut record);
        self.push(record)
    }
}
