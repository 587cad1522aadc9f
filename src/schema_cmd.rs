use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::{
    cli::{CheckArgs, InitArgs},
    config::RecordSchema,
    document::Document,
    line::LineKind,
    store::FileStore,
};

pub fn init(args: &InitArgs) -> Result<()> {
    let schema = RecordSchema::load(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let binding = schema.bind()?;
    let mut document =
        Document::open_with_schema(FileStore::create_if_missing(&args.input), binding.titles())
            .with_context(|| format!("Applying schema {:?} to {:?}", args.schema, args.input))?;
    document
        .save()
        .with_context(|| format!("Writing {:?}", args.input))?;
    info!(
        "{:?} now carries {} column(s)",
        args.input,
        document.columns().len()
    );
    Ok(())
}

pub fn check(args: &CheckArgs) -> Result<()> {
    let schema = RecordSchema::load(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let binding = schema.bind()?;
    let document = Document::open(FileStore::new(&args.input))
        .with_context(|| format!("Opening {:?}", args.input))?;

    let columns = document.column_list();
    for field in binding.fields() {
        if !columns.contains(&field.name) {
            warn!("Column '{}' is missing from {:?}", field.name, args.input);
        }
    }

    let mut fallbacks = 0usize;
    for (idx, record) in document.iter().enumerate() {
        if record.kind() != LineKind::Data {
            continue;
        }
        for (field, raw) in binding.fallbacks(record) {
            warn!(
                "Line {}: column '{}' value '{}' is not a valid {}",
                idx + 1,
                field.name,
                raw,
                field.kind
            );
            fallbacks += 1;
        }
    }

    if fallbacks > 0 {
        bail!(
            "{fallbacks} value(s) in {:?} do not match schema {:?}",
            args.input,
            args.schema
        );
    }
    info!(
        "{} data line(s) in {:?} match schema {:?}",
        document.data_count(),
        args.input,
        args.schema
    );
    Ok(())
}
