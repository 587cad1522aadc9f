use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::MergeArgs,
    document::Document,
    store::{FileStore, LineStore},
};

pub fn execute(args: &MergeArgs) -> Result<()> {
    let mut target = Document::open(FileStore::new(&args.input))
        .with_context(|| format!("Opening merge target {:?}", args.input))?;
    let source = Document::open(FileStore::new(&args.from))
        .with_context(|| format!("Opening merge source {:?}", args.from))?;

    let incoming = source.data_records().cloned().collect::<Vec<_>>();
    let summary = target.merge_records(incoming, &args.key);

    match &args.output {
        Some(output) => FileStore::create_if_missing(output)
            .write_all_lines(&target.write_lines())
            .with_context(|| format!("Writing {output:?}"))?,
        None => target
            .save()
            .with_context(|| format!("Writing {:?}", args.input))?,
    }
    info!(
        "Merged {} line(s) from {:?} on '{}': {} updated, {} appended",
        summary.total(),
        args.from,
        args.key,
        summary.updated,
        summary.appended
    );
    Ok(())
}
