use anyhow::{Context, Result};
use log::info;
use serde_json::{Map, Value};

use crate::{
    cli::{ColumnsArgs, PreviewArgs},
    document::Document,
    store::FileStore,
    table::render_table,
};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let document = Document::open(FileStore::new(&args.input))
        .with_context(|| format!("Opening {:?}", args.input))?;
    let table = document.data();
    let (headers, mut cells) = table.grid();
    cells.truncate(args.limit);

    if args.json {
        let rendered = serde_json::to_string_pretty(&rows_as_json(&headers, &cells))
            .context("Serializing preview rows to JSON")?;
        println!("{rendered}");
    } else {
        print!("{}", render_table(&headers, &cells));
    }
    info!(
        "Displayed {} of {} data line(s) from {:?}",
        cells.len(),
        table.len(),
        args.input
    );
    Ok(())
}

pub fn list_columns(args: &ColumnsArgs) -> Result<()> {
    let document = Document::open(FileStore::new(&args.input))
        .with_context(|| format!("Opening {:?}", args.input))?;
    let columns = document.columns();
    let rows = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| vec![(idx + 1).to_string(), name.clone()])
        .collect::<Vec<_>>();
    let headers = vec!["#".to_string(), "column".to_string()];
    print!("{}", render_table(&headers, &rows));
    info!("{:?} has {} column(s)", args.input, columns.len());
    Ok(())
}

fn rows_as_json(headers: &[String], cells: &[Vec<String>]) -> Value {
    Value::Array(
        cells
            .iter()
            .map(|row| {
                let object = headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.clone(), Value::String(cell.clone())))
                    .collect::<Map<String, Value>>();
                Value::Object(object)
            })
            .collect(),
    )
}

