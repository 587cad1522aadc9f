use anyhow::{Context, Result, bail};
use log::info;
use similar::TextDiff;

use crate::{
    cli::FormatArgs,
    document::Document,
    store::{FileStore, LineStore},
};

pub fn execute(args: &FormatArgs) -> Result<()> {
    let original = FileStore::new(&args.input)
        .read_all_lines()
        .with_context(|| format!("Reading {:?}", args.input))?;
    let document = Document::from_lines(&original);
    let normalized = document.write_lines();

    if args.check {
        if original == normalized {
            info!("{:?} is already normalized", args.input);
            return Ok(());
        }
        print!("{}", render_diff(&original, &normalized, &args.input.display().to_string()));
        bail!("{:?} would be reformatted", args.input);
    }

    let target = args.output.as_ref().unwrap_or(&args.input);
    FileStore::new(target)
        .write_all_lines(&normalized)
        .with_context(|| format!("Writing {target:?}"))?;
    info!(
        "Formatted {} line(s) ({} data) into {:?}",
        normalized.len(),
        document.data_count(),
        target
    );
    Ok(())
}

pub fn render_diff(original: &[String], normalized: &[String], name: &str) -> String {
    let before = join_lines(original);
    let after = join_lines(normalized);
    let formatted_name = format!("{name} (formatted)");
    let diff = TextDiff::from_lines(&before, &after);
    diff.unified_diff()
        .context_radius(2)
        .header(name, &formatted_name)
        .to_string()
}

fn join_lines(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}
