//! Newline-delimited JSON input and output

use anyhow::{Context, Result};
use mailstep_core::Action;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read one action per non-blank line
pub fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    parse_actions(BufReader::new(file))
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn parse_actions(reader: impl BufRead) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("Invalid JSON on line {}", index + 1))?;
        actions.push(Action::from_value(&value));
    }
    Ok(actions)
}

/// Write records as compact JSON, one per line, to a file or stdout
pub fn write_records<T: Serialize>(path: Option<&Path>, records: &[T]) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_lines(BufWriter::new(file), records)
        }
        None => write_lines(std::io::stdout().lock(), records),
    }
    .context("Failed to write output")
}

fn write_lines<T: Serialize>(mut writer: impl Write, records: &[T]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
