use crate::analyzer::ResultEntry;
use anyhow::{Context, Result};
use std::{
    borrow::Cow,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

const CSV_HEADER: [&str; 3] = ["file", "num_paths", "num_operations"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One human-readable line per document on stdout.
    Text,
    /// A CSV file at the reporter's configured path.
    Table,
}

pub struct Reporter {
    csv_path: PathBuf,
}

impl Reporter {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Renders `results` in the order given; nothing is sorted.
    pub fn report(&self, results: &[ResultEntry], mode: OutputMode) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match mode {
            OutputMode::Text => self.write_text(results, &mut out),
            OutputMode::Table => {
                let path = self.export_csv(results)?;
                writeln!(out, "Results written to {}", path.display())?;
                Ok(())
            }
        }
    }

    pub fn write_text<W: Write>(&self, results: &[ResultEntry], out: &mut W) -> Result<()> {
        for entry in results {
            writeln!(
                out,
                "{}: {} unique paths, {} operations",
                entry.path.display(),
                entry.stats.num_paths,
                entry.stats.num_operations
            )?;
        }
        writeln!(out, "Total OpenAPI 3.x files: {}", results.len())?;
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, results: &[ResultEntry], out: &mut W) -> Result<()> {
        write_row(out, CSV_HEADER.iter().map(|h| Cow::Borrowed(*h)))?;
        for entry in results {
            let row = [
                entry.path.display().to_string(),
                entry.stats.num_paths.to_string(),
                entry.stats.num_operations.to_string(),
            ];
            write_row(out, row.into_iter().map(Cow::<str>::Owned))?;
        }
        Ok(())
    }

    /// Writes the CSV to the configured path, creating its directory if needed.
    pub fn export_csv(&self, results: &[ResultEntry]) -> Result<PathBuf> {
        if let Some(parent) = self.csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = File::create(&self.csv_path)
            .with_context(|| format!("Failed to create {}", self.csv_path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_csv(results, &mut writer)?;
        writer.flush()?;

        info!("Wrote {} rows to {}", results.len(), self.csv_path.display());
        Ok(self.csv_path.clone())
    }
}

fn write_row<'a, W: Write>(out: &mut W, fields: impl Iterator<Item = Cow<'a, str>>) -> io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            out.write_all(b",")?;
        }
        first = false;
        out.write_all(escape_field(&field).as_bytes())?;
    }
    out.write_all(b"\r\n")
}

// Quote only when needed, doubling embedded quotes.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
