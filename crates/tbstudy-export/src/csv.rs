use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;

use jiff::civil::DateTime;

use crate::error::ExportError;
use crate::row::ExportRow;

/// Quote a field when it holds a separator, quote or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_line<'a, W: Write>(
    w: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> Result<(), ExportError> {
    let line: Vec<Cow<'_, str>> = fields.map(escape).collect();
    writeln!(w, "{}", line.join(","))?;
    Ok(())
}

/// Write a header taken from the first row, then every row. All rows must
/// carry the same columns in the same order.
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<(), ExportError> {
    let header = rows.first().ok_or(ExportError::Empty)?;
    for (index, row) in rows.iter().enumerate() {
        if !row.columns().eq(header.columns()) {
            return Err(ExportError::ColumnMismatch { row: index });
        }
    }

    let mut w = BufWriter::new(writer);
    write_line(&mut w, header.columns())?;
    for row in rows {
        write_line(&mut w, row.values())?;
    }
    w.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| ExportError::Io(std::io::Error::other(e)))
}

/// Write rows to `path`, going through a temp file and a rename so a
/// half-written export never replaces a complete one.
pub fn write_csv_file(path: &Path, rows: &[ExportRow]) -> Result<(), ExportError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let file = std::fs::File::create(tmp_path)?;
    if let Err(e) = write_csv(file, rows) {
        let _ = std::fs::remove_file(tmp_path);
        return Err(e);
    }
    std::fs::rename(tmp_path, path)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "export written");
    Ok(())
}

/// `tb_study_data_<participant>_<YYYYmmdd_HHMMSS>.csv`. Characters outside
/// `[A-Za-z0-9_-]` in the participant ID become `_`.
pub fn export_filename(participant_id: &str, at: DateTime) -> String {
    let id: String = participant_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let id = if id.is_empty() { "UNKNOWN".to_string() } else { id };
    format!("tb_study_data_{id}_{}.csv", at.strftime("%Y%m%d_%H%M%S"))
}
