use std::io::Write;

use filmview_core::ViewRow;

use crate::error::CliResult;

pub fn write_created<W: Write>(out: &mut W, view: &str) -> CliResult<()> {
    writeln!(out, "View '{view}' created successfully.")?;
    Ok(())
}

/// One line per row: tuples, or JSON objects when `json` is set.
pub fn write_rows<W: Write>(out: &mut W, rows: &[ViewRow], json: bool) -> CliResult<()> {
    for row in rows {
        if json {
            serde_json::to_writer(&mut *out, row)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{row}")?;
        }
    }
    out.flush()?;
    Ok(())
}
