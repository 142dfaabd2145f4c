use std::io::{self, Write};
use std::path::Path;

use crate::sim::CycleRecord;

fn opt_bool(v: Option<bool>) -> String {
    v.map(|b| u8::from(b).to_string()).unwrap_or_default()
}

fn opt_f64(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}

/// Write a controller run to CSV format.
///
/// Columns: time, has_access, att_err, rate_err, activate, imaged
/// (error norms of the guidance input; absent inputs leave the field empty)
pub fn write_cycles<W: Write>(writer: &mut W, records: &[CycleRecord]) -> io::Result<()> {
    writeln!(writer, "time,has_access,att_err,rate_err,activate,imaged")?;

    for r in records {
        let guid = r.inputs.att_guid;
        writeln!(
            writer,
            "{:.4},{},{},{},{},{}",
            r.time,
            opt_bool(r.inputs.has_access()),
            opt_f64(guid.map(|g| g.sigma_br.norm())),
            opt_f64(guid.map(|g| g.omega_br_b.norm())),
            r.command.as_u8(),
            u8::from(r.imaged),
        )?;
    }

    Ok(())
}

/// Write a controller run to a CSV file at the given path.
pub fn write_cycles_file(path: impl AsRef<Path>, records: &[CycleRecord]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_cycles(&mut file, records)?;
    file.flush()
}
