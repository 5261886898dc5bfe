//! Plain-text system files
//!
//! One body per line, whitespace separated:
//!
//! ```text
//! <Name> <DisplayRadius> <Color> <Mass> <X> <Y> <Vx> <Vy> [<ParentName>]
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The kind comes from
//! the name prefix (`Star`, `Planet`, `Satellite`). A parent must be declared
//! on an earlier line. Bad lines are reported and skipped; the rest of the
//! file still loads.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{SimError, SimResult};
use crate::simulation::states::{Body, BodyKind, NVec2, System};

/// Result of reading a system file: whatever loaded plus per-line warnings
#[derive(Debug, Default)]
pub struct LoadReport {
    pub system: System,
    pub warnings: Vec<SimError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A parsed line before parent resolution
struct Record<'a> {
    body: Body,
    parent: Option<&'a str>,
}

fn parse_record(line_no: usize, line: &str) -> SimResult<Record<'_>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 8 && fields.len() != 9 {
        return Err(SimError::MalformedRecord {
            line: line_no,
            reason: format!("expected 8 or 9 fields, found {}", fields.len()),
        });
    }

    let name = fields[0];
    let kind = BodyKind::from_name(name).ok_or_else(|| SimError::MalformedRecord {
        line: line_no,
        reason: format!("cannot infer kind from name `{name}`"),
    })?;

    // `parse` also accepts NaN and infinities
    let num = |idx: usize, what: &str| -> SimResult<f64> {
        match fields[idx].parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(SimError::MalformedRecord {
                line: line_no,
                reason: format!("{what} `{}` is not a finite number", fields[idx]),
            }),
        }
    };

    let radius = num(1, "radius")?;
    let m = num(3, "mass")?;
    let x = NVec2::new(num(4, "x")?, num(5, "y")?);
    let v = NVec2::new(num(6, "vx")?, num(7, "vy")?);

    let body = Body::new(name, kind, m, radius, x, v).with_color(fields[2]);
    Ok(Record {
        body,
        parent: fields.get(8).copied(),
    })
}

/// Parse a system from any buffered reader
pub fn read_system<R: BufRead>(reader: R) -> SimResult<LoadReport> {
    let mut report = LoadReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let record = match parse_record(line_no, trimmed) {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping record: {err}");
                report.warnings.push(err);
                continue;
            }
        };

        let name = record.body.name.clone();
        let id = match report.system.push(record.body) {
            Ok(id) => id,
            Err(err) => {
                let err = SimError::MalformedRecord {
                    line: line_no,
                    reason: err.to_string(),
                };
                warn!("skipping record: {err}");
                report.warnings.push(err);
                continue;
            }
        };

        let Some(parent_name) = record.parent else {
            continue;
        };
        // only bodies declared above are visible
        match report.system.find(parent_name) {
            None => {
                let err = SimError::UnresolvedParent {
                    line: line_no,
                    name,
                    parent: parent_name.to_string(),
                };
                warn!("{err}; loading as a free body");
                report.warnings.push(err);
            }
            Some(parent) => {
                if let Err(err) = report.system.set_parent(id, parent) {
                    warn!("line {line_no}: {err}; loading as a free body");
                    report.warnings.push(err);
                }
            }
        }
    }

    Ok(report)
}

/// Load a system file from disk
pub fn load_system(path: impl AsRef<Path>) -> SimResult<LoadReport> {
    let path = path.as_ref();
    let report = read_system(BufReader::new(File::open(path)?))?;
    info!(
        path = %path.display(),
        bodies = report.system.len(),
        warnings = report.warnings.len(),
        "system loaded"
    );
    Ok(report)
}

/// Write `sys` in the system file format
pub fn write_system<W: Write>(mut out: W, sys: &System) -> SimResult<()> {
    for body in &sys.bodies {
        write!(
            out,
            "{} {} {} {:e} {:e} {:e} {:e} {:e}",
            body.name, body.radius, body.color, body.m, body.x.x, body.x.y, body.v.x, body.v.y
        )?;
        if let Some(parent) = body.parent.and_then(|p| sys.get(p)) {
            write!(out, " {}", parent.name)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Save `sys` to disk
pub fn save_system(path: impl AsRef<Path>, sys: &System) -> SimResult<()> {
    let path = path.as_ref();
    write_system(BufWriter::new(File::create(path)?), sys)?;
    info!(path = %path.display(), bodies = sys.len(), "system saved");
    Ok(())
}
