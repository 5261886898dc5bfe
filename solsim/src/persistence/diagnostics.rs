//! CSV export of the energy series collected by the engine.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::SimResult;
use crate::simulation::energy::EnergySample;

pub const STATS_HEADER: &str = "Time,KineticEnergy,PotentialEnergy,TotalEnergy";

/// Write one header line and one row per sample
pub fn write_stats_csv<W: Write>(mut out: W, samples: &[EnergySample]) -> SimResult<()> {
    writeln!(out, "{STATS_HEADER}")?;
    for s in samples {
        writeln!(out, "{:.4},{:.4e},{:.4e},{:.4e}", s.time, s.kinetic, s.potential, s.total)?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_stats_csv(path: impl AsRef<Path>, samples: &[EnergySample]) -> SimResult<()> {
    let path = path.as_ref();
    write_stats_csv(BufWriter::new(File::create(path)?), samples)?;
    info!(path = %path.display(), samples = samples.len(), "energy series saved");
    Ok(())
}
