use anyhow::Result;
use serde::Serialize;

/// One marker position per frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceRecord {
    pub frame: usize,
    pub timestamp_ms: f64,
    pub distance_m: f64,
    pub lon: f64,
    pub lat: f64,
}

pub fn write_csv(path: &str, records: &[TraceRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(fs_err::File::create(path)?);
    for rec in records {
        writer.serialize(rec)?;
    }
    writer.flush()?;
    info!("Wrote {} positions to {path}", records.len());
    Ok(())
}
