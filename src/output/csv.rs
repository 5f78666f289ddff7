//! Lossless CSV export.
//!
//! Values are written with `f64`'s shortest round-trip formatting, so
//! parsing a field back yields the exact number that was written.

use std::io::{self, Write};

use super::Formatter;
use crate::beamforming::BearingResponse;
use crate::signal_processing::Spectrogram;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, response: &BearingResponse) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = write_response_csv(&mut buf, response);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Write `angle_rad,angle_deg,power` rows
pub fn write_response_csv<W: Write>(mut writer: W, response: &BearingResponse) -> io::Result<()> {
    writeln!(writer, "angle_rad,angle_deg,power")?;
    for point in response.points() {
        writeln!(
            writer,
            "{},{},{}",
            point.angle_rad,
            point.angle_deg(),
            point.power
        )?;
    }
    Ok(())
}

/// Write `time_s,frequency_hz,magnitude` rows in time-major order
pub fn write_spectrogram_csv<W: Write>(mut writer: W, spectrogram: &Spectrogram) -> io::Result<()> {
    writeln!(writer, "time_s,frequency_hz,magnitude")?;
    for (t, f, m) in spectrogram.triples() {
        writeln!(writer, "{},{},{}", t, f, m)?;
    }
    Ok(())
}
