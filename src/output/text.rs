use std::fmt::Write;

use super::{Formatter, ResponseSummary};
use crate::beamforming::BearingResponse;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, response: &BearingResponse) -> String {
        let summary = ResponseSummary::from_response(response);
        let mut out = format!(
            "Bearing: {:>6.1}° peak power: {:.4} ({:.1} dB above mean, {} angles)",
            summary.best_angle_deg, summary.peak_power, summary.peak_to_mean_db, summary.count
        );

        if self.verbose {
            let relative = response.relative_db();
            for (point, db) in response.points().iter().zip(relative) {
                let _ = write!(
                    out,
                    "\n  {:>7.2}°  {:>10.6}  {:>7.2} dB",
                    point.angle_deg(),
                    point.power,
                    db
                );
            }
        }
        out
    }
}
