mod csv;
mod json;
mod text;

use chrono::Utc;
use rolling_stats::Stats;
use serde::Serialize;

use crate::beamforming::BearingResponse;
use crate::signal_processing::power_to_db;

pub use self::csv::{CsvFormatter, write_response_csv, write_spectrogram_csv};
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Summary statistics over the powers of a bearing response
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSummary {
    pub count: usize,
    pub best_angle_deg: f64,
    pub peak_power: f64,
    pub mean_power: f64,
    pub std_dev_power: f64,
    pub min_power: f64,
    /// Peak power over mean power in dB
    pub peak_to_mean_db: f64,
}

impl ResponseSummary {
    pub fn from_response(response: &BearingResponse) -> Self {
        let mut stats: Stats<f64> = Stats::new();
        for point in response.points() {
            stats.update(point.power);
        }
        let best = response.best();

        Self {
            count: stats.count,
            best_angle_deg: best.angle_deg(),
            peak_power: best.power,
            mean_power: stats.mean,
            std_dev_power: stats.std_dev,
            min_power: stats.min,
            peak_to_mean_db: power_to_db(best.power) - power_to_db(stats.mean),
        }
    }
}

pub trait Formatter {
    fn format(&self, response: &BearingResponse) -> String;
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
