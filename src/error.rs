use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sensor shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Cannot delay an empty waveform")]
    EmptyWaveform,

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Non-fatal conditions that change the meaning of a result
///
/// Returned alongside the value they qualify rather than raised, so the
/// caller decides whether to continue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimWarning {
    #[error("Component at {frequency_hz:.1} Hz is at or above the Nyquist limit ({nyquist_hz:.1} Hz) and will alias")]
    NyquistViolation { frequency_hz: f64, nyquist_hz: f64 },

    #[error("Sample rate {sample_rate_hz} Hz is below {required_hz:.0} Hz; interpolation loss may outweigh one scan step and bias the bearing")]
    InterpolationLimited { sample_rate_hz: u32, required_hz: f64 },
}

pub type Result<T> = std::result::Result<T, SimError>;
