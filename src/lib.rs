pub mod array;
pub mod beamforming;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod signal_processing;
pub mod simulation;
pub mod waveform;
pub mod wav;

pub use config::SimConfig;
pub use error::{Result, SimError, SimWarning};
pub use processing::{Simulation, SimulationReport};
pub use waveform::{SensorSignalSet, Waveform};
pub use wav::save_wav;
