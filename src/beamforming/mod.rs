pub mod beamformer;
pub mod scanner;

pub use beamformer::{BeamformResult, Beamformer, form_beam};
pub use scanner::{BearingPoint, BearingResponse, BearingScanner, ScanRange, scan};
