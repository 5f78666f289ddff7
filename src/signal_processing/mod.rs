pub mod delay;
pub mod math;
pub mod spectrogram;

pub use delay::{FractionalDelay, apply_delay};
pub use math::{angle_error, mean_square, power_to_db};
pub use spectrogram::{Spectrogram, SpectrogramRenderer};
