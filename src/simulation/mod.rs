mod noise;
mod synth;

pub use noise::{add_gaussian_noise, create_rng};
pub use synth::{SignalSynthesizer, Synthesis};
