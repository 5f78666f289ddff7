#![allow(dead_code, unused_imports)]

mod generate;

pub use generate::{plane_wave_sensors, tone, tone_config};
