
pub mod adaptive;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod goertzel;
pub mod stream;
pub mod synth;
pub mod tracing_init;
pub mod wav;

pub use adaptive::{AdaptiveConfig, AdaptiveDetector, DetectionMode, QualityEstimate};
pub use config::DetectorConfig;
pub use detect::{Detector, ToneEnergies};
pub use error::DtmfError;
pub use synth::{generate_dtmf, white_noise};
