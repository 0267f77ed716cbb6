//! DriftForce engine - drift detection over schema snapshots

pub mod detector;

pub use detector::DriftDetection;
