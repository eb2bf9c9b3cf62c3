pub mod duration_probe;

pub use duration_probe::{
    spawn_probe, DurationProbe, MediaDurationProbe, ProbeError, ProbeReport, ProbeResult,
};
