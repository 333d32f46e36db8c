pub mod backward_pass;
pub mod critical_path;
pub mod float;
pub mod forward_pass;

pub use backward_pass::{BackwardPass, LateDates};
pub use critical_path::CriticalPathTracer;
pub use float::FloatAnalysis;
pub use forward_pass::{EarlyDates, ForwardPass};
