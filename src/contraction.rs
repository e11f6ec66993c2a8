mod cut;
mod karger;
mod trace;

pub use cut::Cut;
pub use karger::run_trace;
pub use trace::{MergePair, Termination, Trace, TraceStep};
