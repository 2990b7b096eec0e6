mod scan;
mod state;


pub use scan::ScanSession;
pub use state::{DecodeOutcome, ScanState};
