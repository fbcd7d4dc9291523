// Assembles indicator output into records for the display layer
pub mod snapshot;

pub use snapshot::build_snapshot;
