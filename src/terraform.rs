pub mod state;

pub use state::{
    InstanceSummary, ResourceSummary, StateFileListing, StateSummary, normalize_and_filter,
};
