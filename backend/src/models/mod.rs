pub mod checksum;
pub mod location;
pub mod snapshot;
pub mod time;

pub use checksum::calculate_fingerprint;
pub use location::*;
pub use snapshot::*;
pub use time::*;
