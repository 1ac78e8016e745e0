//! Layer sources: one per merge stage family.

pub mod environment;
pub mod ini_file;
pub mod overrides;
