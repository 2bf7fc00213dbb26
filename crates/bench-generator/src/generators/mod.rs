//! Field-level value generators.

pub mod numeric;
pub mod uuid;

pub use numeric::generate_float_range;
pub use uuid::generate_uuid_v4;
