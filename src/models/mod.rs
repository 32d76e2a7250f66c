//! Data models for TrackHub

pub mod equipment;
pub mod intervention;
pub mod location;
pub mod lookup;
pub mod user;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentDetails};
pub use intervention::{Intervention, InterventionDetails};
pub use location::Location;
pub use lookup::{EquipmentStatus, EquipmentType, InterventionOutcome};
pub use user::{Role, User};
