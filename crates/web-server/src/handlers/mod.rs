pub mod conferences;
pub mod participations;
pub mod scientists;
