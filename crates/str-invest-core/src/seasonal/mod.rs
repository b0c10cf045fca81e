pub mod breakdown;
pub mod revenue;
