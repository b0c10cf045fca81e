pub mod apartment;
pub mod model;
pub mod seasonal;
