//! Value types shared by every calculator

pub mod errors;
pub mod exchange;
pub mod fraction;
pub mod price;
pub mod token;
