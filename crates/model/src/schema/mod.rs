pub mod catalog;
pub mod column;
pub mod constraint;
pub mod types;
