pub mod interface;
pub mod outcome;
pub mod target;
