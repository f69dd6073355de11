pub mod data;
pub mod search;
