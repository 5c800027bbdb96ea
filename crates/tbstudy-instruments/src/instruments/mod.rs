pub mod dhli;
pub mod eheals;
