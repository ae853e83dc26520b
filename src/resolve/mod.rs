pub mod index;
pub mod pass;
