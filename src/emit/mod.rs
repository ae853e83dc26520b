pub mod dot;
pub mod json;
