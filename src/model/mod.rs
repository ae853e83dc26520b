pub mod ident;
pub mod item;
pub mod phase;
