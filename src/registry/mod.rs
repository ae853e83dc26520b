pub mod manager;
pub mod scopes;
pub mod status;
