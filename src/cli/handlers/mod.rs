//! Command handlers

pub mod load;
pub mod resolve;

pub use load::LoadCommandHandler;
pub use resolve::ResolveCommandHandler;
