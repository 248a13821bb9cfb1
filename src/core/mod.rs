pub mod catalog;
pub mod sampler;
pub mod session;
pub mod types;
