/// Data models for principals and token responses
pub mod principal;

pub use principal::{LoginRequest, Principal, RegisterRequest, TokenPair};
