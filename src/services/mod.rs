// src/services/mod.rs
pub mod inference;
pub mod sync;
