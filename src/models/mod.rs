// src/models/mod.rs

pub mod comment;
pub mod common;
pub mod user;
