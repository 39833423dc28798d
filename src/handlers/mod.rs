// src/handlers/mod.rs

pub mod draft;
pub mod quiz;
pub mod results;
pub mod session;
