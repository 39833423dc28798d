// src/models/mod.rs

pub mod draft;
pub mod question;
pub mod quiz;
pub mod result;
pub mod session;
