// src/services/mod.rs

pub mod authoring;
pub mod catalog;
pub mod records;
pub mod results;
pub mod seed;
pub mod session;
