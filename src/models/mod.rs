// src/models/mod.rs

pub mod archetype_profile;
pub mod quiz;
pub mod quiz_result;
pub mod user;
