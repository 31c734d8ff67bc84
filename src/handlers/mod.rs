// src/handlers/mod.rs

pub mod archetype;
pub mod auth;
pub mod film;
pub mod quiz;
