//! Infrastructure layer
//!
//! Concrete implementations of the domain traits plus HTTP DTOs.

pub mod dto;
pub mod registry;
pub mod repository;
