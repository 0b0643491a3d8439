//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate mutation, persistence and session checks for callers.
//! - Keep controllers free of storage details.

pub mod roster_service;
