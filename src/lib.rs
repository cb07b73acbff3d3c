//! IELTS Practice - speaking practice client
//!
//! This crate records spoken answers to IELTS speaking prompts and submits
//! them to a practice server, falling back across upload endpoints until
//! one accepts the response.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, HTTP client, stores)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
