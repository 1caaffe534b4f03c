//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: JSON in and
//! out, file downloads, and translation of domain errors into status codes.

pub mod rest;

pub use rest::*;
