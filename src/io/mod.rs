//! File I/O for simulation documents.

pub mod json;

pub use json::{read_descriptor, read_document, write_document};
