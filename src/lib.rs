//! Policy Press - Policy document generation service
//!
//! Takes a rendered policy HTML document and stores it three ways: the raw
//! template, a paged PDF and an editable DOCX. Stored PDFs can be listed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
