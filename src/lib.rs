//! Screen Translate: OCR a region or the word under the cursor and show its
//! translation in an always-on-top overlay.
//!
//! The binary (`src/main.rs`) wires these modules together; everything here
//! is usable and testable without a display.

pub mod app;
pub mod capture;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod input;
pub mod ocr;
pub mod pipeline;
pub mod text;
pub mod translate;
pub mod trigger;
