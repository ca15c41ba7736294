// src/render/mod.rs
pub mod canvas;
pub mod pdf;

pub use pdf::write_pdf;
