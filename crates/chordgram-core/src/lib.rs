//! Chordgram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the chordgram crates:
//!
//! - **Chord model**: per-string states and display options ([`chord`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Style**: The scale-driven style sheet for diagram classes ([`style`] module)
//! - **Draw**: Typed drawing primitives and their SVG formatting ([`draw`] module)

pub mod chord;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod style;
