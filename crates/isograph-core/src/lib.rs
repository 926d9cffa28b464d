//! Isograph Core Types and Definitions
//!
//! This crate provides the foundational types for Isograph scenes. It
//! includes:
//!
//! - **Geometry**: 3D points, sizes and bounding boxes ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Elements**: Scene elements and their arena ([`element`] module)
//! - **Curves**: Cubic Bézier curves used for connectors ([`curve`] module)
//! - **Draw**: Connector style definitions and overlays ([`draw`] module)

pub mod color;
pub mod curve;
pub mod draw;
pub mod element;
pub mod geometry;
