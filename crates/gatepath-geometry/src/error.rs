#![warn(missing_docs)]

//! Error types for the geometry library.
//!
//! This module defines the errors returned when a rectangle is built from
//! values that cannot describe a real shape.

use core::fmt;

/// Errors that can occur when constructing geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Error for a negative width or height.
    /// This variant is returned when a rectangle side length is below zero.
    InvalidSize(&'static str),
    /// Error for a NaN or infinite coordinate, size or rotation.
    NonFinite(&'static str),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidSize(msg) => write!(f, "Invalid rectangle size: {}", msg),
            GeometryError::NonFinite(msg) => write!(f, "Non-finite rectangle value: {}", msg),
        }
    }
}

impl core::error::Error for GeometryError {}
