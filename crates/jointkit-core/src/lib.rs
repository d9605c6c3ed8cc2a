//! # JointKit Core
//!
//! Core types shared by every JointKit crate:
//! - 2D geometry primitives in millimetres ([`Point`], [`BBox`], [`Polygon`])
//! - Millimetre formatting for drawing output ([`format_mm`])
//! - The unified error type

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, GeometryError, Result};
pub use geometry::{push_unique_point, BBox, Point, Polygon, POINT_EPSILON};
pub use units::format_mm;
