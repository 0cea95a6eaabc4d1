// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Rect: integer points, sizes and rectangles for a retained widget tree.
//!
//! Every other Trellis crate talks about screen geometry in terms of these three value
//! types. They carry no resources, are `Copy`, and compare by value.
//!
//! - [`Point`]: a location in root-window pixel coordinates.
//! - [`Size`]: a width and height in pixels.
//! - [`Rect`]: a top-left [`Point`] plus a [`Size`].
//!
//! ## Rect algebra
//!
//! Clipping and damage tracking are built on two operations:
//!
//! - [`Rect::union`]: the smallest rectangle covering both inputs.
//! - [`Rect::intersection`]: the overlap of both inputs, or an empty rectangle
//!   when they are disjoint (sizes never go negative).
//!
//! Both are commutative and total; degenerate (zero-area) inputs are allowed. Far corners
//! saturate at the bounds of `i32` instead of overflowing.
//!
//! ```rust
//! use trellis_rect::{Point, Rect, Size};
//!
//! let a = Rect::new(0, 0, 100, 50);
//! let b = Rect::new(80, 20, 40, 60);
//!
//! assert_eq!(a.union(b), Rect::new(0, 0, 120, 80));
//! assert_eq!(a.intersection(b), Rect::new(80, 20, 20, 30));
//!
//! let far_away = Rect::from_origin_size(Point::new(500, 500), Size::new(10, 10));
//! assert!(a.intersection(far_away).is_empty());
//! ```
//!
//! ## Features
//!
//! - `kurbo`: `From` conversions between these types and [`kurbo`](https://docs.rs/kurbo)
//!   types, for handing clip rectangles to kurbo-based drawing backends.
//!
//! This crate is `no_std`.

#![no_std]

mod rect;
mod types;

#[cfg(feature = "kurbo")]
mod convert;

pub use rect::Rect;
pub use types::{Point, Size};
