// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds provider: the tracked region and its last computed rectangle.
//!
//! ## Usage
//!
//! 1) Pick a [`Container`]: the whole viewport, or an element implementing [`Region`].
//! 2) Call [`BoundsProvider::refresh`] whenever layout may have changed.
//! 3) Test press positions with [`BoundsProvider::contains`].
//!
//! Bounds are never refreshed implicitly; a stale rectangle stays in effect
//! until the next `refresh`.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_velocity::{BoundsProvider, Container};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut bounds = BoundsProvider::new(Container::Element(Rect::new(10.0, 10.0, 50.0, 50.0)));
//! bounds.refresh(viewport);
//!
//! assert!(bounds.contains(Point::new(10.0, 50.0)));
//! assert!(!bounds.contains(Point::new(9.0, 20.0)));
//! ```

use core::fmt;

use kurbo::{Point, Rect};

/// Something with an on-screen rectangle, in viewport coordinates.
pub trait Region {
    /// The current bounding rectangle of this region.
    fn bounding_rect(&self) -> Rect;
}

impl Region for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

impl<F: Fn() -> Rect> Region for F {
    fn bounding_rect(&self) -> Rect {
        self()
    }
}

/// The region whose rectangle gates drag starts.
#[derive(Clone, Debug, PartialEq)]
pub enum Container<R> {
    /// The whole viewport, as reported by the pointer source.
    Viewport,
    /// A specific element.
    Element(R),
}

impl<R> Default for Container<R> {
    fn default() -> Self {
        Self::Viewport
    }
}

impl<R: Region> Container<R> {
    /// Resolve this container to a rectangle, using `viewport` for [`Container::Viewport`].
    pub fn resolve(&self, viewport: Rect) -> Rect {
        match self {
            Self::Viewport => viewport,
            Self::Element(region) => region.bounding_rect(),
        }
    }
}

/// Error returned when a container change is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// No container was supplied.
    Missing,
    /// The tracker has already been destroyed.
    Destroyed,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("container not defined"),
            Self::Destroyed => f.write_str("tracker has been destroyed"),
        }
    }
}

impl core::error::Error for ContainerError {}

/// Holds the tracked [`Container`] and its last refreshed rectangle.
#[derive(Clone, Debug)]
pub struct BoundsProvider<R> {
    container: Container<R>,
    bounds: Rect,
}

impl<R: Region> BoundsProvider<R> {
    /// Create a provider for `container`.
    ///
    /// The rectangle starts out as [`Rect::ZERO`] until the first [`refresh`](Self::refresh).
    pub fn new(container: Container<R>) -> Self {
        Self {
            container,
            bounds: Rect::ZERO,
        }
    }

    /// Recompute the rectangle for the current container.
    pub fn refresh(&mut self, viewport: Rect) {
        self.bounds = self.container.resolve(viewport);
        log::trace!("bounds refreshed to {:?}", self.bounds);
    }

    /// Replace the container and refresh.
    ///
    /// `None` is rejected: the error is logged and returned, and the previous
    /// container and rectangle are kept.
    pub fn set_container(
        &mut self,
        container: Option<Container<R>>,
        viewport: Rect,
    ) -> Result<(), ContainerError> {
        let Some(container) = container else {
            log::error!("{}", ContainerError::Missing);
            return Err(ContainerError::Missing);
        };
        self.container = container;
        self.refresh(viewport);
        Ok(())
    }

    /// Returns `true` if `point` lies within the last refreshed rectangle, edges included.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds;
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// The last refreshed rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The current container.
    pub fn container(&self) -> &Container<R> {
        &self.container
    }
}
