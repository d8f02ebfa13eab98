// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_velocity --heading-base-level=0

//! Understory Velocity: pointer drag tracking with velocity feedback.
//!
//! This crate provides a small state machine for surfaces that need continuous
//! speed feedback while the user holds and moves a pointer (sliders, canvases,
//! draggable widgets). It is split into a few focused pieces:
//!
//! - [`bounds`]: The tracked region ([`Container`]) and a closed-rectangle hit test
//! - [`source`]: The [`PointerSource`] seam to the platform input layer
//! - [`sample`]: Speed computation from successive pointer samples
//! - [`registry`]: Ordered callback sets with identity deduplication
//! - [`tracker`]: The [`DragTracker`] tying it all together
//!
//! ## How it works
//!
//! A [`DragTracker`] subscribes to press events on its [`PointerSource`]. A press
//! inside the container's bounds starts a drag: the tracker subscribes to move and
//! release events, and fires its start callbacks. Every move reports a speed,
//! `hypot(dx, dy) / dt` in distance units per millisecond, to the velocity
//! callbacks. A release unsubscribes from move and release and fires the end
//! callbacks.
//!
//! Subscriptions are tracked in a [`Listeners`] set so that the source never sees
//! the same kind attached twice or detached twice.
//!
//! Speeds are always finite and non-negative. The first move after a press has
//! no previous timestamp and reports `0.0`; so does any move with zero elapsed time.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_velocity::{
//!     Container, DragTracker, PointerEvent, PointerEventKind, PointerSource, TrackerOptions,
//! };
//!
//! // A source that delivers everything; real sources forward platform events.
//! struct Surface;
//!
//! impl PointerSource for Surface {
//!     fn attach(&mut self, _kind: PointerEventKind) {}
//!     fn detach(&mut self, _kind: PointerEventKind) {}
//!     fn viewport(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 1024.0, 768.0)
//!     }
//! }
//!
//! let slider = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let mut tracker = DragTracker::new(
//!     Surface,
//!     TrackerOptions::default().with_container(Container::Element(slider)),
//! );
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b, c) = (log.clone(), log.clone(), log.clone());
//! tracker.on_start(Rc::new(move || a.borrow_mut().push("start".to_string())));
//! tracker.on_velocity(Rc::new(move |v: f64| b.borrow_mut().push(format!("{v}"))));
//! tracker.on_end(Rc::new(move || c.borrow_mut().push("end".to_string())));
//!
//! tracker.dispatch(&PointerEvent::Down { position: Point::new(10.0, 10.0) });
//! tracker.dispatch(&PointerEvent::Move { position: Point::new(13.0, 14.0), time: 1000 });
//! tracker.dispatch(&PointerEvent::Move { position: Point::new(13.0, 14.0), time: 1010 });
//! tracker.dispatch(&PointerEvent::Move { position: Point::new(23.0, 14.0), time: 1020 });
//! tracker.dispatch(&PointerEvent::Up { position: Point::new(23.0, 14.0) });
//!
//! assert_eq!(*log.borrow(), ["start", "0", "0", "1", "end"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Build Kurbo with the standard library
//! - `libm`: Build Kurbo with `libm` for `no_std` float math
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod bounds;
pub mod registry;
pub mod sample;
pub mod source;
pub mod tracker;

pub use bounds::{BoundsProvider, Container, ContainerError, Region};
pub use registry::CallbackRegistry;
pub use sample::{PointerSample, speed};
pub use source::{Listeners, PointerEvent, PointerEventKind, PointerSource};
pub use tracker::{
    DragTracker, EndCallback, Lifecycle, StartCallback, TrackerOptions, VelocityCallback,
};
