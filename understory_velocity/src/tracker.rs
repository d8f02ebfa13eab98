// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracker: bounds-gated drag detection with streamed velocity samples.
//!
//! ## Lifecycle
//!
//! A [`DragTracker`] is `Idle` with only the press listener attached. A press
//! inside the tracked bounds moves it to `Dragging`, attaching the move and
//! release listeners; the release detaches them again. While dragging, every
//! move produces one velocity sample.
//!
//! | From       | Event                | To         | Callbacks           |
//! |------------|----------------------|------------|---------------------|
//! | `Idle`     | press inside bounds  | `Dragging` | start               |
//! | `Idle`     | press outside bounds | `Idle`     | none                |
//! | `Dragging` | move                 | `Dragging` | velocity(speed)     |
//! | `Dragging` | release              | `Idle`     | end                 |
//!
//! [`disable`](DragTracker::disable) detaches everything,
//! [`enable`](DragTracker::enable) re-arms the press listener, and
//! [`destroy`](DragTracker::destroy) detaches everything for good.
//!
//! ## Reentrancy
//!
//! Callbacks are invoked synchronously from [`DragTracker::dispatch`] while the
//! tracker is mutably borrowed. A callback that reaches back into the same
//! tracker through shared ownership (for example an `Rc<RefCell<DragTracker>>`)
//! will hit a `RefCell` borrow panic. Queue such work and run it after
//! `dispatch` returns.

use alloc::rc::Rc;
use core::fmt;

use kurbo::Rect;

use crate::bounds::{BoundsProvider, Container, ContainerError, Region};
use crate::registry::CallbackRegistry;
use crate::sample::PointerSample;
use crate::source::{Listeners, PointerEvent, PointerEventKind, PointerSource};

/// Callback invoked when a drag starts.
pub type StartCallback = Rc<dyn Fn()>;
/// Callback invoked with each velocity sample.
pub type VelocityCallback = Rc<dyn Fn(f64)>;
/// Callback invoked when a drag ends.
pub type EndCallback = Rc<dyn Fn()>;

/// Construction settings for a [`DragTracker`].
#[derive(Clone, Debug)]
pub struct TrackerOptions<R> {
    /// Region that gates drag starts. Defaults to the whole viewport.
    pub container: Container<R>,
}

impl<R> Default for TrackerOptions<R> {
    fn default() -> Self {
        Self {
            container: Container::Viewport,
        }
    }
}

impl<R> TrackerOptions<R> {
    /// Set the container.
    pub fn with_container(mut self, container: Container<R>) -> Self {
        self.container = container;
        self
    }
}

/// Whether the tracker can still be used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Normal operation.
    #[default]
    Active,
    /// [`DragTracker::destroy`] has been called; every operation is a no-op.
    Destroyed,
}

/// Tracks a single pointer drag over a region and reports its velocity.
///
/// Events reach the tracker through [`dispatch`](Self::dispatch). Only events
/// whose listener is currently attached are processed; the rest are dropped
/// exactly as if the source had not delivered them.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use kurbo::{Point, Rect};
/// use understory_velocity::{
///     Container, DragTracker, PointerEvent, PointerEventKind, PointerSource, TrackerOptions,
/// };
///
/// struct Window;
///
/// impl PointerSource for Window {
///     fn attach(&mut self, _kind: PointerEventKind) {}
///     fn detach(&mut self, _kind: PointerEventKind) {}
///     fn viewport(&self) -> Rect {
///         Rect::new(0.0, 0.0, 800.0, 600.0)
///     }
/// }
///
/// let options = TrackerOptions::default()
///     .with_container(Container::Element(Rect::new(0.0, 0.0, 100.0, 100.0)));
/// let mut tracker = DragTracker::new(Window, options);
///
/// let speeds = Rc::new(RefCell::new(Vec::new()));
/// let sink = speeds.clone();
/// tracker.on_velocity(Rc::new(move |v: f64| sink.borrow_mut().push(v)));
///
/// tracker.dispatch(&PointerEvent::Down { position: Point::new(10.0, 10.0) });
/// tracker.dispatch(&PointerEvent::Move { position: Point::new(13.0, 14.0), time: 1000 });
/// tracker.dispatch(&PointerEvent::Move { position: Point::new(23.0, 14.0), time: 1010 });
/// tracker.dispatch(&PointerEvent::Up { position: Point::new(23.0, 14.0) });
///
/// assert_eq!(*speeds.borrow(), [0.0, 1.0]);
/// assert!(!tracker.is_dragging());
/// ```
pub struct DragTracker<S: PointerSource, R: Region = Rect> {
    source: S,
    bounds: BoundsProvider<R>,
    listeners: Listeners,
    sample: PointerSample,
    lifecycle: Lifecycle,
    start: CallbackRegistry<dyn Fn()>,
    velocity: CallbackRegistry<dyn Fn(f64)>,
    end: CallbackRegistry<dyn Fn()>,
}

impl<S: PointerSource, R: Region> DragTracker<S, R> {
    /// Create a tracker listening on `source`.
    ///
    /// The press listener is attached and the bounds are computed immediately.
    pub fn new(source: S, options: TrackerOptions<R>) -> Self {
        let mut tracker = Self {
            source,
            bounds: BoundsProvider::new(options.container),
            listeners: Listeners::empty(),
            sample: PointerSample::default(),
            lifecycle: Lifecycle::Active,
            start: CallbackRegistry::new(),
            velocity: CallbackRegistry::new(),
            end: CallbackRegistry::new(),
        };
        tracker.attach(PointerEventKind::Down);
        tracker.refresh_bounds();
        tracker
    }

    /// Recompute the bounds of the current container.
    ///
    /// Call this after the container or the viewport changes size or position;
    /// the tracker never detects layout changes on its own.
    pub fn update(&mut self) {
        if self.check_destroyed("update") {
            return;
        }
        self.refresh_bounds();
    }

    /// Replace the container whose bounds gate drag starts, and refresh.
    ///
    /// `None` is reported as [`ContainerError::Missing`] and leaves the
    /// previous container and bounds in place.
    pub fn set_container(
        &mut self,
        container: Option<Container<R>>,
    ) -> Result<(), ContainerError> {
        if self.check_destroyed("set_container") {
            return Err(ContainerError::Destroyed);
        }
        let viewport = self.source.viewport();
        self.bounds.set_container(container, viewport)
    }

    /// Register a drag start callback. Returns `false` if it was already registered.
    pub fn on_start(&mut self, callback: StartCallback) -> bool {
        if self.check_destroyed("on_start") {
            return false;
        }
        self.start.insert(callback)
    }

    /// Register a velocity callback. Returns `false` if it was already registered.
    ///
    /// The callback receives the speed in distance units per millisecond.
    pub fn on_velocity(&mut self, callback: VelocityCallback) -> bool {
        if self.check_destroyed("on_velocity") {
            return false;
        }
        self.velocity.insert(callback)
    }

    /// Register a drag end callback. Returns `false` if it was already registered.
    pub fn on_end(&mut self, callback: EndCallback) -> bool {
        if self.check_destroyed("on_end") {
            return false;
        }
        self.end.insert(callback)
    }

    /// Re-arm press detection, abandoning any drag in progress without an end callback.
    pub fn enable(&mut self) {
        if self.check_destroyed("enable") {
            return;
        }
        self.attach(PointerEventKind::Down);
        self.detach(PointerEventKind::Move);
        self.detach(PointerEventKind::Up);
    }

    /// Detach every listener. Nothing is tracked until [`enable`](Self::enable).
    pub fn disable(&mut self) {
        if self.check_destroyed("disable") {
            return;
        }
        self.detach_all();
    }

    /// Detach every listener and drop all callbacks.
    ///
    /// Any later call on this tracker is a caller error: it is logged and
    /// otherwise ignored.
    pub fn destroy(&mut self) {
        if self.check_destroyed("destroy") {
            return;
        }
        self.detach_all();
        self.start.clear();
        self.velocity.clear();
        self.end.clear();
        self.lifecycle = Lifecycle::Destroyed;
        log::debug!("drag tracker destroyed");
    }

    /// Feed a pointer event from the source.
    ///
    /// Events whose listener is not attached are ignored.
    pub fn dispatch(&mut self, event: &PointerEvent) {
        if self.check_destroyed("dispatch") {
            return;
        }
        if !self.listeners.is_attached(event.kind()) {
            return;
        }
        match *event {
            PointerEvent::Down { position } => {
                if !self.bounds.contains(position) {
                    return;
                }
                self.sample = PointerSample::start(position);
                self.attach(PointerEventKind::Move);
                self.attach(PointerEventKind::Up);
                log::trace!("drag started at {position:?}");
                for callback in self.start.iter() {
                    callback();
                }
            }
            PointerEvent::Move { position, time } => {
                let speed = self.sample.advance(position, time);
                for callback in self.velocity.iter() {
                    callback(speed);
                }
            }
            PointerEvent::Up { position } => {
                self.detach(PointerEventKind::Move);
                self.detach(PointerEventKind::Up);
                log::trace!("drag ended at {position:?}");
                for callback in self.end.iter() {
                    callback();
                }
            }
        }
    }

    /// Returns `true` while the press listener is attached.
    pub fn is_enabled(&self) -> bool {
        self.listeners.contains(Listeners::DOWN)
    }

    /// Returns `true` between a qualifying press and its release.
    pub fn is_dragging(&self) -> bool {
        self.listeners.intersects(Listeners::DRAG)
    }

    /// Returns `true` once [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Listeners currently attached to the source.
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Bounds from the last refresh.
    pub fn bounds(&self) -> Rect {
        self.bounds.bounds()
    }

    /// The current container.
    pub fn container(&self) -> &Container<R> {
        self.bounds.container()
    }

    /// The last recorded pointer sample.
    pub fn last_sample(&self) -> PointerSample {
        self.sample
    }

    /// The pointer source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the pointer source.
    ///
    /// Registration state must not be changed behind the tracker's back.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn refresh_bounds(&mut self) {
        let viewport = self.source.viewport();
        self.bounds.refresh(viewport);
    }

    fn attach(&mut self, kind: PointerEventKind) {
        if !self.listeners.is_attached(kind) {
            self.source.attach(kind);
            self.listeners.insert(kind.listener());
        }
    }

    fn detach(&mut self, kind: PointerEventKind) {
        if self.listeners.is_attached(kind) {
            self.source.detach(kind);
            self.listeners.remove(kind.listener());
        }
    }

    fn detach_all(&mut self) {
        for kind in PointerEventKind::ALL {
            self.detach(kind);
        }
    }

    fn check_destroyed(&self, op: &str) -> bool {
        if self.lifecycle == Lifecycle::Destroyed {
            log::warn!("`{op}` called on a destroyed drag tracker; ignoring");
            return true;
        }
        false
    }
}

impl<S: PointerSource, R: Region> Drop for DragTracker<S, R> {
    fn drop(&mut self) {
        self.detach_all();
    }
}

impl<S: PointerSource + fmt::Debug, R: Region + fmt::Debug> fmt::Debug for DragTracker<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTracker")
            .field("source", &self.source)
            .field("bounds", &self.bounds)
            .field("listeners", &self.listeners)
            .field("sample", &self.sample)
            .field("lifecycle", &self.lifecycle)
            .field("start", &self.start)
            .field("velocity", &self.velocity)
            .field("end", &self.end)
            .finish()
    }
}
