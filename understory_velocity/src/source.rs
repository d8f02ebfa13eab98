// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event source: the seam between a tracker and the platform input layer.
//!
//! A [`PointerSource`] is whatever delivers "pointer pressed/moved/released at
//! (x, y) at time t" for a surface: a winit window, a DOM document, a test
//! double. The tracker tells it which [`PointerEventKind`]s it wants through
//! [`PointerSource::attach`] / [`PointerSource::detach`], and the host forwards
//! the matching [`PointerEvent`]s back through
//! [`DragTracker::dispatch`](crate::DragTracker::dispatch).
//!
//! The tracker keeps its own [`Listeners`] set and only calls `attach` for a
//! kind that is not yet attached (and `detach` for one that is), so a source
//! never sees a duplicate registration.

use kurbo::{Point, Rect};

/// The three low-level pointer event kinds a tracker listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
}

impl PointerEventKind {
    /// All kinds, in press → move → release order.
    pub const ALL: [Self; 3] = [Self::Down, Self::Move, Self::Up];

    /// The activation flag corresponding to this kind.
    pub const fn listener(self) -> Listeners {
        match self {
            Self::Down => Listeners::DOWN,
            Self::Move => Listeners::MOVE,
            Self::Up => Listeners::UP,
        }
    }
}

/// A pointer event delivered by the host.
///
/// Positions are in the same viewport coordinates as the tracked bounds.
/// Move timestamps are milliseconds on any monotonic clock the host likes;
/// only differences between consecutive moves are used.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed at `position`.
    Down {
        /// Pointer position.
        position: Point,
    },
    /// Pointer moved to `position` at `time` (milliseconds).
    Move {
        /// Pointer position.
        position: Point,
        /// Event timestamp in milliseconds.
        time: u64,
    },
    /// Pointer released at `position`.
    Up {
        /// Pointer position.
        position: Point,
    },
}

impl PointerEvent {
    /// The kind of this event.
    pub const fn kind(&self) -> PointerEventKind {
        match self {
            Self::Down { .. } => PointerEventKind::Down,
            Self::Move { .. } => PointerEventKind::Move,
            Self::Up { .. } => PointerEventKind::Up,
        }
    }

    /// The pointer position carried by this event.
    pub const fn position(&self) -> Point {
        match *self {
            Self::Down { position } | Self::Move { position, .. } | Self::Up { position } => {
                position
            }
        }
    }
}

bitflags::bitflags! {
    /// Which pointer listeners are currently attached to the source.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Press listener.
        const DOWN = 0b0000_0001;
        /// Move listener.
        const MOVE = 0b0000_0010;
        /// Release listener.
        const UP   = 0b0000_0100;
    }
}

impl Listeners {
    /// Listeners active while a drag is in progress, besides the press listener.
    pub const DRAG: Self = Self::MOVE.union(Self::UP);

    /// Returns `true` if the listener for `kind` is attached.
    pub const fn is_attached(self, kind: PointerEventKind) -> bool {
        self.contains(kind.listener())
    }
}

/// Platform input layer a tracker subscribes to.
///
/// Implementations only need to honor the registration calls; the tracker
/// guarantees `attach` is never called twice for the same kind without an
/// intervening `detach`, and vice versa.
pub trait PointerSource {
    /// Start delivering events of `kind` to the tracker.
    fn attach(&mut self, kind: PointerEventKind);

    /// Stop delivering events of `kind` to the tracker.
    fn detach(&mut self, kind: PointerEventKind);

    /// The bounding rectangle of the whole viewport (document).
    ///
    /// Used to resolve [`Container::Viewport`](crate::Container::Viewport).
    fn viewport(&self) -> Rect;
}

impl<S: PointerSource + ?Sized> PointerSource for &mut S {
    fn attach(&mut self, kind: PointerEventKind) {
        (**self).attach(kind);
    }

    fn detach(&mut self, kind: PointerEventKind) {
        (**self).detach(kind);
    }

    fn viewport(&self) -> Rect {
        (**self).viewport()
    }
}
