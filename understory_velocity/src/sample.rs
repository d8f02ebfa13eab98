// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer sample helper: turn successive positions and timestamps into speeds.
//!
//! ## Usage
//!
//! 1) On press, call [`PointerSample::start`] with the press position. The time is left unset.
//! 2) On each move, call [`PointerSample::advance`] to get the speed since the previous sample.
//!
//! The first move after a press has no previous timestamp, so its elapsed time
//! counts as zero and the reported speed is `0.0`.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_velocity::PointerSample;
//!
//! let mut sample = PointerSample::start(Point::new(10.0, 10.0));
//! assert_eq!(sample.advance(Point::new(13.0, 14.0), 1000), 0.0);
//! assert_eq!(sample.advance(Point::new(23.0, 14.0), 1010), 1.0);
//! ```

use kurbo::{Point, Vec2};

/// Compute a speed from a displacement and an elapsed time in milliseconds.
///
/// Returns distance units per millisecond. Any result that is not finite (for
/// example a zero elapsed time) is reported as `0.0`, so the value is always
/// finite and non-negative.
pub fn speed(delta: Vec2, elapsed_ms: u64) -> f64 {
    let v = delta.hypot() / elapsed_ms as f64;
    if v.is_finite() { v } else { 0.0 }
}

/// The last observed pointer position and when it was observed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Last recorded pointer position.
    pub position: Point,
    /// Timestamp of the last move, in milliseconds. `None` right after a press.
    pub time: Option<u64>,
}

impl PointerSample {
    /// Begin sampling from a press at `position`, with no timestamp yet.
    pub fn start(position: Point) -> Self {
        Self {
            position,
            time: None,
        }
    }

    /// Record a move to `position` at `time`, returning the speed since the previous sample.
    ///
    /// The stored sample is overwritten regardless of the computed speed. A
    /// timestamp earlier than the previous one counts as zero elapsed time.
    pub fn advance(&mut self, position: Point, time: u64) -> f64 {
        let delta = position - self.position;
        let elapsed = self.time.map_or(0, |last| time.saturating_sub(last));
        self.position = position;
        self.time = Some(time);
        speed(delta, elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_clears_time() {
        let sample = PointerSample::start(Point::new(10.0, 20.0));
        assert_eq!(sample.position, Point::new(10.0, 20.0));
        assert_eq!(sample.time, None);
    }

    #[test]
    fn first_advance_after_start_is_zero() {
        let mut sample = PointerSample::start(Point::new(10.0, 10.0));
        let v = sample.advance(Point::new(13.0, 14.0), 1000);
        assert_eq!(v, 0.0);
        assert_eq!(sample.position, Point::new(13.0, 14.0));
        assert_eq!(sample.time, Some(1000));
    }

    #[test]
    fn speed_is_distance_over_elapsed() {
        let mut sample = PointerSample::start(Point::new(0.0, 0.0));
        sample.advance(Point::new(0.0, 0.0), 100);

        // 3-4-5 triangle over 10ms.
        let v = sample.advance(Point::new(3.0, 4.0), 110);
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_elapsed_is_zero() {
        let mut sample = PointerSample::start(Point::new(0.0, 0.0));
        sample.advance(Point::new(1.0, 1.0), 50);
        let v = sample.advance(Point::new(40.0, 1.0), 50);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn coincident_points_are_zero() {
        let mut sample = PointerSample::start(Point::new(5.0, 5.0));
        sample.advance(Point::new(5.0, 5.0), 10);
        assert_eq!(sample.advance(Point::new(5.0, 5.0), 20), 0.0);
    }

    #[test]
    fn time_going_backwards_is_zero() {
        let mut sample = PointerSample::start(Point::new(0.0, 0.0));
        sample.advance(Point::new(0.0, 0.0), 100);
        let v = sample.advance(Point::new(10.0, 0.0), 90);
        assert_eq!(v, 0.0);
        assert_eq!(sample.time, Some(90));
    }

    #[test]
    fn negative_displacement_gives_positive_speed() {
        let mut sample = PointerSample::start(Point::new(100.0, 100.0));
        sample.advance(Point::new(100.0, 100.0), 0);
        let v = sample.advance(Point::new(90.0, 100.0), 5);
        assert_eq!(v, 2.0);
    }

    #[test]
    fn speed_normalizes_non_finite() {
        assert_eq!(speed(Vec2::new(3.0, 4.0), 0), 0.0);
        assert_eq!(speed(Vec2::ZERO, 0), 0.0);
        assert_eq!(speed(Vec2::new(f64::INFINITY, 0.0), 10), 0.0);
        assert_eq!(speed(Vec2::new(f64::NAN, 0.0), 10), 0.0);
    }
}
