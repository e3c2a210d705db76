//! Touch tracking for the `iTouches` uniform.
//!
//! Positions are stored in pixels with the origin at the bottom-left, the
//! same convention as `fragCoord`. Callers flip window coordinates with
//! [`TouchTracker::flip_y`].

use backdrop_layout::{MAX_TOUCHES, Touch};

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: u64,
    touch: Touch,
}

/// Maps touch ids onto a fixed number of slots.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    slots: Vec<Slot>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_TOUCHES),
        }
    }

    /// Convert a top-left origin y coordinate to bottom-left origin.
    pub fn flip_y(position: [f32; 2], height: f32) -> [f32; 2] {
        [position[0], height - position[1]]
    }

    /// Start tracking a touch. Returns false when every slot is taken.
    pub fn begin(&mut self, id: u64, position: [f32; 2]) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.touch = Touch {
                position,
                start: position,
            };
            return true;
        }
        if self.slots.len() >= MAX_TOUCHES {
            log::trace!("Ignoring touch {}: all {} slots in use", id, MAX_TOUCHES);
            return false;
        }
        self.slots.push(Slot {
            id,
            touch: Touch {
                position,
                start: position,
            },
        });
        true
    }

    /// Update the current position of a tracked touch.
    pub fn moved(&mut self, id: u64, position: [f32; 2]) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.touch.position = position;
        }
    }

    /// Stop tracking a touch; later touches shift down one slot.
    pub fn end(&mut self, id: u64) {
        self.slots.retain(|slot| slot.id != id);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Active touches in slot order.
    pub fn active(&self) -> Vec<Touch> {
        self.slots.iter().map(|slot| slot.touch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_move_end() {
        let mut tracker = TouchTracker::new();
        assert!(tracker.begin(7, [10.0, 20.0]));
        tracker.moved(7, [15.0, 25.0]);
        assert_eq!(
            tracker.active(),
            vec![Touch {
                position: [15.0, 25.0],
                start: [10.0, 20.0],
            }]
        );
        tracker.end(7);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut tracker = TouchTracker::new();
        for id in 0..MAX_TOUCHES as u64 {
            assert!(tracker.begin(id, [0.0, 0.0]));
        }
        assert!(!tracker.begin(99, [1.0, 1.0]));
        assert_eq!(tracker.len(), MAX_TOUCHES);

        // Moving an unknown touch is a no-op
        tracker.moved(99, [5.0, 5.0]);
        assert!(tracker.active().iter().all(|t| t.position == [0.0, 0.0]));
    }

    #[test]
    fn test_slots_compact_after_end() {
        let mut tracker = TouchTracker::new();
        tracker.begin(1, [1.0, 0.0]);
        tracker.begin(2, [2.0, 0.0]);
        tracker.begin(3, [3.0, 0.0]);
        tracker.end(2);
        let xs: Vec<f32> = tracker.active().iter().map(|t| t.position[0]).collect();
        assert_eq!(xs, [1.0, 3.0]);
    }

    #[test]
    fn test_flip_y() {
        assert_eq!(TouchTracker::flip_y([5.0, 100.0], 600.0), [5.0, 500.0]);
    }
}
