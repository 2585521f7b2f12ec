//! Pointer state: drag rectangle, selection quad and pending move order.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_core::constants::QUAD_VERTEX_FLOATS;

use crate::geometry::{make_quad, point_in_drag_rect, quad_to_buffer};

/// Ground-plane endpoints of an in-progress drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragSelection {
    pub origin: Vec3,
    pub current: Vec3,
}

impl DragSelection {
    pub fn contains(&self, point: Vec3) -> bool {
        point_in_drag_rect(point, self.origin, self.current)
    }
}

/// Tracks the pointer's ground position and turns button edges into drag and
/// order state. Holds no unit data; the tick engine applies it.
#[derive(Debug, Clone)]
pub struct SelectionController {
    pointer: Vec3,
    drag: Option<DragSelection>,
    quad: [f32; QUAD_VERTEX_FLOATS],
    order_requested: bool,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            pointer: Vec3::ZERO,
            drag: None,
            // Unit square until the first drag resets it.
            quad: [
                -1.0, -1.0, 0.0, //
                1.0, -1.0, 0.0, //
                1.0, 1.0, 0.0, //
                -1.0, 1.0, 0.0,
            ],
            order_requested: false,
        }
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known ground intersection of the pointer.
    pub fn pointer(&self) -> Vec3 {
        self.pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<DragSelection> {
        self.drag
    }

    /// Selection quad vertex buffer (four xyz vertices).
    pub fn quad(&self) -> &[f32; QUAD_VERTEX_FLOATS] {
        &self.quad
    }

    /// The pointer ray now meets the ground at `ground`.
    pub fn pointer_moved(&mut self, ground: Vec3) {
        self.pointer = ground;
        if let Some(drag) = self.drag.as_mut() {
            drag.current = ground;
        }
        self.rebuild_quad();
    }

    /// Primary button down. Starts a drag unless one is already running.
    pub fn primary_down(&mut self) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(DragSelection {
            origin: self.pointer,
            current: self.pointer,
        });
        self.quad = [0.0; QUAD_VERTEX_FLOATS];
    }

    /// Primary button up. Ends the drag; selection flags stay as they are.
    pub fn primary_up(&mut self) {
        self.drag = None;
    }

    /// Secondary click. Consumed by the next tick.
    pub fn secondary_click(&mut self) {
        self.order_requested = true;
    }

    /// Recompute the quad from the current drag. A zero-extent drag keeps the
    /// previous vertices.
    pub fn rebuild_quad(&mut self) {
        let Some(drag) = self.drag else {
            return;
        };
        match make_quad(drag.origin, drag.current) {
            Ok(quad) => self.quad = quad_to_buffer(&quad),
            Err(err) => debug!(%err, "keeping previous selection quad"),
        }
    }

    /// Take the pending order, if any. An order requested while dragging is dropped.
    pub fn take_order(&mut self) -> Option<Vec3> {
        let requested = std::mem::take(&mut self.order_requested);
        (requested && self.drag.is_none()).then_some(self.pointer)
    }
}
