use swipedeck_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer stream away (system gesture, focus loss).
    Cancel,
}

/// One raw sample from the host's touch/pointer stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Position in screen coordinates.
    pub position: Point,
    pub uptime_millis: i64,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, uptime_millis: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_millis,
        }
    }

    pub fn down(id: PointerId, position: Point, uptime_millis: i64) -> Self {
        Self::new(id, PointerEventKind::Down, position, uptime_millis)
    }

    pub fn moved(id: PointerId, position: Point, uptime_millis: i64) -> Self {
        Self::new(id, PointerEventKind::Move, position, uptime_millis)
    }

    pub fn up(id: PointerId, position: Point, uptime_millis: i64) -> Self {
        Self::new(id, PointerEventKind::Up, position, uptime_millis)
    }

    pub fn cancel(id: PointerId, position: Point, uptime_millis: i64) -> Self {
        Self::new(id, PointerEventKind::Cancel, position, uptime_millis)
    }
}
