use animation::{Host, TickHandle};
use route::LonLat;

/// Stands in for a display: every requested frame arrives exactly `frame_ms` after the previous
/// one, and nothing is drawn.
pub struct SimulatedFrames {
    frame_ms: f64,
    now_ms: f64,
    next_handle: usize,
    pending: Option<TickHandle>,

    pub marker: Option<LonLat>,
    pub completed: bool,
}

impl SimulatedFrames {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            frame_ms,
            now_ms: 0.0,
            next_handle: 0,
            pending: None,
            marker: None,
            completed: false,
        }
    }

    /// Advances to the next refresh and returns its timestamp, or None if nobody asked for a
    /// frame.
    pub fn next_frame(&mut self) -> Option<f64> {
        self.pending.take()?;
        self.now_ms += self.frame_ms;
        Some(self.now_ms)
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl Host for SimulatedFrames {
    fn set_marker_position(&mut self, pos: LonLat) {
        self.marker = Some(pos);
    }

    fn request_tick(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn animation_completed(&mut self) {
        self.completed = true;
    }
}
