use route::LonLat;

/// Identifies one requested frame, so it can be cancelled later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(pub usize);

/// Whatever embeds the clock: it draws the marker and delivers frames. The clock never sleeps or
/// spawns anything; it only moves when the host calls `AnimationClock::tick`.
pub trait Host {
    fn set_marker_position(&mut self, pos: LonLat);

    /// Call `AnimationClock::tick` once, around the next display refresh.
    fn request_tick(&mut self) -> TickHandle;

    /// Best-effort. A cancelled tick that's delivered anyway is ignored unless the clock is
    /// running.
    fn cancel_tick(&mut self, handle: TickHandle);

    /// The marker reached the end of the route. No more ticks will be requested.
    fn animation_completed(&mut self) {}
}
