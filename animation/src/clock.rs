use route::{LonLat, Route, RouteError};
use serde::{Deserialize, Serialize};

use crate::{AnimationConfig, Host, TickHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// No route
    Uninitialized,
    /// The marker is placed, but not moving
    Ready,
    Running,
    Paused,
    /// The marker reached the end. Reset to go again.
    Completed,
}

/// A snapshot for whatever UI shows the controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockStatus {
    pub state: ClockState,
    pub current_distance: f64,
    pub total_distance: f64,
    pub speed_multiplier: f64,
}

impl ClockStatus {
    /// From 0 to 1
    pub fn progress(&self) -> f64 {
        if self.total_distance > 0.0 {
            self.current_distance / self.total_distance
        } else {
            0.0
        }
    }

    pub fn can_start(&self) -> bool {
        matches!(self.state, ClockState::Ready | ClockState::Paused) && self.total_distance > 0.0
    }

    pub fn can_pause(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn can_reset(&self) -> bool {
        self.state != ClockState::Uninitialized
    }
}

/// Moves a marker along one route, driven by frames that the host delivers.
pub struct AnimationClock<H: Host> {
    host: H,
    config: AnimationConfig,
    // Back to the initial speed whenever a route is loaded
    speed: f64,
    animation: Option<Animation>,
}

// Everything that only exists while a route is loaded
struct Animation {
    route: Route,
    // Never Uninitialized
    state: ClockState,
    // Meters from the start of the route
    current_distance: f64,
    // Cleared whenever the clock starts, so a long pause doesn't become a jump
    last_tick_ms: Option<f64>,
    pending_tick: Option<TickHandle>,
}

impl<H: Host> AnimationClock<H> {
    pub fn new(host: H, config: AnimationConfig) -> Self {
        let speed = config.clamp_speed(config.initial_speed);
        Self {
            host,
            config,
            speed,
            animation: None,
        }
    }

    /// Replaces any current route. On failure, the clock is left without a route.
    pub fn load(&mut self, input: &str) -> Result<(), RouteError> {
        self.clear();
        match Route::parse(input) {
            Ok(route) => {
                self.load_route(route);
                Ok(())
            }
            Err(err) => {
                warn!("Couldn't load route: {err}");
                Err(err)
            }
        }
    }

    /// Replaces any current route, places the marker at its start, and goes back to the initial
    /// speed.
    pub fn load_route(&mut self, route: Route) {
        self.clear();
        self.speed = self.config.clamp_speed(self.config.initial_speed);
        info!(
            "Loaded a route with {} points, {:.0}m long",
            route.points().len(),
            route.length()
        );
        self.host.set_marker_position(route.first_pt());
        self.animation = Some(Animation {
            route,
            state: ClockState::Ready,
            current_distance: 0.0,
            last_tick_ms: None,
            pending_tick: None,
        });
    }

    /// Starts or resumes moving. False if there's no route, it's already running or finished, or
    /// the route has no length to travel.
    pub fn start(&mut self) -> bool {
        let anim = match self.animation {
            Some(ref mut anim) => anim,
            None => {
                debug!("Can't start without a route");
                return false;
            }
        };
        if !matches!(anim.state, ClockState::Ready | ClockState::Paused) {
            debug!("Can't start from {:?}", anim.state);
            return false;
        }
        if anim.route.length() <= 0.0 {
            warn!("Can't animate a route with zero length");
            return false;
        }

        if let Some(handle) = anim.pending_tick.take() {
            self.host.cancel_tick(handle);
        }
        anim.state = ClockState::Running;
        anim.last_tick_ms = None;
        self.host
            .set_marker_position(anim.route.interpolate(anim.current_distance));
        anim.pending_tick = Some(self.host.request_tick());
        info!(
            "Started at {:.1}m of {:.1}m, {}x speed",
            anim.current_distance,
            anim.route.length(),
            self.speed
        );
        true
    }

    /// Advances the marker. Ignored unless running, since a tick requested before a pause or
    /// clear may still show up. Returns the new position, if it moved.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<LonLat> {
        let anim = self.animation.as_mut()?;
        if anim.state != ClockState::Running {
            return None;
        }
        anim.pending_tick = None;

        let elapsed_ms = match anim.last_tick_ms {
            Some(prev) if timestamp_ms.is_finite() => (timestamp_ms - prev).max(0.0),
            _ => self.config.default_frame_ms,
        };
        if timestamp_ms.is_finite() {
            anim.last_tick_ms = Some(timestamp_ms);
        }
        anim.current_distance += self.config.base_speed_mps * self.speed * elapsed_ms / 1000.0;

        if anim.current_distance >= anim.route.length() {
            anim.current_distance = anim.route.length();
            anim.state = ClockState::Completed;
            let end = anim.route.last_pt();
            self.host.set_marker_position(end);
            info!("Reached the end of the route");
            self.host.animation_completed();
            return Some(end);
        }

        let pos = anim.route.interpolate(anim.current_distance);
        trace!(
            "{:.1}m / {:.1}m at {}x, marker at {pos}",
            anim.current_distance,
            anim.route.length(),
            self.speed
        );
        self.host.set_marker_position(pos);
        anim.pending_tick = Some(self.host.request_tick());
        Some(pos)
    }

    /// Stops moving, keeping the current position. Harmless to repeat. False without a route.
    pub fn pause(&mut self) -> bool {
        let anim = match self.animation {
            Some(ref mut anim) => anim,
            None => return false,
        };
        if anim.state == ClockState::Running {
            anim.state = ClockState::Paused;
            if let Some(handle) = anim.pending_tick.take() {
                self.host.cancel_tick(handle);
            }
            info!("Paused at {:.1}m", anim.current_distance);
        }
        true
    }

    /// Stops and moves the marker back to the start. False without a route.
    pub fn reset(&mut self) -> bool {
        let anim = match self.animation {
            Some(ref mut anim) => anim,
            None => return false,
        };
        if let Some(handle) = anim.pending_tick.take() {
            self.host.cancel_tick(handle);
        }
        anim.state = ClockState::Ready;
        anim.current_distance = 0.0;
        anim.last_tick_ms = None;
        self.host.set_marker_position(anim.route.first_pt());
        true
    }

    /// Clamped to the configured range; applies from the next tick. False for NaN.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if speed.is_nan() {
            return false;
        }
        self.speed = self.config.clamp_speed(speed);
        debug!("Speed is now {}x", self.speed);
        true
    }

    /// Forgets the route entirely.
    pub fn clear(&mut self) {
        if let Some(anim) = self.animation.take() {
            if let Some(handle) = anim.pending_tick {
                self.host.cancel_tick(handle);
            }
            info!("Cleared the route");
        }
    }

    pub fn status(&self) -> ClockStatus {
        ClockStatus {
            state: self.state(),
            current_distance: self
                .animation
                .as_ref()
                .map(|anim| anim.current_distance)
                .unwrap_or(0.0),
            total_distance: self
                .animation
                .as_ref()
                .map(|anim| anim.route.length())
                .unwrap_or(0.0),
            speed_multiplier: self.speed,
        }
    }

    pub fn state(&self) -> ClockState {
        self.animation
            .as_ref()
            .map(|anim| anim.state)
            .unwrap_or(ClockState::Uninitialized)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Where the marker currently is
    pub fn position(&self) -> Option<LonLat> {
        self.animation
            .as_ref()
            .map(|anim| anim.route.interpolate(anim.current_distance))
    }

    pub fn route(&self) -> Option<&Route> {
        self.animation.as_ref().map(|anim| &anim.route)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeHost {
        markers: Vec<LonLat>,
        next_handle: usize,
        pending: Option<TickHandle>,
        cancelled: Vec<TickHandle>,
        completed: usize,
    }

    impl Host for FakeHost {
        fn set_marker_position(&mut self, pos: LonLat) {
            self.markers.push(pos);
        }

        fn request_tick(&mut self) -> TickHandle {
            let handle = TickHandle(self.next_handle);
            self.next_handle += 1;
            self.pending = Some(handle);
            handle
        }

        fn cancel_tick(&mut self, handle: TickHandle) {
            self.cancelled.push(handle);
            if self.pending == Some(handle) {
                self.pending = None;
            }
        }

        fn animation_completed(&mut self) {
            self.completed += 1;
        }
    }

    const TWO_DEGREES: &str = r#"{"type": "LineString", "coordinates": [[0, 0], [0, 1], [0, 2]]}"#;

    fn loaded() -> AnimationClock<FakeHost> {
        let mut clock = AnimationClock::new(FakeHost::default(), AnimationConfig::default());
        clock.load(TWO_DEGREES).unwrap();
        clock
    }

    #[test]
    fn nothing_works_without_a_route() {
        let mut clock = AnimationClock::new(FakeHost::default(), AnimationConfig::default());
        assert!(!clock.start());
        assert!(!clock.pause());
        assert!(!clock.reset());
        assert_eq!(clock.tick(100.0), None);
        assert!(clock.set_speed(2.0));
        assert_eq!(clock.state(), ClockState::Uninitialized);
        assert!(clock.host().markers.is_empty());
        assert!(!clock.status().can_reset());
    }

    #[test]
    fn load_places_the_marker() {
        let clock = loaded();
        assert_eq!(clock.state(), ClockState::Ready);
        assert_eq!(clock.host().markers, vec![LonLat::new(0.0, 0.0)]);
        assert!(clock.status().can_start());
        assert!(!clock.status().can_pause());
    }

    #[test]
    fn first_tick_uses_the_default_frame() {
        let mut clock = loaded();
        assert!(clock.start());
        assert!(!clock.start());
        clock.tick(5000.0).unwrap();
        // 50 m/s for 16ms
        assert!((clock.status().current_distance - 0.8).abs() < 1e-9);
        clock.tick(5100.0).unwrap();
        assert!((clock.status().current_distance - 5.8).abs() < 1e-9);
    }

    #[test]
    fn clock_going_backwards_doesnt_move_backwards() {
        let mut clock = loaded();
        clock.start();
        clock.tick(1000.0);
        let before = clock.status().current_distance;
        clock.tick(900.0);
        assert_eq!(clock.status().current_distance, before);
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn pause_cancels_and_ignores_late_ticks() {
        let mut clock = loaded();
        clock.start();
        clock.tick(0.0);
        let pending = clock.host().pending.unwrap();
        assert!(clock.pause());
        assert!(clock.pause());
        assert_eq!(clock.state(), ClockState::Paused);
        assert_eq!(clock.host().cancelled, vec![pending]);

        let distance = clock.status().current_distance;
        let markers = clock.host().markers.len();
        assert_eq!(clock.tick(10_000.0), None);
        assert_eq!(clock.status().current_distance, distance);
        assert_eq!(clock.host().markers.len(), markers);
    }

    #[test]
    fn resuming_doesnt_jump() {
        let mut clock = loaded();
        clock.start();
        clock.tick(0.0);
        clock.tick(1000.0);
        clock.pause();
        let distance = clock.status().current_distance;

        // A minute later
        assert!(clock.start());
        clock.tick(61_000.0);
        assert!((clock.status().current_distance - distance - 0.8).abs() < 1e-9);
    }

    #[test]
    fn speed_applies_on_next_tick() {
        let mut clock = loaded();
        clock.start();
        clock.tick(0.0);
        assert!(clock.set_speed(2.0));
        let before = clock.status().current_distance;
        clock.tick(1000.0);
        assert!((clock.status().current_distance - before - 100.0).abs() < 1e-9);
    }

    #[test]
    fn speed_clamps() {
        let mut clock = loaded();
        clock.set_speed(-5.0);
        assert_eq!(clock.speed(), 0.1);
        clock.set_speed(100.0);
        assert_eq!(clock.status().speed_multiplier, 5.0);
        assert!(!clock.set_speed(f64::NAN));
        assert_eq!(clock.speed(), 5.0);
    }

    #[test]
    fn loading_resets_speed() {
        let mut clock = loaded();
        assert!(clock.set_speed(4.0));
        clock.load(TWO_DEGREES).unwrap();
        assert_eq!(clock.status().speed_multiplier, 1.0);

        // Reset keeps the route, so it keeps the speed too
        clock.set_speed(4.0);
        clock.reset();
        assert_eq!(clock.speed(), 4.0);

        // A failed load doesn't touch it
        assert!(clock.load("_p~iF").is_err());
        assert_eq!(clock.speed(), 4.0);
    }

    #[test]
    fn reset_twice_is_the_same_as_once() {
        let mut clock = loaded();
        clock.start();
        clock.tick(0.0);
        clock.tick(2000.0);

        assert!(clock.reset());
        let once = clock.status();
        assert!(clock.reset());
        assert_eq!(clock.status(), once);
        assert_eq!(once.state, ClockState::Ready);
        assert_eq!(once.current_distance, 0.0);
        assert_eq!(clock.host().markers.last(), Some(&LonLat::new(0.0, 0.0)));
        assert_eq!(clock.host().pending, None);
    }

    #[test]
    fn completed_needs_a_reset() {
        let mut clock = loaded();
        clock.set_speed(5.0);
        clock.start();
        let mut t = 0.0;
        while clock.state() == ClockState::Running {
            clock.tick(t);
            t += 60_000.0;
        }
        assert_eq!(clock.state(), ClockState::Completed);
        assert_eq!(clock.host().completed, 1);
        assert!(!clock.start());
        assert!(clock.reset());
        assert!(clock.start());
    }

    #[test]
    fn clear_forgets_the_route() {
        let mut clock = loaded();
        clock.start();
        let pending = clock.host().pending.unwrap();
        clock.clear();
        assert_eq!(clock.state(), ClockState::Uninitialized);
        assert_eq!(clock.host().cancelled, vec![pending]);
        assert_eq!(clock.tick(100.0), None);
        assert_eq!(clock.route(), None);
        assert_eq!(clock.position(), None);
    }

    #[test]
    fn zero_length_route_cant_start() {
        let mut clock = AnimationClock::new(FakeHost::default(), AnimationConfig::default());
        clock
            .load(r#"[[5, 5], [5, 5], [5, 5]]"#)
            .unwrap();
        assert_eq!(clock.state(), ClockState::Ready);
        assert!(!clock.start());
        assert!(!clock.status().can_start());
    }

    #[test]
    fn failed_load_drops_the_old_route() {
        let mut clock = loaded();
        clock.start();
        assert_eq!(
            clock.load(r#"{"type": "Point", "coordinates": [1, 2]}"#),
            Err(RouteError::UnsupportedGeometry("Point".to_string()))
        );
        assert_eq!(clock.state(), ClockState::Uninitialized);
        assert_eq!(clock.host().pending, None);
    }

    #[test]
    fn status_serializes() {
        let clock = loaded();
        let json = serde_json::to_value(clock.status()).unwrap();
        assert_eq!(json["state"], "Ready");
        assert_eq!(json["speed_multiplier"], 1.0);
    }
}
