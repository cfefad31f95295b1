#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod frames;
mod trace;

use anyhow::{Context, Result};
use structopt::StructOpt;

use animation::{AnimationClock, AnimationConfig, ClockStatus};

pub use self::frames::SimulatedFrames;
pub use self::trace::TraceRecord;

#[derive(StructOpt)]
#[structopt(about = "Replays a marker moving along a route, without drawing anything")]
pub struct Args {
    /// The path to a file with a GeoJSON route or a polyline6 string
    #[structopt(long)]
    route: Option<String>,
    /// A polyline6 string
    #[structopt(long)]
    polyline: Option<String>,
    /// Use a built-in route from New York to Los Angeles
    #[structopt(long)]
    sample: bool,
    /// Speed multiplier, clamped to the configured range
    #[structopt(long)]
    speed: Option<f64>,
    /// Simulated milliseconds between frames
    #[structopt(long, default_value = "16")]
    frame_ms: f64,
    /// Stop after this many frames, even if the marker hasn't arrived
    #[structopt(long)]
    max_frames: Option<usize>,
    /// The path to a JSON file overriding the animation settings
    #[structopt(long)]
    config: Option<String>,
    /// Write every marker position to this CSV file
    #[structopt(long)]
    trace: Option<String>,
    /// Write the route and its endpoints to this GeoJSON file
    #[structopt(long)]
    export_geojson: Option<String>,
}

impl Args {
    fn load_input(&self) -> Result<String> {
        match (&self.route, &self.polyline, self.sample) {
            (Some(path), None, false) => {
                fs_err::read_to_string(path).with_context(|| format!("reading route {path}"))
            }
            (None, Some(encoded), false) => Ok(encoded.clone()),
            (None, None, true) => Ok(route::SAMPLE_ROUTE.to_string()),
            (None, None, false) => bail!("Specify one of --route, --polyline, or --sample"),
            _ => bail!("Only one of --route, --polyline, and --sample can be used"),
        }
    }

    fn load_config(&self) -> Result<AnimationConfig> {
        let path = match self.config {
            Some(ref path) => path,
            None => return Ok(AnimationConfig::default()),
        };
        let raw = fs_err::read_to_string(path)?;
        let config: AnimationConfig =
            serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))?;
        config
            .validate()
            .with_context(|| format!("bad settings in config {path}"))?;
        Ok(config)
    }
}

/// What happened during one replay
pub struct Summary {
    pub frames: usize,
    pub status: ClockStatus,
    pub trace: Vec<TraceRecord>,
}

pub fn run(args: Args) -> Result<Summary> {
    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        bail!("--frame-ms must be positive, not {}", args.frame_ms);
    }
    let config = args.load_config()?;
    let input = args.load_input()?;

    let mut clock = AnimationClock::new(SimulatedFrames::new(args.frame_ms), config);
    clock.load(&input)?;
    // Loading a route resets the speed
    if let Some(speed) = args.speed {
        if !clock.set_speed(speed) {
            bail!("--speed {speed} isn't a number");
        }
    }

    if let Some(route) = clock.route() {
        let bounds = route.bounds();
        info!(
            "Route covers longitude {:.4} to {:.4}, latitude {:.4} to {:.4}",
            bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
        );
        if let Some(ref path) = args.export_geojson {
            route.export_to_geojson(path)?;
        }
    }

    if !clock.start() {
        bail!("Couldn't start the animation; the route has no length");
    }

    let mut records = Vec::new();
    let mut frames = 0;
    while let Some(now) = clock.host_mut().next_frame() {
        if args.max_frames == Some(frames) {
            info!("Stopping after {frames} frames");
            clock.pause();
            break;
        }
        frames += 1;

        if let Some(pos) = clock.tick(now) {
            records.push(TraceRecord {
                frame: frames,
                timestamp_ms: now,
                distance_m: clock.status().current_distance,
                lon: pos.x(),
                lat: pos.y(),
            });
        }
        // Roughly every simulated minute
        if frames % ((60_000.0 / args.frame_ms).ceil() as usize).max(1) == 0 {
            info!(
                "{:.1}% along after {:.0}s",
                100.0 * clock.status().progress(),
                clock.host().now_ms() / 1000.0
            );
        }
    }

    let status = clock.status();
    if clock.host().completed {
        info!(
            "Arrived after {frames} frames, {:.1}s of simulated time",
            clock.host().now_ms() / 1000.0
        );
    }

    if let Some(ref path) = args.trace {
        trace::write_csv(path, &records)?;
    }

    Ok(Summary {
        frames,
        status,
        trace: records,
    })
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let summary = run(Args::from_args())?;
    println!("{}", serde_json::to_string_pretty(&summary.status)?);
    Ok(())
}
