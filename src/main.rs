//! Pibble Asteroids headless runner
//!
//! Drives the simulation with a scripted pilot at a fixed timestep and logs
//! what happened. Usage: `pibble-asteroids [settings.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pibble_asteroids::Settings;
use pibble_asteroids::consts::*;
use pibble_asteroids::renderer::{draw_list, instance_bytes};
use pibble_asteroids::sim::{AssetRegistry, GameEvent, GameState, TickInput, tick};

/// Frame durations the runner cycles through, to exercise the accumulator
const FRAME_PATTERN: [f32; 4] = [1.0 / 60.0, 1.0 / 30.0, 1.0 / 144.0, 1.0 / 60.0];

#[derive(Debug, Default)]
struct RunStats {
    shots: u64,
    asteroids_spawned: u64,
    asteroids_destroyed: u64,
    ship_hits: u64,
    deaths: u64,
    restarts: u64,
    ads: u64,
    peak_draw_bytes: usize,
}

/// Runner holding the game and the fixed-step accumulator
struct Runner {
    state: GameState,
    settings: Settings,
    accumulator: f32,
    stats: RunStats,
}

impl Runner {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            state: GameState::with_bounds(seed, settings.bounds(), AssetRegistry::default()),
            settings,
            accumulator: 0.0,
            stats: RunStats::default(),
        }
    }

    /// Run simulation ticks for one real frame
    fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.min(self.settings.max_frame_dt);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pilot();
            tick(&mut self.state, &input, SIM_DT);
            self.record_events();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        let bytes = instance_bytes(&draw_list(&self.state)).len();
        self.stats.peak_draw_bytes = self.stats.peak_draw_bytes.max(bytes);
    }

    /// Scripted input: dodge sideways, shoot constantly, switch things up
    fn pilot(&self) -> TickInput {
        let state = &self.state;
        let tick = state.time_ticks;
        let ship = &state.ship;

        let threat = state
            .asteroids
            .iter()
            .filter(|a| a.pos().y < ship.pos.y)
            .min_by(|a, b| {
                a.pos()
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos().distance_squared(ship.pos))
            });
        let (left, right) = match threat {
            Some(a) if a.pos().distance(ship.pos) < 200.0 => {
                (a.pos().x >= ship.pos.x, a.pos().x < ship.pos.x)
            }
            _ => (false, false),
        };

        TickInput {
            left,
            right,
            fire: true,
            cycle_weapon: tick % 300 == 299,
            cycle_shape: tick % 1200 == 1199,
            cycle_character: tick % 900 == 899,
            detonate: tick % 60 == 30,
            restart: !ship.is_alive() && tick.is_multiple_of(120),
            watch_ad: ship.is_alive() && ship.hp < 40 && self.stats.ads < 2,
            ..Default::default()
        }
    }

    fn record_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::ShotFired { .. } => self.stats.shots += 1,
                GameEvent::AsteroidSpawned { .. } => self.stats.asteroids_spawned += 1,
                GameEvent::AsteroidDestroyed { .. } => self.stats.asteroids_destroyed += 1,
                GameEvent::ShipHit { .. } => self.stats.ship_hits += 1,
                GameEvent::ShipDestroyed => self.stats.deaths += 1,
                GameEvent::Restarted => self.stats.restarts += 1,
                GameEvent::AdStarted => self.stats.ads += 1,
                _ => {}
            }
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() {
    env_logger::init();
    log::info!("Pibble Asteroids (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Seed {}, screen {}x{}, running {:.0}s",
        seed,
        settings.screen_width,
        settings.screen_height,
        settings.run_seconds
    );

    let run_seconds = settings.run_seconds as f64;
    let dump_snapshot = settings.dump_snapshot;
    let mut runner = Runner::new(settings, seed);

    let mut frame = 0usize;
    let mut wall = 0.0f64;
    while wall < run_seconds {
        let frame_dt = FRAME_PATTERN[frame % FRAME_PATTERN.len()];
        runner.update(frame_dt);
        wall += frame_dt as f64;
        frame += 1;
    }

    let stats = &runner.stats;
    log::info!(
        "Done: {} ticks, {} shots, {} asteroids spawned, {} destroyed",
        runner.state.time_ticks,
        stats.shots,
        stats.asteroids_spawned,
        stats.asteroids_destroyed
    );
    log::info!(
        "Ship hit {} times, {} deaths, {} restarts, {} ads; peak draw upload {} bytes",
        stats.ship_hits,
        stats.deaths,
        stats.restarts,
        stats.ads,
        stats.peak_draw_bytes
    );

    if dump_snapshot {
        match serde_json::to_string_pretty(&runner.state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Could not serialize snapshot: {err}"),
        }
    }
}
