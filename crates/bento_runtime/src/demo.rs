//! A moving-points simulation.
//!
//! Entities get a random position and velocity on start, move every tick,
//! and stop (lose their velocity) once they leave the arena.

use bento_foundation::{Component, Entity, Result};
use bento_storage::Storage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::context::TickContext;
use crate::system::{Schedule, System};

/// Location in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Component for Position {}

/// Displacement per unit of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    /// Horizontal speed.
    pub vx: f64,
    /// Vertical speed.
    pub vy: f64,
}

impl Component for Velocity {}

/// Configuration for a demo run.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    /// Entities spawned on start.
    pub entities: usize,
    /// Number of update ticks.
    pub ticks: u64,
    /// Time step per tick.
    pub delta: f64,
    /// Seed for positions and velocities.
    pub seed: u64,
    /// Log a report every this many ticks; zero disables reports.
    pub report_every: u64,
    /// Half-width of the square arena; entities outside it stop moving.
    pub arena: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            entities: 10,
            ticks: 10,
            delta: 1.0,
            seed: 42,
            report_every: 1,
            arena: 100.0,
        }
    }
}

impl DemoConfig {
    /// Creates a large, quiet configuration for timing runs.
    #[must_use]
    pub fn stress() -> Self {
        Self {
            entities: 10_000,
            ticks: 100,
            report_every: 0,
            arena: 500.0,
            ..Self::default()
        }
    }

    /// Builder method to set the entity count.
    #[must_use]
    pub fn with_entities(mut self, entities: usize) -> Self {
        self.entities = entities;
        self
    }

    /// Builder method to set the tick count.
    #[must_use]
    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    /// Builder method to set the time step.
    #[must_use]
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the report interval.
    #[must_use]
    pub fn with_report_every(mut self, ticks: u64) -> Self {
        self.report_every = ticks;
        self
    }

    /// Builder method to set the arena half-width.
    #[must_use]
    pub fn with_arena(mut self, arena: f64) -> Self {
        self.arena = arena;
        self
    }

    /// Builds the demo's schedule: spawn, move, bounds, report.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        Schedule::new()
            .with_system(SpawnSystem::new(self.entities, self.seed))
            .with_system(MovementSystem)
            .with_system(BoundsSystem { arena: self.arena })
            .with_system(ReportSystem {
                every: self.report_every,
            })
    }
}

/// Spawns entities with seeded random positions and velocities on start.
#[derive(Debug)]
pub struct SpawnSystem {
    count: usize,
    rng: ChaCha8Rng,
}

impl SpawnSystem {
    /// Creates a spawner for `count` entities.
    #[must_use]
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn coordinate(&mut self) -> f64 {
        f64::from(self.rng.gen_range(1..=10_i32))
    }
}

impl System for SpawnSystem {
    fn name(&self) -> &str {
        "spawn"
    }

    fn start(&mut self, storage: &mut Storage, _ctx: &TickContext) -> Result<()> {
        for _ in 0..self.count {
            let position = Position {
                x: self.coordinate(),
                y: self.coordinate(),
            };
            let velocity = Velocity {
                vx: self.coordinate(),
                vy: self.coordinate(),
            };
            storage.create((position, velocity));
        }
        info!(entities = self.count, "spawned entities");
        Ok(())
    }
}

/// Advances every moving entity by `velocity * delta`.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn update(&mut self, storage: &mut Storage, ctx: &TickContext) -> Result<()> {
        storage.batch(|storage, buffer| {
            for (entity, (position, velocity)) in storage.select::<(Position, Velocity)>() {
                buffer.set(
                    entity,
                    (Position {
                        x: position.x + velocity.vx * ctx.delta,
                        y: position.y + velocity.vy * ctx.delta,
                    },),
                );
            }
        })
    }
}

/// Removes the velocity of every entity outside the arena.
#[derive(Debug)]
pub struct BoundsSystem {
    /// Half-width of the square arena.
    pub arena: f64,
}

impl System for BoundsSystem {
    fn name(&self) -> &str {
        "bounds"
    }

    fn update(&mut self, storage: &mut Storage, _ctx: &TickContext) -> Result<()> {
        let arena = self.arena;
        storage.batch(|storage, buffer| {
            for (entity, (position, _)) in storage.select::<(Position, Velocity)>() {
                if position.x.abs() > arena || position.y.abs() > arena {
                    debug!(%entity, x = position.x, y = position.y, "entity left the arena");
                    buffer.delete(entity, &[Velocity::component_type()]);
                }
            }
        })
    }
}

/// Logs the population periodically and once on stop.
#[derive(Debug)]
pub struct ReportSystem {
    /// Report interval in ticks; zero disables per-tick reports.
    pub every: u64,
}

impl System for ReportSystem {
    fn name(&self) -> &str {
        "report"
    }

    fn update(&mut self, storage: &mut Storage, ctx: &TickContext) -> Result<()> {
        if self.every == 0 || ctx.tick % self.every != 0 {
            return Ok(());
        }
        for (entity, (position, velocity)) in storage.select::<(Position, Velocity)>() {
            debug!(
                tick = ctx.tick,
                %entity,
                x = position.x,
                y = position.y,
                vx = velocity.vx,
                vy = velocity.vy,
                "moving"
            );
        }
        info!(
            tick = ctx.tick,
            moving = storage.select::<(Velocity,)>().count(),
            total = storage.len(),
            containers = storage.container_count(),
            "tick report"
        );
        Ok(())
    }

    fn stop(&mut self, storage: &mut Storage, ctx: &TickContext) -> Result<()> {
        info!(
            ticks = ctx.tick,
            total = storage.len(),
            stopped = storage.len() - storage.select::<(Velocity,)>().count(),
            "simulation finished"
        );
        Ok(())
    }
}

/// Runs the demo and returns the final storage.
///
/// # Errors
///
/// Returns the first error raised by any system.
pub fn run_demo(config: &DemoConfig) -> Result<Storage> {
    let mut storage = Storage::new();
    let mut schedule = config.schedule();
    let mut ctx = TickContext::new(config.delta);

    schedule.start(&mut storage, &ctx)?;
    for _ in 0..config.ticks {
        ctx.advance();
        schedule.update(&mut storage, &ctx)?;
    }
    schedule.stop(&mut storage, &ctx)?;

    Ok(storage)
}

/// Returns the entities that still carry a velocity.
#[must_use]
pub fn moving_entities(storage: &Storage) -> Vec<Entity> {
    storage
        .select::<(Velocity,)>()
        .map(|(entity, _)| entity)
        .collect()
}
