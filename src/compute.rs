/// Pure simulation functions.
///
/// Every public function takes an immutable reference to the current
/// `SimState` (and, where needed, an RNG handle) and returns a brand-new
/// `SimState`.  Side effects are limited to the injected RNG and logging.

use glam::Vec3;
use log::{debug, trace};
use rand::Rng;

use crate::entities::{
    Draw, DrawKind, FireworkPayload, Particle, ProjectileState, ProjectileType, SimState,
    SparkTable, StepMode, FAR_Z, FLOOR_Y, FUSE_MAX, FUSE_MIN, LAUNCH_POINT, MAX_SPARKS,
    SHOT_SCALE, SPARK_SCALE, SPARK_SPEED_MAX,
};

// ── Launch tables ────────────────────────────────────────────────────────────

/// `(damping, velocity, acceleration)` assigned when a type is selected.
pub fn launch_profile(kind: ProjectileType) -> (f32, Vec3, Vec3) {
    match kind {
        ProjectileType::Bullet => (0.99, Vec3::new(0.0, 0.0, 0.035), Vec3::new(0.0, -0.005, 0.0)),
        ProjectileType::Artillery => (0.99, Vec3::new(0.0, 0.03, 0.04), Vec3::new(0.0, -0.02, 0.0)),
        ProjectileType::Fireball => (0.90, Vec3::new(0.0, 0.0, 0.01), Vec3::new(0.0, 0.006, 0.0)),
        ProjectileType::Laser => (0.99, Vec3::new(0.0, 0.0, 0.1), Vec3::ZERO),
        ProjectileType::Firework => (0.99, Vec3::new(0.0, 0.0, 0.05), Vec3::new(0.0, 0.0, -0.002)),
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Nothing selected, nothing in flight.
pub fn init_state(step_mode: StepMode) -> SimState {
    SimState {
        projectile_type: None,
        state: ProjectileState::Idle,
        shot: Particle::at_launch(),
        firework: None,
        fuse: 0.0,
        flight_time: 0.0,
        step_mode,
        frame: 0,
    }
}

// ── Random draws ─────────────────────────────────────────────────────────────

pub fn sample_fuse(rng: &mut impl Rng) -> f32 {
    rng.gen_range(FUSE_MIN..FUSE_MAX)
}

/// Number of sparks for one roll, `0..=MAX_SPARKS`.
pub fn roll_burst(rng: &mut impl Rng) -> usize {
    rng.gen_range(0..=MAX_SPARKS)
}

fn spark_velocity(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(0.0..SPARK_SPEED_MAX),
        rng.gen_range(0.0..SPARK_SPEED_MAX),
        rng.gen_range(0.0..SPARK_SPEED_MAX),
    )
}

/// Overwrite a random-length prefix of the table with fresh velocities.
/// Slots past the prefix keep whatever they held before.
pub fn generate_spark_velocities(table: &SparkTable, rng: &mut impl Rng) -> SparkTable {
    let count = roll_burst(rng);
    let mut velocities = table.velocities;
    for slot in velocities.iter_mut().take(count) {
        *slot = spark_velocity(rng);
    }
    trace!("generated {} spark velocities", count);
    SparkTable {
        velocities,
        populated: count,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Park the shot on the launch point with `kind`'s constants.
pub fn select_type(state: &SimState, kind: ProjectileType, rng: &mut impl Rng) -> SimState {
    let (damping, velocity, acceleration) = launch_profile(kind);

    let firework = if kind == ProjectileType::Firework {
        let previous = state
            .firework
            .as_ref()
            .map(|fw| fw.table.clone())
            .unwrap_or_default();
        Some(FireworkPayload {
            table: generate_spark_velocities(&previous, rng),
            ..FireworkPayload::new()
        })
    } else {
        None
    };

    debug!("selected {}", kind.name());
    SimState {
        projectile_type: Some(kind),
        state: ProjectileState::Idle,
        shot: Particle {
            position: LAUNCH_POINT,
            velocity,
            acceleration,
            damping,
        },
        firework,
        flight_time: 0.0,
        ..state.clone()
    }
}

/// Launch (or relaunch) the shot and light a new fuse.
pub fn fire(state: &SimState, rng: &mut impl Rng) -> SimState {
    let fuse = sample_fuse(rng);
    let firework = state.firework.as_ref().map(|fw| FireworkPayload {
        spark: Particle {
            position: LAUNCH_POINT,
            velocity: Vec3::ZERO,
            ..fw.spark
        },
        detonated: false,
        burst: 0,
        ..fw.clone()
    });

    debug!("fired, fuse {:.3}s", fuse);
    SimState {
        state: ProjectileState::Active,
        shot: Particle {
            position: LAUNCH_POINT,
            ..state.shot
        },
        firework,
        fuse,
        flight_time: 0.0,
        ..state.clone()
    }
}

// ── Kinematics ───────────────────────────────────────────────────────────────

/// One step of `position += (velocity * damping + acceleration * dt) * dt`.
///
/// Velocity is left as-is: damping scales the same launch velocity every
/// step rather than decaying it.
pub fn step_particle(particle: &Particle, dt: f32) -> Particle {
    let dt = dt.max(0.0);
    let displacement = (particle.velocity * particle.damping + particle.acceleration * dt) * dt;
    Particle {
        position: particle.position + displacement,
        ..*particle
    }
}

pub fn is_out_of_bounds(position: Vec3) -> bool {
    position.y <= FLOOR_Y || position.z >= FAR_Z
}

/// Send a shot that left the arena back to the launch point and restart its
/// clock.  The fuse is kept.
pub fn respawn_if_out_of_bounds(state: &SimState) -> SimState {
    let respawns = state
        .projectile_type
        .map(ProjectileType::respawns_out_of_bounds)
        .unwrap_or(false);
    if !respawns || !is_out_of_bounds(state.shot.position) {
        return state.clone();
    }
    debug!("respawn from {:?}", state.shot.position);
    SimState {
        shot: Particle {
            position: LAUNCH_POINT,
            ..state.shot
        },
        flight_time: 0.0,
        ..state.clone()
    }
}

/// Advance whichever particle is live by `dt`, then apply the bounds rule.
/// No-op unless the projectile is active.
pub fn integrate(state: &SimState, dt: f32) -> SimState {
    if state.state != ProjectileState::Active {
        return state.clone();
    }

    let mut next = state.clone();
    match next.firework.as_mut() {
        Some(fw) if fw.detonated => fw.spark = step_particle(&fw.spark, dt),
        _ => next.shot = step_particle(&next.shot, dt),
    }
    respawn_if_out_of_bounds(&next)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame of `frame_dt` seconds.  All
/// randomness comes through `rng` so callers control determinism.
pub fn tick(state: &SimState, frame_dt: f32, rng: &mut impl Rng) -> SimState {
    let mut next = SimState {
        frame: state.frame + 1,
        ..state.clone()
    };
    if next.state != ProjectileState::Active || next.projectile_type.is_none() {
        return next;
    }

    // ── 1. Advance the clock ─────────────────────────────────────────────────
    let frame_dt = frame_dt.max(0.0);
    next.flight_time += frame_dt;
    let step = match next.step_mode {
        StepMode::SinceLaunch => next.flight_time,
        StepMode::PerFrame => frame_dt,
    };

    // ── 2. Integrate + bounds ────────────────────────────────────────────────
    let mut next = integrate(&next, step);

    // ── 3. Fuse and burst ────────────────────────────────────────────────────
    if let Some(fw) = next.firework.as_mut() {
        if !fw.detonated && next.flight_time > next.fuse {
            fw.detonated = true;
            fw.spark.position = next.shot.position;
            debug!(
                "detonated at {:?} after {:.3}s",
                next.shot.position, next.flight_time
            );
        }
        if fw.detonated {
            fw.burst = roll_burst(rng);
            // The spark integrates with the last velocity handed out.
            if fw.burst > 0 {
                fw.spark.velocity = fw.table.velocities[fw.burst - 1];
            }
        }
    }

    next
}

// ── Render output ────────────────────────────────────────────────────────────

/// Particles to draw this frame.  Every spark draw shares the one spark
/// position.
pub fn draw_list(state: &SimState) -> Vec<Draw> {
    if state.projectile_type.is_none() {
        return Vec::new();
    }

    match &state.firework {
        Some(fw) if fw.detonated => (0..fw.burst)
            .map(|i| Draw {
                kind: DrawKind::Spark(i),
                position: fw.spark.position,
                velocity: fw.table.velocities[i],
                scale: SPARK_SCALE,
            })
            .collect(),
        _ => vec![Draw {
            kind: DrawKind::Shot,
            position: state.shot.position,
            velocity: state.shot.velocity,
            scale: SHOT_SCALE,
        }],
    }
}
