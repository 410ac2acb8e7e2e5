/// All simulation entity types — pure data, no logic.

use glam::{Mat4, Vec3};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Every shot leaves from here, whatever its type.
pub const LAUNCH_POINT: Vec3 = Vec3::new(0.0, 1.5, -10.0);

/// A shot at or below this height respawns.
pub const FLOOR_Y: f32 = -5.0;

/// A shot at or beyond this depth respawns.
pub const FAR_Z: f32 = 200.0;

/// Fuse durations are drawn from `FUSE_MIN..FUSE_MAX` seconds.
pub const FUSE_MIN: f32 = 0.5;
pub const FUSE_MAX: f32 = 1.5;

/// Slots in the spark velocity table.
pub const SPARK_CAPACITY: usize = 11;

/// Upper bound (inclusive) on how many sparks a single roll produces.
pub const MAX_SPARKS: usize = 10;

/// Each spark velocity component is drawn from `0.0..SPARK_SPEED_MAX`.
pub const SPARK_SPEED_MAX: f32 = 0.01;

pub const SPARK_ACCELERATION: Vec3 = Vec3::new(0.0, -0.02, 0.0);
pub const SPARK_DAMPING: f32 = 0.99;

pub const SHOT_SCALE: f32 = 0.2;
pub const SPARK_SCALE: f32 = 0.1;

// ── Projectile kinds ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileType {
    Bullet,
    Artillery,
    Fireball,
    Laser,
    /// Flies until its fuse runs out, then bursts into sparks.
    Firework,
}

impl ProjectileType {
    pub const ALL: [ProjectileType; 5] = [
        ProjectileType::Bullet,
        ProjectileType::Artillery,
        ProjectileType::Fireball,
        ProjectileType::Laser,
        ProjectileType::Firework,
    ];

    /// Map the 1-based number shown to the user back to a type.
    pub fn from_number(n: u8) -> Option<ProjectileType> {
        match n {
            1 => Some(ProjectileType::Bullet),
            2 => Some(ProjectileType::Artillery),
            3 => Some(ProjectileType::Fireball),
            4 => Some(ProjectileType::Laser),
            5 => Some(ProjectileType::Firework),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            ProjectileType::Bullet => 1,
            ProjectileType::Artillery => 2,
            ProjectileType::Fireball => 3,
            ProjectileType::Laser => 4,
            ProjectileType::Firework => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectileType::Bullet => "Bullet",
            ProjectileType::Artillery => "Artillery",
            ProjectileType::Fireball => "Fireball",
            ProjectileType::Laser => "Laser",
            ProjectileType::Firework => "Firework",
        }
    }

    /// Types 1–4 wrap back to the launch point when they leave the arena.
    pub fn respawns_out_of_bounds(self) -> bool {
        self != ProjectileType::Firework
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileState {
    /// Parked at the launch point, not integrated.
    Idle,
    /// In flight since the last fire event.
    Active,
}

/// What value each frame's integration step is fed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Seconds since the last fire or respawn. Displacement per frame grows
    /// with flight time.
    #[default]
    SinceLaunch,
    /// Seconds since the previous frame.
    PerFrame,
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// In (0, 1]; scales the velocity term of every step.
    pub damping: f32,
}

impl Particle {
    /// A motionless particle sitting on the launch point.
    pub fn at_launch() -> Particle {
        Particle {
            position: LAUNCH_POINT,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            damping: 1.0,
        }
    }
}

/// Fixed table of spark velocities, rerolled when Firework is selected.
#[derive(Clone, Debug, PartialEq)]
pub struct SparkTable {
    pub velocities: [Vec3; SPARK_CAPACITY],
    /// How many leading entries the most recent generation wrote.
    pub populated: usize,
}

impl Default for SparkTable {
    fn default() -> Self {
        SparkTable {
            velocities: [Vec3::ZERO; SPARK_CAPACITY],
            populated: 0,
        }
    }
}

/// Extra state carried only while the selected type is Firework.
#[derive(Clone, Debug, PartialEq)]
pub struct FireworkPayload {
    pub table: SparkTable,
    /// Shared by every spark; only its velocity differs between draws.
    pub spark: Particle,
    /// Set on the first frame the flight time passes the fuse.
    pub detonated: bool,
    /// Spark draws rolled for the current frame.
    pub burst: usize,
}

impl FireworkPayload {
    pub fn new() -> FireworkPayload {
        FireworkPayload {
            table: SparkTable::default(),
            spark: Particle {
                acceleration: SPARK_ACCELERATION,
                damping: SPARK_DAMPING,
                ..Particle::at_launch()
            },
            detonated: false,
            burst: 0,
        }
    }
}

impl Default for FireworkPayload {
    fn default() -> Self {
        FireworkPayload::new()
    }
}

// ── Render instructions ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Shot,
    /// Index into the spark table for this draw.
    Spark(usize),
}

/// One particle to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Draw {
    pub kind: DrawKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
}

impl Draw {
    /// Model matrix: translate to the particle, then scale the unit mesh.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

// ── Master simulation state ───────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct SimState {
    /// `None` until the user picks a type; nothing is drawn before that.
    pub projectile_type: Option<ProjectileType>,
    pub state: ProjectileState,
    pub shot: Particle,
    pub firework: Option<FireworkPayload>,
    /// Seconds after launch at which a firework bursts.
    pub fuse: f32,
    /// Seconds since the last fire or respawn.
    pub flight_time: f32,
    pub step_mode: StepMode,
    pub frame: u64,
}
