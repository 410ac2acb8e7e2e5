/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// simulation.  No simulation logic is performed; this module only projects
/// particles through the camera and translates them into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec3;
use projectile_playground::camera::Camera;
use projectile_playground::entities::{
    Draw, DrawKind, ProjectileState, ProjectileType, SimState, FAR_Z, FLOOR_Y, LAUNCH_POINT,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HUD_DIM: Color = Color::Grey;
const C_FLOOR: Color = Color::DarkGreen;
const C_LAUNCHER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const SPARK_COLORS: [Color; 5] = [
    Color::Red,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

fn shot_style(kind: ProjectileType) -> (&'static str, Color) {
    match kind {
        ProjectileType::Bullet => ("•", Color::White),
        ProjectileType::Artillery => ("●", Color::Yellow),
        ProjectileType::Fireball => ("◉", Color::Red),
        ProjectileType::Laser => ("═", Color::Cyan),
        ProjectileType::Firework => ("↑", Color::Magenta),
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Play area inside the border: columns 1..width-1, rows 2..height-2.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn for_terminal(width: u16, height: u16) -> Viewport {
        Viewport {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2),
            rows: height.saturating_sub(4),
        }
    }

    /// Terminal cells are roughly twice as tall as they are wide.
    fn camera(&self) -> Camera {
        Camera::with_aspect(self.cols as f32 / (self.rows.max(1) as f32 * 2.0))
    }

    fn cell(&self, camera: &Camera, world: Vec3) -> Option<(u16, u16)> {
        camera
            .world_to_cell(world, self.cols, self.rows)
            .map(|(c, r)| (self.left + c, self.top + r))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &SimState,
    draws: &[Draw],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let viewport = Viewport::for_terminal(width, height);
    let camera = viewport.camera();

    draw_border(out, width, height)?;
    draw_hud(out, state, draws, width)?;
    draw_floor(out, &viewport, &camera)?;
    draw_launcher(out, &viewport, &camera)?;

    for draw in draws {
        draw_particle(out, &viewport, &camera, state, draw)?;
    }

    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &SimState,
    draws: &[Draw],
    width: u16,
) -> std::io::Result<()> {
    // Type and state — left
    out.queue(cursor::MoveTo(1, 0))?;
    let type_str = match state.projectile_type {
        Some(kind) => {
            let (_, color) = shot_style(kind);
            out.queue(style::SetForegroundColor(color))?;
            format!("[{}] {}", kind.number(), kind.name())
        }
        None => {
            out.queue(style::SetForegroundColor(C_HUD_DIM))?;
            "[-] no type".to_string()
        }
    };
    out.queue(Print(&type_str))?;

    let state_str = match state.state {
        ProjectileState::Idle => "  IDLE",
        ProjectileState::Active => "  FLYING",
    };
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(state_str))?;

    // Clock and fuse — centre
    let mut clock = format!("t {:>6.2}s", state.flight_time);
    if let Some(fw) = &state.firework {
        if fw.detonated {
            clock.push_str(&format!("  BURST x{}", fw.burst));
        } else {
            clock.push_str(&format!("  fuse {:.2}s", state.fuse));
        }
    }
    let cx = (width / 2).saturating_sub(clock.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_DIM))?;
    out.queue(Print(&clock))?;

    // Position of the first draw — right
    if let Some(draw) = draws.first() {
        let p = draw.position;
        let pos = format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        let rx = width.saturating_sub(pos.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(Print(&pos))?;
    }

    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

/// Dotted line where shots respawn, running down range from the launcher.
fn draw_floor<W: Write>(out: &mut W, viewport: &Viewport, camera: &Camera) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_FLOOR))?;
    let mut z = LAUNCH_POINT.z;
    while z <= FAR_Z {
        if let Some((col, row)) = viewport.cell(camera, Vec3::new(0.0, FLOOR_Y, z)) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
        }
        z += 2.5;
    }
    Ok(())
}

fn draw_launcher<W: Write>(out: &mut W, viewport: &Viewport, camera: &Camera) -> std::io::Result<()> {
    if let Some((col, row)) = viewport.cell(camera, LAUNCH_POINT) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_LAUNCHER))?;
        out.queue(Print("+"))?;
    }
    Ok(())
}

// ── Particles ─────────────────────────────────────────────────────────────────

fn draw_particle<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    camera: &Camera,
    state: &SimState,
    draw: &Draw,
) -> std::io::Result<()> {
    // Place the model origin, exactly where the mesh would be translated to.
    let origin = draw.transform().transform_point3(Vec3::ZERO);
    let Some((col, row)) = viewport.cell(camera, origin) else {
        return Ok(());
    };

    let (glyph, color) = match (draw.kind, state.projectile_type) {
        (DrawKind::Spark(i), _) => ("*", SPARK_COLORS[i % SPARK_COLORS.len()]),
        (DrawKind::Shot, Some(kind)) => shot_style(kind),
        (DrawKind::Shot, None) => return Ok(()),
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "1 Bullet  2 Artillery  3 Fireball  4 Laser  5 Firework   SPACE : Fire   Q : Quit",
    ))?;
    Ok(())
}
