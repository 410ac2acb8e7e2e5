/// Fixed perspective camera watching the launch area.

use glam::{Mat4, Vec2, Vec3};

pub const EYE: Vec3 = Vec3::new(-3.5, 5.0, -15.0);
pub const TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);
pub const FOV_Y_DEGREES: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    /// Square viewport, as the 800×800 window the scene was laid out for.
    pub fn standard() -> Camera {
        Camera::with_aspect(1.0)
    }

    /// `aspect` is viewport width over height.
    pub fn with_aspect(aspect: f32) -> Camera {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Camera {
            view: Mat4::look_at_rh(EYE, TARGET, Vec3::Y),
            projection: Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// World position to normalized device coordinates.  `None` when the
    /// point is behind the eye or outside the near/far range.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(ndc)
    }

    /// NDC to a `(col, row)` cell of a `cols`×`rows` viewport, `None` when
    /// the point falls off the edge.
    pub fn to_cell(ndc: Vec2, cols: u16, rows: u16) -> Option<(u16, u16)> {
        if cols == 0 || rows == 0 || !(-1.0..=1.0).contains(&ndc.x) || !(-1.0..=1.0).contains(&ndc.y) {
            return None;
        }
        let col = ((ndc.x + 1.0) * 0.5 * cols as f32).floor() as u16;
        let row = ((1.0 - ndc.y) * 0.5 * rows as f32).floor() as u16;
        Some((col.min(cols - 1), row.min(rows - 1)))
    }

    /// Project straight to a viewport cell.
    pub fn world_to_cell(&self, world: Vec3, cols: u16, rows: u16) -> Option<(u16, u16)> {
        self.project(world)
            .and_then(|ndc| Camera::to_cell(ndc.truncate(), cols, rows))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::standard()
    }
}
