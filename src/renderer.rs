use crate::caster::Ray;
use crate::draw::{Colour, DrawingBackend, pack_rgb};

/// Wall height numerator is `cell_size * WALL_K`.
const WALL_K: f32 = 5.0;
const WALL_SCALE: f32 = 200.0;

/// Keeps a ray that starts on a wall face from producing an infinite column.
const MIN_DISTANCE: f32 = 1e-3;

pub mod palette {
    use super::{Colour, pack_rgb};

    pub const BACKGROUND: Colour = pack_rgb(0x6b, 0x4b, 0x3d);

    pub const WALL_LIGHT: Colour = pack_rgb(0x00, 0x9a, 0xc9);
    pub const WALL_DARK: Colour = pack_rgb(0x00, 0x5a, 0x75);
    pub const FLOOR: Colour = pack_rgb(0x22, 0x22, 0x22);
    pub const CEILING: Colour = pack_rgb(0x44, 0x44, 0x44);

    pub const MINIMAP_WALL: Colour = pack_rgb(0xff, 0xff, 0xff);
    pub const MINIMAP_RAY: Colour = pack_rgb(0xff, 0x00, 0x00);
    pub const MINIMAP_PLAYER: Colour = pack_rgb(0x00, 0x00, 0xff);
    pub const MINIMAP_HEADING: Colour = pack_rgb(0x00, 0x00, 0x00);
}

/// Projects the radial ray length onto the view direction.
#[inline]
pub fn correct_fish_eye(distance: f32, ray_angle: f32, player_angle: f32) -> f32 {
    distance * (ray_angle - player_angle).cos()
}

/// On-screen wall height for a fish-eye corrected distance. Not clamped to
/// the viewport; the backend clips.
#[inline]
pub fn wall_height(corrected_distance: f32, cell_size: f32) -> f32 {
    (cell_size * WALL_K) / corrected_distance.max(MIN_DISTANCE) * WALL_SCALE
}

#[inline]
fn wall_colour(ray: &Ray) -> Colour {
    // vertical faces lit, horizontal faces shaded
    if ray.vertical {
        palette::WALL_LIGHT
    } else {
        palette::WALL_DARK
    }
}

/// Draws one column per ray: ceiling, wall, floor. Column `i` sits at
/// screen x `i`.
pub fn render_view(
    backend: &mut impl DrawingBackend,
    rays: &[Ray],
    player_angle: f32,
    cell_size: f32,
    viewport_height: f32,
) {
    let half = viewport_height / 2.0;

    for (i, ray) in rays.iter().enumerate() {
        let x = i as f32;

        if !ray.hit {
            // nothing within range: open sky over bare floor
            backend.fill_rect(x, 0.0, 1.0, half, palette::CEILING);
            backend.fill_rect(x, half, 1.0, half, palette::FLOOR);
            continue;
        }

        let corrected = correct_fish_eye(ray.distance, ray.angle, player_angle);
        let height = wall_height(corrected, cell_size);
        let top = half - height / 2.0;
        let bottom = half + height / 2.0;

        backend.fill_rect(x, 0.0, 1.0, top, palette::CEILING);
        backend.fill_rect(x, top, 1.0, height, wall_colour(ray));
        backend.fill_rect(x, bottom, 1.0, viewport_height - bottom, palette::FLOOR);
    }
}
