use rayon::iter::{IntoParallelIterator, ParallelExtend, ParallelIterator};

use crate::player::Player;
use crate::world::GridMap;

/// Below this a ray is treated as parallel to the grid lines being scanned.
const PARALLEL_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub angle: f32,
    pub distance: f32,  // world units to the nearest wall, or max range on a miss
    pub vertical: bool, // hit found on a vertical grid line
    pub hit: bool,
}

#[inline]
fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

/// Grid-line DDA against a `GridMap`.
pub struct RayCaster<'a> {
    map: &'a GridMap,
    max_distance: f32,
}

impl<'a> RayCaster<'a> {
    pub fn new(map: &'a GridMap, max_distance: f32) -> Self {
        Self { map, max_distance }
    }

    /// Walks the grid from `first` in steps of `step`, probing the cell that
    /// lies across each crossed line. `bias` shifts the probe back one cell
    /// when travelling towards negative coordinates.
    fn walk(
        &self,
        origin: [f32; 2],
        first: [f32; 2],
        step: [f32; 2],
        bias: [i64; 2],
    ) -> Option<f32> {
        let cell = self.map.cell_size;
        let mut next = first;
        loop {
            let d = distance(origin, next);
            if d > self.max_distance {
                return None;
            }

            let cell_x = (next[0] / cell).floor() as i64 - bias[0];
            let cell_y = (next[1] / cell).floor() as i64 - bias[1];
            if self.map.is_out_of_bounds(cell_x, cell_y) {
                return None;
            }
            if self.map.is_wall(cell_x, cell_y) {
                return Some(d);
            }

            next[0] += step[0];
            next[1] += step[1];
        }
    }

    /// Distance to the first wall found on a vertical grid line.
    pub fn vertical_hit(&self, origin: [f32; 2], angle: f32) -> Option<f32> {
        let c = angle.cos();
        if c.abs() < PARALLEL_EPS {
            return None;
        }
        let cell = self.map.cell_size;
        let right = c > 0.0;
        let tan = angle.tan();

        let base = (origin[0] / cell).floor() * cell;
        let first_x = if right { base + cell } else { base };
        let first_y = origin[1] + (first_x - origin[0]) * tan;
        let xa = if right { cell } else { -cell };

        let bias = [if right { 0 } else { 1 }, 0];
        self.walk(origin, [first_x, first_y], [xa, xa * tan], bias)
    }

    /// Distance to the first wall found on a horizontal grid line.
    pub fn horizontal_hit(&self, origin: [f32; 2], angle: f32) -> Option<f32> {
        let s = angle.sin();
        if s.abs() < PARALLEL_EPS {
            return None;
        }
        let cell = self.map.cell_size;
        // screen y grows downwards, so negative sine points up
        let up = s < 0.0;
        let tan = angle.tan();

        let base = (origin[1] / cell).floor() * cell;
        let first_y = if up { base } else { base + cell };
        let first_x = origin[0] + (first_y - origin[1]) / tan;
        let ya = if up { -cell } else { cell };

        let bias = [0, if up { 1 } else { 0 }];
        self.walk(origin, [first_x, first_y], [ya / tan, ya], bias)
    }

    /// Nearest wall along `angle`. Ties go to the vertical hit.
    pub fn cast(&self, origin: [f32; 2], angle: f32) -> Ray {
        let vertical = self.vertical_hit(origin, angle);
        let horizontal = self.horizontal_hit(origin, angle);

        let (distance, vertical, hit) = match (vertical, horizontal) {
            (Some(v), Some(h)) if h >= v => (v, true, true),
            (Some(_), Some(h)) => (h, false, true),
            (Some(v), None) => (v, true, true),
            (None, Some(h)) => (h, false, true),
            (None, None) => (self.max_distance, false, false),
        };

        Ray {
            angle,
            distance,
            vertical,
            hit,
        }
    }

    /// Fills `rays` with `count` rays spread left to right across `fov`
    /// radians, centred on the player's heading. Previous contents are
    /// discarded so the buffer can be reused between frames.
    pub fn sample_fov(&self, player: &Player, fov: f32, count: usize, rays: &mut Vec<Ray>) {
        rays.clear();
        if count == 0 {
            return;
        }
        let initial = player.angle - fov / 2.0;
        let step = fov / count as f32;
        let origin = player.pos;

        rays.par_extend(
            (0..count)
                .into_par_iter()
                .map(|i| self.cast(origin, initial + i as f32 * step)),
        );
    }
}
