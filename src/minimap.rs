use crate::caster::Ray;
use crate::draw::DrawingBackend;
use crate::player::{PLAYER_SIZE, Player};
use crate::renderer::palette;
use crate::world::GridMap;

/// Length of the heading indicator in world units.
const HEADING_LENGTH: f32 = PLAYER_SIZE * 7.0;

/// Top-down overlay. World coordinates are multiplied by `scale` and
/// shifted by `offset` (screen pixels).
#[derive(Clone, Copy, Debug)]
pub struct Minimap {
    pub offset: [f32; 2],
    pub scale: f32,
}

impl Minimap {
    pub fn new(offset: [f32; 2], scale: f32) -> Self {
        Self { offset, scale }
    }

    #[inline]
    fn to_screen(&self, p: [f32; 2]) -> [f32; 2] {
        [
            self.offset[0] + p[0] * self.scale,
            self.offset[1] + p[1] * self.scale,
        ]
    }

    fn line_from_player(
        &self,
        backend: &mut impl DrawingBackend,
        player: &Player,
        angle: f32,
        length: f32,
        colour: u32,
    ) {
        let from = self.to_screen(player.pos);
        let to = self.to_screen([
            player.pos[0] + angle.cos() * length,
            player.pos[1] + angle.sin() * length,
        ]);
        backend.draw_line(from[0], from[1], to[0], to[1], colour);
    }

    pub fn render(
        &self,
        backend: &mut impl DrawingBackend,
        map: &GridMap,
        player: &Player,
        rays: &[Ray],
    ) {
        let side = self.scale * map.cell_size;
        for (x, y) in map.walls() {
            backend.fill_rect(
                self.offset[0] + x as f32 * side,
                self.offset[1] + y as f32 * side,
                side,
                side,
                palette::MINIMAP_WALL,
            );
        }

        for ray in rays {
            self.line_from_player(
                backend,
                player,
                ray.angle,
                ray.distance,
                palette::MINIMAP_RAY,
            );
        }

        let centre = self.to_screen(player.pos);
        backend.fill_rect(
            centre[0] - PLAYER_SIZE / 2.0,
            centre[1] - PLAYER_SIZE / 2.0,
            PLAYER_SIZE,
            PLAYER_SIZE,
            palette::MINIMAP_PLAYER,
        );

        self.line_from_player(
            backend,
            player,
            player.angle,
            HEADING_LENGTH,
            palette::MINIMAP_HEADING,
        );
    }
}
