use crate::caster::{Ray, RayCaster};
use crate::config::Config;
use crate::draw::DrawingBackend;
use crate::minimap::Minimap;
use crate::player::Player;
use crate::renderer;
use crate::world::GridMap;

/// Everything one tick reads or writes. Owned by the host; input handlers
/// only touch `player.speed` and `player.angle` between ticks.
pub struct Simulation {
    pub map: GridMap,
    pub player: Player,
    pub rays: Vec<Ray>, // reused across ticks
    pub fov: f32,       // radians
    pub max_ray_distance: f32,
    pub minimap: Option<Minimap>,
}

impl Simulation {
    pub fn new(config: &Config) -> Self {
        Self {
            map: GridMap::default(),
            player: Player::default(),
            rays: Vec::new(),
            fov: config.fov_radians(),
            max_ray_distance: config.max_ray_distance,
            minimap: (!config.no_minimap).then(|| Minimap::new([0.0, 0.0], config.minimap_scale)),
        }
    }

    /// Runs one frame: clear, move, cast one ray per column, project,
    /// overlay the minimap.
    pub fn tick(&mut self, backend: &mut impl DrawingBackend, width: usize, height: usize) {
        backend.clear_scene();

        self.player.integrate();

        let caster = RayCaster::new(&self.map, self.max_ray_distance);
        caster.sample_fov(&self.player, self.fov, width, &mut self.rays);

        renderer::render_view(
            backend,
            &self.rays,
            self.player.angle,
            self.map.cell_size,
            height as f32,
        );

        if let Some(minimap) = &self.minimap {
            minimap.render(backend, &self.map, &self.player, &self.rays);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandList, DrawCommand};
    use crate::framebuffer::Framebuffer;
    use crate::player::{FORWARD_RATE, Move};
    use crate::renderer::palette;

    #[test]
    fn test_tick_issues_columns_then_minimap() {
        let mut sim = Simulation::new(&Config::default());
        let mut list = CommandList::default();
        sim.tick(&mut list, 32, 100);

        assert_eq!(sim.rays.len(), 32);
        // every column hits in the enclosed map: 3 rects each
        let view = 32 * 3;
        let minimap_rects = 29 + 1;
        let minimap_lines = 32 + 1;
        assert_eq!(list.commands.len(), view + minimap_rects + minimap_lines);
        assert!(matches!(
            list.commands[0],
            DrawCommand::Rect { x, y, .. } if x == 0.0 && y == 0.0
        ));
        assert!(matches!(list.commands.last(), Some(DrawCommand::Line { .. })));
    }

    #[test]
    fn test_tick_clears_previous_frame() {
        let mut sim = Simulation::new(&Config {
            no_minimap: true,
            ..Config::default()
        });
        let mut list = CommandList::default();
        sim.tick(&mut list, 8, 50);
        sim.tick(&mut list, 8, 50);
        assert_eq!(list.commands.len(), 8 * 3);
    }

    #[test]
    fn test_tick_integrates_before_casting() {
        let mut sim = Simulation::new(&Config::default());
        sim.player.press(Move::Forward);
        let mut list = CommandList::default();
        sim.tick(&mut list, 1, 100);

        assert_eq!(sim.player.pos, [96.0 + FORWARD_RATE, 128.0]);
        let expected = RayCaster::new(&sim.map, sim.max_ray_distance)
            .cast(sim.player.pos, sim.player.angle - sim.fov / 2.0);
        assert_eq!(sim.rays[0], expected);
    }

    #[test]
    fn test_tick_into_framebuffer() {
        let mut sim = Simulation::new(&Config {
            no_minimap: true,
            ..Config::default()
        });
        let mut fb = Framebuffer::new(64, 2000, palette::BACKGROUND);
        sim.tick(&mut fb, 64, 2000);

        // top row is ceiling, bottom row floor, centre row wall
        for x in 0..64 {
            assert_eq!(fb.get(x, 0), Some(palette::CEILING));
            assert_eq!(fb.get(x, 1999), Some(palette::FLOOR));
            let centre = fb.get(x, 1000);
            assert!(centre == Some(palette::WALL_LIGHT) || centre == Some(palette::WALL_DARK));
        }
    }
}
