/// 0RGB, the layout softbuffer expects.
pub type Colour = u32;

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> Colour {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Primitive drawing operations the projector and minimap issue.
pub trait DrawingBackend {
    /// Drops everything drawn since the previous call.
    fn clear_scene(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Colour);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, colour: Colour);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colour: Colour,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        colour: Colour,
    },
}

/// Backend that keeps commands in issue order instead of rasterizing them.
#[derive(Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl DrawingBackend for CommandList {
    fn clear_scene(&mut self) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Colour) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            colour,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, colour: Colour) {
        self.commands.push(DrawCommand::Line {
            from: [x1, y1],
            to: [x2, y2],
            colour,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb_matches_hex() {
        assert_eq!(pack_rgb(0x00, 0x9a, 0xc9), 0x009ac9);
        assert_eq!(pack_rgb(0x6b, 0x4b, 0x3d), 0x6b4b3d);
    }

    #[test]
    fn test_command_list_records_in_order() {
        let mut list = CommandList::default();
        list.fill_rect(1.0, 2.0, 3.0, 4.0, 0xff0000);
        list.draw_line(0.0, 0.0, 5.0, 5.0, 0x00ff00);
        list.fill_rect(0.0, 0.0, 1.0, 1.0, 0x0000ff);

        assert_eq!(list.commands.len(), 3);
        assert_eq!(list.rects().count(), 2);
        assert_eq!(list.lines().count(), 1);
        assert_eq!(
            list.commands[1],
            DrawCommand::Line {
                from: [0.0, 0.0],
                to: [5.0, 5.0],
                colour: 0x00ff00
            }
        );
    }

    #[test]
    fn test_clear_scene_drops_commands() {
        let mut list = CommandList::default();
        list.fill_rect(0.0, 0.0, 1.0, 1.0, 0);
        list.clear_scene();
        assert!(list.commands.is_empty());
    }
}
