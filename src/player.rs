use crate::world::CELL_SIZE;

/// Forward speed in world units per tick while a move key is held.
pub const FORWARD_RATE: f32 = 2.0;

/// Side of the minimap player marker, in world units.
pub const PLAYER_SIZE: f32 = CELL_SIZE / 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: [f32; 2], // (x, y) position in world space
    pub angle: f32,    // radians, heading; never wrapped
    pub speed: f32,    // signed, one of {0, +FORWARD_RATE, -FORWARD_RATE}
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: [x, y],
            angle,
            speed: 0.0,
        }
    }

    /// Advances position one tick along the heading.
    #[inline]
    pub fn integrate(&mut self) {
        self.pos[0] += self.angle.cos() * self.speed;
        self.pos[1] += self.angle.sin() * self.speed;
    }

    pub fn press(&mut self, key: Move) {
        self.speed = match key {
            Move::Forward => FORWARD_RATE,
            Move::Backward => -FORWARD_RATE,
        };
    }

    /// Releasing either move key stops the player, matching the key-up
    /// handler which does not track which key is still down.
    pub fn release(&mut self) {
        self.speed = 0.0;
    }

    /// Pointer motion delta in degrees.
    #[inline]
    pub fn turn_degrees(&mut self, delta: f32) {
        self.angle += delta.to_radians();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(CELL_SIZE * 1.5, CELL_SIZE * 2.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spawn() {
        let p = Player::default();
        assert_eq!(p.pos, [96.0, 128.0]);
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.speed, 0.0);
    }

    #[test]
    fn test_forward_tick_along_x() {
        let mut p = Player::default();
        p.press(Move::Forward);
        p.integrate();
        assert_eq!(p.pos[0], 96.0 + FORWARD_RATE);
        assert_eq!(p.pos[1], 128.0);
    }

    #[test]
    fn test_backward_then_release() {
        let mut p = Player::default();
        p.press(Move::Backward);
        assert_eq!(p.speed, -FORWARD_RATE);
        p.integrate();
        assert_eq!(p.pos[0], 96.0 - FORWARD_RATE);
        p.release();
        p.integrate();
        assert_eq!(p.pos[0], 96.0 - FORWARD_RATE);
    }

    #[test]
    fn test_idle_tick_does_not_move() {
        let mut p = Player::new(10.0, 20.0, 1.0);
        p.integrate();
        assert_eq!(p.pos, [10.0, 20.0]);
    }

    #[test]
    fn test_turn_adds_radians() {
        let mut p = Player::default();
        p.turn_degrees(10.0);
        assert!((p.angle - 10.0f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_turn_is_not_wrapped() {
        let mut p = Player::default();
        for _ in 0..40 {
            p.turn_degrees(10.0);
        }
        assert!(p.angle > std::f32::consts::TAU);
        assert!((p.angle - 400.0f32.to_radians()).abs() < 1e-4);
    }
}
