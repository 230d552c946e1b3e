//! The player's vehicle and its vertical dynamics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::input::{InputLatch, Key};
use crate::settings::{Board, Tuning};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is downward
    pub velocity: f32,
}

impl Vehicle {
    /// A vehicle at rest at the default start position
    pub fn spawn(board: &Board, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.vehicle_start_x, tuning.vehicle_start_y(board)),
            size: Vec2::new(tuning.vehicle_width, tuning.vehicle_height),
            velocity: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// One Euler step: thrust while ascend is held, gravity otherwise.
    /// Velocity is deliberately left unbounded.
    pub fn integrate(&mut self, input: &InputLatch, tuning: &Tuning) {
        if input.is_held(Key::Ascend) {
            self.velocity -= tuning.thrust;
        } else {
            self.velocity += tuning.gravity;
        }
        self.pos.y += self.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_at_default_position() {
        let vehicle = Vehicle::spawn(&Board::default(), &Tuning::default());
        assert_eq!(vehicle.pos, Vec2::new(20.0, 240.0));
        assert_eq!(vehicle.size, Vec2::new(50.0, 30.0));
        assert_eq!(vehicle.velocity, 0.0);
    }

    #[test]
    fn test_gravity_without_thrust() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::spawn(&Board::default(), &tuning);
        let input = InputLatch::new();

        vehicle.integrate(&input, &tuning);
        assert_eq!(vehicle.velocity, 0.5);
        assert_eq!(vehicle.pos.y, 240.5);

        vehicle.integrate(&input, &tuning);
        assert_eq!(vehicle.velocity, 1.0);
        assert_eq!(vehicle.pos.y, 241.5);
        assert_eq!(vehicle.pos.x, 20.0);
    }

    #[test]
    fn test_thrust_while_ascend_held() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::spawn(&Board::default(), &tuning);
        let mut input = InputLatch::new();
        input.press(Key::Ascend);

        for _ in 0..10 {
            vehicle.integrate(&input, &tuning);
        }
        assert!(vehicle.velocity < 0.0);
        assert!(vehicle.pos.y < 240.0);
    }

    #[test]
    fn test_descend_key_does_not_change_dynamics() {
        let tuning = Tuning::default();
        let board = Board::default();
        let mut plain = Vehicle::spawn(&board, &tuning);
        let mut descending = Vehicle::spawn(&board, &tuning);
        let mut input = InputLatch::new();

        plain.integrate(&input, &tuning);
        input.press(Key::Descend);
        descending.integrate(&input, &tuning);
        assert_eq!(plain, descending);
    }

    #[test]
    fn test_velocity_is_unbounded() {
        let tuning = Tuning::default();
        let mut vehicle = Vehicle::spawn(&Board::default(), &tuning);
        let input = InputLatch::new();
        for _ in 0..1000 {
            vehicle.integrate(&input, &tuning);
        }
        assert_eq!(vehicle.velocity, 500.0);
    }
}
