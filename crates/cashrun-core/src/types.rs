//! Fundamental geometric and simulation types.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DT;

/// Position, Euler rotation (degrees) and scale of a scene object.
/// y is up; zero rotation faces +z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn distance_to(&self, other: &Transform) -> f32 {
        self.position.distance(other.position)
    }

    /// Rotation as a quaternion (yaw, then pitch, then roll).
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Unit vector the object is looking along.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f32 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += f64::from(self.dt());
    }
}
