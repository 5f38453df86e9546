//! # Basic Movement
//!
//! Velocity update behind the `CharacterBody3D/basic_movement` script
//! template: gravity while airborne, a jump impulse from the floor, and
//! ground speed that snaps to the input direction or decelerates to rest.

use meridian_math::{mathf, Basis, Real, Vector2, Vector3};
use serde::Deserialize;

use crate::error::{TemplateError, TemplateResult};

/// Ground speed (units per second).
pub const SPEED: Real = 5.0;

/// Upward velocity applied on jump (units per second).
pub const JUMP_VELOCITY: Real = 4.5;

/// Tunables for [`BasicMovement::step`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasicMovement {
    /// Ground speed (units per second).
    pub speed: Real,
    /// Upward velocity applied on jump (units per second).
    pub jump_velocity: Real,
}

impl Default for BasicMovement {
    fn default() -> Self {
        Self {
            speed: SPEED,
            jump_velocity: JUMP_VELOCITY,
        }
    }
}

/// What the body reports at the start of a physics frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Current velocity.
    pub velocity: Vector3,
    /// Gravity acting on the body (acceleration).
    pub gravity: Vector3,
    /// Orientation of the body; input is rotated by this.
    pub basis: Basis,
    /// Is the body standing on a floor?
    pub on_floor: bool,
}

impl BodyState {
    /// A body at rest on the floor under standard gravity.
    #[must_use]
    pub fn grounded() -> Self {
        Self {
            velocity: Vector3::ZERO,
            gravity: Vector3::new(0.0, -9.8, 0.0),
            basis: Basis::IDENTITY,
            on_floor: true,
        }
    }
}

/// Player input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Strafe (`x`) and forward/back (`y`) axes, each in `[-1, 1]`.
    pub direction: Vector2,
    /// Jump action pressed this frame.
    pub jump_pressed: bool,
}

impl BasicMovement {
    /// Loads tunables from TOML; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidMovement`] on malformed TOML, or when
    /// either value is negative or not finite.
    pub fn from_toml_str(source: &str) -> TemplateResult<Self> {
        let movement: Self =
            toml::from_str(source).map_err(|e| TemplateError::InvalidMovement(e.to_string()))?;
        if !movement.speed.is_finite() || movement.speed < 0.0 {
            return Err(TemplateError::InvalidMovement(format!(
                "speed must be finite and not negative, got {}",
                movement.speed
            )));
        }
        if !movement.jump_velocity.is_finite() || movement.jump_velocity < 0.0 {
            return Err(TemplateError::InvalidMovement(format!(
                "jump_velocity must be finite and not negative, got {}",
                movement.jump_velocity
            )));
        }
        Ok(movement)
    }

    /// Returns the body's velocity after one frame of `delta` seconds.
    #[must_use]
    pub fn step(&self, body: &BodyState, input: MovementInput, delta: f64) -> Vector3 {
        let mut velocity = body.velocity;

        if !body.on_floor {
            #[allow(clippy::cast_possible_truncation)]
            let dt = delta as Real;
            velocity += body.gravity * dt;
        }

        if input.jump_pressed && body.on_floor {
            velocity.y = self.jump_velocity;
        }

        let direction = (body.basis * Vector3::new(input.direction.x, 0.0, input.direction.y)).normalized();
        if direction == Vector3::ZERO {
            velocity.x = mathf::move_toward(body.velocity.x, 0.0, self.speed);
            velocity.z = mathf::move_toward(body.velocity.z, 0.0, self.speed);
        } else {
            velocity.x = direction.x * self.speed;
            velocity.z = direction.z * self.speed;
        }

        velocity
    }
}

/// [`BasicMovement::step`] with the default tunables.
#[must_use]
pub fn basic_movement_step(body: &BodyState, input: MovementInput, delta: f64) -> Vector3 {
    BasicMovement::default().step(body, input, delta)
}
