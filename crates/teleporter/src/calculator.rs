//! Exit orientation and velocity for a single teleport.
//!
//! Everything here is a pure function of the source, destination and
//! traveler state. [`TeleporterSystem`](crate::TeleporterSystem) gathers the
//! inputs from the world and writes the results back.

use engine_math::{Rotator, Vec3, unwind_degrees};

use crate::teleporter::{ExitRotation, TeleportPolicy};

/// Destinations face outward, opposite their own forward axis.
const EXIT_YAW_FLIP: f32 = 180.0;

/// State gathered before a teleport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportInput {
    /// Orientation of the teleporter the body entered.
    pub teleporter_rotation: Rotator,
    /// Orientation of the linked destination.
    pub destination_rotation: Rotator,
    /// The traveler's facing: its controller's look rotation when it has a
    /// controller, otherwise its own transform rotation.
    pub traveler_rotation: Rotator,
    pub traveler_velocity: Vec3,
}

/// Result of [`compute_teleport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportTransform {
    /// New facing. Pitch and roll are always zero and yaw is unwound.
    pub rotation: Rotator,
    pub velocity: Vec3,
}

/// Compute where a traveler faces and how it moves after a teleport.
#[must_use]
pub fn compute_teleport(input: &TeleportInput, policy: TeleportPolicy) -> TeleportTransform {
    TeleportTransform {
        rotation: desired_rotation(input, policy.exit_rotation),
        velocity: exit_velocity(input, policy),
    }
}

/// The traveler's facing after exiting the destination.
///
/// Teleports never impart pitch or roll.
#[must_use]
pub fn desired_rotation(input: &TeleportInput, exit_rotation: ExitRotation) -> Rotator {
    let yaw = match exit_rotation {
        ExitRotation::Relative => {
            let relative = input.destination_rotation + input.traveler_rotation
                - input.teleporter_rotation;
            relative.yaw + EXIT_YAW_FLIP
        }
        ExitRotation::Fixed => input.destination_rotation.yaw,
    };
    Rotator::from_yaw(unwind_degrees(yaw))
}

/// The traveler's velocity after exiting the destination.
#[must_use]
pub fn exit_velocity(input: &TeleportInput, policy: TeleportPolicy) -> Vec3 {
    if !policy.keep_momentum {
        return Vec3::ZERO;
    }

    let velocity = input.traveler_velocity;
    match policy.exit_rotation {
        ExitRotation::Relative => {
            // Yaw-only rotation, so the vertical component survives unchanged.
            let delta = momentum_yaw_delta(input.teleporter_rotation, input.destination_rotation);
            Rotator::from_yaw(delta).rotate_vector(velocity)
        }
        ExitRotation::Fixed => {
            let mut redirected =
                input.destination_rotation.yaw_forward() * horizontal_speed(velocity);
            redirected.z = velocity.z;
            redirected
        }
    }
}

/// Speed in the horizontal (XY) plane.
#[must_use]
pub fn horizontal_speed(velocity: Vec3) -> f32 {
    velocity.truncate().length()
}

/// Heading change applied to momentum in [`ExitRotation::Relative`] mode.
#[must_use]
pub fn momentum_yaw_delta(teleporter: Rotator, destination: Rotator) -> f32 {
    unwind_degrees(destination.yaw - teleporter.yaw + EXIT_YAW_FLIP)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn input(teleporter: f32, destination: f32, traveler: f32, velocity: Vec3) -> TeleportInput {
        TeleportInput {
            teleporter_rotation: Rotator::from_yaw(teleporter),
            destination_rotation: Rotator::from_yaw(destination),
            traveler_rotation: Rotator::from_yaw(traveler),
            traveler_velocity: velocity,
        }
    }

    fn policy(exit_rotation: ExitRotation, keep_momentum: bool) -> TeleportPolicy {
        TeleportPolicy {
            exit_rotation,
            keep_momentum,
        }
    }

    #[test]
    fn test_relative_scenario_quarter_turn() {
        let out = desired_rotation(&input(0.0, 90.0, 0.0, Vec3::ZERO), ExitRotation::Relative);
        assert_eq!(out, Rotator::from_yaw(-90.0));
    }

    #[test]
    fn test_relative_with_matching_ends_flips_traveler() {
        for (ends, traveler) in [(0.0, 0.0), (45.0, 10.0), (-170.0, 100.0), (90.0, -135.0)] {
            let out = desired_rotation(&input(ends, ends, traveler, Vec3::ZERO), ExitRotation::Relative);
            let expected = unwind_degrees(traveler + 180.0);
            assert!((out.yaw - expected).abs() < EPS, "ends={ends} traveler={traveler}");
        }
    }

    #[test]
    fn test_relative_zeroes_pitch_and_roll() {
        let input = TeleportInput {
            teleporter_rotation: Rotator::new(10.0, 5.0, 3.0),
            destination_rotation: Rotator::new(200.0, 15.0, -8.0),
            traveler_rotation: Rotator::new(30.0, -40.0, 12.0),
            traveler_velocity: Vec3::ZERO,
        };
        let out = desired_rotation(&input, ExitRotation::Relative);
        assert_eq!(out.pitch, 0.0);
        assert_eq!(out.roll, 0.0);
        // 200 + 30 - 10 + 180 = 400 -> 40
        assert!((out.yaw - 40.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_ignores_traveler() {
        for traveler in [Rotator::ZERO, Rotator::new(123.0, 40.0, -7.0), Rotator::from_yaw(-90.0)] {
            let input = TeleportInput {
                teleporter_rotation: Rotator::from_yaw(33.0),
                destination_rotation: Rotator::new(370.0, 20.0, 5.0),
                traveler_rotation: traveler,
                traveler_velocity: Vec3::ZERO,
            };
            assert_eq!(
                desired_rotation(&input, ExitRotation::Fixed),
                Rotator::from_yaw(10.0)
            );
        }
    }

    #[test]
    fn test_discarded_momentum_is_zero() {
        let v = Vec3::new(300.0, -120.0, 45.0);
        for exit in [ExitRotation::Relative, ExitRotation::Fixed] {
            let out = compute_teleport(&input(0.0, 90.0, 0.0, v), policy(exit, false));
            assert_eq!(out.velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn test_relative_momentum_rotates_by_delta() {
        // Same heading on both ends: momentum is reversed horizontally.
        let out = exit_velocity(
            &input(0.0, 0.0, 0.0, Vec3::new(100.0, 0.0, 25.0)),
            policy(ExitRotation::Relative, true),
        );
        assert!(out.abs_diff_eq(Vec3::new(-100.0, 0.0, 25.0), EPS), "{out}");

        // Destination turned 90 degrees: delta = 270 -> -90.
        let out = exit_velocity(
            &input(0.0, 90.0, 0.0, Vec3::new(100.0, 0.0, -10.0)),
            policy(ExitRotation::Relative, true),
        );
        assert!(out.abs_diff_eq(Vec3::new(0.0, -100.0, -10.0), EPS), "{out}");
    }

    #[test]
    fn test_relative_momentum_preserves_speed() {
        let v = Vec3::new(37.0, -212.0, 80.0);
        let out = exit_velocity(&input(17.0, -143.0, 5.0, v), policy(ExitRotation::Relative, true));
        assert!((out.length() - v.length()).abs() < EPS);
        assert!((out.z - v.z).abs() < EPS);
    }

    #[test]
    fn test_fixed_momentum_follows_destination_forward() {
        let v = Vec3::new(30.0, 40.0, -12.0);
        let out = exit_velocity(&input(0.0, 90.0, 0.0, v), policy(ExitRotation::Fixed, true));
        assert!(out.abs_diff_eq(Vec3::new(0.0, 50.0, -12.0), EPS), "{out}");

        assert!((horizontal_speed(out) - horizontal_speed(v)).abs() < EPS);
        let horizontal = out.truncate();
        let forward = Rotator::from_yaw(90.0).yaw_forward().truncate();
        assert!(horizontal.normalize().abs_diff_eq(forward, EPS));
    }

    #[test]
    fn test_fixed_momentum_ignores_destination_pitch() {
        let input = TeleportInput {
            teleporter_rotation: Rotator::ZERO,
            destination_rotation: Rotator::new(180.0, 60.0, 0.0),
            traveler_rotation: Rotator::ZERO,
            traveler_velocity: Vec3::new(0.0, 10.0, 3.0),
        };
        let out = exit_velocity(&input, policy(ExitRotation::Fixed, true));
        assert!(out.abs_diff_eq(Vec3::new(-10.0, 0.0, 3.0), EPS), "{out}");
    }

    #[test]
    fn test_horizontal_speed_ignores_vertical() {
        assert_eq!(horizontal_speed(Vec3::new(3.0, 4.0, -20.0)), 5.0);
        assert_eq!(horizontal_speed(Vec3::Z), 0.0);
    }

    #[test]
    fn test_momentum_yaw_delta() {
        assert_eq!(momentum_yaw_delta(Rotator::ZERO, Rotator::ZERO), 180.0);
        assert_eq!(momentum_yaw_delta(Rotator::ZERO, Rotator::from_yaw(90.0)), -90.0);
        assert_eq!(momentum_yaw_delta(Rotator::from_yaw(90.0), Rotator::from_yaw(90.0)), 180.0);
    }
}
