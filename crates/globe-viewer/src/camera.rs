//! Orbit camera around the globe.
//!
//! Dragging with the left button orbits the eye around the origin at a fixed
//! distance while free navigation is enabled. Each frame the navigator's
//! `tick` decides the final eye position, which may be mid-travel toward a
//! selected pin, and the camera looks back at the origin from there.

use bevy::camera::ClearColorConfig;
use bevy::ecs::message::MessageReader;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use glam::DVec3;

use crate::globe::{GlobeSet, Navigator};
use crate::interaction::PointerDrag;

/// The globe camera and its high-precision eye position.
#[derive(Component)]
pub struct OrbitCamera {
    pub eye: DVec3,
}

/// Orbit tuning.
#[derive(Resource)]
pub struct OrbitSettings {
    /// Radians of rotation per pixel dragged.
    pub sensitivity: f64,
    /// Pitch limit, short of the poles.
    pub max_pitch: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            max_pitch: 85_f64.to_radians(),
        }
    }
}

/// Plugin for the orbit camera.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, orbit_drag.in_set(GlobeSet::Input))
            .add_systems(Update, advance_navigator.in_set(GlobeSet::Tick));
    }
}

fn spawn_camera(mut commands: Commands, navigator: Res<Navigator>) {
    let eye = DVec3::Z * navigator.settings().travel_radius;

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Transform::from_translation(eye.as_vec3()).looking_at(Vec3::ZERO, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: 75_f32.to_radians(),
            near: 0.1,
            far: 1_000.0,
            ..Default::default()
        }),
        OrbitCamera { eye },
    ));
}

/// Rotate `eye` around the origin by a pointer drag of `delta` pixels.
///
/// Keeps the distance to the origin. Pitch is clamped to `max_pitch` either
/// side of the equator, or to the current pitch if the eye is already beyond it.
pub fn orbit(eye: DVec3, delta: Vec2, sensitivity: f64, max_pitch: f64) -> DVec3 {
    let radius = eye.length();
    if radius == 0.0 {
        return eye;
    }
    let yaw = eye.x.atan2(eye.z) - f64::from(delta.x) * sensitivity;
    let current_pitch = (eye.y / radius).clamp(-1.0, 1.0).asin();
    // Travel can leave the eye past the limit; never snap it back in one drag.
    let limit = max_pitch.max(current_pitch.abs());
    let pitch = (current_pitch + f64::from(delta.y) * sensitivity).clamp(-limit, limit);

    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    DVec3::new(
        radius * cos_pitch * sin_yaw,
        radius * sin_pitch,
        radius * cos_pitch * cos_yaw,
    )
}

fn orbit_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    drag: Res<PointerDrag>,
    navigator: Res<Navigator>,
    settings: Res<OrbitSettings>,
    mut camera: Single<&mut OrbitCamera>,
) {
    let delta: Vec2 = motion.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO
        || !mouse.pressed(MouseButton::Left)
        || drag.started_over_ui()
        || !navigator.navigation_enabled()
    {
        return;
    }
    camera.eye = orbit(camera.eye, delta, settings.sensitivity, settings.max_pitch);
}

fn advance_navigator(
    time: Res<Time>,
    mut navigator: ResMut<Navigator>,
    camera: Single<(&mut OrbitCamera, &mut Transform)>,
) {
    let (mut orbit_camera, mut transform) = camera.into_inner();
    let frame = navigator.tick(time.delta_secs_f64(), orbit_camera.eye);

    orbit_camera.eye = frame.eye;
    *transform = Transform::from_translation(frame.eye.as_vec3()).looking_at(Vec3::ZERO, Vec3::Y);

    if let Some(center) = frame.center_changed {
        tracing::trace!(
            latitude = center.latitude,
            longitude = center.longitude,
            "view center changed"
        );
    }
    if frame.arrived {
        tracing::debug!("camera arrived at selected pin");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_distance() {
        let eye = DVec3::new(1.0, 2.0, 4.0);
        let moved = orbit(eye, Vec2::new(40.0, -25.0), 0.005, 85_f64.to_radians());
        assert!((moved.length() - eye.length()).abs() < 1e-9);
        assert!(moved.distance(eye) > 0.01);
    }

    #[test]
    fn orbit_clamps_pitch() {
        let eye = DVec3::new(0.0, 0.0, 5.0);
        let max_pitch = 85_f64.to_radians();
        let moved = orbit(eye, Vec2::new(0.0, 10_000.0), 0.005, max_pitch);
        assert!(((moved.y / 5.0).asin() - max_pitch).abs() < 1e-9);
    }

    #[test]
    fn drag_does_not_snap_eye_parked_past_limit() {
        // Eye over a marker at latitude 88 after travel.
        let max_pitch = 85_f64.to_radians();
        let parked = 88_f64.to_radians();
        let eye = DVec3::new(0.0, 5.0 * parked.sin(), 5.0 * parked.cos());

        let sideways = orbit(eye, Vec2::new(10.0, 0.0), 0.005, max_pitch);
        assert!(((sideways.y / 5.0).asin() - parked).abs() < 1e-9);

        let outward = orbit(eye, Vec2::new(0.0, 50.0), 0.005, max_pitch);
        assert!(((outward.y / 5.0).asin() - parked).abs() < 1e-9);

        let inward = orbit(eye, Vec2::new(0.0, -2.0), 0.005, max_pitch);
        let pitch = (inward.y / 5.0).asin();
        assert!((pitch - (parked - 0.01)).abs() < 1e-9);
    }

    #[test]
    fn horizontal_drag_rotates_around_y() {
        let eye = DVec3::new(0.0, 0.0, 5.0);
        let moved = orbit(eye, Vec2::new(100.0, 0.0), 0.005, 1.0);
        assert!(moved.y.abs() < 1e-9);
        // Dragging right swings the eye toward -X.
        assert!(moved.x < 0.0);
    }
}
