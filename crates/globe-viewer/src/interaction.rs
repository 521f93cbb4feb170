//! Pointer, wheel, and fetch plumbing between Bevy and the navigator.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use globe_nav::{LocationMarker, Ray};

use crate::async_runtime::TaskSpawner;
use crate::camera::OrbitCamera;
use crate::globe::{ApiClient, GlobeSet, Navigator};

/// Pointer travel, in logical pixels, beyond which a press counts as a drag.
const CLICK_SLOP: f32 = 4.0;
/// Raw wheel delta per scrolled line, matching browser pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Plugin wiring input and fetches to the navigator.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerDrag>()
            .init_resource::<LocationLoader>()
            .add_systems(Startup, load_locations)
            .add_systems(
                Update,
                (track_pointer, zoom_with_wheel, poll_locations).in_set(GlobeSet::Input),
            )
            .add_systems(Update, dispatch_media_requests.in_set(GlobeSet::Present));
    }
}

struct Press {
    start: Vec2,
    max_offset: f32,
    over_ui: bool,
}

/// The in-progress left-button press, if any.
#[derive(Resource, Default)]
pub struct PointerDrag {
    press: Option<Press>,
}

impl PointerDrag {
    /// True if the current press began on an egui panel.
    pub fn started_over_ui(&self) -> bool {
        self.press.as_ref().is_some_and(|press| press.over_ui)
    }
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.is_pointer_over_area())
}

/// Turn a press and release without dragging into a globe click.
fn track_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut contexts: EguiContexts,
    mut drag: ResMut<PointerDrag>,
    mut navigator: ResMut<Navigator>,
) {
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left) {
        let over_ui = pointer_over_ui(&mut contexts);
        drag.press = cursor.map(|start| Press {
            start,
            max_offset: 0.0,
            over_ui,
        });
    }

    if let (Some(press), Some(cursor)) = (drag.press.as_mut(), cursor) {
        press.max_offset = press.max_offset.max(cursor.distance(press.start));
    }

    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let Some(press) = drag.press.take() else {
        return;
    };
    if press.over_ui || press.max_offset > CLICK_SLOP {
        return;
    }
    let Some(cursor) = cursor else {
        return;
    };

    let (camera, camera_transform) = *camera;
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let ray = Ray::new(ray.origin.as_dvec3(), ray.direction.as_vec3().as_dvec3());
    match navigator.on_pointer_click(ray) {
        Some(id) => tracing::debug!(location_id = %id, "pin clicked"),
        None => tracing::trace!("background clicked"),
    }
}

/// Browser-style wheel delta: positive when scrolling down.
fn raw_wheel_delta(unit: MouseScrollUnit, y: f32) -> f64 {
    match unit {
        MouseScrollUnit::Line => -f64::from(y) * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => -f64::from(y),
    }
}

fn zoom_with_wheel(
    mut wheel: MessageReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut navigator: ResMut<Navigator>,
) {
    let over_ui = pointer_over_ui(&mut contexts);
    for event in wheel.read() {
        if over_ui {
            continue;
        }
        let delta = raw_wheel_delta(event.unit, event.y);
        if delta != 0.0 {
            navigator.on_wheel(delta);
        }
    }
}

/// Progress of the location list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded(usize),
    Failed(String),
}

/// Fetches the location list and hands it to the navigator.
#[derive(Resource)]
pub struct LocationLoader {
    pub status: LoadStatus,
    result_tx: async_channel::Sender<Result<Vec<LocationMarker>, String>>,
    result_rx: async_channel::Receiver<Result<Vec<LocationMarker>, String>>,
}

impl Default for LocationLoader {
    fn default() -> Self {
        let (result_tx, result_rx) = async_channel::bounded(1);
        Self {
            status: LoadStatus::Idle,
            result_tx,
            result_rx,
        }
    }
}

impl LocationLoader {
    /// Start fetching the location list unless a fetch is already running.
    pub fn request(&mut self, client: &ApiClient, spawner: &TaskSpawner<'_, '_>) {
        if self.status == LoadStatus::Loading {
            return;
        }
        self.status = LoadStatus::Loading;

        let tx = self.result_tx.clone();
        let client = client.0.clone();
        spawner.spawn(async move {
            let result = client
                .fetch_locations()
                .await
                .map(portfolio_api::into_markers)
                .map_err(|e| e.to_string());
            let _ = tx.send(result).await;
        });
    }
}

fn load_locations(
    mut loader: ResMut<LocationLoader>,
    client: Res<ApiClient>,
    spawner: TaskSpawner,
) {
    tracing::info!(api = client.base_url(), "loading locations");
    loader.request(&client, &spawner);
}

fn poll_locations(mut loader: ResMut<LocationLoader>, mut navigator: ResMut<Navigator>) {
    let Ok(result) = loader.result_rx.try_recv() else {
        return;
    };
    loader.status = match result {
        Ok(markers) => LoadStatus::Loaded(navigator.load_markers(markers)),
        Err(error) => {
            tracing::warn!(%error, "failed to load locations");
            LoadStatus::Failed(error)
        }
    };
}

/// Run the media fetches the navigator asked for this frame.
fn dispatch_media_requests(
    mut navigator: ResMut<Navigator>,
    client: Res<ApiClient>,
    spawner: TaskSpawner,
) {
    for request in navigator.take_media_requests() {
        let client = client.0.clone();
        let id = request.location_id();
        let kind = request.kind;
        tracing::debug!(location_id = %id, ?kind, "fetching location media");
        spawner.spawn(async move {
            match client.fetch_location_media(id, kind).await {
                Ok(items) => request.reply.complete(items),
                Err(error) => request.reply.fail(error),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_delta_follows_browser_sign() {
        // Scrolling down one line shrinks the globe like a 100px browser delta.
        assert!((raw_wheel_delta(MouseScrollUnit::Line, -1.0) - 100.0).abs() < 1e-9);
        assert!((raw_wheel_delta(MouseScrollUnit::Pixel, 30.0) + 30.0).abs() < 1e-9);
    }

    #[test]
    fn drag_state_reports_ui_press() {
        let mut drag = PointerDrag::default();
        assert!(!drag.started_over_ui());
        drag.press = Some(Press {
            start: Vec2::ZERO,
            max_offset: 0.0,
            over_ui: true,
        });
        assert!(drag.started_over_ui());
    }
}
