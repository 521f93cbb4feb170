//! Globe scene: the textured sphere, location pins, and shared resources.

use std::collections::HashMap;

use bevy::prelude::*;
use globe_nav::{GlobeNavigator, LocationId};

use crate::launch_params::LaunchParams;
use crate::mesh::globe_mesh;

/// Longitude columns of the globe mesh.
const GLOBE_SECTORS: u32 = 128;
/// Latitude rows of the globe mesh.
const GLOBE_STACKS: u32 = 64;

/// Frame ordering of globe systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobeSet {
    /// Pointer, wheel, and fetch results feed the navigator.
    Input,
    /// The navigator advances and the camera follows.
    Tick,
    /// Scene entities mirror the navigator.
    Present,
}

/// The navigator driving the scene.
#[derive(Resource, Deref, DerefMut)]
pub struct Navigator(pub GlobeNavigator);

/// Client for the portfolio API.
#[derive(Resource, Clone, Deref)]
pub struct ApiClient(pub portfolio_api::Client);

/// Marker component for the globe sphere.
#[derive(Component)]
pub struct Globe;

/// A rendered location pin.
#[derive(Component)]
pub struct Pin {
    pub id: LocationId,
}

#[derive(Resource)]
struct PinAssets {
    mesh: Handle<Mesh>,
    idle: Handle<StandardMaterial>,
    selected: Handle<StandardMaterial>,
}

/// Plugin for the globe scene.
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (GlobeSet::Input, GlobeSet::Tick, GlobeSet::Present).chain(),
        )
        .add_systems(Startup, setup_globe)
        .add_systems(Update, (sync_pins, scale_globe).in_set(GlobeSet::Present));
    }
}

fn setup_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    params: Res<LaunchParams>,
    navigator: Res<Navigator>,
) {
    let radius = navigator.settings().globe_radius;

    commands.spawn((
        Globe,
        Mesh3d(meshes.add(globe_mesh(radius, GLOBE_SECTORS, GLOBE_STACKS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(params.texture.clone())),
            perceptual_roughness: 0.85,
            reflectance: 0.2,
            ..default()
        })),
        Transform::default(),
    ));

    commands.insert_resource(PinAssets {
        mesh: meshes.add(Sphere::new(1.0)),
        idle: materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.1, 0.1),
            unlit: true,
            ..default()
        }),
        selected: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.2),
            unlit: true,
            ..default()
        }),
    });

    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    tracing::info!(radius, texture = %params.texture, "globe scene ready");
}

/// Mirror the marker set onto pin entities.
///
/// Pins are respawned whenever the marker set is replaced, and moved, resized,
/// and recolored every frame.
fn sync_pins(
    mut commands: Commands,
    navigator: Res<Navigator>,
    assets: Res<PinAssets>,
    mut built_for: Local<Option<u64>>,
    mut pins: Query<(
        Entity,
        &Pin,
        &mut Transform,
        &mut MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let placements = navigator.marker_placements();
    let selection = navigator.selection();
    let material_for = |id: LocationId| {
        if selection.is_selected(id) {
            assets.selected.clone()
        } else {
            assets.idle.clone()
        }
    };

    let generation = navigator.markers_generation();
    if *built_for != Some(generation) {
        for (entity, ..) in &pins {
            commands.entity(entity).despawn();
        }
        for placement in &placements {
            commands.spawn((
                Pin { id: placement.id },
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(material_for(placement.id)),
                pin_transform(placement),
            ));
        }
        tracing::debug!(count = placements.len(), generation, "rebuilt pins");
        *built_for = Some(generation);
        return;
    }

    let by_id: HashMap<LocationId, _> = placements.iter().map(|p| (p.id, p)).collect();
    for (_, pin, mut transform, mut material) in &mut pins {
        let Some(placement) = by_id.get(&pin.id) else {
            continue;
        };
        let wanted = pin_transform(placement);
        if *transform != wanted {
            *transform = wanted;
        }
        let wanted = material_for(pin.id);
        if material.0 != wanted {
            material.0 = wanted;
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn pin_transform(placement: &globe_nav::MarkerPlacement) -> Transform {
    Transform::from_translation(placement.position.as_vec3())
        .with_scale(Vec3::splat(placement.radius as f32))
}

#[allow(clippy::cast_possible_truncation)]
fn scale_globe(navigator: Res<Navigator>, mut globe: Single<&mut Transform, With<Globe>>) {
    let scale = Vec3::splat(navigator.zoom_scale() as f32);
    if globe.scale != scale {
        globe.scale = scale;
    }
}
