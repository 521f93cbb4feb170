//! Facade tying the navigator components together.

use std::sync::Arc;

use glam::DVec3;

use crate::center::CenterTracker;
use crate::coords::{GeoCoordinate, to_sphere_position};
use crate::error::SettingsError;
use crate::markers::{LocationId, LocationMarker, MarkerRegistry};
use crate::picking::{Ray, pick_marker};
use crate::selection::{MediaRequest, PinInteraction, Selection};
use crate::settings::NavigatorSettings;
use crate::travel::{TravelController, TravelState};
use crate::zoom::ZoomController;

/// Where a pin should be drawn this frame, zoom scale applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPlacement {
    pub id: LocationId,
    pub position: DVec3,
    pub radius: f64,
}

/// Result of one [`GlobeNavigator::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Where the viewpoint should be this frame, looking at the origin.
    pub eye: DVec3,
    /// The view center, when it changed enough to be worth publishing.
    pub center_changed: Option<GeoCoordinate>,
    /// A pin travel finished this frame.
    pub arrived: bool,
}

/// The whole interaction state of the globe.
///
/// All methods are meant to be called from the host's frame loop or from input
/// handlers running on the same thread.
#[derive(Debug)]
pub struct GlobeNavigator {
    settings: NavigatorSettings,
    registry: MarkerRegistry,
    travel: TravelController,
    center: CenterTracker,
    zoom: ZoomController,
    pins: PinInteraction,
}

impl GlobeNavigator {
    pub fn new(settings: NavigatorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            registry: MarkerRegistry::new(),
            travel: TravelController::new(settings.travel_rate, settings.arrival_epsilon),
            center: CenterTracker::new(settings.globe_radius, settings.center_threshold_degrees),
            zoom: ZoomController::new(
                settings.min_scale,
                settings.max_scale,
                settings.zoom_sensitivity,
                settings.initial_scale,
            ),
            pins: PinInteraction::new(settings.travel_radius, settings.panel_media),
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Replace the marker set. See [`MarkerRegistry::load`].
    pub fn load_markers(&mut self, markers: impl IntoIterator<Item = LocationMarker>) -> usize {
        self.registry.load(markers)
    }

    #[must_use]
    pub fn markers(&self) -> Arc<[LocationMarker]> {
        self.registry.all()
    }

    #[must_use]
    pub fn marker(&self, id: LocationId) -> Option<&LocationMarker> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn markers_generation(&self) -> u64 {
        self.registry.generation()
    }

    /// Current pin positions and sizes, scaled with the globe.
    #[must_use]
    pub fn marker_placements(&self) -> Vec<MarkerPlacement> {
        let scale = self.zoom.scale();
        let pin_radius = self.settings.globe_radius + self.settings.marker_offset;
        self.registry
            .all()
            .iter()
            .map(|marker| MarkerPlacement {
                id: marker.id,
                position: to_sphere_position(marker.coordinate, pin_radius).as_dvec3() * scale,
                radius: self.settings.marker_radius * scale,
            })
            .collect()
    }

    /// Radius of the globe as currently drawn.
    #[must_use]
    pub fn scaled_globe_radius(&self) -> f64 {
        self.settings.globe_radius * self.zoom.scale()
    }

    /// Handle a click on the pin with `id`. Returns false for unknown ids.
    pub fn on_marker_clicked(&mut self, id: LocationId) -> bool {
        let Some(marker) = self.registry.get(id) else {
            tracing::warn!(location_id = %id, "click on unknown marker");
            return false;
        };
        self.pins.on_marker_click(marker, &mut self.travel);
        true
    }

    /// Handle a primary click along a world-space pointer ray.
    ///
    /// A pin hit is treated as a pin click; anything else dismisses the
    /// selection. Returns the clicked pin, if any.
    pub fn on_pointer_click(&mut self, ray: Ray) -> Option<LocationId> {
        let hit = pick_marker(ray, &self.marker_placements(), self.scaled_globe_radius());
        match hit {
            Some(id) => {
                self.on_marker_clicked(id);
            }
            None => self.pins.on_dismiss(),
        }
        hit
    }

    /// Clear the selection without touching an in-flight travel.
    pub fn on_dismiss(&mut self) {
        self.pins.on_dismiss();
    }

    /// Handle a wheel event and return the new zoom scale.
    pub fn on_wheel(&mut self, raw_delta: f64) -> f64 {
        self.zoom.on_wheel(raw_delta)
    }

    /// Advance one frame.
    ///
    /// `eye` is where the viewpoint is now. Travel runs first, then arrival
    /// handling and media replies, then the center is resampled from the
    /// returned eye position.
    pub fn tick(&mut self, elapsed_seconds: f64, eye: DVec3) -> Frame {
        let eye = self.travel.advance(eye, elapsed_seconds);
        let arrived = self.pins.on_frame(&mut self.travel);
        let center_changed = self.center.update(-eye);
        Frame {
            eye,
            center_changed,
            arrived,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.pins.selection()
    }

    /// The last published view center.
    #[must_use]
    pub fn center(&self) -> GeoCoordinate {
        self.center.published().unwrap_or_default()
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.zoom.scale()
    }

    #[must_use]
    pub fn navigation_enabled(&self) -> bool {
        self.pins.navigation_enabled()
    }

    #[must_use]
    pub fn travel_state(&self) -> TravelState {
        self.travel.state()
    }

    /// Drain media fetches the host should run.
    pub fn take_media_requests(&mut self) -> Vec<MediaRequest> {
        self.pins.take_media_requests()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{MediaItem, MediaState};

    const FRAME: f64 = 1.0 / 60.0;

    fn navigator() -> GlobeNavigator {
        let mut nav = GlobeNavigator::new(NavigatorSettings::default()).unwrap();
        nav.load_markers([
            LocationMarker::new(LocationId(1), GeoCoordinate::new(40.7128, -74.006), "New York"),
            LocationMarker::new(LocationId(2), GeoCoordinate::new(-33.8688, 151.2093), "Sydney"),
        ]);
        nav
    }

    fn run_frames(nav: &mut GlobeNavigator, mut eye: DVec3, frames: usize) -> DVec3 {
        for _ in 0..frames {
            eye = nav.tick(FRAME, eye).eye;
        }
        eye
    }

    #[test]
    fn rejects_invalid_settings() {
        let settings = NavigatorSettings {
            travel_radius: 1.0,
            ..Default::default()
        };
        assert!(GlobeNavigator::new(settings).is_err());
    }

    #[test]
    fn placements_follow_zoom() {
        let mut nav = navigator();
        let before = nav.marker_placements();
        assert!((before[0].position.length() - 2.05).abs() < 1e-9);
        nav.on_wheel(-1000.0);
        let after = nav.marker_placements();
        assert!((after[0].position.length() - 4.1).abs() < 1e-9);
        assert!((after[0].radius - 0.1).abs() < 1e-12);
    }

    #[test]
    fn full_selection_flow() {
        let mut nav = navigator();
        let eye = DVec3::new(0.0, 0.0, 5.0);
        assert!(nav.on_marker_clicked(LocationId(2)));
        assert!(!nav.navigation_enabled());

        let eye = run_frames(&mut nav, eye, 300);
        assert!(nav.navigation_enabled());
        assert!(nav.selection().panel_visible());

        let expected = GeoCoordinate::new(-33.8688, 151.2093);
        assert!((nav.center().latitude - expected.latitude).abs() < 0.01);
        assert!((nav.center().longitude - expected.longitude).abs() < 0.01);
        assert!((eye.length() - 5.0).abs() < 1e-9);

        let request = nav.take_media_requests().pop().unwrap();
        assert_eq!(request.location_id(), LocationId(2));
        request.reply.complete(vec![MediaItem {
            id: "a".into(),
            file_url: "https://cloud.example/a.jpg".into(),
        }]);
        nav.tick(FRAME, eye);
        assert!(matches!(nav.selection().media(), MediaState::Loaded(items) if items.len() == 1));
    }

    #[test]
    fn pointer_click_picks_or_dismisses() {
        let mut nav = navigator();
        let pin = nav.marker_placements()[0].position;
        let origin = pin.normalize() * 5.0;
        assert_eq!(nav.on_pointer_click(Ray::new(origin, pin - origin)), Some(LocationId(1)));
        assert!(nav.selection().is_selected(LocationId(1)));

        let miss = Ray::new(DVec3::new(0.0, 10.0, 5.0), DVec3::NEG_Z);
        assert_eq!(nav.on_pointer_click(miss), None);
        assert!(nav.selection().marker().is_none());
        assert!(matches!(nav.travel_state(), TravelState::Traveling { .. }));
    }

    #[test]
    fn unknown_marker_click_is_ignored() {
        let mut nav = navigator();
        assert!(!nav.on_marker_clicked(LocationId(99)));
        assert_eq!(nav.travel_state(), TravelState::Idle);
    }

    #[test]
    fn first_tick_publishes_center() {
        let mut nav = navigator();
        let frame = nav.tick(FRAME, DVec3::new(0.0, 0.0, 5.0));
        let center = frame.center_changed.unwrap();
        // +Z faces longitude -90.
        assert!(center.latitude.abs() < 1e-9);
        assert!((center.longitude + 90.0).abs() < 1e-9);
        assert!(nav.tick(FRAME, frame.eye).center_changed.is_none());
    }

    #[test]
    fn idle_tick_keeps_eye() {
        let mut nav = navigator();
        let eye = DVec3::new(1.0, 2.0, 4.0);
        let frame = nav.tick(FRAME, eye);
        assert_eq!(frame.eye, eye);
        assert!(!frame.arrived);
    }
}
