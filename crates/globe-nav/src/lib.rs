//! Interaction and camera-travel core for a pinned 3D globe.
//!
//! This crate owns everything about the globe navigator that is not drawing:
//! placing location pins from latitude/longitude, animating the viewpoint to a
//! selected pin, tracking which point of the globe is centered in view, and
//! gating the location panel on arrival.
//!
//! # Design principles
//!
//! - **Rendering-agnostic**: the host calls [`GlobeNavigator::tick`] from its
//!   own frame loop and turns the returned eye position into a camera transform
//! - **Single-threaded**: all state is mutated from the frame loop or from
//!   input callbacks serialized onto the same thread
//! - **Runtime-agnostic fetches**: media requests are handed to the host as
//!   [`MediaRequest`]s; the host runs them on any executor and answers through
//!   the attached [`MediaReply`]
//!
//! # Example
//!
//! ```ignore
//! use globe_nav::{GlobeNavigator, NavigatorSettings};
//!
//! let mut navigator = GlobeNavigator::new(NavigatorSettings::default())?;
//! navigator.load_markers(markers);
//!
//! // Once per rendered frame.
//! let frame = navigator.tick(delta_seconds, eye);
//! camera.set_eye_looking_at_origin(frame.eye);
//! for request in navigator.take_media_requests() {
//!     spawn(async move {
//!         match client.fetch_location_images(request.location_id()).await {
//!             Ok(items) => request.reply.complete(items),
//!             Err(e) => request.reply.fail(e),
//!         }
//!     });
//! }
//! ```

pub mod center;
pub mod coords;
mod error;
pub mod markers;
mod navigator;
pub mod picking;
pub mod selection;
mod settings;
pub mod travel;
pub mod zoom;

pub use center::CenterTracker;
pub use coords::{GeoCoordinate, SpherePosition, to_geo_coordinate, to_sphere_position};
pub use error::SettingsError;
pub use markers::{LocationId, LocationMarker, MarkerRegistry};
pub use navigator::{Frame, GlobeNavigator, MarkerPlacement};
pub use picking::Ray;
pub use selection::{
    MediaItem, MediaKind, MediaReply, MediaRequest, MediaState, MediaTicket, PinInteraction,
    Selection,
};
pub use settings::NavigatorSettings;
pub use travel::{TravelController, TravelState};
pub use zoom::ZoomController;
