//! Pin selection, arrival gating, and location media requests.
//!
//! A pin click starts a travel toward the pin and hides the panel. Once the
//! travel arrives and the pin is still selected, a media request is issued and
//! the panel is revealed. Media replies are tagged with the ticket they were
//! requested under, and a reply whose ticket is no longer the outstanding one
//! is dropped. The underlying fetch cannot be aborted, so reselecting or
//! dismissing only stops caring about the answer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::to_sphere_position;
use crate::markers::{LocationId, LocationMarker};
use crate::travel::TravelController;

/// Which media the panel shows for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Images,
    Videos,
}

/// A single photo or video attached to a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub file_url: String,
}

/// Identifies one media request.
///
/// The generation distinguishes repeated requests for the same location, so a
/// late reply from an earlier visit cannot fill the panel of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTicket {
    pub location_id: LocationId,
    pub generation: u64,
}

/// Contents of the location panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MediaState {
    /// Nothing requested, or the selection was cleared.
    #[default]
    Empty,
    /// Waiting for the reply to `ticket`.
    Loading(MediaTicket),
    /// The reply arrived; may be empty.
    Loaded(Vec<MediaItem>),
}

/// The selected pin and the state of its panel.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    marker: Option<LocationMarker>,
    panel_visible: bool,
    media: MediaState,
}

impl Selection {
    #[must_use]
    pub fn marker(&self) -> Option<&LocationMarker> {
        self.marker.as_ref()
    }

    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    #[must_use]
    pub fn media(&self) -> &MediaState {
        &self.media
    }

    #[must_use]
    pub fn is_selected(&self, id: LocationId) -> bool {
        self.marker.as_ref().is_some_and(|m| m.id == id)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
struct MediaResponse {
    ticket: MediaTicket,
    items: Vec<MediaItem>,
}

/// One-shot answer channel for a [`MediaRequest`].
///
/// Dropping a reply without answering it counts as an empty result, so the
/// panel never stays stuck loading.
#[derive(Debug)]
pub struct MediaReply {
    ticket: MediaTicket,
    tx: Option<async_channel::Sender<MediaResponse>>,
}

impl MediaReply {
    #[must_use]
    pub fn ticket(&self) -> MediaTicket {
        self.ticket
    }

    /// Deliver the fetched media.
    pub fn complete(mut self, items: Vec<MediaItem>) {
        self.send(items);
    }

    /// Report a failed fetch. The panel shows an empty result.
    pub fn fail(mut self, error: impl fmt::Display) {
        tracing::warn!(
            location_id = %self.ticket.location_id,
            %error,
            "media fetch failed, showing empty panel"
        );
        self.send(Vec::new());
    }

    fn send(&mut self, items: Vec<MediaItem>) {
        if let Some(tx) = self.tx.take() {
            // The navigator may be gone by now; nobody is left to care.
            let _ = tx.try_send(MediaResponse {
                ticket: self.ticket,
                items,
            });
        }
    }
}

impl Drop for MediaReply {
    fn drop(&mut self) {
        if self.tx.is_some() {
            tracing::warn!(location_id = %self.ticket.location_id, "media reply dropped unanswered");
            self.send(Vec::new());
        }
    }
}

/// A media fetch the host should run for the navigator.
#[derive(Debug)]
pub struct MediaRequest {
    pub kind: MediaKind,
    pub reply: MediaReply,
}

impl MediaRequest {
    #[must_use]
    pub fn location_id(&self) -> LocationId {
        self.reply.ticket.location_id
    }
}

/// Orchestrates pin selection, travel, and media loading.
#[derive(Debug)]
pub struct PinInteraction {
    selection: Selection,
    /// Marker the in-flight travel was started for.
    travel_for: Option<LocationId>,
    navigation_enabled: bool,
    travel_radius: f64,
    media_kind: MediaKind,
    next_generation: u64,
    outbox: Vec<MediaRequest>,
    response_tx: async_channel::Sender<MediaResponse>,
    response_rx: async_channel::Receiver<MediaResponse>,
}

impl PinInteraction {
    /// `travel_radius` is the distance from the globe center the viewpoint
    /// travels to; it must lie outside the globe.
    #[must_use]
    pub fn new(travel_radius: f64, media_kind: MediaKind) -> Self {
        let (response_tx, response_rx) = async_channel::unbounded();
        Self {
            selection: Selection::default(),
            travel_for: None,
            navigation_enabled: true,
            travel_radius,
            media_kind,
            next_generation: 0,
            outbox: Vec::new(),
            response_tx,
            response_rx,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether free-form navigation (drag-to-orbit) is allowed right now.
    #[must_use]
    pub fn navigation_enabled(&self) -> bool {
        self.navigation_enabled
    }

    /// Handle a click on `marker`.
    pub fn on_marker_click(&mut self, marker: &LocationMarker, travel: &mut TravelController) {
        if self.selection.is_selected(marker.id) && self.selection.panel_visible {
            tracing::debug!(location_id = %marker.id, "deselected marker");
            self.selection.clear();
            return;
        }

        tracing::debug!(location_id = %marker.id, name = %marker.display_name, "selected marker");
        self.selection = Selection {
            marker: Some(marker.clone()),
            panel_visible: false,
            media: MediaState::Empty,
        };
        travel.begin_travel(to_sphere_position(marker.coordinate, self.travel_radius));
        self.travel_for = Some(marker.id);
        self.navigation_enabled = false;
    }

    /// Handle a pointer interaction outside any marker.
    ///
    /// Clears the selection but lets an in-flight travel finish.
    pub fn on_dismiss(&mut self) {
        if self.selection.marker.is_some() {
            tracing::debug!("selection dismissed");
        }
        self.selection.clear();
    }

    /// Per-frame update; call after the travel controller has advanced.
    ///
    /// Returns true if a travel arrived this frame.
    pub fn on_frame(&mut self, travel: &mut TravelController) -> bool {
        let arrived = travel.consume_arrival();
        if arrived {
            self.navigation_enabled = true;
            match self.travel_for.take() {
                Some(id) if self.selection.is_selected(id) => {
                    self.request_media(id);
                    self.selection.panel_visible = true;
                }
                stale => {
                    tracing::debug!(location_id = ?stale, "arrived for a marker no longer selected");
                }
            }
        }
        self.poll_media();
        arrived
    }

    /// Drain the media fetches issued since the last call.
    pub fn take_media_requests(&mut self) -> Vec<MediaRequest> {
        std::mem::take(&mut self.outbox)
    }

    fn request_media(&mut self, location_id: LocationId) {
        self.next_generation += 1;
        let ticket = MediaTicket {
            location_id,
            generation: self.next_generation,
        };
        self.selection.media = MediaState::Loading(ticket);
        self.outbox.push(MediaRequest {
            kind: self.media_kind,
            reply: MediaReply {
                ticket,
                tx: Some(self.response_tx.clone()),
            },
        });
        tracing::debug!(%location_id, generation = ticket.generation, "requested location media");
    }

    fn poll_media(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            if self.selection.media == MediaState::Loading(response.ticket) {
                tracing::debug!(
                    location_id = %response.ticket.location_id,
                    count = response.items.len(),
                    "location media loaded"
                );
                self.selection.media = MediaState::Loaded(response.items);
            } else {
                tracing::debug!(
                    location_id = %response.ticket.location_id,
                    generation = response.ticket.generation,
                    "discarding stale media response"
                );
            }
        }
    }
}
