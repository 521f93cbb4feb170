//! Location panel and view readout.
//!
//! The panel opens on the right once the camera has arrived at a selected pin
//! and shows the location's media as thumbnails through the photo proxy. A small
//! overlay in the bottom-left corner shows the coordinate under the view
//! center, the zoom scale, and the state of the location list.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use globe_nav::{GeoCoordinate, MediaKind, MediaState};

use crate::async_runtime::TaskSpawner;
use crate::globe::{ApiClient, Navigator};
use crate::interaction::{LoadStatus, LocationLoader};

/// Edge length of a media thumbnail in the location panel.
const THUMBNAIL_SIZE: f32 = 100.0;

/// Plugin for the egui overlay.
pub struct PanelUiPlugin;

impl Plugin for PanelUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_systems(
                EguiPrimaryContextPass,
                (install_media_loaders, location_panel, view_readout).chain(),
            );
    }
}

/// Coordinate readout with four decimals.
pub fn format_coordinate(coordinate: GeoCoordinate) -> String {
    format!(
        "Lat: {:.4}, Lon: {:.4}",
        coordinate.latitude, coordinate.longitude
    )
}

/// Placeholder for a loaded but empty media list.
pub fn empty_media_text(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Images => "No images available.",
        MediaKind::Videos => "No videos available.",
    }
}

fn install_media_loaders(mut contexts: EguiContexts, mut installed: Local<bool>) -> Result {
    if *installed {
        return Ok(());
    }
    egui_extras::install_image_loaders(contexts.ctx_mut()?);
    *installed = true;
    Ok(())
}

fn location_panel(
    mut contexts: EguiContexts,
    mut navigator: ResMut<Navigator>,
    client: Res<ApiClient>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let selection = navigator.selection();
    if !selection.panel_visible() {
        return Ok(());
    }
    let Some(marker) = selection.marker() else {
        return Ok(());
    };
    let kind = navigator.settings().panel_media;

    let mut close = false;
    egui::SidePanel::right("location_panel")
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&marker.display_name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
            ui.label(format_coordinate(marker.coordinate));
            ui.separator();

            match selection.media() {
                MediaState::Empty => {
                    ui.label("Nothing to show.");
                }
                MediaState::Loading(_) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                MediaState::Loaded(items) if items.is_empty() => {
                    ui.label(empty_media_text(kind));
                }
                MediaState::Loaded(items) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if kind == MediaKind::Videos {
                            for (index, item) in items.iter().enumerate() {
                                ui.hyperlink_to(
                                    format!("Video {}", index + 1),
                                    client.photo_proxy_url(&item.file_url),
                                )
                                .on_hover_text(&item.id);
                            }
                            return;
                        }
                        ui.horizontal_wrapped(|ui| {
                            for item in items {
                                ui.add(
                                    egui::Image::new(client.photo_proxy_url(&item.file_url))
                                        .fit_to_exact_size(egui::vec2(
                                            THUMBNAIL_SIZE,
                                            THUMBNAIL_SIZE,
                                        ))
                                        .show_loading_spinner(true),
                                )
                                .on_hover_text(&item.id);
                            }
                        });
                    });
                }
            }
        });

    if close {
        navigator.on_dismiss();
    }
    Ok(())
}

fn view_readout(
    mut contexts: EguiContexts,
    navigator: Res<Navigator>,
    mut loader: ResMut<LocationLoader>,
    client: Res<ApiClient>,
    spawner: TaskSpawner,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let mut reload = false;
    egui::Area::new(egui::Id::new("view_readout"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(format_coordinate(navigator.center()));
                ui.label(format!("Zoom: {:.2}x", navigator.zoom_scale()));
                match &loader.status {
                    LoadStatus::Idle => {}
                    LoadStatus::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading locations...");
                        });
                    }
                    LoadStatus::Loaded(count) => {
                        ui.label(format!("{count} locations"));
                    }
                    LoadStatus::Failed(error) => {
                        ui.colored_label(egui::Color32::RED, error);
                        reload = ui.button("Retry").clicked();
                    }
                }
            });
        });

    if reload {
        loader.request(&client, &spawner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_uses_four_decimals() {
        assert_eq!(
            format_coordinate(GeoCoordinate::new(48.856_613, -0.000_04)),
            "Lat: 48.8566, Lon: -0.0000"
        );
    }

    #[test]
    fn empty_media_text_names_kind() {
        assert_eq!(empty_media_text(MediaKind::Images), "No images available.");
        assert_eq!(empty_media_text(MediaKind::Videos), "No videos available.");
    }
}
