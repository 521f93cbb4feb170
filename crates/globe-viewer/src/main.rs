//! Interactive 3D globe of portfolio locations using Bevy.
//!
//! Pins mark every location the portfolio API knows about. Clicking one flies
//! the camera over it and opens a panel with that location's media; dragging
//! orbits the globe and the mouse wheel scales it.

mod async_runtime;
mod camera;
mod globe;
mod interaction;
mod launch_params;
mod mesh;
mod ui;

use async_runtime::AsyncRuntimePlugin;
use bevy::prelude::*;
use camera::OrbitCameraPlugin;
use globe::{ApiClient, GlobePlugin, Navigator};
use globe_nav::GlobeNavigator;
use interaction::InteractionPlugin;
use ui::PanelUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GlobePlugin,
            OrbitCameraPlugin,
            InteractionPlugin,
            PanelUiPlugin,
        ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = match launch_params::parse() {
        Ok(params) => params,
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            std::process::exit(2);
        }
    };
    let navigator = match GlobeNavigator::new(params.settings.clone()) {
        Ok(navigator) => navigator,
        Err(e) => {
            tracing::error!(error = %e, "invalid navigator settings");
            std::process::exit(2);
        }
    };
    let client = portfolio_api::Client::new(params.api_url.clone());

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "globe-viewer".to_string(),
        resolution: (1280, 720).into(),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    // Add async runtime (Tokio on native, no-op on WASM).
    app.add_plugins(AsyncRuntimePlugin);

    app.insert_resource(params)
        .insert_resource(Navigator(navigator))
        .insert_resource(ApiClient(client))
        .add_plugins(AppPlugin)
        .run();
}
