//! Background fetches on native and WASM.
//!
//! Location and media requests run off the frame loop and report back through
//! channels. [`TaskSpawner`] picks the executor for the platform:
//! - Native: the Tokio runtime from `bevy_tokio_tasks`, which reqwest needs
//! - WASM: Bevy's `AsyncComputeTaskPool`, with reqwest on browser fetch

use std::future::Future;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Installs the executor backing [`TaskSpawner`].
pub struct AsyncRuntimePlugin;

impl Plugin for AsyncRuntimePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_family = "wasm")]
        let _ = app;

        #[cfg(not(target_family = "wasm"))]
        app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());
    }
}

/// Spawns fire-and-forget fetch tasks.
///
/// Results come back over `async_channel`s polled by the owning system.
#[derive(SystemParam)]
pub struct TaskSpawner<'w, 's> {
    #[cfg(not(target_family = "wasm"))]
    runtime: Res<'w, bevy_tokio_tasks::TokioTasksRuntime>,
    #[cfg(target_family = "wasm")]
    #[allow(dead_code)]
    _marker: std::marker::PhantomData<&'w ()>,
    #[allow(dead_code)]
    _local: Local<'s, ()>,
}

impl TaskSpawner<'_, '_> {
    #[cfg(not(target_family = "wasm"))]
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn_background_task(move |_ctx| future);
    }

    /// The browser is single-threaded, so `Send` is not required here.
    #[cfg(target_family = "wasm")]
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        bevy::tasks::AsyncComputeTaskPool::get()
            .spawn_local(future)
            .detach();
    }
}
