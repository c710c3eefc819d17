//! Interactive session: terminal lifecycle, key routing, and the event loop.
//!
//! The loop owns an [`AppHandle`] around the single [`App`] and feeds it
//! [`AppAction`](crate::core::app::AppAction)s. Backend calls requested by
//! reducers run on spawned tasks in [`executors`] and report back through the
//! same action channel.

mod event_loop;
mod executors;
mod keybindings;
mod lifecycle;
mod setup;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::app::App;

pub use event_loop::run_chat;

/// Shared, lock-guarded access to the application state.
#[derive(Clone)]
pub struct AppHandle {
    inner: Arc<Mutex<App>>,
}

impl AppHandle {
    pub fn new(inner: Arc<Mutex<App>>) -> Self {
        Self { inner }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&App) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
