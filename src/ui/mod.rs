//! Terminal UI layer for interactive sessions.
//!
//! - [`chat_loop`]: terminal lifecycle, key routing, and the event loop that
//!   applies actions and spawns backend calls.
//! - [`renderer`]: frame composition for both tabs, banners and the loading
//!   overlay.
//! - [`theme`]: color and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
