//! Isometric surface plot rendering
//!
//! Builds on the `isoplot_core` geometry pipeline: a [`SurfaceView`] owns a
//! sample grid and its [`SurfaceConfig`], renders a backend-neutral
//! [`Scene`] for a given [`RenderState`](isoplot_core::RenderState), and the
//! [`export`] module writes scenes out as SVG. Pointer handling lives in
//! [`interaction`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod config;
pub mod export;
pub mod interaction;
pub mod scene;
pub mod view;

pub use config::{ConfigError, SurfaceConfig};
pub use export::{scene_to_svg, SvgExportConfig};
pub use interaction::{DragRotation, HitTarget, HoverTracker, RotationListener, DRAG_SENSITIVITY};
pub use scene::{BlendMode, Paint, RadialGradient, Scene, SceneElement, Style, TextAnchor};
pub use view::{SurfaceView, ViewError};
