//! View-model layer for the DailyOS week and focus briefings.
//!
//! Backend snapshots come in through `snapshot`, are reshaped by the pure
//! builders (`focus_view`, `week_shape`, `top_three`, `deep_work`,
//! `format`) and composed into page models by `week_view`. `events` and
//! `refresh` cover re-fetching when the backend reports a change or a
//! polling interval elapses.

pub mod config;
pub mod context;
pub mod datetime;
pub mod deep_work;
pub mod error;
pub mod events;
pub mod focus_view;
pub mod format;
pub mod logging;
pub mod refresh;
pub mod snapshot;
pub mod top_three;
pub mod types;
pub mod week_shape;
pub mod week_view;

pub use config::{load_config, BriefingConfig};
pub use context::{Personality, ViewContext};
pub use error::{Result, ViewModelError};
pub use focus_view::{
    build_focus_page, build_focus_view_model, build_focus_view_model_extended, FocusPageModel,
    FocusViewModel, FocusViewModelExtended,
};
pub use week_view::{build_week_view_model, WeekViewModel};
