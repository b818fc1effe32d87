//! Headless side of the panel.
//!
//! # Structure
//!
//! - `options` / `draft` - Option catalog and the settings draft reducer
//! - `visibility` - Open/closed state machine
//! - `listeners` / `outside_click` - Global listener table and dismissal detector
//! - `panel` - Controller tying the above to apply/reset
//! - `config`, `logging`, `error` - Ambient plumbing

pub mod config;
pub mod draft;
pub mod error;
pub mod listeners;
pub mod logging;
pub mod messages;
pub mod options;
pub mod outside_click;
pub mod panel;
pub mod visibility;

// Re-exports for convenient external access
pub use config::PanelConfig;
pub use draft::{FieldKey, FieldUpdate, RawFieldReport, SettingsDraft};
pub use error::{PanelError, Result};
pub use listeners::{Interaction, KeyPress, ListenerRegistry, Point, Rect};
pub use messages::PanelMessage;
pub use options::{OptionCatalog, PanelOption};
pub use outside_click::{OutsideClickDetector, RootRegion};
pub use panel::{FormEvent, PanelController, UpdateOutcome};
pub use visibility::Visibility;
