//! Mode and view dispatch for hardware control surfaces.
//!
//! A surface routes button, knob and fader input to the active feature group
//! of a category (a mode or a view), then renders feedback back onto the
//! device: LED colors through the [`ButtonColorResolver`] and display content
//! through the [`TextDisplay`] and [`GraphicDisplay`] contracts.
//!
//! Everything runs on the caller's thread. Feature groups never call into the
//! registries themselves; navigation they ask for is queued on the
//! [`Context`] and applied once the handler has returned.

pub use color::{ButtonColorResolver, ColorIndex};
pub use command::FaderTouchCommand;
pub use config::{ConfigError, ConfigManager, ConfigSchema, DisplayKind, Settings};
pub use display::{Display, GraphicDisplay, OptionElement, ParameterElement, TextDisplay};
pub use error::{Error, ModelError, Result};
pub use event::{button_row_index, ButtonEvent, ButtonId, Category, FunctionButton};
pub use feature_group::{Context, FeatureGroup, FeatureGroupId, Request, Surface, Transition};
pub use registry::{FeatureGroupManager, ListenerId};
pub use surface::{ControlSurface, MAX_CASCADE};

mod color;
mod command;
mod config;
mod display;
mod error;
mod event;
mod feature_group;
pub mod model;
mod registry;
mod surface;
