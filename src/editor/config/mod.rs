//! Editor configuration: file-backed settings and key bindings.

pub mod editor_config;
pub mod input_config;

pub use editor_config::{
    BlockDimensions, ConfigError, EditorConfig, LayoutConfig, PanelRect, PathsConfig, Preferences,
    ShadingConfig, WindowConfig, MOCK,
};
pub use input_config::{InputConfig, KeyCommand};
