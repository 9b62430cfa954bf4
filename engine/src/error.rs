//! Crate-level error type.
//!
//! Each subsystem has its own error enum; [`NanoblockError`] wraps them for
//! callers that drive several subsystems (startup, the binary).

use thiserror::Error;

use crate::editor::config::ConfigError;
use crate::editor::document::DocumentError;
use crate::editor::palette::PaletteError;
use crate::render::GpuError;

#[derive(Debug, Error)]
pub enum NanoblockError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

pub type Result<T> = std::result::Result<T, NanoblockError>;
