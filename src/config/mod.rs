//! Configuration management for Qrium.

mod settings;

pub use settings::{
    GeneralSettings, LlmSettings, Settings, VideoSettings, WebSearchSettings,
};
