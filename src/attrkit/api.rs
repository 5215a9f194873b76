//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for attrkit operations, whatever the UI.
//!
//! The facade:
//! - **Owns** the evaluation context built from configuration
//! - **Normalizes inputs** (e.g. tag names into [`AttributeType`])
//! - **Dispatches** to the command functions and returns `Result<CmdResult>`
//!
//! It does no printing and holds no business logic.

use crate::attr::AttributeType;
use crate::commands;
use crate::config::AttrKitConfig;
use crate::context::AttrContext;
use crate::error::{AttrKitError, Result};
use std::path::{Path, PathBuf};

/// The main API facade for attrkit operations.
pub struct AttrApi {
    ctx: AttrContext,
    config_dir: PathBuf,
}

impl AttrApi {
    pub fn new(ctx: AttrContext, config_dir: PathBuf) -> Self {
        Self { ctx, config_dir }
    }

    /// Builds the context from the configuration stored in `config_dir`.
    pub fn open(config_dir: PathBuf) -> Result<Self> {
        let config = AttrKitConfig::load(&config_dir)?;
        Ok(Self::new(AttrContext::from_config(&config), config_dir))
    }

    pub fn context(&self) -> &AttrContext {
        &self.ctx
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn parse<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        commands::parse::run(&self.ctx, inputs)
    }

    pub fn cast(&self, input: &str, target: &str) -> Result<commands::CmdResult> {
        let target = parse_type(target)?;
        commands::cast::run(&self.ctx, input, target)
    }

    pub fn compare(&self, left: &str, right: &str) -> Result<commands::CmdResult> {
        commands::compare::run(&self.ctx, left, right)
    }

    pub fn sort<I: AsRef<str>>(&self, inputs: &[I], named: bool) -> Result<commands::CmdResult> {
        commands::sort::run(&self.ctx, inputs, named)
    }

    pub fn types(&self) -> Result<commands::CmdResult> {
        commands::types::run(&self.ctx)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

fn parse_type(name: &str) -> Result<AttributeType> {
    name.parse::<AttributeType>()
        .map_err(|e| AttrKitError::Api(e.to_string()))
}

pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, Comparison, MessageLevel, TypeRow, ValueRow};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn api(temp: &TempDir) -> AttrApi {
        AttrApi::open(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn cast_accepts_tag_aliases() {
        let temp = TempDir::new().unwrap();
        let result = api(&temp).cast("12", "double").unwrap();
        assert_eq!(result.values[0].value.kind(), AttributeType::Real);
    }

    #[test]
    fn cast_rejects_unknown_tag() {
        let temp = TempDir::new().unwrap();
        let err = api(&temp).cast("12", "quaternion").unwrap_err();
        assert!(matches!(err, AttrKitError::Api(_)));
    }

    #[test]
    fn context_follows_saved_config() {
        let temp = TempDir::new().unwrap();
        let api = api(&temp);
        api.config(ConfigAction::Set("hosts".into(), "build=10.0.0.7".into()))
            .unwrap();

        let reopened = AttrApi::open(temp.path().to_path_buf()).unwrap();
        let result = reopened.parse(&["build"]).unwrap();
        assert_eq!(result.values[0].value.kind(), AttributeType::InetAddress);
    }
}
