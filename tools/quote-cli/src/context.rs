//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use paint_cache::{DirStore, SessionId};
use paint_quote::config::QuoteConfig;
use paint_quote::session::{CartSession, FlowKind};

use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["paintquote.toml", ".paintquote.toml", "paintquote.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Engine configuration.
    pub config: QuoteConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative store paths resolve against: the config file's
    /// directory, or the working directory when no file was found.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, Path::new(path));
                let config = QuoteConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?;
                (config, parent_dir(&path, &cwd))
            }
            None => match Self::find_config(&cwd)? {
                Some((config, path)) => (config, parent_dir(&path, &cwd)),
                None => (QuoteConfig::default(), cwd),
            },
        };

        Ok(Self {
            config,
            output,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    ///
    /// A file that exists but fails to load is an error, not a miss.
    fn find_config(start: &Path) -> Result<Option<(QuoteConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let path = current.join(name);
                if path.is_file() {
                    let config = QuoteConfig::load(&path)
                        .with_context(|| format!("Failed to load config: {}", path.display()))?;
                    return Ok(Some((config, path)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Directory holding persisted carts.
    pub fn store_dir(&self) -> PathBuf {
        resolve(&self.base_dir, &self.config.session.store_dir)
    }

    /// Open a persisted cart session.
    pub fn open_session(&self, session: &str, flow: FlowKind) -> Result<CartSession<DirStore>> {
        let dir = self.store_dir();
        let store = DirStore::open(&dir)
            .with_context(|| format!("Failed to open cart store: {}", dir.display()))?;
        self.output
            .debug(&format!("Using cart store {}", dir.display()));
        Ok(CartSession::open(
            self.config.clone(),
            store,
            SessionId::new(session),
            flow,
        ))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn parent_dir(path: &Path, fallback: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf())
}
