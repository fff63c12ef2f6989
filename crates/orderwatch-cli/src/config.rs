use std::path::{Path, PathBuf};

use anyhow::Context;
use orderwatch_store::{AppConfig, OrderStore, StoreLayout};

/// Where this run keeps its data, resolved once from the global flags.
#[derive(Debug, Clone)]
pub struct AppContext {
    home: PathBuf,
    demo: bool,
}

pub fn default_home() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not find home directory"))?;
    Ok(home.join(".config").join("orderwatch"))
}

impl AppContext {
    pub fn resolve(home: Option<PathBuf>, demo: bool) -> anyhow::Result<Self> {
        let home = match home {
            Some(home) => home,
            None => default_home()?,
        };
        Ok(Self { home, demo })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn home_layout(&self) -> StoreLayout {
        StoreLayout::new(&self.home)
    }

    /// Store holding credentials and configuration.
    pub fn home_store(&self) -> anyhow::Result<OrderStore> {
        OrderStore::open(&self.home)
            .with_context(|| format!("opening {}", self.home.display()))
    }

    /// Store holding order history and checklists. Demo runs get their own.
    pub fn data_store(&self) -> anyhow::Result<OrderStore> {
        if !self.demo {
            return self.home_store();
        }
        let root = self.home_layout().demo().root().to_path_buf();
        OrderStore::open(&root).with_context(|| format!("opening {}", root.display()))
    }

    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        orderwatch_store::config::read_config_or_default(&self.home_layout())
            .context("reading config.toml")
    }
}
