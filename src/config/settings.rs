//! Configuration settings for the simulator

use crate::error::LifeError;
use crate::game_of_life::RuleSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    /// Draw living cells with an outline
    pub outline_enabled: bool,
    /// Neighbor counts that keep a living cell alive
    pub survival_counts: Vec<u8>,
    /// Neighbor counts that bring a dead cell to life
    pub birth_counts: Vec<u8>,
    /// Delay between auto-play ticks
    pub tick_delay_ms: u64,
    /// Generations advanced by one skip request
    pub batch_steps: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            outline_enabled: true,
            survival_counts: vec![2, 3],
            birth_counts: vec![3],
            tick_delay_ms: 100,
            batch_steps: 10,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Grid dimensions must be positive, got {}x{}", self.width, self.height);
        }

        if self.tick_delay_ms == 0 {
            anyhow::bail!("Tick delay must be positive");
        }

        self.rule_set().context("Invalid birth/survival counts")?;
        Ok(())
    }

    pub fn rule_set(&self) -> Result<RuleSet, LifeError> {
        RuleSet::new(self.survival_counts.iter().copied(), self.birth_counts.iter().copied())
    }

    /// Replace both count lists from a rule set
    pub fn set_rule_set(&mut self, rules: &RuleSet) {
        self.survival_counts = rules.survive_counts().collect();
        self.birth_counts = rules.birth_counts().collect();
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.height = height;
        }
        if let Some(ref rules) = cli_overrides.rules {
            self.set_rule_set(rules);
        }
        if let Some(delay) = cli_overrides.tick_delay_ms {
            self.tick_delay_ms = delay;
        }
        if let Some(steps) = cli_overrides.batch_steps {
            self.batch_steps = steps;
        }
        if cli_overrides.no_outline {
            self.outline_enabled = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub rules: Option<RuleSet>,
    pub tick_delay_ms: Option<u64>,
    pub batch_steps: Option<usize>,
    pub no_outline: bool,
}
