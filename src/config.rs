use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::SECRET_MESSAGE;
use crate::error::{Error, Result};
use crate::scheduler::Millis;

/// 运行配置 (~/.config/bemine/config.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 固定随机种子，便于复现
    pub seed: Option<u64>,
    /// 主循环轮询间隔
    pub tick_ms: Millis,
    pub timing: Timing,
    pub shake: ShakeConfig,
    pub secret_message: String,
}

/// 各种延迟与间隔 (毫秒)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub celebration_delay_ms: Millis,
    pub evasion_warmup_ms: Millis,
    pub evasion_interval_ms: Millis,
    pub typewriter_delay_ms: Millis,
    pub typewriter_base_ms: Millis,
    pub typewriter_jitter_ms: Millis,
    pub teaser_interval_ms: Millis,
    pub idle_window_ms: Millis,
    pub rating_delay_ms: Millis,
    pub rating_hold_ms: Millis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// 合加速度阈值 (m/s²)
    pub threshold: f64,
    pub cooldown_ms: Millis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: 33,
            timing: Timing::default(),
            shake: ShakeConfig::default(),
            secret_message: SECRET_MESSAGE.to_string(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            celebration_delay_ms: 800,
            evasion_warmup_ms: 500,
            evasion_interval_ms: 600,
            typewriter_delay_ms: 1000,
            typewriter_base_ms: 40,
            typewriter_jitter_ms: 10,
            teaser_interval_ms: 8000,
            idle_window_ms: 5000,
            rating_delay_ms: 500,
            rating_hold_ms: 3000,
        }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold: 15.0,
            cooldown_ms: 2000,
        }
    }
}

impl Config {
    /// 校验配置：周期任务的间隔不能为 0
    pub fn validate(&self) -> Result<()> {
        let t = &self.timing;
        let periods = [
            ("tick_ms", self.tick_ms),
            ("timing.evasion_interval_ms", t.evasion_interval_ms),
            ("timing.teaser_interval_ms", t.teaser_interval_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be greater than 0")));
            }
        }
        if t.typewriter_jitter_ms >= t.typewriter_base_ms {
            return Err(Error::InvalidConfig(
                "timing.typewriter_jitter_ms must be smaller than timing.typewriter_base_ms"
                    .to_string(),
            ));
        }
        if !self.shake.threshold.is_finite() || self.shake.threshold < 0.0 {
            return Err(Error::InvalidConfig(
                "shake.threshold must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// 获取配置文件路径，目录不存在时不创建
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(Error::MissingDir("config"))?;
    Ok(dir.join("bemine").join("config.toml"))
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
