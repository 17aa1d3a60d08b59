use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub linker: LinkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// 匹配参数, 缺省值即标准算法
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// 精确匹配加成
    pub exact_boost: f64,
    /// 金额容差
    pub amount_tolerance: f64,
    pub amount_exact_boost: f64,
    pub amount_near_boost: f64,
    pub date_boost: f64,
    /// name/provider 的模糊匹配阈值 (0-100)
    pub fuzzy_name_threshold: f64,
    /// 其他文本字段的模糊匹配阈值 (0-100)
    pub fuzzy_text_threshold: f64,
    pub fuzzy_penalty_weight: f64,
    pub multiword_threshold: f64,
    pub multiword_min_words: usize,
    pub multiword_max_window: usize,
    /// 单个高置信候选的接受线
    pub accept_threshold: f64,
    /// 第一名领先第二名超过该值时只保留第一名
    pub clear_gap: f64,
    /// 第二名达到该值时视为歧义, 返回前 N 名
    pub ambiguity_threshold: f64,
    pub ambiguous_group_size: usize,
    /// 输出的 confidence 是否限制在 [0,1]
    pub clamp_confidence: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            exact_boost: 0.05,
            amount_tolerance: 0.01,
            amount_exact_boost: 0.03,
            amount_near_boost: 0.01,
            date_boost: 0.02,
            fuzzy_name_threshold: 85.0,
            fuzzy_text_threshold: 75.0,
            fuzzy_penalty_weight: 0.5,
            multiword_threshold: 80.0,
            multiword_min_words: 2,
            multiword_max_window: 10,
            accept_threshold: 0.90,
            clear_gap: 0.15,
            ambiguity_threshold: 0.75,
            ambiguous_group_size: 3,
            clamp_confidence: true,
        }
    }
}

impl AppConfig {
    /// 加载配置: 缺省值 -> linker.toml (可选) -> LINKER_* 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LINKER_CONFIG").unwrap_or_else(|_| "linker".to_string());

        Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix("LINKER").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }
}
