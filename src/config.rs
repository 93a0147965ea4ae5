//! 配置模块
//!
//! 分为两部分：
//! - `Config`: 程序级配置（浏览器、节奏参数），从环境变量读取
//! - `SurveyConfig`: 单次运行的问卷配置（URL、目标次数、各问题的答案分布），
//!   从 JSON 文件读取，构造后不可变

use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 问卷配置文件路径
    pub survey_config_file: String,
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动探测）
    pub chrome_executable: Option<String>,
    /// 是否无头模式运行
    pub headless: bool,
    /// 问卷加载完成的标志元素 id
    pub form_marker_id: String,
    /// 提交按钮上的文字
    pub submit_button_label: String,
    /// 等待问卷加载的超时时间（秒）
    pub wait_timeout_secs: u64,
    /// 问卷加载完成后的额外等待（秒）
    pub page_load_wait_secs: u64,
    /// 刷新页面后的等待（秒）
    pub reload_wait_secs: u64,
    /// 追加参与后随机等待的下限（秒）
    pub next_wait_min_secs: u64,
    /// 追加参与后随机等待的上限（秒）
    pub next_wait_max_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            survey_config_file: "survey_config.json".to_string(),
            chrome_executable: None,
            headless: false,
            form_marker_id: "nsv-survey-question-2-item-0".to_string(),
            submit_button_label: "제출".to_string(),
            wait_timeout_secs: 60,
            page_load_wait_secs: 4,
            reload_wait_secs: 4,
            next_wait_min_secs: 2,
            next_wait_max_secs: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            survey_config_file: std::env::var("SURVEY_CONFIG_FILE").unwrap_or(default.survey_config_file),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            form_marker_id: std::env::var("FORM_MARKER_ID").unwrap_or(default.form_marker_id),
            submit_button_label: std::env::var("SUBMIT_BUTTON_LABEL").unwrap_or(default.submit_button_label),
            wait_timeout_secs: std::env::var("WAIT_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wait_timeout_secs),
            page_load_wait_secs: std::env::var("PAGE_LOAD_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_load_wait_secs),
            reload_wait_secs: std::env::var("RELOAD_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reload_wait_secs),
            next_wait_min_secs: std::env::var("NEXT_WAIT_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.next_wait_min_secs),
            next_wait_max_secs: std::env::var("NEXT_WAIT_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.next_wait_max_secs),
        }
    }

    /// 提取循环节奏参数
    pub fn pacing(&self) -> Pacing {
        Pacing {
            wait_timeout: Duration::from_secs(self.wait_timeout_secs),
            page_load_wait: Duration::from_secs(self.page_load_wait_secs),
            reload_wait: Duration::from_secs(self.reload_wait_secs),
            next_wait_min: Duration::from_secs(self.next_wait_min_secs),
            next_wait_max: Duration::from_secs(self.next_wait_max_secs),
        }
    }
}

/// 提交循环的节奏参数
///
/// 所有等待都是显式的有界等待，不散落在各个步骤里
#[derive(Clone, Debug)]
pub struct Pacing {
    pub wait_timeout: Duration,
    pub page_load_wait: Duration,
    pub reload_wait: Duration,
    pub next_wait_min: Duration,
    pub next_wait_max: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Config::default().pacing()
    }
}

/// 单个问题的答案分布配置
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionConfig {
    /// 选择题：选项 id → 非负权重
    ///
    /// 兼容旧版 GUI 保存的 `"multiple"` 标签
    #[serde(alias = "multiple")]
    Choice {
        #[serde(default)]
        weights: BTreeMap<String, f64>,
    },
    /// 主观题：候选回答文本池（可以为空）
    Text {
        #[serde(default)]
        texts: Vec<String>,
    },
}

/// 问卷配置
///
/// 每次运行构造一次，之后不可变
#[derive(Clone, Debug, Deserialize)]
pub struct SurveyConfig {
    /// 问卷 URL
    pub url: String,
    /// 目标成功次数（0 表示无限循环）
    #[serde(default)]
    pub max_count: u64,
    /// 问题 id → 答案分布
    #[serde(default)]
    pub questions: BTreeMap<String, QuestionConfig>,
}

impl SurveyConfig {
    /// 从 JSON 文件加载并校验问卷配置
    pub fn load(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_string(),
            source: Box::new(e),
        })?;
        let config: SurveyConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseFailed {
                path: path.to_string(),
                source: Box::new(e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置不变量
    ///
    /// - 每个选择题至少有一个选项
    /// - 权重不能为负
    /// - 每个选择题的权重之和大于零
    pub fn validate(&self) -> AppResult<()> {
        for (id, question) in &self.questions {
            if let QuestionConfig::Choice { weights } = question {
                if weights.is_empty() {
                    return Err(ConfigError::EmptyOptions {
                        question: id.clone(),
                    }
                    .into());
                }
                for (option, weight) in weights {
                    if *weight < 0.0 {
                        return Err(ConfigError::NegativeWeight {
                            question: id.clone(),
                            option: option.clone(),
                        }
                        .into());
                    }
                }
                if weights.values().sum::<f64>() <= 0.0 {
                    return Err(ConfigError::ZeroWeightSum {
                        question: id.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
