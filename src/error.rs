use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 浏览器会话错误（致命：会话无法建立时整个运行中止）
    Session(SessionError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Session(e) => write!(f, "会话错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Session(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 浏览器会话错误
///
/// 会话获取失败是唯一的致命错误：在任何一轮提交开始之前就终止运行
#[derive(Debug)]
pub enum SessionError {
    /// 浏览器配置构建失败
    ConfigurationFailed { message: String },
    /// 启动浏览器失败
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 首次导航失败
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ConfigurationFailed { message } => {
                write!(f, "浏览器配置失败: {}", message)
            }
            SessionError::LaunchFailed { source } => {
                write!(f, "启动浏览器失败: {}", source)
            }
            SessionError::PageCreationFailed { source } => {
                write!(f, "创建页面失败: {}", source)
            }
            SessionError::NavigationFailed { url, source } => {
                write!(f, "导航到 {} 失败: {}", url, source)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::ConfigurationFailed { .. } => None,
            SessionError::LaunchFailed { source }
            | SessionError::PageCreationFailed { source }
            | SessionError::NavigationFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 解析失败
    JsonParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 选择题没有任何选项
    EmptyOptions { question: String },
    /// 权重为负数
    NegativeWeight { question: String, option: String },
    /// 权重之和为零
    ZeroWeightSum { question: String },
    /// 权重表无法构成抽样分布
    InvalidWeights { question: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed { path, source } => {
                write!(f, "读取配置文件失败 ({}): {}", path, source)
            }
            ConfigError::JsonParseFailed { path, source } => {
                write!(f, "JSON解析失败 ({}): {}", path, source)
            }
            ConfigError::EmptyOptions { question } => {
                write!(f, "问题 {} 没有配置任何选项", question)
            }
            ConfigError::NegativeWeight { question, option } => {
                write!(f, "问题 {} 的选项 {} 权重为负数", question, option)
            }
            ConfigError::ZeroWeightSum { question } => {
                write!(f, "问题 {} 的权重之和必须大于零", question)
            }
            ConfigError::InvalidWeights { question } => {
                write!(f, "问题 {} 的权重表无法构成抽样分布", question)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed { source, .. }
            | ConfigError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
