//! 浏览器会话管理
//!
//! 负责启动浏览器、创建页面并在运行结束时释放资源

pub mod session;

pub use session::{launch_session, BrowserSession};
