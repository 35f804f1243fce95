//! Label Server - 零件标签打印服务
//!
//! # 架构概述
//!
//! 按套件 (kit) 组织的零件清单，存放在一个 JSON 文件里。操作员选择套件
//! 和零件后，服务把每个零件渲染成一张 ZPL 标签，一次性发送给 Zebra 打印机。
//!
//! - **数据** (`store`): JSON 文件存储，原子替换写入
//! - **打印** (`printing`): ZPL 渲染和打印流程
//! - **认证** (`auth`): JWT 管理员认证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! label-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── store/         # 标签数据文件
//! ├── printing/      # 渲染和打印
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod printing;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use printing::{PartLabelRenderer, PrintService};
pub use store::LabelStore;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

use tracing_appender::non_blocking::WorkerGuard;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 按 `LOG_LEVEL` 初始化日志，同时写入 `WORK_DIR/logs`
///
/// 返回的 guard 必须在进程生命周期内保持存活，否则文件日志会丢失。
pub fn setup_environment() -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| ".".to_string());
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::path::Path::new(&work_dir).join("logs");

    Ok(init_logger_with_file(log_level.as_deref(), Some(&log_dir)))
}

pub fn print_banner() {
    println!(
        r#"
    __          __         __
   / /   ____ _/ /_  ___  / /
  / /   / __ `/ __ \/ _ \/ /
 / /___/ /_/ / /_/ /  __/ /
/_____/\__,_/_.___/\___/_/
    "#
    );
}
