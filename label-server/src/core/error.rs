//! 服务器启动错误
//!
//! 请求级错误见 [`crate::utils::AppError`]；这里只有启动和运行 HTTP 服务时的错误。

use label_printer::PrintError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("打印机配置错误: {0}")]
    Printer(#[from] PrintError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
