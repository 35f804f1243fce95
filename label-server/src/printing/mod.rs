//! 标签打印模块
//!
//! # 结构
//!
//! - [`PartLabelRenderer`] - 零件 → ZPL 文档
//! - [`PrintService`] - 套件打印流程 (读取 → 渲染 → 发送)
//! - [`printer_from_config`] - 按配置选择打印机传输方式

pub mod renderer;
pub mod service;

pub use renderer::{LabelLayout, LabelStyle, PartLabelRenderer};
pub use service::PrintService;

use std::time::Duration;

use label_printer::{AnyPrinter, HttpPrinter, NetworkPrinter, PrintResult};

use crate::core::config::{PrinterConfig, PrinterMode};

/// 根据配置创建打印机
///
/// `spooler` 模式只在 Windows 上可用，其他平台返回配置错误
pub fn printer_from_config(config: &PrinterConfig) -> PrintResult<AnyPrinter> {
    let timeout = Duration::from_millis(config.timeout_ms);

    let printer = match config.mode {
        PrinterMode::Tcp => AnyPrinter::Network(
            NetworkPrinter::new(&config.host, config.port)?.with_timeout(timeout),
        ),
        PrinterMode::Http => {
            AnyPrinter::Http(HttpPrinter::new(&config.host, config.port)?.with_timeout(timeout))
        }
        #[cfg(windows)]
        PrinterMode::Spooler => {
            AnyPrinter::Spooler(label_printer::WindowsPrinter::new(&config.name)?)
        }
        #[cfg(not(windows))]
        PrinterMode::Spooler => {
            return Err(label_printer::PrintError::InvalidConfig(format!(
                "spooler printer '{}' requires Windows",
                config.name
            )));
        }
    };

    Ok(printer)
}
