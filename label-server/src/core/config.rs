use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use label_printer::{DEFAULT_PORT, FieldEscape};

use crate::auth::JwtConfig;
use crate::printing::LabelStyle;

/// 打印机连接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterMode {
    /// 原始 TCP 直连 (端口 9100)
    Tcp,
    /// HTTP POST 到打印机端口
    Http,
    /// Windows 打印队列 (USB 打印机)
    Spooler,
}

impl FromStr for PrinterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" | "network" => Ok(PrinterMode::Tcp),
            "http" => Ok(PrinterMode::Http),
            "spooler" | "usb" => Ok(PrinterMode::Spooler),
            other => Err(format!("unknown printer mode: {}", other)),
        }
    }
}

impl fmt::Display for PrinterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrinterMode::Tcp => f.write_str("tcp"),
            PrinterMode::Http => f.write_str("http"),
            PrinterMode::Spooler => f.write_str("spooler"),
        }
    }
}

/// 打印机配置
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub mode: PrinterMode,
    /// 网络打印机地址 (tcp / http)
    pub host: String,
    /// 网络打印机端口
    pub port: u16,
    /// 打印队列中的设备名 (spooler)
    pub name: String,
    /// 连接/发送超时 (毫秒)
    pub timeout_ms: u64,
}

/// 标签版式配置
#[derive(Debug, Clone)]
pub struct LabelConfig {
    pub style: LabelStyle,
    /// 零件号水平微调 (点)，正数右移
    pub offset_adjustment: i32,
    /// 字段数据转义方式
    pub escape: FieldEscape,
}

/// 服务器配置 - 标签打印服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | . | 工作目录 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | LABEL_DATA_PATH | label_data.json | 标签数据文件 |
/// | PRINTER_MODE | tcp | tcp / http / spooler |
/// | PRINTER_HOST | 127.0.0.1 | 网络打印机地址 |
/// | PRINTER_PORT | 9100 | 网络打印机端口 |
/// | PRINTER_NAME | Zebra | 打印队列设备名 |
/// | PRINT_TIMEOUT_MS | 5000 | 打印超时(毫秒) |
/// | LABEL_STYLE | centered | centered / centered-barcode / fixed |
/// | LABEL_OFFSET_ADJUST | -60 | 零件号水平微调(点) |
/// | ZPL_ESCAPE | raw | raw / hex |
/// | ADMIN_USERNAME | admin | 管理员用户名 |
/// | ADMIN_PASSWORD | admin | 管理员密码 |
/// | LOG_LEVEL | info | 日志级别 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// PRINTER_HOST=10.0.0.42 LABEL_STYLE=fixed cargo run -p label-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放标签数据和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 标签数据 JSON 文件 (相对路径基于 work_dir)
    pub label_data_path: String,
    pub printer: PrinterConfig,
    pub label: LabelConfig,
    /// 管理员凭据
    pub admin_username: String,
    pub admin_password: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    pub log_level: String,
    /// 运行环境: development | production
    pub environment: String,
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Invalid config value, using default");
                default
            }
        },
        None => default,
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置 (测试时传入固定映射)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Self {
            work_dir: string_or("WORK_DIR", "."),
            http_port: parse_or(&lookup, "HTTP_PORT", 5000),
            label_data_path: string_or("LABEL_DATA_PATH", "label_data.json"),
            printer: PrinterConfig {
                mode: parse_or(&lookup, "PRINTER_MODE", PrinterMode::Tcp),
                host: string_or("PRINTER_HOST", "127.0.0.1"),
                port: parse_or(&lookup, "PRINTER_PORT", DEFAULT_PORT),
                name: string_or("PRINTER_NAME", "Zebra"),
                timeout_ms: parse_or(&lookup, "PRINT_TIMEOUT_MS", 5000),
            },
            label: LabelConfig {
                style: parse_or(&lookup, "LABEL_STYLE", LabelStyle::Centered),
                offset_adjustment: parse_or(&lookup, "LABEL_OFFSET_ADJUST", -60),
                escape: parse_or(&lookup, "ZPL_ESCAPE", FieldEscape::Raw),
            },
            admin_username: string_or("ADMIN_USERNAME", "admin"),
            admin_password: string_or("ADMIN_PASSWORD", "admin"),
            jwt: JwtConfig::from_lookup(&lookup),
            log_level: string_or("LOG_LEVEL", "info"),
            environment: string_or("ENVIRONMENT", "development"),
        }
    }

    /// 标签数据文件的完整路径
    pub fn store_path(&self) -> PathBuf {
        let path = Path::new(&self.label_data_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.work_dir).join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.printer.mode, PrinterMode::Tcp);
        assert_eq!(config.printer.port, 9100);
        assert_eq!(config.label.style, LabelStyle::Centered);
        assert_eq!(config.label.offset_adjustment, -60);
        assert_eq!(config.label.escape, FieldEscape::Raw);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.store_path(), Path::new(".").join("label_data.json"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WORK_DIR", "/srv/labels"),
            ("PRINTER_MODE", "http"),
            ("PRINTER_HOST", "10.0.0.42"),
            ("LABEL_STYLE", "fixed"),
            ("LABEL_OFFSET_ADJUST", "0"),
            ("ZPL_ESCAPE", "hex"),
        ]);
        assert_eq!(config.printer.mode, PrinterMode::Http);
        assert_eq!(config.printer.host, "10.0.0.42");
        assert_eq!(config.label.style, LabelStyle::Fixed);
        assert_eq!(config.label.offset_adjustment, 0);
        assert_eq!(config.label.escape, FieldEscape::Hex);
        assert_eq!(
            config.store_path(),
            Path::new("/srv/labels").join("label_data.json")
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("HTTP_PORT", "eighty"),
            ("PRINTER_MODE", "carrier-pigeon"),
            ("ZPL_ESCAPE", "base64"),
        ]);
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.printer.mode, PrinterMode::Tcp);
        assert_eq!(config.label.escape, FieldEscape::Raw);
    }

    #[test]
    fn test_absolute_store_path() {
        let config = config_from(&[("LABEL_DATA_PATH", "/data/labels.json")]);
        assert_eq!(config.store_path(), PathBuf::from("/data/labels.json"));
    }
}
