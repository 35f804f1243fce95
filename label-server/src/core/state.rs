use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::printing::{PartLabelRenderer, PrintService, printer_from_config};
use crate::store::LabelStore;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一次。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | store | Arc<LabelStore> | 标签数据文件 |
/// | print_service | Arc<PrintService> | 套件打印 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<LabelStore>,
    pub print_service: Arc<PrintService>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 数据文件在这里不会被读取；缺失的文件在第一次读取时视为空数据。
    /// 打印机也不会被探测，连不上只在打印时报告。
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = Arc::new(LabelStore::new(config.store_path()));
        let printer = Arc::new(printer_from_config(&config.printer)?);
        let renderer = PartLabelRenderer::from_config(&config.label);

        tracing::info!(
            store = %store.path().display(),
            printer = %printer.describe(),
            style = %config.label.style,
            "Server state initialized"
        );

        let print_service = Arc::new(PrintService::new(store.clone(), printer, renderer));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: Arc::new(config.clone()),
            store,
            print_service,
            jwt_service,
        })
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
