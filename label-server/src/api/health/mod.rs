//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |
//! | /api/printer/status | GET | 打印机可达性 (状态指示灯) | 无 |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::response::PrinterStatusResponse;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok};

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/printer/status", get(printer_status))
}

/// 简单健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态
    status: &'static str,
    /// 版本号
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 打印机状态
///
/// 只用于界面指示灯，打印前不会检查
pub async fn printer_status(
    State(state): State<ServerState>,
) -> Json<AppResponse<PrinterStatusResponse>> {
    let online = state.print_service.printer_online().await;

    ok(PrinterStatusResponse {
        printer: state.print_service.printer().describe(),
        online,
        indicator: if online { "green" } else { "red" }.to_string(),
    })
}
