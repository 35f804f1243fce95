//! 认证授权模块
//!
//! 提供 JWT 认证和请求级用户上下文：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文 (受保护接口的提取器)
//! - [`verify_credentials`] - 管理员凭据校验

pub mod extractor;
pub mod jwt;

pub use jwt::{ADMIN_ROLE, Claims, CurrentUser, JwtConfig, JwtError, JwtService};

use crate::core::Config;

/// 校验管理员用户名和密码
///
/// 逐字节比较完整长度，避免按前缀提前返回
pub fn verify_credentials(config: &Config, username: &str, password: &str) -> bool {
    fn same(a: &str, b: &str) -> bool {
        let (a, b) = (a.as_bytes(), b.as_bytes());
        let mut diff = a.len() ^ b.len();
        for i in 0..a.len().max(b.len()) {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            diff |= (x ^ y) as usize;
        }
        diff == 0
    }

    let user_ok = same(username, &config.admin_username);
    let pass_ok = same(password, &config.admin_password);
    user_ok & pass_ok
}
