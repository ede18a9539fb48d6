//! 后台定时任务。
//!
//! 启动时调用一次 `spawn_all`，任务通过 `tokio::spawn` 脱离运行，不阻塞调用方。

use std::time::Duration;

use crate::services::JackpotService;

/// 启动所有后台任务
pub fn spawn_all(jackpot_service: JackpotService, directory_refresh_secs: u64) {
    // 奖池名称索引与存储全量对账
    {
        let svc = jackpot_service.clone();
        let period = Duration::from_secs(directory_refresh_secs.max(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                match svc.rebuild_directory().await {
                    Ok(n) => log::debug!("Jackpot directory reconciled: {n} entries"),
                    Err(e) => log::error!("Failed to reconcile jackpot directory: {e:?}"),
                }
            }
        });
    }
}
