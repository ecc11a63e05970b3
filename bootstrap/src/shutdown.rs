//! Graceful Shutdown
//!
//! 一个关闭信号分发给多个服务器

use std::future::Future;

use tokio::sync::watch;
use tracing::info;

use crate::shutdown_signal;

/// Shutdown 控制器
#[derive(Clone)]
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        info!("Triggering shutdown");
        self.sender.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow()
    }

    /// 关闭触发时完成；已触发时立即完成
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.sender.subscribe();
        async move {
            // 发送端随控制器存活，wait_for 只会在触发后返回
            let _ = receiver.wait_for(|stopped| *stopped).await;
        }
    }

    /// 收到进程信号时触发关闭
    pub fn trigger_on_signal(&self) -> tokio::task::JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            controller.shutdown();
        })
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
