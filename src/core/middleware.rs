//! 核心中间件模块
//!
//! 包在每次动作分发外面的两层：同一动作的在途去重，以及耗时日志。

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::error::Result;

/// 在途动作集合
///
/// 每个 key 同一时刻最多持有一个 [`InFlightGuard`]。
#[derive(Debug)]
pub struct InFlight<K> {
    pending: Arc<Mutex<HashSet<K>>>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl<K> Clone for InFlight<K> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<K: Eq + Hash + Copy> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试占用 key；已被占用时返回 `None`
    pub fn try_acquire(&self, key: K) -> Option<InFlightGuard<K>> {
        let mut pending = self.pending.lock();
        if !pending.insert(key) {
            return None;
        }
        Some(InFlightGuard {
            key,
            pending: Arc::clone(&self.pending),
        })
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.lock().contains(&key)
    }
}

/// 释放时自动把 key 移出在途集合
#[derive(Debug)]
pub struct InFlightGuard<K: Eq + Hash> {
    key: K,
    pending: Arc<Mutex<HashSet<K>>>,
}

impl<K: Eq + Hash> Drop for InFlightGuard<K> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.key);
    }
}

/// 请求日志：记录动作名、结果与耗时
pub async fn instrument<A, F, T>(action: A, fut: F) -> Result<T>
where
    A: Debug,
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    let elapsed = start.elapsed().as_millis();

    match &result {
        Ok(_) => info!("{:?} - ok - {}ms", action, elapsed),
        Err(e) => match e.status() {
            Some(status) => warn!("{:?} - failed - {}ms - {} - {}", action, elapsed, status, e),
            None => warn!("{:?} - failed - {}ms - {}", action, elapsed, e),
        },
    }

    result
}
