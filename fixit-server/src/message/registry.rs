//! 在线用户注册表
//!
//! Connection-scoped mapping between users and their live sockets.
//! A user can hold several sockets (multiple tabs / devices); the user
//! counts as online while at least one socket remains. The reverse map
//! makes disconnect cleanup O(1) without scanning every user.

use std::collections::HashSet;

use dashmap::DashMap;
use socketioxide::socket::Sid;

#[derive(Debug, Default)]
pub struct OnlineRegistry {
    sockets_by_user: DashMap<String, HashSet<Sid>>,
    user_by_socket: DashMap<Sid, String>,
}

impl OnlineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个 socket 属于某用户
    pub fn register(&self, user_id: &str, sid: Sid) {
        self.sockets_by_user
            .entry(user_id.to_string())
            .or_default()
            .insert(sid);
        self.user_by_socket.insert(sid, user_id.to_string());
    }

    /// 断开清理。返回下线的用户 id (该用户已无存活 socket 时)。
    pub fn unregister(&self, sid: Sid) -> Option<String> {
        let (_, user_id) = self.user_by_socket.remove(&sid)?;

        let mut went_offline = false;
        if let Some(mut sockets) = self.sockets_by_user.get_mut(&user_id) {
            sockets.remove(&sid);
            went_offline = sockets.is_empty();
        }
        if went_offline {
            self.sockets_by_user.remove(&user_id);
            return Some(user_id);
        }
        None
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.sockets_by_user.contains_key(user_id)
    }

    pub fn online_count(&self) -> usize {
        self.sockets_by_user.len()
    }
}
