//! 消息网关
//!
//! Socket.IO relay between clients and workers. The gateway owns the
//! online registry; nothing outside this module mutates it. Messages
//! are relayed to conversation rooms and are not persisted here.

mod registry;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};
use tracing::{debug, info, warn};

pub use registry::OnlineRegistry;

/// 用户上线注册
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload {
    user_id: String,
}

/// 会话房间进出
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationPayload {
    conversation_id: String,
}

/// 新消息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagePayload {
    conversation_id: String,
    sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_id: Option<String>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

/// 消息编辑 / 删除
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRefPayload {
    conversation_id: String,
    message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

fn user_room(user_id: &str) -> String {
    format!("user:{user_id}")
}

fn conversation_room(conversation_id: &str) -> String {
    format!("conversation:{conversation_id}")
}

/// 注册默认命名空间的事件处理器
pub fn register(io: &SocketIo) {
    let registry = Arc::new(OnlineRegistry::new());

    io.ns("/", move |socket: SocketRef| {
        let registry = registry.clone();
        async move {
            debug!(sid = %socket.id, "socket connected");

            socket.on("registerUser", {
                let registry = registry.clone();
                move |socket: SocketRef, Data::<RegisterPayload>(payload)| async move {
                    registry.register(&payload.user_id, socket.id);
                    socket.join(user_room(&payload.user_id));
                    info!(user_id = %payload.user_id, sid = %socket.id, "user online");
                }
            });

            socket.on(
                "joinConversation",
                |socket: SocketRef, Data::<ConversationPayload>(payload)| async move {
                    socket.join(conversation_room(&payload.conversation_id));
                    debug!(
                        sid = %socket.id,
                        conversation_id = %payload.conversation_id,
                        "joined conversation"
                    );
                },
            );

            socket.on(
                "leaveConversation",
                |socket: SocketRef, Data::<ConversationPayload>(payload)| async move {
                    socket.leave(conversation_room(&payload.conversation_id));
                },
            );

            socket.on(
                "sendMessage",
                |socket: SocketRef, Data::<MessagePayload>(payload)| async move {
                    let room = conversation_room(&payload.conversation_id);
                    if let Err(e) = socket.to(room).emit("newMessage", &payload).await {
                        warn!(error = %e, "failed to relay message");
                    }
                    // Also hit the recipient's personal room, so they are
                    // notified even before joining the conversation room.
                    if let Some(recipient_id) = payload.recipient_id.clone() {
                        let personal = user_room(&recipient_id);
                        if let Err(e) = socket.to(personal).emit("newMessage", &payload).await {
                            warn!(error = %e, "failed to notify recipient");
                        }
                    }
                },
            );

            socket.on(
                "editMessage",
                |socket: SocketRef, Data::<MessageRefPayload>(payload)| async move {
                    let room = conversation_room(&payload.conversation_id);
                    if let Err(e) = socket.to(room).emit("messageEdited", &payload).await {
                        warn!(error = %e, "failed to relay edit");
                    }
                },
            );

            socket.on(
                "deleteMessage",
                |socket: SocketRef, Data::<MessageRefPayload>(payload)| async move {
                    let room = conversation_room(&payload.conversation_id);
                    if let Err(e) = socket.to(room).emit("messageDeleted", &payload).await {
                        warn!(error = %e, "failed to relay delete");
                    }
                },
            );

            socket.on_disconnect({
                let registry = registry.clone();
                move |socket: SocketRef| async move {
                    if let Some(user_id) = registry.unregister(socket.id) {
                        info!(user_id = %user_id, sid = %socket.id, "user offline");
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // 处理器必须满足 socketioxide 的 async handler bounds
    #[tokio::test]
    async fn gateway_handlers_attach_to_default_namespace() {
        let (_layer, io) = SocketIo::new_layer();
        register(&io);
    }
}
