use fixit_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;

    print_banner();
    tracing::info!("🔧 FixIt Server starting...");

    // 2. 初始化服务器状态 (数据库迁移、引导管理员)
    let state = ServerState::initialize(config.clone()).await?;

    // 3. 启动 HTTP 服务器 + Socket.IO 网关
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
