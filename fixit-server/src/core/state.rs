//! 服务器状态

use std::sync::Arc;

use crate::auth::{JwtService, hash_password};
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{
    AdminRepository, ClientRepository, JobRepository, VerificationRepository, WorkerRepository,
};
use crate::utils::FieldCipher;

/// 服务器状态 - 持有所有共享服务的引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆的成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | jwt_service | 管理员令牌服务 |
/// | cipher | 字段加解密服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub cipher: Arc<FieldCipher>,
}

impl ServerState {
    /// 从配置初始化所有服务并执行数据库迁移
    pub async fn initialize(config: Config) -> Result<Self> {
        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let cipher = Arc::new(
            FieldCipher::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
        );

        let state = Self {
            config: Arc::new(config),
            db,
            jwt_service,
            cipher,
        };
        state.bootstrap_admin().await?;
        Ok(state)
    }

    /// 使用现有服务组装状态 (测试用)
    pub fn with_services(
        config: Config,
        db: DbService,
        jwt_service: JwtService,
        cipher: FieldCipher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            db,
            jwt_service: Arc::new(jwt_service),
            cipher: Arc::new(cipher),
        }
    }

    /// 表为空时创建引导管理员 (需要 ADMIN_PASSWORD)
    async fn bootstrap_admin(&self) -> Result<()> {
        let Some(password) = &self.config.admin_password else {
            tracing::info!("ADMIN_PASSWORD not set, skipping bootstrap admin");
            return Ok(());
        };

        let hash = hash_password(password)
            .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?;
        match self
            .admins()
            .ensure_bootstrap(&self.config.admin_username, &hash)
            .await
        {
            Ok(Some(id)) => {
                tracing::info!(admin_id = %id, "Bootstrap admin account created");
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => Err(ServerError::Database(e.to_string())),
        }
    }

    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(self.db.pool.clone())
    }

    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.db.pool.clone())
    }

    pub fn workers(&self) -> WorkerRepository {
        WorkerRepository::new(self.db.pool.clone())
    }

    pub fn admins(&self) -> AdminRepository {
        AdminRepository::new(self.db.pool.clone())
    }

    pub fn verifications(&self) -> VerificationRepository {
        VerificationRepository::new(self.db.pool.clone())
    }
}
