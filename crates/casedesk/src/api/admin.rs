use tracing::instrument;

use crate::error::Error;
use crate::gateway::endpoints::ADMIN;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{
    AuditLogEntry, AuditLogParams, BackupResult, NewUser, Setting, SettingUpdate, SystemInfo,
    User, UserUpdate,
};

/// Administration endpoints. The backend answers 403 unless the session
/// belongs to an admin.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AdminApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn path(suffix: &str) -> String {
        format!("{}/{}", ADMIN, suffix)
    }

    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, Error> {
        self.gateway.json(ApiRequest::get(Self::path("users"))).await
    }

    #[instrument(skip_all, fields(username = %user.username))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let request = ApiRequest::post(Self::path("users")).json(user)?;
        self.gateway.json(request).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, Error> {
        let request = ApiRequest::put(Self::path(&format!("users/{}", id))).json(update)?;
        self.gateway.json(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<(), Error> {
        self.gateway
            .empty(ApiRequest::delete(Self::path(&format!("users/{}", id))))
            .await
    }

    #[instrument(skip(self))]
    pub async fn settings(&self) -> Result<Vec<Setting>, Error> {
        self.gateway
            .json(ApiRequest::get(Self::path("settings")))
            .await
    }

    /// `PUT /api/admin/settings/{key}`
    #[instrument(skip(self, value, description))]
    pub async fn update_setting(
        &self,
        key: &str,
        value: impl Into<String>,
        description: Option<String>,
    ) -> Result<Setting, Error> {
        let body = SettingUpdate {
            value: value.into(),
            description,
        };
        let request = ApiRequest::put(Self::path(&format!("settings/{}", key))).json(&body)?;
        self.gateway.json(request).await
    }

    #[instrument(skip(self))]
    pub async fn audit_log(&self, params: &AuditLogParams) -> Result<Vec<AuditLogEntry>, Error> {
        let request = ApiRequest::get(Self::path("audit-log")).with_query(params)?;
        self.gateway.json(request).await
    }

    #[instrument(skip(self))]
    pub async fn create_backup(&self) -> Result<BackupResult, Error> {
        self.gateway
            .json(ApiRequest::post(Self::path("backup")))
            .await
    }

    #[instrument(skip(self))]
    pub async fn system_info(&self) -> Result<SystemInfo, Error> {
        self.gateway
            .json(ApiRequest::get(Self::path("system-info")))
            .await
    }
}
