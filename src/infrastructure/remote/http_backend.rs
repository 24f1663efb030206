use super::error::{ensure_success, HttpClientError};
use crate::application::ports::RemoteBackend;
use crate::domain::entities::mirror::{
    Equipment, EquipmentType, Instrument, Property, ScheduledWorkOrder, UserProfile, WorkSession,
};
use crate::domain::entities::queue::{
    ChecklistPayload, EquipmentConfigurationPayload, MaintenancePayload, PhotoBatchPayload,
};
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Reqwest client for the remote system of record.
#[derive(Clone)]
pub struct HttpRemoteBackend {
    base_url: String,
    api_token: Option<String>,
    http: reqwest::Client,
}

impl HttpRemoteBackend {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::ConfigurationError(
                "Remote base_url is empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            api_token: config
                .api_token
                .clone()
                .filter(|value| !value.trim().is_empty()),
            http,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        if let Some(token) = &self.api_token {
            builder.header("Authorization", format!("Bearer {token}"))
        } else {
            builder
        }
    }

    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, HttpClientError> {
        let resp = self.request(Method::GET, path).send().await?;
        let resp = ensure_success(resp).await?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|err| HttpClientError::Decode(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteProperty {
    id: String,
    name: String,
    address: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteEquipment {
    id: String,
    property_id: String,
    equipment_type_id: Option<String>,
    name: String,
    #[serde(default)]
    configured: bool,
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteEquipmentType {
    id: String,
    name: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteInstrument {
    id: String,
    name: String,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteWorkOrder {
    id: String,
    equipment_id: String,
    property_id: Option<String>,
    status: String,
    scheduled_for: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteWorkSession {
    id: String,
    property_id: String,
    technician_id: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUserProfile {
    id: String,
    display_name: String,
    email: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[async_trait]
impl RemoteBackend for HttpRemoteBackend {
    async fn fetch_properties(&self) -> Result<Vec<Property>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteProperty> = self.fetch_list("/properties").await?;
        Ok(items
            .into_iter()
            .map(|item| Property {
                id: item.id,
                name: item.name,
                address: item.address,
                city: item.city,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteEquipment> = self.fetch_list("/equipment").await?;
        Ok(items
            .into_iter()
            .map(|item| Equipment {
                id: item.id,
                property_id: item.property_id,
                equipment_type_id: item.equipment_type_id,
                name: item.name,
                configured: item.configured,
                detail: item.detail,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_equipment_types(&self) -> Result<Vec<EquipmentType>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteEquipmentType> = self.fetch_list("/equipment-types").await?;
        Ok(items
            .into_iter()
            .map(|item| EquipmentType {
                id: item.id,
                name: item.name,
                category: item.category,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_instruments(&self) -> Result<Vec<Instrument>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteInstrument> = self.fetch_list("/instruments").await?;
        Ok(items
            .into_iter()
            .map(|item| Instrument {
                id: item.id,
                name: item.name,
                unit: item.unit,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_scheduled_work_orders(&self) -> Result<Vec<ScheduledWorkOrder>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteWorkOrder> = self.fetch_list("/work-orders?status=scheduled").await?;
        Ok(items
            .into_iter()
            .map(|item| ScheduledWorkOrder {
                id: item.id,
                equipment_id: item.equipment_id,
                property_id: item.property_id,
                status: item.status,
                scheduled_for: item.scheduled_for,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_work_sessions(&self) -> Result<Vec<WorkSession>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteWorkSession> = self.fetch_list("/work-sessions").await?;
        Ok(items
            .into_iter()
            .map(|item| WorkSession {
                id: item.id,
                property_id: item.property_id,
                technician_id: item.technician_id,
                started_at: item.started_at,
                last_synced_at: now,
            })
            .collect())
    }

    async fn fetch_user_profiles(&self) -> Result<Vec<UserProfile>, AppError> {
        let now = Utc::now();
        let items: Vec<RemoteUserProfile> = self.fetch_list("/users").await?;
        Ok(items
            .into_iter()
            .map(|item| UserProfile {
                id: item.id,
                display_name: item.display_name,
                email: item.email,
                role: item.role,
                last_synced_at: now,
            })
            .collect())
    }

    async fn submit_maintenance(&self, payload: &MaintenancePayload) -> Result<String, AppError> {
        let resp = self
            .request(Method::POST, "/maintenance-responses")
            .json(payload)
            .send()
            .await
            .map_err(HttpClientError::from)?;
        let resp = ensure_success(resp).await?;
        let created: CreatedResponse = resp
            .json()
            .await
            .map_err(|err| HttpClientError::Decode(err.to_string()))?;
        Ok(created.id)
    }

    async fn update_equipment_detail(
        &self,
        payload: &EquipmentConfigurationPayload,
    ) -> Result<(), AppError> {
        let resp = self
            .request(
                Method::PATCH,
                &format!("/equipment/{}/detail", payload.equipment_id),
            )
            .json(payload)
            .send()
            .await
            .map_err(HttpClientError::from)?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn update_work_order_status(
        &self,
        work_order_id: &str,
        status: &str,
    ) -> Result<(), AppError> {
        let resp = self
            .request(Method::PATCH, &format!("/work-orders/{work_order_id}/status"))
            .json(&json!({ "status": status }))
            .send()
            .await
            .map_err(HttpClientError::from)?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn submit_checklist(&self, payload: &ChecklistPayload) -> Result<(), AppError> {
        let resp = self
            .request(Method::POST, "/checklist-responses")
            .json(payload)
            .send()
            .await
            .map_err(HttpClientError::from)?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn submit_photo_batch(&self, payload: &PhotoBatchPayload) -> Result<(), AppError> {
        let resp = self
            .request(
                Method::POST,
                &format!("/work-sessions/{}/photos", payload.session_id),
            )
            .json(payload)
            .send()
            .await
            .map_err(HttpClientError::from)?;
        ensure_success(resp).await?;
        Ok(())
    }
}
