//! This module provides a client to connect to the task-management REST server

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::config::Settings;
use crate::resource::Resource;
use crate::traits::{BoxError, NotificationSource, TaskSource};
use crate::Notification;
use crate::Task;


/// Body of `GET /api/tasks`
#[derive(Deserialize)]
struct TaskList {
    tasks: Vec<Task>,
}


/// A data source that fetches its data from the REST server
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S, token: Option<String>) -> Result<Self, BoxError> {
        let url = Url::parse(url.as_ref())?;
        Ok(Self::from_resource(Resource::new(url, token)))
    }

    /// Create a client from the runtime settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_resource(Resource::new(settings.api_url.clone(), settings.token.clone()))
    }

    fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &Url {
        self.resource.url()
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, BoxError> {
        let target = self.resource.endpoint(segments)?;
        log::debug!("{} {}", method, target.url());

        let mut builder = self.http
            .request(method, target.url().clone())
            .header(USER_AGENT, crate::config::user_agent())
            .header(ACCEPT, "application/json");
        if let Some(token) = target.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(&self, method: Method, segments: &[&str]) -> Result<Response, BoxError> {
        let response = self.request(method, segments)?
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), response.url()).into());
        }
        Ok(response)
    }
}

#[async_trait]
impl NotificationSource for Client {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BoxError> {
        let response = self.send(Method::GET, &["api", "notifications"]).await?;
        let notifications: Vec<Notification> = response.json().await?;
        log::debug!("Server returned {} notifications", notifications.len());
        Ok(notifications)
    }

    async fn mark_read(&self, id: &str) -> Result<(), BoxError> {
        self.send(Method::PATCH, &["api", "notifications", id, "read"]).await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), BoxError> {
        self.send(Method::PATCH, &["api", "notifications", "read-all"]).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), BoxError> {
        self.send(Method::DELETE, &["api", "notifications", id]).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskSource for Client {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BoxError> {
        let response = self.send(Method::GET, &["api", "tasks"]).await?;
        let list: TaskList = response.json().await?;
        log::debug!("Server returned {} tasks", list.tasks.len());
        Ok(list.tasks)
    }
}
