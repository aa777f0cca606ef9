use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, DataRow, TableSummary},
    protocol::{
        food_names_path, ColumnsQuery, TableDataQuery, TablesQuery, CATEGORIES_PATH, COLUMNS_PATH,
        TABLES_PATH, TABLE_DATA_PATH,
    },
};
use url::Url;

use crate::error::FetchError;

/// Read-only view of the nutrition catalog service.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;
    async fn list_food_names(&self, category_code: &str) -> Result<Vec<String>, FetchError>;
    async fn list_tables(
        &self,
        category_code: &str,
        food_name: &str,
    ) -> Result<Vec<TableSummary>, FetchError>;
    async fn list_columns(
        &self,
        category_code: &str,
        food_name: &str,
        table_id: &str,
    ) -> Result<Vec<String>, FetchError>;
    async fn list_rows(
        &self,
        category_code: &str,
        food_name: &str,
        table_id: &str,
        column: &str,
    ) -> Result<Vec<DataRow>, FetchError>;
}

/// `RemoteCatalog` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &'static str,
    ) -> Result<T, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = self.endpoint(&CATEGORIES_PATH)?;
        self.send_json(self.http.get(url), "categories").await
    }

    async fn list_food_names(&self, category_code: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&food_names_path(category_code))?;
        self.send_json(self.http.get(url), "food_names").await
    }

    async fn list_tables(
        &self,
        category_code: &str,
        food_name: &str,
    ) -> Result<Vec<TableSummary>, FetchError> {
        let url = self.endpoint(&TABLES_PATH)?;
        let query = TablesQuery {
            category_code: category_code.to_string(),
            food_name: food_name.to_string(),
        };
        self.send_json(self.http.get(url).query(&query), "tables")
            .await
    }

    async fn list_columns(
        &self,
        category_code: &str,
        food_name: &str,
        table_id: &str,
    ) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&COLUMNS_PATH)?;
        let query = ColumnsQuery {
            category_code: category_code.to_string(),
            food_name: food_name.to_string(),
            table_id: table_id.to_string(),
        };
        self.send_json(self.http.get(url).query(&query), "columns")
            .await
    }

    async fn list_rows(
        &self,
        category_code: &str,
        food_name: &str,
        table_id: &str,
        column: &str,
    ) -> Result<Vec<DataRow>, FetchError> {
        let url = self.endpoint(&TABLE_DATA_PATH)?;
        let query = TableDataQuery {
            category_code: category_code.to_string(),
            food_name: food_name.to_string(),
            table_id: table_id.to_string(),
            column: column.to_string(),
        };
        self.send_json(self.http.get(url).query(&query), "table_data")
            .await
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
