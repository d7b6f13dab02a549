//! Configuration and per-request options for search.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SearchResult;

/// Which search API a request is sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchApi {
    /// The portal sharing API.
    #[default]
    #[serde(rename = "arcgis")]
    Portal,
    /// The hub API.
    #[serde(rename = "arcgis-hub")]
    Hub,
}

impl SearchApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchApi::Portal => "arcgis",
            SearchApi::Hub => "arcgis-hub",
        }
    }
}

impl fmt::Display for SearchApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Where requests are sent. Authentication is handled by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Portal base url.
    pub portal: String,
    /// Hub API base url.
    #[serde(default)]
    pub hub_api_url: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            portal: default_portal_url(),
            hub_api_url: Some(default_hub_api_url()),
        }
    }
}

/// Options for a single search execution.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub request_options: RequestOptions,

    /// API the query is routed to.
    pub api: SearchApi,

    /// Page size.
    pub num: u32,

    /// 1-based index of the first result.
    pub start: u32,

    pub sort_field: Option<String>,

    pub sort_order: Option<SortDirection>,

    /// Fields to aggregate on.
    pub aggregations: Vec<String>,

    /// Related data to include with each result.
    pub include: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            request_options: RequestOptions::default(),
            api: SearchApi::default(),
            num: default_page_size(),
            start: 1,
            sort_field: None,
            sort_order: None,
            aggregations: Vec::new(),
            include: Vec::new(),
        }
    }
}

impl SearchOptions {
    /// Creates options for the given request options.
    pub fn new(request_options: RequestOptions) -> Self {
        Self {
            request_options,
            ..Default::default()
        }
    }

    /// Creates a builder for constructing options.
    pub fn builder(request_options: RequestOptions) -> SearchOptionsBuilder {
        SearchOptionsBuilder::new(request_options)
    }
}

/// Builder for creating `SearchOptions` instances.
#[derive(Debug)]
pub struct SearchOptionsBuilder {
    options: SearchOptions,
}

impl SearchOptionsBuilder {
    pub fn new(request_options: RequestOptions) -> Self {
        Self {
            options: SearchOptions::new(request_options),
        }
    }

    /// Sets the API.
    pub fn api(mut self, api: SearchApi) -> Self {
        self.options.api = api;
        self
    }

    /// Sets the page size.
    pub fn num(mut self, num: u32) -> Self {
        self.options.num = num;
        self
    }

    /// Sets the 1-based start index.
    pub fn start(mut self, start: u32) -> Self {
        self.options.start = start.max(1);
        self
    }

    pub fn sort_field(mut self, field: impl Into<String>) -> Self {
        self.options.sort_field = Some(field.into());
        self
    }

    pub fn sort_order(mut self, order: SortDirection) -> Self {
        self.options.sort_order = Some(order);
        self
    }

    /// Sets the aggregation fields.
    pub fn aggregations(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.aggregations = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the related data to include.
    pub fn include(mut self, include: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.include = include.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the options.
    pub fn build(self) -> SearchOptions {
        self.options
    }
}

/// Hub client configuration, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    #[serde(default = "default_hub_api_url_opt")]
    pub hub_api_url: Option<String>,

    /// Default API for searches.
    #[serde(default)]
    pub api: SearchApi,

    /// Default page size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_portal_url() -> String {
    "https://www.arcgis.com".to_string()
}

fn default_hub_api_url() -> String {
    "https://hub.arcgis.com".to_string()
}

fn default_hub_api_url_opt() -> Option<String> {
    Some(default_hub_api_url())
}

fn default_page_size() -> u32 {
    10
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            hub_api_url: default_hub_api_url_opt(),
            api: SearchApi::default(),
            page_size: default_page_size(),
        }
    }
}

impl HubConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> SearchResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads from a TOML file.
    pub async fn load_from_file(path: &Path) -> SearchResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded hub config from {}", path.display());
        Ok(config)
    }

    /// Request options for this configuration.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            portal: self.portal_url.clone(),
            hub_api_url: self.hub_api_url.clone(),
        }
    }

    /// Default search options for this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::builder(self.request_options())
            .api(self.api)
            .num(self.page_size)
            .build()
    }
}
