//! MCP tool handlers for the study catalog server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::CatalogApiError;
use crate::services::{CatalogService, SearchRequest};
use crate::tools::CatalogKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the notes, PYQ and question bank catalogs.
#[derive(Clone)]
pub struct CatalogMcpServer {
    service: Arc<dyn CatalogService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for CatalogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "study-catalog-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for a study-materials catalog - search notes, previous-year question papers (PYQs), question banks and purchased notes with matching that tolerates abbreviations and missing letters.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Default, Deserialize, JsonSchema)]
struct SearchCatalogParams {
    /// Free text; an empty query lists everything
    #[serde(default)]
    query: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    semester: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

impl From<SearchCatalogParams> for SearchRequest {
    fn from(params: SearchCatalogParams) -> Self {
        Self {
            query: params.query,
            subject: params.subject,
            branch: params.branch,
            year: params.year,
            semester: params.semester,
            limit: params.limit,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NoteIdParams {
    note_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FacetsParams {
    /// One of: notes, pyqs, question_banks, purchases
    catalog: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Bad input is reported as invalid params, everything else as internal.
fn catalog_error(e: CatalogApiError) -> McpError {
    match e {
        CatalogApiError::InvalidRequest(message) => McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::from(message),
            data: None,
        },
        other => to_mcp_error(other),
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl CatalogMcpServer {
    /// Create a new catalog MCP server over a catalog service.
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    /// Search the notes catalog.
    #[tool(
        description = "Search study notes by name, subject, branch or year. Tolerates abbreviations and missing letters (e.g. 'opsys' finds 'Operating Systems'). Optional subject/branch/year/semester filters narrow the listing. Results include price and whether the configured user has purchased each note."
    )]
    async fn search_notes(
        &self,
        params: Parameters<SearchCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(query = %params.query, "MCP Handler: search_notes called");

        let response = self
            .service
            .search_notes(params.into())
            .await
            .map_err(catalog_error)?;

        json_result(&response)
    }

    /// Search previous-year question papers.
    #[tool(
        description = "Search previous-year question papers (PYQs) by name, subject, branch or year, tolerating abbreviations and missing letters, with optional subject/branch/year/semester filters."
    )]
    async fn search_pyqs(
        &self,
        params: Parameters<SearchCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(query = %params.query, "MCP Handler: search_pyqs called");

        let response = self
            .service
            .search_pyqs(params.into())
            .await
            .map_err(catalog_error)?;

        json_result(&response)
    }

    #[tool(
        description = "Search question banks by name, subject, branch or year, tolerating abbreviations and missing letters, with optional subject/branch/year/semester filters."
    )]
    async fn search_question_banks(
        &self,
        params: Parameters<SearchCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(query = %params.query, "MCP Handler: search_question_banks called");

        let response = self
            .service
            .search_question_banks(params.into())
            .await
            .map_err(catalog_error)?;

        json_result(&response)
    }

    /// Search the configured user's purchased notes.
    #[tool(
        description = "Search the notes the configured user has purchased, with purchase price and date. Requires CATALOG_USER_ID."
    )]
    async fn search_purchased_notes(
        &self,
        params: Parameters<SearchCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::debug!(query = %params.query, "MCP Handler: search_purchased_notes called");

        let response = self
            .service
            .search_purchased_notes(params.into())
            .await
            .map_err(catalog_error)?;

        json_result(&response)
    }

    #[tool(description = "Get complete details for a note by ID, including price and PDF links")]
    async fn get_note_details(
        &self,
        params: Parameters<NoteIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let note = self
            .service
            .get_note(&params.note_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get note {}: {:?}", params.note_id, e);
                catalog_error(e)
            })?;

        json_result(&note)
    }

    /// List the distinct subjects, branches, years and semesters of a catalog.
    #[tool(
        description = "List the distinct subjects, branches, years and semesters present in a catalog (notes, pyqs, question_banks or purchases). Use these values as search filters."
    )]
    async fn list_catalog_facets(
        &self,
        params: Parameters<FacetsParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind: CatalogKind = params.0.catalog.parse().map_err(catalog_error)?;

        let facets = self.service.facets(kind).await.map_err(catalog_error)?;

        let response = serde_json::json!({
            "catalog": kind,
            "facets": facets,
        });
        json_result(&response)
    }

    #[tool(description = "Get the profile of the configured user (name, email, college, semester)")]
    async fn get_user_profile(&self) -> Result<CallToolResult, McpError> {
        let user = self.service.get_user_info().await.map_err(catalog_error)?;
        json_result(&user)
    }

    /// Drop cached snapshots and refetch every catalog.
    #[tool(
        description = "Refresh all catalogs from the backend, discarding cached search indexes. Returns the number of records loaded per catalog."
    )]
    async fn refresh_catalog(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: refresh_catalog called");

        let summary = self.service.refresh_all().await.map_err(|e| {
            tracing::error!("Catalog refresh failed: {:?}", e);
            catalog_error(e)
        })?;

        json_result(&summary)
    }
}
