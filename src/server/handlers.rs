//! MCP tool handlers for the Tria contacts server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::config::Config;
use crate::domain::ContactId;
use crate::import_export::TransferFormat;
use crate::models::Contact;
use crate::observability::MetricsTracker;
use crate::repositories::{ContactRepository, TagRepository};
use crate::tools::{
    ContactTools, ListContactsParams, SearchParams, SearchTools, TagTools, TransferTools,
    UpdateContactParams,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing the Tria address book.
#[derive(Clone)]
pub struct TriaMcpServer {
    search_tools: SearchTools,
    contact_tools: ContactTools,
    tag_tools: TagTools,
    transfer_tools: TransferTools,
    metrics: MetricsTracker,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for TriaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "tria-contacts".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Local address book with fuzzy contact search, type-ahead suggestions, tags and CSV/JSON import/export."
                    .into(),
            ),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchContactsToolParams {
    /// Free-text query matched against name, email and phone
    query: String,
    /// Only search contacts carrying at least one of these tag ids
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    max_results: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SuggestContactsToolParams {
    query: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListContactsToolParams {
    /// One of: all, favorites, businesses
    #[serde(default)]
    category: Option<String>,
    /// One of: name, name-desc, recent, recent-desc, frequency, frequency-desc
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContactIdToolParams {
    contact_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddContactToolParams {
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(default)]
    is_business_contact: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactToolParams {
    contact_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(default)]
    is_business_contact: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddTagToolParams {
    name: String,
    /// CSS color, defaults to #007bff
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RecolorTagToolParams {
    tag_id: String,
    color: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TagIdToolParams {
    tag_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ImportContactsToolParams {
    /// csv or json
    format: String,
    /// File contents to import
    content: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ExportContactsToolParams {
    /// csv or json
    format: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn parse_contact_id(raw: &str) -> Result<ContactId, McpError> {
    ContactId::parse(raw).map_err(to_invalid_params)
}

fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl TriaMcpServer {
    /// Create a new Tria MCP server.
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        tag_repo: Arc<dyn TagRepository>,
        config: &Config,
    ) -> Self {
        let metrics = MetricsTracker::new();

        let search_tools = SearchTools::new(
            contact_repo.clone(),
            config.search_options(),
            config.max_suggestions,
            metrics.clone(),
        );
        let contact_tools = ContactTools::new(contact_repo.clone(), metrics.clone());
        let tag_tools = TagTools::new(tag_repo.clone(), contact_repo.clone(), metrics.clone());
        let transfer_tools = TransferTools::new(contact_repo, tag_repo, metrics.clone());

        Self {
            search_tools,
            contact_tools,
            tag_tools,
            transfer_tools,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// Counters collected since startup.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Fuzzy search over name, email and phone.
    #[tool(
        description = "Search contacts by name, email or phone with typo-tolerant fuzzy matching. Exact substring matches rank first, then name-prefix matches, then fuzzy matches. An empty query lists every contact."
    )]
    async fn search_contacts(
        &self,
        params: Parameters<SearchContactsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .search_tools
            .search_contacts(SearchParams {
                query: params.query,
                tags: params.tags.unwrap_or_default(),
                max_results: params.max_results,
            })
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    /// Type-ahead suggestions.
    #[tool(
        description = "Suggest contact names and email addresses that start with the typed text (at least 2 characters)"
    )]
    async fn suggest_contacts(
        &self,
        params: Parameters<SuggestContactsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let suggestions = self
            .search_tools
            .suggest(&params.0.query)
            .await
            .map_err(to_mcp_error)?;

        json_result(&suggestions)
    }

    /// List contacts with category, tag filter and sort order.
    #[tool(
        description = "List contacts, optionally narrowed to a category (all, favorites, businesses) and tags, sorted by name, recent or frequency (append -desc to reverse)"
    )]
    async fn list_contacts(
        &self,
        params: Parameters<ListContactsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let list_params = ListContactsParams {
            category: params
                .category
                .as_deref()
                .unwrap_or_default()
                .parse()
                .map_err(to_invalid_params)?,
            sort: params
                .sort
                .as_deref()
                .unwrap_or_default()
                .parse()
                .map_err(to_invalid_params)?,
            tags: params.tags.unwrap_or_default(),
        };

        let contacts = self
            .contact_tools
            .list_contacts(list_params)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": contacts.len(),
            "contacts": contacts,
        }))
    }

    /// Retrieve a contact by ID.
    #[tool(description = "Retrieve complete information for a specific contact by ID")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_contact_id(&params.0.contact_id)?;

        let contact = self
            .contact_tools
            .get_contact(&id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&contact)
    }

    /// Add a new contact.
    #[tool(
        description = "Add a new contact. Name needs at least 2 characters, email must be valid and phone needs at least 10 digits or formatting characters."
    )]
    async fn add_contact(
        &self,
        params: Parameters<AddContactToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut contact =
            Contact::new(ContactId::default(), params.name, params.email, params.phone)
                .with_tags(params.tags.unwrap_or_default());
        contact.company = params.company;
        contact.job_title = params.job_title;
        contact.address = params.address;
        contact.birthday = params.birthday;
        contact.is_favorite = params.is_favorite.unwrap_or(false);
        contact.is_business_contact = params.is_business_contact.unwrap_or(false);

        let contact = self
            .contact_tools
            .add_contact(contact)
            .await
            .map_err(to_mcp_error)?;

        json_result(&contact)
    }

    /// Update fields of an existing contact.
    #[tool(description = "Update fields of an existing contact. Omitted fields keep their value.")]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let id = parse_contact_id(&params.contact_id)?;

        let update = UpdateContactParams {
            name: params.name,
            email: params.email,
            phone: params.phone,
            tags: params.tags,
            company: params.company,
            job_title: params.job_title,
            address: params.address,
            birthday: params.birthday,
            is_favorite: params.is_favorite,
            is_business_contact: params.is_business_contact,
        };

        let contact = self
            .contact_tools
            .update_contact(&id, update)
            .await
            .map_err(to_mcp_error)?;

        json_result(&contact)
    }

    /// Delete a contact.
    #[tool(description = "Delete a contact by ID")]
    async fn delete_contact(
        &self,
        params: Parameters<ContactIdToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_contact_id(&params.0.contact_id)?;

        self.contact_tools
            .delete_contact(&id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({ "deleted": id }))
    }

    /// List tags with contact counts.
    #[tool(description = "List all tags with the number of contacts carrying each")]
    async fn list_tags(&self) -> Result<CallToolResult, McpError> {
        let tags = self.tag_tools.list_tags().await.map_err(to_mcp_error)?;
        json_result(&tags)
    }

    /// Create a tag.
    #[tool(description = "Create a new tag. Tag names are unique regardless of case.")]
    async fn add_tag(
        &self,
        params: Parameters<AddTagToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let tag = self
            .tag_tools
            .add_tag(&params.name, params.color)
            .await
            .map_err(to_mcp_error)?;

        json_result(&tag)
    }

    /// Change a tag's color.
    #[tool(description = "Change the display color of a tag")]
    async fn recolor_tag(
        &self,
        params: Parameters<RecolorTagToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let tag = self
            .tag_tools
            .recolor_tag(&params.tag_id, &params.color)
            .await
            .map_err(to_mcp_error)?;

        json_result(&tag)
    }

    /// Delete a tag.
    #[tool(description = "Delete a tag by ID. Contacts keep their tag references.")]
    async fn delete_tag(
        &self,
        params: Parameters<TagIdToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let tag_id = params.0.tag_id;

        self.tag_tools
            .delete_tag(&tag_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({ "deleted": tag_id }))
    }

    /// Import contacts from CSV or JSON text.
    #[tool(
        description = "Import contacts from CSV (Name,Email,Phone,Tags) or JSON (array or export document). Contacts whose email already exists are skipped."
    )]
    async fn import_contacts(
        &self,
        params: Parameters<ImportContactsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let format: TransferFormat = params.format.parse().map_err(to_invalid_params)?;

        tracing::debug!(format = %format, bytes = params.content.len(), "import_contacts called");

        let summary = self
            .transfer_tools
            .import_contacts(format, &params.content)
            .await
            .map_err(to_mcp_error)?;

        json_result(&summary)
    }

    /// Export every contact as CSV or JSON.
    #[tool(description = "Export all contacts as CSV or JSON (JSON includes tags)")]
    async fn export_contacts(
        &self,
        params: Parameters<ExportContactsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let format: TransferFormat = params.0.format.parse().map_err(to_invalid_params)?;

        let export = self
            .transfer_tools
            .export_contacts(format)
            .await
            .map_err(to_mcp_error)?;

        json_result(&export)
    }
}
