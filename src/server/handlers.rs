//! MCP tool handlers for the mail server.
//!
//! This module exposes the email service operations as MCP tools using the
//! rmcp SDK's tool_router pattern.

use crate::error::MailError;
use crate::models::{parse_timestamp, EmailDraft, SendRequest};
use crate::services::EmailService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes email record and dispatch tools.
#[derive(Clone)]
pub struct MailserverMcpServer {
    email_service: Arc<dyn EmailService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for MailserverMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "mailserver".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Mail server - stores email records (create, list, update, delete) and sends email through the configured SMTP relay. Sending does not store a record.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct CreateEmailToolParams {
    #[serde(default, alias = "fromEmail")]
    from_email: Option<String>,
    #[serde(default, alias = "toEmail")]
    to_email: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
    /// RFC 3339 or zone-less ISO 8601 (read as UTC). Defaults to now.
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateEmailToolParams {
    id: i64,
    #[serde(default, alias = "fromEmail")]
    from_email: Option<String>,
    #[serde(default, alias = "toEmail")]
    to_email: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
    /// Stored as given; omitting it clears the timestamp.
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmailIdParams {
    id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SendEmailToolParams {
    #[serde(default, alias = "fromEmail")]
    from_email: Option<String>,
    #[serde(default, alias = "toEmail")]
    to_email: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

/// Build a draft, parsing the optional timestamp string.
fn to_draft(
    from_email: Option<String>,
    to_email: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    timestamp: Option<String>,
) -> Result<EmailDraft, MailError> {
    let timestamp = timestamp.as_deref().map(parse_timestamp).transpose()?;

    Ok(EmailDraft {
        from_email,
        to_email,
        subject,
        body,
        timestamp,
    })
}

// Helper function to convert service errors to MCP errors
fn to_mcp_error(e: MailError) -> McpError {
    let code = match e {
        MailError::InvalidArgument(_) => ErrorCode::INVALID_PARAMS,
        MailError::NotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
        MailError::DispatchFailed(_) | MailError::Storage(_) => ErrorCode::INTERNAL_ERROR,
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

// Tool router implementation
#[tool_router]
impl MailserverMcpServer {
    /// Create a new mail server around an email service.
    pub fn new(email_service: Arc<dyn EmailService>) -> Self {
        Self {
            email_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Store a new email record.
    #[tool(
        description = "Store a new email record. from_email, to_email, subject and body are required; timestamp defaults to the current time. Returns the stored record with its id. Does not send anything."
    )]
    async fn create_email(
        &self,
        params: Parameters<CreateEmailToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let draft = to_draft(
            params.from_email,
            params.to_email,
            params.subject,
            params.body,
            params.timestamp,
        )
        .map_err(to_mcp_error)?;

        let record = self
            .email_service
            .create_email(draft)
            .await
            .map_err(to_mcp_error)?;

        json_result(&record)
    }

    /// List all stored email records.
    #[tool(description = "List every stored email record")]
    async fn list_emails(&self) -> Result<CallToolResult, McpError> {
        let records = self
            .email_service
            .list_emails()
            .await
            .map_err(to_mcp_error)?;

        json_result(&records)
    }

    /// Delete a stored email record.
    #[tool(description = "Delete a stored email record by id. Fails if no record has that id.")]
    async fn delete_email(
        &self,
        params: Parameters<EmailIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id;

        self.email_service
            .delete_email(id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({ "deleted": id }))
    }

    /// Overwrite a stored email record.
    #[tool(
        description = "Replace from_email, to_email, subject, body and timestamp of an existing email record. All four content fields are required; the timestamp is stored exactly as given."
    )]
    async fn update_email(
        &self,
        params: Parameters<UpdateEmailToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let draft = to_draft(
            params.from_email,
            params.to_email,
            params.subject,
            params.body,
            params.timestamp,
        )
        .map_err(to_mcp_error)?;

        let record = self
            .email_service
            .update_email(params.id, draft)
            .await
            .map_err(to_mcp_error)?;

        json_result(&record)
    }

    /// Send an email through the SMTP relay.
    #[tool(
        description = "Send an email through the configured SMTP relay. All fields are required. The message is not stored."
    )]
    async fn send_email(
        &self,
        params: Parameters<SendEmailToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let request = SendRequest {
            from_email: params.from_email,
            to_email: params.to_email,
            subject: params.subject,
            body: params.body,
        };
        let from = request.from_email.clone();
        let to = request.to_email.clone();

        self.email_service
            .send_email(request)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "status": "sent",
            "from": from,
            "to": to,
        }))
    }
}
