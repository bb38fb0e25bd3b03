//! Bodycomp MCP Server Implementation
//!
//! Implements the MCP server with the body composition tools.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::composition::{parse_date, today};
use crate::tools::estimate;
use crate::tools::status::StatusTracker;

/// Bodycomp MCP Service
#[derive(Clone)]
pub struct BodycompService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    /// Overrides the local clock for age resolution when set
    reference_date: Option<NaiveDate>,
    tool_router: ToolRouter<BodycompService>,
}

impl BodycompService {
    pub fn new(reference_date: Option<NaiveDate>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(reference_date))),
            reference_date,
            tool_router: Self::tool_router(),
        }
    }

    /// Date ages are resolved against: explicit request date, then the
    /// configured reference date, then today
    fn resolve_today(&self, requested: Option<&str>) -> Result<NaiveDate, McpError> {
        match requested {
            Some(value) => parse_date(value).map_err(|e| McpError::invalid_params(e.to_string(), None)),
            None => Ok(self.reference_date.unwrap_or_else(today)),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateBodyFatParams {
    /// Protocol tag: "7-skinfold", "3-skinfold" or "4-skinfold"
    pub protocol: String,
    /// Birth date (YYYY-MM-DD)
    pub birth_date: String,
    /// "male" or "female" (case-insensitive)
    pub sex: String,
    /// Skinfold readings in millimeters keyed by site name (e.g. {"triceps": 12.5})
    #[serde(default)]
    pub skinfolds: HashMap<String, f64>,
    /// Body weight in kilograms, to split into fat and lean mass (optional)
    pub weight_kg: Option<f64>,
    /// Date to compute age on (YYYY-MM-DD, default today)
    pub today: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl BodycompService {
    // --- Status ---

    #[tool(description = "Get the current status of the bodycomp service including build info and process information")]
    async fn bodycomp_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for estimating body fat from skinfolds. Call this before the first estimate or when unsure which sites a protocol needs.")]
    fn body_composition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::BODY_COMPOSITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(BODY_COMPOSITION_INSTRUCTIONS)]))
    }

    // --- Estimation ---

    #[tool(description = "Estimate body-fat percentage from skinfold measurements. Returns body_fat_percentage null with a reason when required sites are missing or the protocol/sex is not recognized.")]
    fn estimate_body_fat(&self, Parameters(p): Parameters<EstimateBodyFatParams>) -> Result<CallToolResult, McpError> {
        let today = self.resolve_today(p.today.as_deref())?;
        let result = estimate::estimate_body_fat(&p.protocol, &p.birth_date, &p.sex, &p.skinfolds, p.weight_kg, today)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List supported skinfold protocols with their required sites per sex and the Durnin & Womersley age-bracket coefficients")]
    fn list_protocols(&self) -> Result<CallToolResult, McpError> {
        let result = estimate::list_protocols();
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BodycompService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bodycomp".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Body Composition Estimator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Body Composition Estimator - body-fat percentage from skinfold measurements. \
                 IMPORTANT: Call body_composition_instructions before the first estimate. \
                 Estimation: estimate_body_fat (7-skinfold, 3-skinfold, 4-skinfold). \
                 Reference: list_protocols for required sites and coefficients. \
                 Status: bodycomp_status."
                    .into(),
            ),
        }
    }
}
