//! trifuel MCP Server Implementation
//!
//! Implements the MCP server with all Triathlon Fuel tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::resolve_output_path;
use crate::tools::calculator;
use crate::tools::charts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::tools::reports::{self, ReportRequest};
use crate::tools::status::StatusTracker;

/// trifuel MCP Service
#[derive(Clone)]
pub struct TrifuelService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    output_dir: PathBuf,
    tool_router: ToolRouter<TrifuelService>,
}

impl TrifuelService {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(output_dir.clone()))),
            output_dir,
            tool_router: Self::tool_router(),
        }
    }

    fn artifact_path(&self, file_name: Option<&str>, prefix: &str, extension: &str) -> PathBuf {
        match file_name {
            Some(name) => resolve_output_path(&self.output_dir, name),
            None => {
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                self.output_dir.join(format!("{}_{}.{}", prefix, stamp, extension))
            }
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateNeedsParams {
    /// First name (optional, used for the greeting)
    pub first_name: Option<String>,
    /// Last name (optional, used for the greeting)
    pub last_name: Option<String>,
    /// Age in years (15-80)
    pub age_years: u32,
    /// Weight in kilograms (40-120)
    pub weight_kg: f64,
    /// Height in centimeters (140-210)
    pub height_cm: f64,
    /// Sex: male or female
    pub sex: String,
    /// Activity level: light, moderate, high
    pub activity_level: String,
    /// Include the macronutrient breakdown
    #[serde(default)]
    pub include_macros: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateBmrParams {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    /// Sex: male or female
    pub sex: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SplitMacrosParams {
    /// Daily energy in kcal
    pub daily_energy_kcal: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SimulatePerformanceParams {
    /// Seed for a reproducible draw (random if omitted)
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveMacroChartParams {
    /// Daily energy in kcal
    pub daily_energy_kcal: i64,
    /// Output file name or absolute path (defaults to a timestamped name)
    pub file_name: Option<String>,
    /// Width in pixels (default 800, max 4096)
    pub width: Option<u32>,
    /// Height in pixels (default 500, max 4096)
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SavePerformanceChartParams {
    /// Seed for a reproducible draw (random if omitted)
    pub seed: Option<u64>,
    /// Output file name or absolute path (defaults to a timestamped name)
    pub file_name: Option<String>,
    /// Width in pixels (default 800, max 4096)
    pub width: Option<u32>,
    /// Height in pixels (default 500, max 4096)
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateNutritionReportParams {
    /// First name (optional, used for the greeting)
    pub first_name: Option<String>,
    /// Last name (optional, used for the greeting)
    pub last_name: Option<String>,
    /// Age in years (15-80)
    pub age_years: u32,
    /// Weight in kilograms (40-120)
    pub weight_kg: f64,
    /// Height in centimeters (140-210)
    pub height_cm: f64,
    /// Sex: male or female
    pub sex: String,
    /// Activity level: light, moderate, high
    pub activity_level: String,
    /// Include the macronutrient section and chart (default true)
    #[serde(default = "default_true")]
    pub include_macros: bool,
    /// Include the simulated performance section and chart
    #[serde(default)]
    pub include_simulation: bool,
    /// Seed for the simulation (random if omitted)
    pub simulation_seed: Option<u64>,
    /// Output file name or absolute path (defaults to a timestamped name)
    pub file_name: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl TrifuelService {
    // --- Status ---

    #[tool(description = "Get the current status of the trifuel service including build info, output directory, and process information")]
    async fn trifuel_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for collecting an athlete profile and interpreting results. Call this before the first calculation.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Calculations ---

    #[tool(description = "Estimate daily energy needs (kcal) from age, weight, height, sex and activity level, optionally with the macronutrient breakdown")]
    fn calculate_needs(&self, Parameters(p): Parameters<CalculateNeedsParams>) -> Result<CallToolResult, McpError> {
        let resolved = calculator::resolve_profile(p.age_years, p.weight_kg, p.height_cm, &p.sex, &p.activity_level)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = calculator::calculate_needs(&resolved, p.first_name.as_deref(), p.last_name.as_deref(), p.include_macros);
        json_result(&result)
    }

    #[tool(description = "Calculate basal metabolic rate with the Mifflin-St Jeor equation (no range checks)")]
    fn estimate_bmr(&self, Parameters(p): Parameters<EstimateBmrParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::estimate_bmr(p.weight_kg, p.height_cm, p.age_years, &p.sex);
        json_result(&result)
    }

    #[tool(description = "Split a daily energy total into carbohydrate, protein and fat grams (55/20/25)")]
    fn split_macros(&self, Parameters(p): Parameters<SplitMacrosParams>) -> Result<CallToolResult, McpError> {
        json_result(&calculator::split_macros(p.daily_energy_kcal))
    }

    #[tool(description = "Draw random endurance, strength and recovery scores. These are NOT measurements.")]
    fn simulate_performance(&self, Parameters(p): Parameters<SimulatePerformanceParams>) -> Result<CallToolResult, McpError> {
        json_result(&calculator::simulate_performance(p.seed))
    }

    // --- Artifacts ---

    #[tool(description = "Render the macronutrient bar chart for a daily energy total and save it as PNG")]
    fn save_macro_chart(&self, Parameters(p): Parameters<SaveMacroChartParams>) -> Result<CallToolResult, McpError> {
        let path = self.artifact_path(p.file_name.as_deref(), "macros", "png");
        let result = calculator::save_macro_chart(
            p.daily_energy_kcal,
            &path,
            p.width.unwrap_or(DEFAULT_WIDTH),
            p.height.unwrap_or(DEFAULT_HEIGHT),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Render a simulated performance bar chart and save it as PNG")]
    fn save_performance_chart(&self, Parameters(p): Parameters<SavePerformanceChartParams>) -> Result<CallToolResult, McpError> {
        let path = self.artifact_path(p.file_name.as_deref(), "performance", "png");
        let result = calculator::save_performance_chart(
            p.seed,
            &path,
            p.width.unwrap_or(DEFAULT_WIDTH),
            p.height.unwrap_or(DEFAULT_HEIGHT),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Generate a PDF nutrition report with energy needs, macronutrient chart and optional performance simulation")]
    fn generate_nutrition_report(&self, Parameters(p): Parameters<GenerateNutritionReportParams>) -> Result<CallToolResult, McpError> {
        let resolved = calculator::resolve_profile(p.age_years, p.weight_kg, p.height_cm, &p.sex, &p.activity_level)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let path = self.artifact_path(p.file_name.as_deref(), "nutrition_report", "pdf");

        let request = ReportRequest {
            resolved: &resolved,
            first_name: p.first_name.as_deref(),
            last_name: p.last_name.as_deref(),
            include_macros: p.include_macros,
            include_simulation: p.include_simulation,
            simulation_seed: p.simulation_seed,
        };
        let result = reports::generate_nutrition_report(&request, &path)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TrifuelService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "trifuel".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Triathlon Fuel".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Triathlon Fuel - energy and macronutrient planning for endurance athletes. \
                 Call usage_instructions first. \
                 Calculations: calculate_needs, estimate_bmr, split_macros, simulate_performance. \
                 Artifacts: save_macro_chart, save_performance_chart, generate_nutrition_report. \
                 Status: trifuel_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_artifact_path_default_and_named() {
        let service = TrifuelService::new(PathBuf::from("/srv/trifuel/output"));

        let named = service.artifact_path(Some("week1.pdf"), "nutrition_report", "pdf");
        assert_eq!(named, PathBuf::from("/srv/trifuel/output/week1.pdf"));

        let generated = service.artifact_path(None, "macros", "png");
        let name = generated.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("macros_"));
        assert!(name.ends_with(".png"));
        assert!(generated.starts_with("/srv/trifuel/output"));
    }

    #[test]
    fn test_params_defaults() {
        let p: GenerateNutritionReportParams = serde_json::from_str(
            r#"{"age_years": 25, "weight_kg": 70, "height_cm": 175, "sex": "male", "activity_level": "high"}"#,
        )
        .unwrap();
        assert!(p.include_macros);
        assert!(!p.include_simulation);

        let p: CalculateNeedsParams = serde_json::from_str(
            r#"{"age_years": 25, "weight_kg": 70, "height_cm": 175, "sex": "male", "activity_level": "high"}"#,
        )
        .unwrap();
        assert!(!p.include_macros);
    }

    fn report_params(age_years: u32, weight_kg: f64, file_name: &str) -> GenerateNutritionReportParams {
        serde_json::from_value(serde_json::json!({
            "age_years": age_years,
            "weight_kg": weight_kg,
            "height_cm": 175,
            "sex": "male",
            "activity_level": "moderate",
            "file_name": file_name,
        }))
        .unwrap()
    }

    #[test]
    fn test_calculate_needs_rejects_out_of_range_profile() {
        let service = TrifuelService::new(PathBuf::from("."));
        let params: CalculateNeedsParams = serde_json::from_str(
            r#"{"age_years": 90, "weight_kg": 70, "height_cm": 175, "sex": "male", "activity_level": "high"}"#,
        )
        .unwrap();

        let err = service.calculate_needs(Parameters(params)).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("age_years"));
    }

    #[test]
    fn test_calculate_needs_in_range() {
        let service = TrifuelService::new(PathBuf::from("."));
        let params: CalculateNeedsParams = serde_json::from_str(
            r#"{"age_years": 25, "weight_kg": 77, "height_cm": 175, "sex": "male", "activity_level": "moderate"}"#,
        )
        .unwrap();
        assert!(service.calculate_needs(Parameters(params)).is_ok());
    }

    #[test]
    fn test_report_rejects_out_of_range_profile_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let service = TrifuelService::new(dir.path().to_path_buf());

        let err = service
            .generate_nutrition_report(Parameters(report_params(25, 150.0, "heavy.pdf")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("weight_kg"));
        assert!(!dir.path().join("heavy.pdf").exists());

        service
            .generate_nutrition_report(Parameters(report_params(25, 77.0, "ok.pdf")))
            .unwrap();
        assert!(dir.path().join("ok.pdf").exists());
    }

    #[test]
    fn test_server_info() {
        let service = TrifuelService::new(PathBuf::from("."));
        let info = service.get_info();
        assert_eq!(info.server_info.name, "trifuel");
        assert!(info.instructions.unwrap().contains("calculate_needs"));
    }
}
