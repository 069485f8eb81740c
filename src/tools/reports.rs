//! Report generation tools
//!
//! Generate a one-page PDF nutrition report with the energy estimate,
//! macronutrient breakdown and simulated performance charts.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::*;
use serde::Serialize;

use crate::models::{MacronutrientSplit, PerformanceSnapshot};
use crate::nutrition;
use crate::simulation::PerformanceSimulator;
use crate::tools::calculator::{welcome_message, ResolvedProfile, HYDRATION_TIP, SIMULATION_DISCLAIMER};
use crate::tools::charts;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (31, 64, 55);        // Dark green banner
const COLOR_SUCCESS: (u8, u8, u8) = (0, 128, 64);      // Energy result
const COLOR_WARNING: (u8, u8, u8) = (255, 140, 0);     // Fallback notice
const COLOR_ERROR: (u8, u8, u8) = (192, 0, 0);
const COLOR_INFO: (u8, u8, u8) = (0, 90, 160);         // Hydration tip
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

// Letter portrait
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_LEFT_MM: f32 = 15.0;
const CONTENT_TOP_MM: f32 = PAGE_HEIGHT_MM - 20.0;
// Content stays above this line; the footer sits below it
const FOOTER_BAND_MM: f32 = 20.0;
const FOOTER_Y_MM: f32 = 12.0;

// 800x400 pixels at 150 DPI is about 135mm x 68mm
const CHART_WIDTH_PX: u32 = 800;
const CHART_HEIGHT_PX: u32 = 400;
const CHART_DPI: f32 = 150.0;
const CHART_HEIGHT_MM: f32 = 68.0;

// ============================================================================
// Request / Response Types
// ============================================================================

/// What to put in a report
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub resolved: &'a ResolvedProfile,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub include_macros: bool,
    pub include_simulation: bool,
    pub simulation_seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub daily_energy_kcal: i64,
    pub macronutrients: Option<MacronutrientSplit>,
    pub simulation: Option<PerformanceSnapshot>,
    pub charts_embedded: usize,
    pub chart_errors: Vec<String>,
    pub pages: usize,
    pub message: String,
}

// ============================================================================
// PDF Layout
// ============================================================================

fn rgb_to_printpdf(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

/// Writes top to bottom, starting a new page when a block would reach the
/// footer band
struct ReportWriter {
    doc: PdfDocumentReference,
    layers: Vec<PdfLayerReference>,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
    lowest_y: f32,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self, String> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page 1");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| e.to_string())?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| e.to_string())?;
        let layer = doc.get_page(page1).get_layer(layer1);

        Ok(Self {
            doc,
            layers: vec![layer],
            font,
            font_bold,
            y: CONTENT_TOP_MM,
            lowest_y: CONTENT_TOP_MM,
        })
    }

    fn layer(&self) -> &PdfLayerReference {
        // never empty: `new` pushes the first page
        &self.layers[self.layers.len() - 1]
    }

    fn page_count(&self) -> usize {
        self.layers.len()
    }

    /// Make room for a block reaching `height` mm below the cursor
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < FOOTER_BAND_MM {
            let title = format!("Page {}", self.layers.len() + 1);
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), title.as_str());
            let layer = self.doc.get_page(page).get_layer(layer);
            self.layers.push(layer);
            self.y = CONTENT_TOP_MM;
        }
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn mark(&mut self, y: f32) {
        self.lowest_y = self.lowest_y.min(y);
    }

    fn text_at(&mut self, text: &str, x: f32, size: f32, color: (u8, u8, u8), bold: bool) {
        self.ensure_space(0.0);
        let font = if bold { &self.font_bold } else { &self.font };
        let layer = self.layer();
        layer.set_fill_color(rgb_to_printpdf(color));
        layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.mark(self.y);
    }

    fn line(&mut self, text: &str, size: f32, color: (u8, u8, u8), bold: bool, advance: f32) {
        self.text_at(text, MARGIN_LEFT_MM, size, color, bold);
        self.advance(advance);
    }

    fn rule(&mut self) {
        self.ensure_space(0.0);
        let layer = self.layer();
        layer.set_outline_color(rgb_to_printpdf(COLOR_GRAY));
        layer.set_outline_thickness(0.5);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT_MM), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_LEFT_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.mark(self.y);
    }

    /// Embed a PNG chart hanging below the cursor
    fn chart(&mut self, png_bytes: &[u8]) -> Result<(), String> {
        self.ensure_space(CHART_HEIGHT_MM);
        let dynamic_image =
            printpdf::image_crate::load_from_memory(png_bytes).map_err(|e| e.to_string())?;
        let bottom_y = self.y - CHART_HEIGHT_MM;

        Image::from_dynamic_image(&dynamic_image).add_to_layer(
            self.layer().clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT_MM)),
                translate_y: Some(Mm(bottom_y)),
                dpi: Some(CHART_DPI),
                ..Default::default()
            },
        );
        self.mark(bottom_y);
        self.y = bottom_y;
        Ok(())
    }

    /// Draw a chart, or its error text if it could not be rendered
    fn chart_or_error(
        &mut self,
        name: &str,
        rendered: Result<Vec<u8>, charts::ChartError>,
        charts_embedded: &mut usize,
        chart_errors: &mut Vec<String>,
    ) {
        match rendered.map_err(|e| e.to_string()).and_then(|png| self.chart(&png)) {
            Ok(()) => {
                *charts_embedded += 1;
                self.advance(6.0);
            }
            Err(e) => {
                tracing::warn!("{} chart not embedded: {}", name, e);
                self.advance(5.0);
                self.line(&format!("Chart generation error: {}", e), 9.0, COLOR_ERROR, false, 7.0);
                chart_errors.push(e);
            }
        }
    }

    /// Stamp the footer on every page and write the file
    fn save(self, footer: &str, output_path: &Path) -> Result<(), String> {
        let pages = self.layers.len();
        for (i, layer) in self.layers.iter().enumerate() {
            layer.set_fill_color(rgb_to_printpdf(COLOR_GRAY));
            let text = if pages > 1 {
                format!("{}    Page {} of {}", footer, i + 1, pages)
            } else {
                footer.to_string()
            };
            layer.use_text(text, 8.0, Mm(MARGIN_LEFT_MM), Mm(FOOTER_Y_MM), &self.font);
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let file = File::create(output_path).map_err(|e| e.to_string())?;
        let mut writer = BufWriter::new(file);
        self.doc.save(&mut writer).map_err(|e| e.to_string())?;
        Ok(())
    }
}

// ============================================================================
// Nutrition Report Generation
// ============================================================================

struct ReportContents {
    daily_energy_kcal: i64,
    macronutrients: Option<MacronutrientSplit>,
    simulation: Option<PerformanceSnapshot>,
    charts_embedded: usize,
    chart_errors: Vec<String>,
}

fn lay_out_report(w: &mut ReportWriter, request: &ReportRequest) -> ReportContents {
    let profile = &request.resolved.profile;
    let estimate = nutrition::estimate_energy(profile);

    // Title
    w.line("Sports Nutrition - Triathlon", 18.0, COLOR_TITLE, true, 7.0);
    w.line("Personalized analysis of nutritional needs for athletes", 11.0, COLOR_TITLE, false, 10.0);

    let greeting = welcome_message(request.first_name, request.last_name);
    let greeting_text = greeting
        .as_deref()
        .unwrap_or("Enter your first and last name for a personalized greeting.");
    w.line(greeting_text, 11.0, COLOR_BLACK, false, 6.0);

    let now = chrono::Local::now();
    w.line(&format!("Generated: {}", now.format("%Y-%m-%d")), 10.0, COLOR_GRAY, false, 6.0);

    w.rule();
    w.advance(8.0);

    // Profile
    w.line("Profile", 12.0, COLOR_BLACK, true, 7.0);
    w.text_at(&format!("Age: {} years", profile.age_years), MARGIN_LEFT_MM, 10.0, COLOR_BLACK, false);
    w.text_at(&format!("Weight: {:.0} kg", profile.weight_kg), 60.0, 10.0, COLOR_BLACK, false);
    w.text_at(&format!("Height: {:.0} cm", profile.height_cm), 105.0, 10.0, COLOR_BLACK, false);
    w.text_at(&format!("Sex: {}", profile.sex.as_str()), 150.0, 10.0, COLOR_BLACK, false);
    w.advance(6.0);
    w.line(
        &format!(
            "Activity level: {} (x{})",
            profile.activity_level.display_name(),
            estimate.activity_multiplier
        ),
        10.0,
        COLOR_BLACK,
        false,
        6.0,
    );

    if !request.resolved.activity_label_recognized {
        w.line(
            &format!(
                "Activity level '{}' not recognized; sedentary multiplier used.",
                request.resolved.activity_label
            ),
            9.0,
            COLOR_WARNING,
            false,
            6.0,
        );
    }

    // Energy
    w.advance(2.0);
    w.line(
        &format!("Estimated energy needs: {} kcal/day", estimate.daily_energy_kcal),
        13.0,
        COLOR_SUCCESS,
        true,
        6.0,
    );
    w.line(
        &format!("Basal metabolic rate (Mifflin-St Jeor): {:.2} kcal/day", estimate.basal_metabolic_rate_kcal),
        10.0,
        COLOR_BLACK,
        false,
        10.0,
    );

    let mut charts_embedded = 0;
    let mut chart_errors = Vec::new();

    // Macronutrients
    let macronutrients = request
        .include_macros
        .then(|| nutrition::split(estimate.daily_energy_kcal));

    if let Some(split) = macronutrients {
        // keep the heading on the same page as its chart
        w.ensure_space(10.0 + CHART_HEIGHT_MM);
        w.line("Daily macronutrient breakdown", 12.0, COLOR_BLACK, true, 6.0);
        w.line(
            &format!(
                "Carbohydrates: {} g    Protein: {} g    Fat: {} g",
                split.carbohydrate_grams, split.protein_grams, split.fat_grams
            ),
            10.0,
            COLOR_BLACK,
            false,
            4.0,
        );
        let rendered = charts::generate_macro_chart(&split, CHART_WIDTH_PX, CHART_HEIGHT_PX);
        w.chart_or_error("Macronutrient", rendered, &mut charts_embedded, &mut chart_errors);
    }

    // Simulated performance
    let simulation = request.include_simulation.then(|| {
        let mut sim = match request.simulation_seed {
            Some(seed) => PerformanceSimulator::new(seed),
            None => PerformanceSimulator::from_entropy(),
        };
        sim.simulate()
    });

    if let Some(snapshot) = simulation {
        w.ensure_space(15.0 + CHART_HEIGHT_MM);
        w.line("Simulated performance indicators", 12.0, COLOR_BLACK, true, 6.0);
        w.line(
            &format!(
                "Endurance: {} %    Strength: {} %    Recovery: {} %",
                snapshot.endurance_pct, snapshot.strength_pct, snapshot.recovery_pct
            ),
            10.0,
            COLOR_BLACK,
            false,
            5.0,
        );
        w.line(SIMULATION_DISCLAIMER, 8.0, COLOR_GRAY, false, 4.0);
        let rendered = charts::generate_performance_chart(&snapshot, CHART_WIDTH_PX, CHART_HEIGHT_PX);
        w.chart_or_error("Performance", rendered, &mut charts_embedded, &mut chart_errors);
    }

    // Hydration tip
    let tip: Vec<&str> = HYDRATION_TIP.split_inclusive(". ").map(str::trim).collect();
    w.ensure_space(7.0 + 5.0 * tip.len() as f32);
    w.rule();
    w.advance(7.0);
    for sentence in tip {
        w.line(sentence, 9.0, COLOR_INFO, false, 5.0);
    }

    ReportContents {
        daily_energy_kcal: estimate.daily_energy_kcal,
        macronutrients,
        simulation,
        charts_embedded,
        chart_errors,
    }
}

/// Generate a nutrition PDF report
///
/// A chart that fails to render is replaced by its error text; the report
/// itself is still written. Sections that do not fit continue on a new page.
pub fn generate_nutrition_report(
    request: &ReportRequest,
    output_path: &Path,
) -> Result<GenerateReportResponse, String> {
    let mut writer = ReportWriter::new("Triathlon Nutrition Report")?;
    let contents = lay_out_report(&mut writer, request);
    let pages = writer.page_count();

    let footer = format!("(c) {} - Triathlon Nutrition Project", chrono::Local::now().format("%Y"));
    writer.save(&footer, output_path)?;

    tracing::info!("Wrote nutrition report ({} page(s)) to {}", pages, output_path.display());

    Ok(GenerateReportResponse {
        success: true,
        file_path: output_path.display().to_string(),
        daily_energy_kcal: contents.daily_energy_kcal,
        macronutrients: contents.macronutrients,
        simulation: contents.simulation,
        charts_embedded: contents.charts_embedded,
        chart_errors: contents.chart_errors,
        pages,
        message: format!(
            "Nutrition report generated: {} kcal/day, {} chart(s) embedded, {} page(s)",
            contents.daily_energy_kcal, contents.charts_embedded, pages
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::calculator::resolve_profile;

    #[test]
    fn test_report_written_with_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("nutrition.pdf");
        let resolved = resolve_profile(25, 77.0, 175.0, "male", "moderate").unwrap();

        let request = ReportRequest {
            resolved: &resolved,
            first_name: Some("Ada"),
            last_name: Some("Lovelace"),
            include_macros: true,
            include_simulation: true,
            simulation_seed: Some(9),
        };
        let resp = generate_nutrition_report(&request, &path).unwrap();

        assert!(resp.success);
        assert_eq!(resp.daily_energy_kcal, 2703);
        assert_eq!(resp.macronutrients.map(|m| m.carbohydrate_grams), Some(372));
        assert!(resp.simulation.is_some());
        // Charts either embed or leave an error note, never both
        assert_eq!(resp.charts_embedded + resp.chart_errors.len(), 2);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_report_without_optional_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.pdf");
        let resolved = resolve_profile(40, 60.0, 165.0, "female", "light").unwrap();

        let request = ReportRequest {
            resolved: &resolved,
            first_name: None,
            last_name: None,
            include_macros: false,
            include_simulation: false,
            simulation_seed: None,
        };
        let resp = generate_nutrition_report(&request, &path).unwrap();

        assert_eq!(resp.macronutrients, None);
        assert_eq!(resp.simulation, None);
        assert_eq!(resp.charts_embedded, 0);
        assert!(resp.chart_errors.is_empty());
        assert_eq!(resp.pages, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_block_past_footer_band_starts_new_page() {
        let mut writer = ReportWriter::new("layout").unwrap();
        writer.advance(CONTENT_TOP_MM - FOOTER_BAND_MM - 1.0);

        writer.ensure_space(0.0);
        assert_eq!(writer.page_count(), 1);

        writer.ensure_space(5.0);
        assert_eq!(writer.page_count(), 2);
        assert_eq!(writer.y, CONTENT_TOP_MM);
    }

    #[test]
    fn test_fullest_report_stays_above_footer() {
        // unrecognized activity adds a warning line on top of both charts
        let resolved = resolve_profile(25, 77.0, 175.0, "male", "extreme").unwrap();
        assert!(!resolved.activity_label_recognized);

        let request = ReportRequest {
            resolved: &resolved,
            first_name: Some("Ada"),
            last_name: Some("Lovelace"),
            include_macros: true,
            include_simulation: true,
            simulation_seed: Some(3),
        };

        let mut writer = ReportWriter::new("layout").unwrap();
        let contents = lay_out_report(&mut writer, &request);

        assert!(
            writer.lowest_y >= FOOTER_BAND_MM,
            "content reached {} mm",
            writer.lowest_y
        );
        assert!(writer.y > 0.0);
        if contents.charts_embedded == 2 {
            assert_eq!(writer.page_count(), 2);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.pdf");
        let resp = generate_nutrition_report(&request, &path).unwrap();
        assert_eq!(resp.daily_energy_kcal, 2093);
        assert!(resp.pages >= 1);
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
