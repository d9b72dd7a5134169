use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::models::{Classification, Record, RiskLevel};
use crate::urlcheck::UrlStatus;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const HDR_H: f32 = 64.0; // gradient header height on the first page
const BOT_MARGIN: f32 = 28.0;
const LINE_H: f32 = 5.2;

// ── Colour palette ────────────────────────────────────────────────────────────
const BG:           (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL_BORDER: (f32, f32, f32) = (0.85, 0.87, 0.92);
const ACCENT_BLU:   (f32, f32, f32) = (0.20, 0.46, 0.95);
const ACCENT_PUR:   (f32, f32, f32) = (0.52, 0.30, 0.95);
const TEXT_PRI:     (f32, f32, f32) = (0.07, 0.08, 0.14);
const TEXT_SEC:     (f32, f32, f32) = (0.36, 0.40, 0.52);
const TEXT_MUT:     (f32, f32, f32) = (0.58, 0.63, 0.72);
const WHITE:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const WHITE_DIM:    (f32, f32, f32) = (0.82, 0.89, 1.00);

const OK_BG:   (f32, f32, f32) = (0.90, 0.98, 0.92);
const OK_FG:   (f32, f32, f32) = (0.07, 0.52, 0.22);
const WARN_BG: (f32, f32, f32) = (1.00, 0.95, 0.87);
const WARN_FG: (f32, f32, f32) = (0.70, 0.40, 0.02);
const BAD_BG:  (f32, f32, f32) = (1.00, 0.91, 0.91);
const BAD_FG:  (f32, f32, f32) = (0.76, 0.09, 0.13);
const MUT_BG:  (f32, f32, f32) = (0.95, 0.96, 0.99);

const R_BADGE: f32 = 1.5;
const TEXT_WRAP: usize = 92;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render a PDF report for a single evaluation record: verdict header,
/// stat cards, URL verification, red flags, and the full description,
/// overflowing onto continuation pages as needed.
pub fn render(record: &Record, output_path: &Path) -> Result<()> {
    let doc = PdfDocument::empty("Fake Job Posting Report");

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let mut flow = Flow::first_page(&doc, record, &font_r, &font_b);

    add_details_section(&mut flow, record);
    add_url_section(&mut flow, record);
    add_warning_section(&mut flow, record);
    add_red_flags_section(&mut flow, record);
    add_description_section(&mut flow, record);

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    println!("PDF report written to: {}", output_path.display());
    Ok(())
}

// ── Flowing page composer ─────────────────────────────────────────────────────

/// Cursor-based writer that starts new pages when a section would run
/// past the bottom margin.
struct Flow<'a> {
    doc: &'a PdfDocumentReference,
    font_r: &'a IndirectFontRef,
    font_b: &'a IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
    page_num: u32,
}

impl<'a> Flow<'a> {
    /// Build the cover-style first page (gradient header, posting chip,
    /// stat cards) and position the cursor below it.
    fn first_page(
        doc: &'a PdfDocumentReference,
        record: &Record,
        font_r: &'a IndirectFontRef,
        font_b: &'a IndirectFontRef,
    ) -> Self {
        let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Report");
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
        let hdr_bot = PAGE_H - HDR_H;
        fill_gradient_h(&layer, 0.0, hdr_bot, PAGE_W, HDR_H, ACCENT_BLU, ACCENT_PUR, 28);

        set_color(&layer, WHITE_DIM);
        layer.use_text(
            format!("jobscan v{}", env!("CARGO_PKG_VERSION")),
            7.5, Mm(PAGE_W - MARGIN - 30.0), Mm(PAGE_H - 10.5), font_r,
        );

        set_color(&layer, WHITE);
        layer.use_text("Fake Job Posting", 26.0, Mm(MARGIN), Mm(PAGE_H - 24.0), font_b);
        set_color(&layer, WHITE_DIM);
        layer.use_text("Risk Report", 26.0, Mm(MARGIN), Mm(PAGE_H - 38.0), font_b);

        // Posting chip
        let chip_y = hdr_bot - 18.0;
        let chip_h = 12.0f32;
        let chip_w = PAGE_W - 2.0 * MARGIN;
        fill_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
        stroke_rounded_rect(&layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
        fill_rect(&layer, MARGIN, chip_y, 2.5, chip_h, ACCENT_BLU);

        set_color(&layer, TEXT_MUT);
        layer.use_text("POSTING", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), font_b);
        set_color(&layer, TEXT_PRI);
        layer.use_text(
            truncate(&format!("{} — {}", record.title, record.company), 70),
            9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), font_b,
        );

        set_color(&layer, TEXT_SEC);
        layer.use_text(
            format!("Checked  {}", record.time),
            9.0, Mm(MARGIN), Mm(chip_y - 8.0), font_r,
        );

        let rule_y = chip_y - 14.5;
        draw_hline(&layer, MARGIN, PAGE_W - MARGIN, rule_y, PANEL_BORDER);
        set_color(&layer, TEXT_MUT);
        layer.use_text("VERDICT", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), font_b);

        // Stat cards
        let card_y = rule_y - 38.0;
        let card_h = 24.0f32;
        let gap = 4.0f32;
        let card_w = (chip_w - gap * 3.0) / 4.0;

        let (result_str, result_fg) = match record.result {
            Classification::Fake => ("FAKE", BAD_FG),
            Classification::Real => ("REAL", OK_FG),
        };
        let (risk_str, risk_fg) = match record.risk_level {
            RiskLevel::High => ("HIGH", BAD_FG),
            RiskLevel::Medium => ("MEDIUM", WARN_FG),
            RiskLevel::Low => ("LOW", OK_FG),
        };
        let (url_str, url_fg) = match record.url_status {
            Some(UrlStatus::Suspicious) => ("SUSPICIOUS", BAD_FG),
            Some(UrlStatus::Safe) => ("SAFE", OK_FG),
            None => ("N/A", TEXT_MUT),
        };
        let confidence = format!("{:.1}%", record.confidence);

        let cards: [(&str, &str, (f32, f32, f32)); 4] = [
            ("RESULT", result_str, result_fg),
            ("RISK LEVEL", risk_str, risk_fg),
            ("CONFIDENCE", &confidence, ACCENT_BLU),
            ("URL CHECK", url_str, url_fg),
        ];

        for (i, (label, value, accent)) in cards.iter().enumerate() {
            let cx = MARGIN + (card_w + gap) * i as f32;
            draw_stat_card(&layer, cx, card_y, card_w, card_h, label, value, *accent, font_r, font_b);
        }

        draw_footer(&layer, font_r, record);

        Flow {
            doc,
            font_r,
            font_b,
            layer,
            y: card_y - 10.0,
            page_num: 1,
        }
    }

    /// Start a continuation page with a slim header and reset the cursor.
    fn new_page(&mut self, record: &Record) {
        self.page_num += 1;
        let (page_idx, layer_idx) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Report");
        let layer = self.doc.get_page(page_idx).get_layer(layer_idx);

        fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
        fill_gradient_h(&layer, 0.0, PAGE_H - 2.5, PAGE_W, 2.5, ACCENT_BLU, ACCENT_PUR, 21);

        set_color(&layer, TEXT_PRI);
        layer.use_text(
            truncate(&format!("Risk Report — {}", record.title), 46),
            14.0, Mm(MARGIN), Mm(282.5), self.font_b,
        );
        set_color(&layer, TEXT_MUT);
        layer.use_text(
            format!("Page {}", self.page_num),
            8.0, Mm(PAGE_W - MARGIN - 14.0), Mm(283.0), self.font_r,
        );
        draw_hline(&layer, MARGIN, PAGE_W - MARGIN, 277.5, PANEL_BORDER);

        draw_footer(&layer, self.font_r, record);

        self.layer = layer;
        self.y = 270.0;
    }

    fn ensure(&mut self, needed: f32, record: &Record) {
        if self.y - needed < BOT_MARGIN {
            self.new_page(record);
        }
    }

    /// Section divider with an uppercase label.
    fn section(&mut self, label: &str, record: &Record) {
        self.ensure(24.0, record);
        draw_hline(&self.layer, MARGIN, PAGE_W - MARGIN, self.y, PANEL_BORDER);
        set_color(&self.layer, TEXT_MUT);
        self.layer
            .use_text(label, 6.5, Mm(MARGIN), Mm(self.y - 6.5), self.font_b);
        self.y -= 13.0;
    }

    fn label_value(&mut self, label: &str, value: &str, record: &Record) {
        self.ensure(LINE_H, record);
        set_color(&self.layer, TEXT_MUT);
        self.layer
            .use_text(label, 8.0, Mm(MARGIN), Mm(self.y), self.font_b);
        set_color(&self.layer, TEXT_PRI);
        self.layer
            .use_text(truncate(value, 78), 8.5, Mm(MARGIN + 34.0), Mm(self.y), self.font_r);
        self.y -= LINE_H + 1.0;
    }

    fn bullet(&mut self, text: &str, fg: (f32, f32, f32), record: &Record) {
        self.ensure(LINE_H, record);
        fill_rounded_rect(&self.layer, MARGIN + 1.0, self.y + 0.6, 1.8, 1.8, 0.9, fg);
        set_color(&self.layer, TEXT_SEC);
        self.layer
            .use_text(truncate(text, 88), 8.5, Mm(MARGIN + 5.5), Mm(self.y), self.font_r);
        self.y -= LINE_H;
    }

    fn paragraph(&mut self, text: &str, record: &Record) {
        for line in wrap_text(text, TEXT_WRAP) {
            self.ensure(LINE_H, record);
            set_color(&self.layer, TEXT_SEC);
            self.layer
                .use_text(line.as_str(), 8.5, Mm(MARGIN), Mm(self.y), self.font_r);
            self.y -= LINE_H - 0.8;
        }
    }

    /// Rounded status pill with the given text.
    fn badge(&mut self, text: &str, bg: (f32, f32, f32), fg: (f32, f32, f32), record: &Record) {
        self.ensure(8.0, record);
        let w = 6.0 + text.len() as f32 * 1.7;
        fill_rounded_rect(&self.layer, MARGIN, self.y - 1.5, w, 5.2, R_BADGE, bg);
        set_color(&self.layer, fg);
        self.layer
            .use_text(text, 7.5, Mm(MARGIN + 3.0), Mm(self.y), self.font_b);
        self.y -= 8.5;
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn add_details_section(flow: &mut Flow, record: &Record) {
    flow.section("DETAILS", record);
    flow.label_value("Date & Time", &record.time, record);
    flow.label_value("Job Title", &record.title, record);
    flow.label_value("Company", &record.company, record);
    flow.label_value("Final Prediction", &record.result.to_string(), record);
    flow.label_value("Model Prediction", &record.model_result.to_string(), record);
    flow.label_value("Confidence", &format!("{:.2}%", record.confidence), record);
    flow.label_value("Risk Level", &record.risk_level.to_string(), record);
    flow.label_value("Model Version", &record.model_version, record);
}

fn add_url_section(flow: &mut Flow, record: &Record) {
    flow.section("URL VERIFICATION", record);
    flow.label_value(
        "URL",
        record.url.as_deref().unwrap_or("Not provided"),
        record,
    );

    let (bg, fg) = match record.url_status {
        Some(UrlStatus::Suspicious) => (BAD_BG, BAD_FG),
        Some(UrlStatus::Safe) => (OK_BG, OK_FG),
        None => (MUT_BG, TEXT_MUT),
    };
    flow.badge(record.url_status_label(), bg, fg, record);

    for reason in &record.url_reasons {
        flow.bullet(reason, BAD_FG, record);
    }
    flow.y -= 3.0;
}

fn add_warning_section(flow: &mut Flow, record: &Record) {
    let warning = match &record.warning {
        Some(warning) => warning,
        None => return,
    };
    flow.section("WARNING", record);
    flow.badge("OVERRIDE", WARN_BG, WARN_FG, record);
    flow.paragraph(warning, record);
    flow.y -= 3.0;
}

fn add_red_flags_section(flow: &mut Flow, record: &Record) {
    flow.section("RED FLAGS", record);
    if record.red_flags.is_empty() {
        flow.badge("NONE DETECTED", OK_BG, OK_FG, record);
    } else {
        for flag in &record.red_flags {
            flow.bullet(flag, BAD_FG, record);
        }
    }
    flow.y -= 3.0;
}

fn add_description_section(flow: &mut Flow, record: &Record) {
    flow.section("JOB DESCRIPTION", record);
    flow.paragraph(&record.description, record);
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn draw_stat_card(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    label: &str,
    value: &str,
    accent: (f32, f32, f32),
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    fill_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL);
    stroke_rounded_rect(layer, x, y, w, h, R_BADGE, PANEL_BORDER);
    fill_rect(layer, x, y + h - 2.0, w, 2.0, accent);

    // Long values (e.g. SUSPICIOUS) get a smaller size to stay inside the card
    let size = if value.len() > 6 { 10.5 } else { 16.0 };
    set_color(layer, accent);
    layer.use_text(value, size, Mm(x + 4.0), Mm(y + h * 0.38), font_b);

    set_color(layer, TEXT_MUT);
    layer.use_text(label, 6.5, Mm(x + 4.0), Mm(y + 3.5), font_r);
}

fn draw_footer(layer: &PdfLayerReference, font_r: &IndirectFontRef, record: &Record) {
    draw_hline(layer, MARGIN, PAGE_W - MARGIN, 22.0, PANEL_BORDER);
    set_color(layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by jobscan v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), font_r,
    );
    layer.use_text(
        &record.time,
        7.5, Mm(PAGE_W - MARGIN - 32.0), Mm(15.0), font_r,
    );
}

fn set_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
             (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x),     Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y)),     false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x),     Mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

/// Build a clockwise polygon ring approximating a rounded rectangle.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    let r = r.min(w / 2.0).min(h / 2.0);
    const SEGS: usize = 8;
    let mut pts = Vec::with_capacity(4 * (SEGS + 1));

    let corners = [
        (x + w - r, y + r,     270.0f32, 360.0f32),
        (x + w - r, y + h - r, 0.0f32,   90.0f32),
        (x + r,     y + h - r, 90.0f32,  180.0f32),
        (x + r,     y + r,     180.0f32, 270.0f32),
    ];

    for (cx, cy, start, end) in &corners {
        for i in 0..=SEGS {
            let t = i as f32 / SEGS as f32;
            let angle = (start + (end - start) * t).to_radians();
            pts.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                     r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                       r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

fn draw_hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32,
              (r, g, b): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.set_outline_thickness(0.3);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

/// Fill a left-to-right gradient rectangle using `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
            from.2 + (to.2 - from.2) * t,
        );
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.len() <= max_chars && !text.contains('\n') {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.len() + 1 + word.len() > max_chars {
                lines.push(current.clone());
                current = word.to_string();
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short_passthrough() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_breaks_on_width() {
        let lines = wrap_text("one two three four five six seven eight", 12);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 12));
    }

    #[test]
    fn test_wrap_text_preserves_blank_lines() {
        let lines = wrap_text("para one\n\npara two", 40);
        assert_eq!(lines, vec!["para one", "", "para two"]);
    }

    #[test]
    fn test_truncate_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
