//! SVG visualization of planning results.
//!
//! Renders an occupancy grid with, optionally:
//! - the potential field as a heatmap (finite values on a blue→yellow ramp)
//! - the planned path as a polyline
//! - start and goal markers
//!
//! Row 0 is drawn at the top, matching the map file.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::Pose;
use crate::error::Result;
use crate::field::PotentialField;
use crate::grid::Grid;

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Obstacle color
    pub obstacle: &'static str,
    /// Free cell color (when no heatmap is drawn)
    pub free: &'static str,
    /// Path color
    pub path: &'static str,
    /// Start marker color
    pub start: &'static str,
    /// Goal marker color
    pub goal: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            obstacle: "#333333",
            free: "#FFFFFF",
            path: "#DD2222",
            start: "#22DD22",
            goal: "#DD22DD",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per grid cell
    pub cell_size: f32,
    /// Path line width
    pub path_width: f32,
    /// Start/goal marker radius
    pub marker_radius: f32,
    /// Padding around the map in pixels
    pub padding: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            cell_size: 16.0,
            path_width: 2.0,
            marker_radius: 5.0,
            padding: 20.0,
            colors: SvgColorScheme::default(),
        }
    }
}

impl SvgConfig {
    /// Shrink cells so large maps stay around `target_px` wide.
    pub fn fit_width(mut self, cols: usize, target_px: f32) -> Self {
        if cols > 0 {
            self.cell_size = (target_px / cols as f32).clamp(2.0, 32.0);
            self.marker_radius = (self.cell_size * 0.35).max(2.0);
        }
        self
    }
}

/// SVG renderer. Reads planning state, never modifies it.
pub struct SvgRenderer<'a> {
    config: SvgConfig,
    grid: &'a Grid,
    field: Option<&'a PotentialField>,
    path: &'a [Pose],
    start: Option<Pose>,
    goal: Option<Pose>,
    title: Option<String>,
}

impl<'a> SvgRenderer<'a> {
    /// Renderer for `grid`.
    pub fn new(grid: &'a Grid, config: SvgConfig) -> Self {
        Self {
            config,
            grid,
            field: None,
            path: &[],
            start: None,
            goal: None,
            title: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draw the potential field underneath the obstacles
    pub fn with_field(mut self, field: &'a PotentialField) -> Self {
        self.field = Some(field);
        self
    }

    /// Draw a path
    pub fn with_path(mut self, path: &'a [Pose]) -> Self {
        self.path = path;
        self
    }

    /// Mark start and goal
    pub fn with_endpoints(mut self, start: Pose, goal: Pose) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    /// Render to an SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Render and write to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let cell = self.config.cell_size;
        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let map_w = self.grid.cols() as f32 * cell;
        let map_h = self.grid.rows() as f32 * cell;
        let width = map_w + 2.0 * padding;
        let height = map_h + 2.0 * padding + title_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape(title)
            )?;
        }

        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding,
            padding + title_height
        )?;
        self.write_cells(svg)?;
        self.write_path(svg)?;
        self.write_endpoints(svg)?;
        writeln!(svg, "  </g>")?;
        writeln!(svg, "</svg>")
    }

    fn write_cells(&self, svg: &mut String) -> fmt::Result {
        let cell = self.config.cell_size;
        let range = self.field.and_then(|f| f.finite_range());

        writeln!(svg, r#"    <g id="grid">"#)?;
        writeln!(
            svg,
            r#"      <rect width="{:.1}" height="{:.1}" fill="{}"/>"#,
            self.grid.cols() as f32 * cell,
            self.grid.rows() as f32 * cell,
            self.config.colors.free
        )?;

        for (pose, state) in self.grid.iter() {
            let color = if state.is_occupied() {
                self.config.colors.obstacle.to_string()
            } else {
                match (self.field, range) {
                    (Some(field), Some((lo, hi))) if field.value(pose).is_finite() => {
                        heat_color(field.value(pose), lo, hi)
                    }
                    _ => continue,
                }
            };

            writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                pose.col as f32 * cell,
                pose.row as f32 * cell,
                cell,
                cell,
                color
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_path(&self, svg: &mut String) -> fmt::Result {
        if self.path.is_empty() {
            return Ok(());
        }

        let mut points = String::new();
        for (i, pose) in self.path.iter().enumerate() {
            let (x, y) = self.center(*pose);
            if i > 0 {
                points.push(' ');
            }
            write!(points, "{:.1},{:.1}", x, y)?;
        }

        writeln!(
            svg,
            r#"    <polyline id="path" points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" opacity="0.9"/>"#,
            points, self.config.colors.path, self.config.path_width
        )
    }

    fn write_endpoints(&self, svg: &mut String) -> fmt::Result {
        for (pose, color, id) in [
            (self.start, self.config.colors.start, "start"),
            (self.goal, self.config.colors.goal, "goal"),
        ] {
            if let Some(pose) = pose {
                let (x, y) = self.center(pose);
                writeln!(
                    svg,
                    r#"    <circle id="{}" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="black" stroke-width="1"/>"#,
                    id, x, y, self.config.marker_radius, color
                )?;
            }
        }
        Ok(())
    }

    fn center(&self, pose: Pose) -> (f32, f32) {
        let cell = self.config.cell_size;
        (
            (pose.col as f32 + 0.5) * cell,
            (pose.row as f32 + 0.5) * cell,
        )
    }
}

/// Blue (low) to yellow (high) ramp.
fn heat_color(value: f64, lo: f64, hi: f64) -> String {
    const LOW: (f64, f64, f64) = (40.0, 60.0, 190.0);
    const HIGH: (f64, f64, f64) = (250.0, 225.0, 40.0);

    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        lerp(LOW.0, HIGH.0),
        lerp(LOW.1, HIGH.1),
        lerp(LOW.2, HIGH.2)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
