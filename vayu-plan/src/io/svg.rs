//! SVG rendering of a planning result.
//!
//! Renders the world and what the planner did with it:
//! - Obstacles (rotated rectangles) with their inflated footprint
//! - Start and goal markers
//! - Tree edges (optional)
//! - Raw path (dashed) and smoothed path (solid)

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::{Obstacle, World, WorldPoint};
use crate::planning::{Bounds, TreeEdge};

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Obstacle fill
    pub obstacle: &'static str,
    /// Inflated obstacle outline
    pub margin: &'static str,
    /// Tree edges
    pub tree: &'static str,
    /// Raw path
    pub raw_path: &'static str,
    /// Smoothed path
    pub smoothed_path: &'static str,
    /// Start marker
    pub start: &'static str,
    /// Goal marker
    pub goal: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            obstacle: "#333333",
            margin: "#AA2222",
            tree: "#BBBBBB",
            raw_path: "#2222AA",
            smoothed_path: "#22AA22",
            start: "#0077FF",
            goal: "#FF8800",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// World region to draw
    pub bounds: Bounds,
    /// Pixels per meter
    pub scale: f64,
    /// Path line width
    pub path_width: f64,
    /// Start/goal marker radius
    pub marker_radius: f64,
    /// Inflation drawn around obstacles (0 hides it)
    pub margin: f64,
    /// Color scheme
    pub colors: SvgColorScheme,
    /// Padding around the world in pixels
    pub padding: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            scale: 50.0,
            path_width: 2.5,
            marker_radius: 6.0,
            margin: 0.0,
            colors: SvgColorScheme::default(),
            padding: 20.0,
        }
    }
}

/// SVG builder for one world and its planning result
pub struct SvgRenderer<'a> {
    config: SvgConfig,
    world: &'a World,
    title: Option<String>,
    tree: Vec<TreeEdge>,
    raw_path: Vec<WorldPoint>,
    smoothed_path: Vec<WorldPoint>,
}

impl<'a> SvgRenderer<'a> {
    /// Create a new renderer
    pub fn new(world: &'a World, config: SvgConfig) -> Self {
        Self {
            config,
            world,
            title: None,
            tree: Vec::new(),
            raw_path: Vec::new(),
            smoothed_path: Vec::new(),
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add tree edges
    pub fn with_tree(mut self, edges: &[TreeEdge]) -> Self {
        self.tree = edges.to_vec();
        self
    }

    /// Add the path extracted from the tree
    pub fn with_raw_path(mut self, waypoints: &[WorldPoint]) -> Self {
        self.raw_path = waypoints.to_vec();
        self
    }

    /// Add the shortcut path
    pub fn with_smoothed_path(mut self, waypoints: &[WorldPoint]) -> Self {
        self.smoothed_path = waypoints.to_vec();
        self
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render())
    }

    /// World → pixel, with SVG's Y axis pointing down.
    fn to_px(&self, p: WorldPoint) -> (f64, f64) {
        let b = &self.config.bounds;
        let x = (p.x - b.min_x) * self.config.scale;
        let y = (b.max_y - p.y) * self.config.scale;
        (x, y)
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let b = &self.config.bounds;
        let world_width_px = (b.max_x - b.min_x) * self.config.scale;
        let world_height_px = (b.max_y - b.min_y) * self.config.scale;

        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 30.0;

        let width = world_width_px + 2.0 * padding;
        let height = world_height_px + 2.0 * padding + title_height + legend_height;

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
                title
            )?;
        }

        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding,
            padding + title_height
        )?;
        writeln!(
            svg,
            r##"    <rect width="{:.1}" height="{:.1}" fill="white" stroke="#CCC"/>"##,
            world_width_px, world_height_px
        )?;

        self.write_obstacles(svg)?;
        self.write_tree(svg)?;
        // Raw under smoothed so the final path stays visible
        self.write_path(svg, "raw-path", &self.raw_path, self.config.colors.raw_path, true)?;
        self.write_path(
            svg,
            "smoothed-path",
            &self.smoothed_path,
            self.config.colors.smoothed_path,
            false,
        )?;
        self.write_endpoints(svg)?;

        writeln!(svg, "  </g>")?;

        self.write_legend(svg, padding + title_height + world_height_px + padding)?;
        writeln!(svg, "</svg>")
    }

    fn polygon_points(&self, corners: &[WorldPoint; 4]) -> String {
        corners
            .iter()
            .map(|&c| {
                let (x, y) = self.to_px(c);
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn write_obstacles(&self, svg: &mut String) -> fmt::Result {
        writeln!(svg, r#"    <g id="obstacles">"#)?;
        for obstacle in self.world.obstacles() {
            if self.config.margin > 0.0 {
                let inflated = Obstacle::new(
                    obstacle.center,
                    obstacle.width + 2.0 * self.config.margin,
                    obstacle.height + 2.0 * self.config.margin,
                    obstacle.yaw,
                );
                writeln!(
                    svg,
                    r#"      <polygon points="{}" fill="none" stroke="{}" stroke-width="1" stroke-dasharray="3 3"/>"#,
                    self.polygon_points(&inflated.corners()),
                    self.config.colors.margin
                )?;
            }
            writeln!(
                svg,
                r#"      <polygon points="{}" fill="{}" opacity="0.85"/>"#,
                self.polygon_points(&obstacle.corners()),
                self.config.colors.obstacle
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_tree(&self, svg: &mut String) -> fmt::Result {
        if self.tree.is_empty() {
            return Ok(());
        }
        writeln!(
            svg,
            r#"    <g id="tree" stroke="{}" stroke-width="1">"#,
            self.config.colors.tree
        )?;
        for edge in &self.tree {
            let (x1, y1) = self.to_px(edge.child);
            let (x2, y2) = self.to_px(edge.parent);
            writeln!(
                svg,
                r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                x1, y1, x2, y2
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_path(
        &self,
        svg: &mut String,
        id: &str,
        waypoints: &[WorldPoint],
        color: &str,
        dashed: bool,
    ) -> fmt::Result {
        if waypoints.is_empty() {
            return Ok(());
        }

        let mut path_d = String::new();
        for (i, &p) in waypoints.iter().enumerate() {
            let (px, py) = self.to_px(p);
            let cmd = if i == 0 { "M" } else { " L" };
            write!(&mut path_d, "{} {:.1} {:.1}", cmd, px, py)?;
        }

        let dash = if dashed {
            r#" stroke-dasharray="6 4""#
        } else {
            ""
        };
        writeln!(svg, r#"    <g id="{}">"#, id)?;
        writeln!(
            svg,
            r#"      <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"{}/>"#,
            path_d, color, self.config.path_width, dash
        )?;
        for &p in waypoints {
            let (px, py) = self.to_px(p);
            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{}"/>"#,
                px, py, color
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_endpoints(&self, svg: &mut String) -> fmt::Result {
        writeln!(svg, r#"    <g id="endpoints">"#)?;
        let endpoints = [
            (self.world.start(), self.config.colors.start, "S"),
            (self.world.goal(), self.config.colors.goal, "G"),
        ];
        for (p, color, label) in endpoints {
            let (px, py) = self.to_px(p);
            writeln!(
                svg,
                r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                px, py, self.config.marker_radius, color
            )?;
            writeln!(
                svg,
                r##"      <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" fill="{}" text-anchor="middle" dy="-9">{}</text>"##,
                px, py, color, label
            )?;
        }
        writeln!(svg, "    </g>")
    }

    fn write_legend(&self, svg: &mut String, y_offset: f64) -> fmt::Result {
        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12" transform="translate(0, {:.0})">"#,
            y_offset
        )?;

        let colors = &self.config.colors;
        let entries = [
            (!self.tree.is_empty(), "Tree", colors.tree, false),
            (!self.raw_path.is_empty(), "Raw Path", colors.raw_path, true),
            (
                !self.smoothed_path.is_empty(),
                "Smoothed Path",
                colors.smoothed_path,
                false,
            ),
        ];

        let mut x = 20.0;
        for (shown, label, color, dashed) in entries {
            if !shown {
                continue;
            }
            let dash = if dashed {
                r#" stroke-dasharray="6 4""#
            } else {
                ""
            };
            writeln!(
                svg,
                r#"    <line x1="{:.0}" y1="10" x2="{:.0}" y2="10" stroke="{}" stroke-width="3"{}/>"#,
                x,
                x + 30.0,
                color,
                dash
            )?;
            writeln!(
                svg,
                r##"    <text x="{:.0}" y="14" fill="#333">{}</text>"##,
                x + 40.0,
                label
            )?;
            x += 140.0;
        }

        writeln!(svg, "  </g>")
    }
}
