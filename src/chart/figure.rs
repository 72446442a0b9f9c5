// Minimal plotly.js figure model with standalone HTML output

use crate::model::ChartError;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const GRID_COLOR: &str = "#EBF0F8";

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

impl Line {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dash = Some("dash");
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: f64,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub size: u32,
}

impl Font {
    pub fn size(size: u32) -> Self {
        Self { color: None, size }
    }

    pub fn colored(color: &str, size: u32) -> Self {
        Self {
            color: Some(color.to_string()),
            size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Scatter {
    #[serde(rename = "type")]
    kind: &'static str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Scatter {
    pub fn new(x: Vec<NaiveDate>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: "scatter",
            x,
            y,
            name: None,
            mode: None,
            line: None,
            marker: None,
            fill: None,
            fillcolor: None,
            opacity: None,
            showlegend: None,
        }
    }

    pub fn from_values(x: &[NaiveDate], y: &[f64]) -> Self {
        Self::new(x.to_vec(), y.iter().copied().map(Some).collect())
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn markers(mut self, marker: Marker) -> Self {
        self.mode = Some("markers");
        self.marker = Some(marker);
        self
    }

    pub fn fill_to_zero(mut self, fillcolor: &str) -> Self {
        self.fill = Some("tozeroy");
        self.fillcolor = Some(fillcolor.to_string());
        self
    }

    pub fn fill_to_next(mut self, fillcolor: &str) -> Self {
        self.fill = Some("tonexty");
        self.fillcolor = Some(fillcolor.to_string());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn hide_legend(mut self) -> Self {
        self.showlegend = Some(false);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    #[serde(rename = "type")]
    kind: &'static str,
    pub z: Vec<Vec<Option<f64>>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub colorscale: &'static str,
    pub zmid: f64,
    pub zmin: f64,
    pub zmax: f64,
    pub text: Vec<Vec<String>>,
    pub texttemplate: &'static str,
    pub textfont: Font,
    pub colorbar: Value,
}

impl Heatmap {
    /// Correlation-style heatmap on a fixed `[-1, 1]` diverging scale.
    pub fn correlation(labels: &[&str], z: Vec<Vec<Option<f64>>>) -> Self {
        let text = z
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.map(|c| format!("{:.2}", c)).unwrap_or_default())
                    .collect()
            })
            .collect();
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        Self {
            kind: "heatmap",
            z,
            x: labels.clone(),
            y: labels,
            colorscale: "RdYlGn",
            zmid: 0.0,
            zmin: -1.0,
            zmax: 1.0,
            text,
            texttemplate: "%{text}",
            textfont: Font::size(10),
            colorbar: json!({ "title": { "text": "Correlation" } }),
        }
    }

    /// Places the colour bar next to a subplot instead of the figure's right edge.
    pub fn colorbar_at(mut self, x: f64, y_domain: [f64; 2]) -> Self {
        if let Value::Object(ref mut bar) = self.colorbar {
            bar.insert("x".into(), json!(x));
            bar.insert("y".into(), json!((y_domain[0] + y_domain[1]) / 2.0));
            bar.insert("len".into(), json!(y_domain[1] - y_domain[0]));
        }
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableHeader {
    pub values: Vec<String>,
    pub fill: Value,
    pub font: Font,
    pub align: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCells {
    pub values: Vec<Vec<String>>,
    pub fill: Value,
    pub font: Font,
    pub align: &'static str,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    #[serde(rename = "type")]
    kind: &'static str,
    pub header: TableHeader,
    pub cells: TableCells,
}

impl Table {
    /// Builds a table from a header and row-major rows.
    pub fn from_rows(header: &[&str], rows: &[Vec<String>]) -> Self {
        let columns = (0..header.len())
            .map(|c| {
                rows.iter()
                    .map(|r| r.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            kind: "table",
            header: TableHeader {
                values: header.iter().map(|h| format!("<b>{}</b>", h)).collect(),
                fill: json!({ "color": "#2E86AB" }),
                font: Font::colored("white", 12),
                align: "left",
            },
            cells: TableCells {
                values: columns,
                fill: json!({ "color": "lavender" }),
                font: Font::size(11),
                align: "left",
                height: 25,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trace {
    Scatter(Scatter),
    Heatmap(Heatmap),
    Table(Table),
}

impl From<Scatter> for Trace {
    fn from(t: Scatter) -> Self {
        Trace::Scatter(t)
    }
}

impl From<Heatmap> for Trace {
    fn from(t: Heatmap) -> Self {
        Trace::Heatmap(t)
    }
}

impl From<Table> for Trace {
    fn from(t: Table) -> Self {
        Trace::Table(t)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Placement {
    Axes { xaxis: String, yaxis: String },
    Domain { domain: Value },
}

#[derive(Debug, Clone, Serialize)]
struct PlacedTrace {
    #[serde(flatten)]
    trace: Trace,
    #[serde(flatten)]
    placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Cartesian axes (scatter, heatmap).
    Xy,
    /// Paper-domain placement (table).
    Domain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub kind: CellKind,
    pub colspan: usize,
    pub secondary_y: bool,
}

impl CellSpec {
    pub fn xy() -> Self {
        Self {
            kind: CellKind::Xy,
            colspan: 1,
            secondary_y: false,
        }
    }

    pub fn domain() -> Self {
        Self {
            kind: CellKind::Domain,
            ..Self::xy()
        }
    }

    pub fn colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn secondary_y(mut self) -> Self {
        self.secondary_y = true;
        self
    }
}

/// Row/column layout in the style of plotly's `make_subplots` (top-left start).
#[derive(Debug, Clone)]
pub struct SubplotGrid {
    rows: usize,
    cols: usize,
    row_heights: Vec<f64>,
    vertical_spacing: f64,
    horizontal_spacing: f64,
    specs: Vec<Vec<Option<CellSpec>>>,
}

impl SubplotGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            row_heights: vec![1.0; rows],
            vertical_spacing: 0.3 / rows as f64,
            horizontal_spacing: 0.2 / cols as f64,
            specs: vec![vec![Some(CellSpec::xy()); cols]; rows],
        }
    }

    pub fn row_heights(mut self, heights: &[f64]) -> Self {
        if heights.len() == self.rows {
            self.row_heights = heights.to_vec();
        }
        self
    }

    pub fn vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Sets the spec of a 1-based cell; `None` leaves the cell empty.
    pub fn spec(mut self, row: usize, col: usize, spec: Option<CellSpec>) -> Self {
        if (1..=self.rows).contains(&row) && (1..=self.cols).contains(&col) {
            self.specs[row - 1][col - 1] = spec;
        }
        self
    }

    /// Resolves paper domains and axis numbers for every non-empty cell.
    pub fn resolve(&self) -> Vec<Subplot> {
        let col_width = (1.0 - self.horizontal_spacing * (self.cols - 1) as f64) / self.cols as f64;
        let total_height = 1.0 - self.vertical_spacing * (self.rows - 1) as f64;
        let height_sum: f64 = self.row_heights.iter().sum();

        let mut subplots = Vec::new();
        let mut next_x = 1;
        let mut next_y = 1;
        let mut top = 1.0;

        for (r, row) in self.specs.iter().enumerate() {
            let row_height = total_height * self.row_heights[r] / height_sum;
            let y_domain = [(top - row_height).max(0.0), top];
            top -= row_height + self.vertical_spacing;

            for (c, cell) in row.iter().enumerate() {
                let Some(spec) = cell else { continue };
                let span = spec.colspan.min(self.cols - c);
                let x0 = c as f64 * (col_width + self.horizontal_spacing);
                let x1 = x0 + span as f64 * col_width + (span - 1) as f64 * self.horizontal_spacing;

                let axes = match spec.kind {
                    CellKind::Xy => {
                        let ids = AxisIds {
                            x: next_x,
                            y: next_y,
                            secondary_y: spec.secondary_y.then_some(next_y + 1),
                        };
                        next_x += 1;
                        next_y += if spec.secondary_y { 2 } else { 1 };
                        Some(ids)
                    }
                    CellKind::Domain => None,
                };

                subplots.push(Subplot {
                    row: r + 1,
                    col: c + 1,
                    x_domain: [x0, x1.min(1.0)],
                    y_domain,
                    axes,
                });
            }
        }
        subplots
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisIds {
    pub x: usize,
    pub y: usize,
    pub secondary_y: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subplot {
    pub row: usize,
    pub col: usize,
    pub x_domain: [f64; 2],
    pub y_domain: [f64; 2],
    pub axes: Option<AxisIds>,
}

/// Trace reference: axis 1 is `x`, axis 2 is `x2`.
fn axis_ref(prefix: &str, n: usize) -> String {
    if n == 1 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, n)
    }
}

/// Layout key: axis 1 is `xaxis`, axis 2 is `xaxis2`.
fn axis_key(prefix: &str, n: usize) -> String {
    if n == 1 {
        format!("{}axis", prefix)
    } else {
        format!("{}axis{}", prefix, n)
    }
}

/// Horizontal reference line across one subplot.
#[derive(Debug, Clone)]
pub struct HLine {
    pub y: f64,
    pub line: Line,
    pub opacity: f64,
    pub annotation: Option<String>,
}

impl HLine {
    /// Grey dashed zero line.
    pub fn zero() -> Self {
        Self {
            y: 0.0,
            line: Line::new("gray", 1.0).dashed(),
            opacity: 0.5,
            annotation: None,
        }
    }

    pub fn threshold(y: f64, color: &str, width: f64) -> Self {
        Self {
            y,
            line: Line::new(color, width).dashed(),
            opacity: 0.8,
            annotation: None,
        }
    }

    pub fn annotate(mut self, text: &str) -> Self {
        self.annotation = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    subplots: Vec<Subplot>,
    traces: Vec<PlacedTrace>,
    shapes: Vec<Value>,
    annotations: Vec<Value>,
    axes: Map<String, Value>,
    layout: Map<String, Value>,
}

impl Figure {
    /// Creates an empty figure on `grid`; titles go to the non-empty cells in row-major order.
    pub fn new(grid: &SubplotGrid, subplot_titles: &[&str]) -> Self {
        let subplots = grid.resolve();

        let mut axes = Map::new();
        for sp in &subplots {
            let Some(ids) = sp.axes else { continue };
            axes.insert(
                axis_key("x", ids.x),
                json!({
                    "domain": sp.x_domain,
                    "anchor": axis_ref("y", ids.y),
                    "gridcolor": GRID_COLOR,
                }),
            );
            axes.insert(
                axis_key("y", ids.y),
                json!({
                    "domain": sp.y_domain,
                    "anchor": axis_ref("x", ids.x),
                    "gridcolor": GRID_COLOR,
                }),
            );
            if let Some(sec) = ids.secondary_y {
                axes.insert(
                    axis_key("y", sec),
                    json!({
                        "anchor": axis_ref("x", ids.x),
                        "overlaying": axis_ref("y", ids.y),
                        "side": "right",
                        "showgrid": false,
                    }),
                );
            }
        }

        let annotations = subplots
            .iter()
            .zip(subplot_titles.iter())
            .map(|(sp, title)| {
                json!({
                    "text": title,
                    "x": (sp.x_domain[0] + sp.x_domain[1]) / 2.0,
                    "y": sp.y_domain[1],
                    "xref": "paper",
                    "yref": "paper",
                    "xanchor": "center",
                    "yanchor": "bottom",
                    "showarrow": false,
                    "font": { "size": 16 },
                })
            })
            .collect();

        let mut layout = Map::new();
        layout.insert("showlegend".into(), json!(true));
        layout.insert("hovermode".into(), json!("x unified"));
        layout.insert("paper_bgcolor".into(), json!("white"));
        layout.insert("plot_bgcolor".into(), json!("white"));

        Self {
            subplots,
            traces: Vec::new(),
            shapes: Vec::new(),
            annotations,
            axes,
            layout,
        }
    }

    pub fn subplot(&self, row: usize, col: usize) -> Option<&Subplot> {
        self.subplots.iter().find(|s| s.row == row && s.col == col)
    }

    #[cfg(test)]
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    fn placement(&self, row: usize, col: usize, secondary_y: bool) -> Placement {
        match self.subplot(row, col) {
            Some(Subplot { axes: Some(ids), .. }) => {
                let y = match (secondary_y, ids.secondary_y) {
                    (true, Some(sec)) => sec,
                    _ => ids.y,
                };
                Placement::Axes {
                    xaxis: axis_ref("x", ids.x),
                    yaxis: axis_ref("y", y),
                }
            }
            Some(sp) => Placement::Domain {
                domain: json!({ "x": sp.x_domain, "y": sp.y_domain }),
            },
            None => Placement::Axes {
                xaxis: "x".into(),
                yaxis: "y".into(),
            },
        }
    }

    pub fn add_trace(&mut self, trace: impl Into<Trace>, row: usize, col: usize) -> &mut Self {
        let placement = self.placement(row, col, false);
        self.traces.push(PlacedTrace {
            trace: trace.into(),
            placement,
        });
        self
    }

    /// Adds a trace on the cell's secondary y axis (primary if the cell has none).
    pub fn add_trace_secondary(
        &mut self,
        trace: impl Into<Trace>,
        row: usize,
        col: usize,
    ) -> &mut Self {
        let placement = self.placement(row, col, true);
        self.traces.push(PlacedTrace {
            trace: trace.into(),
            placement,
        });
        self
    }

    pub fn add_hline(
        &mut self,
        hline: HLine,
        row: usize,
        col: usize,
        secondary_y: bool,
    ) -> &mut Self {
        let Some(ids) = self.subplot(row, col).and_then(|s| s.axes) else {
            return self;
        };
        let y_axis = match (secondary_y, ids.secondary_y) {
            (true, Some(sec)) => sec,
            _ => ids.y,
        };
        let xref = format!("{} domain", axis_ref("x", ids.x));
        let yref = axis_ref("y", y_axis);

        self.shapes.push(json!({
            "type": "line",
            "xref": xref,
            "x0": 0,
            "x1": 1,
            "yref": yref,
            "y0": hline.y,
            "y1": hline.y,
            "line": hline.line,
            "opacity": hline.opacity,
        }));
        if let Some(text) = hline.annotation {
            self.annotations.push(json!({
                "text": text,
                "xref": xref,
                "x": 1,
                "xanchor": "left",
                "yref": yref,
                "y": hline.y,
                "showarrow": false,
            }));
        }
        self
    }

    /// Sets the title (and optional range) of a cell's y axis.
    pub fn update_yaxis(
        &mut self,
        row: usize,
        col: usize,
        secondary_y: bool,
        title: &str,
        range: Option<[f64; 2]>,
    ) -> &mut Self {
        let Some(ids) = self.subplot(row, col).and_then(|s| s.axes) else {
            return self;
        };
        let n = match (secondary_y, ids.secondary_y) {
            (true, Some(sec)) => sec,
            _ => ids.y,
        };
        if let Some(Value::Object(axis)) = self.axes.get_mut(&axis_key("y", n)) {
            axis.insert("title".into(), json!({ "text": title }));
            if let Some(r) = range {
                axis.insert("range".into(), json!(r));
            }
        }
        self
    }

    pub fn update_layout(&mut self, title: &str, title_size: u32, height: u32) -> &mut Self {
        self.layout.insert(
            "title".into(),
            json!({ "text": title, "font": { "size": title_size } }),
        );
        self.layout.insert("height".into(), json!(height));
        self
    }

    /// Full plotly.js figure object (`data` + `layout`).
    pub fn to_json(&self) -> Result<Value, ChartError> {
        let mut layout = self.layout.clone();
        for (k, v) in &self.axes {
            layout.insert(k.clone(), v.clone());
        }
        layout.insert("shapes".into(), Value::Array(self.shapes.clone()));
        layout.insert("annotations".into(), Value::Array(self.annotations.clone()));

        Ok(json!({
            "data": serde_json::to_value(&self.traces)?,
            "layout": Value::Object(layout),
        }))
    }

    /// Renders a standalone HTML document loading plotly.js from its CDN.
    pub fn to_html(&self, page_title: &str) -> Result<String, ChartError> {
        let figure = self.to_json()?;
        // Keep the embedded JSON from closing the script element.
        let data = serde_json::to_string(&figure["data"])?.replace("</", "<\\/");
        let layout = serde_json::to_string(&figure["layout"])?.replace("</", "<\\/");

        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        output.push_str("<meta charset=\"UTF-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(page_title)));
        output.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_CDN));
        output.push_str("</head>\n<body>\n");
        output.push_str("<div id=\"figure\" style=\"width:100%;\"></div>\n");
        output.push_str("<script>\n");
        output.push_str(&format!(
            "Plotly.newPlot(\"figure\", {}, {}, {{\"responsive\": true}});\n",
            data, layout
        ));
        output.push_str("</script>\n</body>\n</html>\n");
        Ok(output)
    }

    pub fn write_html(&self, path: &Path, page_title: &str) -> Result<(), ChartError> {
        let html = self.to_html(page_title)?;
        fs::write(path, html)?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..n).map(|i| start + chrono::Duration::days(i as i64)).collect()
    }

    #[test]
    fn test_grid_domains_do_not_overlap() {
        let grid = SubplotGrid::new(3, 1)
            .row_heights(&[0.35, 0.3, 0.35])
            .vertical_spacing(0.08);
        let cells = grid.resolve();
        assert_eq!(cells.len(), 3);
        assert!((cells[0].y_domain[1] - 1.0).abs() < 1e-12);
        assert!(cells[2].y_domain[0].abs() < 1e-9);
        for pair in cells.windows(2) {
            let gap = pair[0].y_domain[0] - pair[1].y_domain[1];
            assert!((gap - 0.08).abs() < 1e-9);
        }
        assert_eq!(cells[1].axes, Some(AxisIds { x: 2, y: 2, secondary_y: None }));
    }

    #[test]
    fn test_grid_colspan_secondary_and_domain_cells() {
        let grid = SubplotGrid::new(3, 2)
            .horizontal_spacing(0.15)
            .spec(1, 1, Some(CellSpec::xy().colspan(2).secondary_y()))
            .spec(1, 2, None)
            .spec(3, 1, Some(CellSpec::domain()));
        let cells = grid.resolve();
        assert_eq!(cells.len(), 5);

        let top = &cells[0];
        assert_eq!(top.x_domain[0], 0.0);
        assert!((top.x_domain[1] - 1.0).abs() < 1e-12);
        assert_eq!(top.axes, Some(AxisIds { x: 1, y: 1, secondary_y: Some(2) }));

        let second = &cells[1];
        assert_eq!(second.axes.unwrap().y, 3);
        assert!((second.x_domain[1] - 0.425).abs() < 1e-12);

        let table = cells.iter().find(|c| c.row == 3 && c.col == 1).unwrap();
        assert_eq!(table.axes, None);
    }

    #[test]
    fn test_trace_placement_and_hline() {
        let grid = SubplotGrid::new(2, 1).spec(1, 1, Some(CellSpec::xy().secondary_y()));
        let mut fig = Figure::new(&grid, &["Top", "Bottom"]);
        fig.add_trace(Scatter::from_values(&dates(3), &[1.0, 2.0, 3.0]).name("a"), 1, 1)
            .add_trace_secondary(Scatter::from_values(&dates(3), &[4.0, 5.0, 6.0]).name("b"), 1, 1)
            .add_trace(Scatter::new(dates(2), vec![None, Some(0.5)]), 2, 1)
            .add_hline(HLine::threshold(5.0, "darkred", 2.5).annotate("limit"), 1, 1, true)
            .update_yaxis(2, 1, false, "Correlation", Some([-1.0, 1.0]));

        let json = fig.to_json().unwrap();
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["type"], "scatter");
        assert_eq!(data[0]["xaxis"], "x");
        assert_eq!(data[1]["yaxis"], "y2");
        assert_eq!(data[2]["yaxis"], "y3");
        assert_eq!(data[2]["y"][0], Value::Null);
        assert_eq!(data[0]["x"][0], "2025-01-01");

        let layout = &json["layout"];
        assert_eq!(layout["yaxis2"]["overlaying"], "y");
        assert_eq!(layout["yaxis3"]["range"], json!([-1.0, 1.0]));
        assert_eq!(layout["shapes"][0]["yref"], "y2");
        assert_eq!(layout["shapes"][0]["xref"], "x domain");
        let texts: Vec<&str> = layout["annotations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|a| a["text"].as_str())
            .collect();
        assert_eq!(texts, vec!["Top", "Bottom", "limit"]);
    }

    #[test]
    fn test_table_and_heatmap_serialization() {
        let grid = SubplotGrid::new(1, 2).spec(1, 2, Some(CellSpec::domain()));
        let mut fig = Figure::new(&grid, &[]);
        fig.add_trace(
            Heatmap::correlation(
                &["A", "B"],
                vec![vec![Some(1.0), Some(-0.25)], vec![Some(-0.25), Some(1.0)]],
            ),
            1,
            1,
        );
        fig.add_trace(
            Table::from_rows(&["Metric", "Value"], &[vec!["HY".into(), "3.10%".into()]]),
            1,
            2,
        );

        let json = fig.to_json().unwrap();
        let heat = &json["data"][0];
        assert_eq!(heat["type"], "heatmap");
        assert_eq!(heat["text"][0][1], "-0.25");
        assert_eq!(heat["xaxis"], "x");

        let table = &json["data"][1];
        assert_eq!(table["type"], "table");
        assert_eq!(table["header"]["values"][0], "<b>Metric</b>");
        assert_eq!(table["cells"]["values"][1][0], "3.10%");
        assert!(table.get("xaxis").is_none());
        assert!(table["domain"]["x"].is_array());
    }

    #[test]
    fn test_write_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.html");
        let mut fig = Figure::new(&SubplotGrid::new(1, 1), &["</script> title"]);
        fig.add_trace(Scatter::from_values(&dates(2), &[1.0, 2.0]).name("x"), 1, 1)
            .update_layout("<b>Demo</b>", 20, 600);
        fig.write_html(&path, "Demo & test").unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("<title>Demo &amp; test</title>"));
        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("<\\/script> title"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
