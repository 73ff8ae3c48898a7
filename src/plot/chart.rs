//! Plotters drawing of a [`Figure`].
//!
//! `draw_figure` is generic over the Plotters backend: the SVG writer and the
//! terminal viewer both call it, with a [`ChartStyle`] tuned for each surface.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::figure::{Figure, POINT_COLOR};
use crate::report::format_thousands;

/// How observed points are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Filled circle with the given pixel radius.
    Circle(u32),
    /// Single coloured cell. The ratatui backend scales circle radii wrongly,
    /// so the terminal uses this instead.
    Pixel,
}

/// Backend-specific look of the chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub background: Option<RGBColor>,
    pub foreground: RGBColor,
    pub legend_background: RGBAColor,
    pub title_size: f64,
    pub desc_size: f64,
    pub tick_size: f64,
    pub legend_size: f64,
    pub annotation_size: f64,
    /// Vertical distance between annotation lines, in pixels.
    pub annotation_line_height: i32,
    /// Draw a translucent box behind annotations.
    pub annotation_box: bool,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub marker: Marker,
    pub line_width: u32,
}

impl ChartStyle {
    /// Print-sized fonts on a white page.
    pub fn svg() -> Self {
        Self {
            background: Some(WHITE),
            foreground: BLACK,
            legend_background: WHITE.mix(0.8),
            title_size: 32.0,
            desc_size: 28.0,
            tick_size: 22.0,
            legend_size: 20.0,
            annotation_size: 22.0,
            annotation_line_height: 28,
            annotation_box: true,
            margin: 20,
            x_label_area: 70,
            y_label_area: 110,
            marker: Marker::Circle(7),
            line_width: 3,
        }
    }

    /// Compact, high-contrast settings for a terminal cell grid.
    pub fn terminal() -> Self {
        Self {
            background: None,
            foreground: WHITE,
            legend_background: BLACK.mix(1.0),
            title_size: 12.0,
            desc_size: 10.0,
            tick_size: 10.0,
            legend_size: 10.0,
            annotation_size: 10.0,
            annotation_line_height: 4,
            annotation_box: false,
            margin: 1,
            x_label_area: 3,
            y_label_area: 8,
            marker: Marker::Pixel,
            line_width: 1,
        }
    }
}

/// Draw the figure onto any Plotters drawing area.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &ChartStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(background) = style.background {
        root.fill(&background)?;
    }
    let fg = style.foreground;
    let (x0, x1) = figure.x_range;
    let (y0, y1) = figure.y_range;

    let mut chart = ChartBuilder::on(root)
        .caption(
            &figure.title,
            (FontFamily::SansSerif, style.title_size).into_font().color(&fg),
        )
        .margin(style.margin)
        .set_label_area_size(LabelAreaPosition::Left, style.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, style.x_label_area)
        .build_cartesian_2d(
            (x0..x1).log_scale().with_key_points(figure.x_ticks.clone()),
            (y0..y1).log_scale().with_key_points(figure.y_ticks.clone()),
        )?;

    // No grid, only the fixed ticks.
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x_desc.as_str())
        .y_desc(figure.y_desc.as_str())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format_thousands(*v))
        .label_style((FontFamily::SansSerif, style.tick_size).into_font().color(&fg))
        .axis_desc_style((FontFamily::SansSerif, style.desc_size).into_font().color(&fg))
        .axis_style(&fg)
        .draw()?;

    // 1) Every observation.
    match style.marker {
        Marker::Circle(radius) => {
            chart
                .draw_series(
                    figure
                        .points
                        .iter()
                        .map(|&p| Circle::new(p, radius, POINT_COLOR.filled())),
                )?
                .label("Data Points")
                .legend(move |p| Circle::new(p, radius, POINT_COLOR.filled()));
        }
        Marker::Pixel => {
            chart
                .draw_series(figure.points.iter().map(|&p| Pixel::new(p, POINT_COLOR)))?
                .label("Data Points")
                .legend(|p| Pixel::new(p, POINT_COLOR));
        }
    }

    // 2) One fitted line per segment, over that segment only.
    let width = style.line_width;
    for layer in &figure.fits {
        let color = layer.color;
        chart
            .draw_series(LineSeries::new(layer.curve.iter().copied(), color.stroke_width(width)))?
            .label(layer.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(width)));
    }

    // 3) Equation + R² text at fixed plot-area fractions.
    for layer in &figure.fits {
        let anchor = figure.axes_to_data(layer.anchor.0, layer.anchor.1);
        let font = (FontFamily::SansSerif, style.annotation_size)
            .into_font()
            .color(&layer.color);

        if style.annotation_box {
            let mut box_w = 0u32;
            for line in &layer.annotation {
                let (w, _) = chart.plotting_area().estimate_text_size(line, &font)?;
                box_w = box_w.max(w);
            }
            let pad = 6;
            let box_h = style.annotation_line_height * layer.annotation.len() as i32;
            chart.draw_series(std::iter::once(
                EmptyElement::at(anchor)
                    + Rectangle::new(
                        [(0, 0), (box_w as i32 + 2 * pad, box_h + pad)],
                        WHITE.mix(0.5).filled(),
                    ),
            ))?;
        }

        for (i, line) in layer.annotation.iter().enumerate() {
            let offset = (6, 3 + i as i32 * style.annotation_line_height);
            chart.draw_series(std::iter::once(
                EmptyElement::at(anchor) + Text::new(line.clone(), offset, font.clone()),
            ))?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(&style.legend_background)
        .border_style(&fg)
        .label_font((FontFamily::SansSerif, style.legend_size).into_font().color(&fg))
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    Ok(())
}

/// Render the figure into an SVG file.
pub fn write_svg(path: &Path, figure: &Figure, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();

    draw_figure(&root, figure, &ChartStyle::svg())
        .map_err(|e| AppError::new(4, format!("Failed to draw figure: {e}")))?;
    root.present()
        .map_err(|e| AppError::new(2, format!("Failed to write figure '{}': {e}", path.display())))?;

    log::info!("Wrote figure to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartConfig, Dataset};
    use crate::fit::{fit_segments, resolve_segments};
    use crate::math::log_transform;

    fn figure() -> Figure {
        let nbf = vec![400.0, 500.0, 600.0, 700.0, 800.0, 1000.0, 1200.0, 1400.0, 1600.0];
        let time = nbf.iter().map(|x: &f64| 0.05 * x.powf(1.95)).collect();
        let ds = Dataset::new(nbf, time, "test").unwrap();
        let logs = log_transform(&ds).unwrap();
        let segments = resolve_segments(&crate::domain::default_segments(), ds.len()).unwrap();
        let fits = fit_segments(&ds, &logs, &segments).unwrap();
        Figure::build(&ds, &fits, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn svg_contains_title_ticks_and_annotations() {
        let path = std::env::temp_dir().join(format!("alkfit-chart-{}.svg", std::process::id()));
        write_svg(&path, &figure(), (1000, 800)).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Log-Log Plot of Time vs Nbf for Alkane Chain"));
        assert!(svg.contains("Data Points"));
        assert!(svg.contains("10,000"));
        assert!(svg.contains("1600"));
        assert!(svg.contains("R² = 1.0000"));
    }

    #[test]
    fn unwritable_svg_path_is_an_io_error() {
        let err = write_svg(Path::new("/nonexistent/dir/fig.svg"), &figure(), (400, 300)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
