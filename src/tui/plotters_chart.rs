//! Plotters-powered scaling chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`, through the same `draw_figure` routine that
//! writes the SVG.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{ChartStyle, Figure, draw_figure};

/// Smallest area Plotters can lay the chart out in.
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 10;

pub struct ScalingChart<'a> {
    pub figure: &'a Figure,
    pub style: ChartStyle,
}

impl<'a> ScalingChart<'a> {
    pub fn new(figure: &'a Figure) -> Self {
        Self {
            figure,
            style: ChartStyle::terminal(),
        }
    }
}

impl Widget for ScalingChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let style = self.style;
        let widget = widget_fn(move |root| {
            draw_figure(&root, figure, &style)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
