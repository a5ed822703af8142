//! Radial menu preview pane.
//!
//! Approximates the kiosk's circular menu rendering: the selected menu's
//! center label in the middle, its options arranged around a circle in their
//! resolved display colors.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Circle, Line},
        Block, Borders,
    },
    Frame,
};

use crate::models::RgbColor;
use crate::services::TreeNode;
use crate::tui::Theme;

const RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 0.72;

fn node_color(node: &TreeNode, theme: &Theme) -> Color {
    RgbColor::from_hex(&node.display_color)
        .map(|c| c.to_ratatui_color())
        .unwrap_or(theme.text_muted)
}

/// Renders the radial preview of `menu` into `area`.
pub fn render_preview(f: &mut Frame, area: Rect, menu: Option<&TreeNode>, theme: &Theme) {
    let title = menu.map_or(" Preview ".to_string(), |node| {
        format!(" Preview: {} ", node.key())
    });
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.primary));

    let Some(menu) = menu else {
        f.render_widget(block, area);
        return;
    };

    let ring_color = node_color(menu, theme);
    let center_label = menu.item.display_label();
    let options: Vec<(String, Color)> = menu
        .children
        .iter()
        .map(|child| {
            let label = child.item.display_label();
            let label = if label.is_empty() {
                child.key().to_string()
            } else {
                label
            };
            (label, node_color(child, theme))
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.3, 1.3])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RADIUS,
                color: ring_color,
            });

            let count = options.len();
            for (i, (label, color)) in options.iter().enumerate() {
                // Slices start at 12 o'clock and run clockwise
                let slice = std::f64::consts::TAU / count.max(1) as f64;
                let angle = std::f64::consts::FRAC_PI_2 - slice * i as f64;

                // Slice boundary spoke
                let boundary = angle + slice / 2.0;
                ctx.draw(&Line {
                    x1: 0.35 * boundary.cos(),
                    y1: 0.35 * boundary.sin(),
                    x2: RADIUS * boundary.cos(),
                    y2: RADIUS * boundary.sin(),
                    color: ring_color,
                });

                let x = LABEL_RADIUS * angle.cos();
                let y = LABEL_RADIUS * angle.sin();
                ctx.print(x, y, TextLine::styled(label.clone(), Style::default().fg(*color)));
            }

            if !center_label.is_empty() {
                ctx.print(
                    0.0,
                    0.0,
                    TextLine::styled(center_label.clone(), Style::default().fg(ring_color)),
                );
            }
        });

    f.render_widget(canvas, area);
}
