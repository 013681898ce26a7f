use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Ui, Vec2};

use crate::color::{coolwarm, text_color_for};
use crate::data::aggregate::CorrelationMatrix;

const LABEL_WIDTH: f32 = 90.0;
const LABEL_HEIGHT: f32 = 24.0;
const LEGEND_WIDTH: f32 = 70.0;
const LEGEND_STEPS: usize = 40;

// ---------------------------------------------------------------------------
// Annotated correlation heatmap
// ---------------------------------------------------------------------------

/// Render `matrix` as a grid of coloured cells annotated with the
/// coefficient, plus a colour bar on the right.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.len();
    if matrix.is_empty() {
        ui.label("No columns to correlate.");
        return;
    }

    let available = ui.available_width() - LABEL_WIDTH - LEGEND_WIDTH;
    let cell = (available / n as f32).clamp(32.0, 80.0);
    let grid = cell * n as f32;
    let size = Vec2::new(LABEL_WIDTH + grid + LEGEND_WIDTH, grid + LABEL_HEIGHT);

    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);
    let origin = rect.min + Vec2::new(LABEL_WIDTH, 0.0);

    for i in 0..n {
        for j in 0..n {
            let v = matrix.get(i, j);
            let cell_rect = Rect::from_min_size(
                origin + Vec2::new(j as f32 * cell, i as f32 * cell),
                Vec2::splat(cell),
            );
            let fill = coolwarm(v);
            painter.rect_filled(cell_rect.shrink(0.5), 0.0, fill);
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                format_coefficient(v),
                font.clone(),
                text_color_for(fill),
            );
        }
    }

    for (k, name) in matrix.columns.iter().enumerate() {
        let mid = (k as f32 + 0.5) * cell;
        painter.text(
            Pos2::new(origin.x - 6.0, origin.y + mid),
            Align2::RIGHT_CENTER,
            name,
            font.clone(),
            text_color,
        );
        painter.text(
            Pos2::new(origin.x + mid, origin.y + grid + 4.0),
            Align2::CENTER_TOP,
            name,
            font.clone(),
            text_color,
        );
    }

    // colour bar, +1 at the top
    let bar_left = origin.x + grid + 12.0;
    let step_h = grid / LEGEND_STEPS as f32;
    for s in 0..LEGEND_STEPS {
        let v = 1.0 - 2.0 * (s as f64 + 0.5) / LEGEND_STEPS as f64;
        let r = Rect::from_min_size(
            Pos2::new(bar_left, origin.y + s as f32 * step_h),
            Vec2::new(14.0, step_h + 0.5),
        );
        painter.rect_filled(r, 0.0, coolwarm(v));
    }
    for (v, y) in [(1.0, 0.0), (0.0, grid / 2.0), (-1.0, grid)] {
        painter.text(
            Pos2::new(bar_left + 18.0, origin.y + y),
            Align2::LEFT_CENTER,
            format_coefficient(v),
            font.clone(),
            text_color,
        );
    }

    if let Some(pos) = response.hover_pos() {
        let rel = pos - origin;
        if rel.x >= 0.0 && rel.y >= 0.0 && rel.x < grid && rel.y < grid {
            let (i, j) = ((rel.y / cell) as usize, (rel.x / cell) as usize);
            response.on_hover_text(format!(
                "{} × {}: {}",
                matrix.columns[i],
                matrix.columns[j],
                format_coefficient(matrix.get(i, j))
            ));
        }
    }
}

/// Two decimals, `nan` for undefined coefficients.
pub fn format_coefficient(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{v:.2}")
    }
}
