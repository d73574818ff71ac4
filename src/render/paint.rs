use egui::{Align2, Color32, FontId, Painter, Shape, Stroke};

use super::{BoxItem, Caption, FramePlan};

const CAPTION_BACKING: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 170);
const CAPTION_TEXT: Color32 = Color32::from_rgb(240, 240, 245);

/// Paint a planned frame: edges, then boxes far → near, then the caption.
pub fn paint_frame(painter: &Painter, plan: &FramePlan) {
    for edge in &plan.edges {
        painter.line_segment([edge.from, edge.to], Stroke::new(1.0, edge.color));
    }
    for item in &plan.boxes {
        paint_box(painter, item);
    }
    if let Some(caption) = &plan.caption {
        paint_caption(painter, caption);
    }
}

fn paint_box(painter: &Painter, item: &BoxItem) {
    let face = item.footprint.face;
    let colors = &item.colors;

    if item.show_sides {
        let off = item.footprint.side_offset();
        let thin = Stroke::new(colors.edge.width * 0.5, colors.edge.color);
        // top
        painter.add(Shape::convex_polygon(
            vec![face.left_top(), face.right_top(), face.right_top() + off, face.left_top() + off],
            colors.top,
            thin,
        ));
        // right
        painter.add(Shape::convex_polygon(
            vec![face.right_top(), face.right_bottom(), face.right_bottom() + off, face.right_top() + off],
            colors.side,
            thin,
        ));
    }

    painter.rect(face, 2.0, colors.face, colors.edge);

    if let Some(label) = &item.label {
        painter.text(
            face.center(),
            Align2::CENTER_CENTER,
            &label.text,
            FontId::proportional(label.font_size),
            label.color,
        );
    }
}

fn paint_caption(painter: &Painter, caption: &Caption) {
    painter.rect_filled(caption.backing, 4.0, CAPTION_BACKING);
    painter.text(
        caption.backing.center(),
        Align2::CENTER_CENTER,
        &caption.text,
        FontId::proportional(caption.font_size),
        CAPTION_TEXT,
    );
}
