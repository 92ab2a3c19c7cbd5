use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::NODE_RADIUS;
use super::state::GraphSessionState;
use super::types::{Role, trust_label};

const EDGE_COLOR: &str = "136, 136, 136";
const ARROW_SIZE: f64 = 10.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &GraphSessionState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.layout.width, state.layout.height);
	ctx.clear_rect(0.0, 0.0, w, h);
	ctx.set_fill_style_str("#f8fafc");
	ctx.fill_rect(0.0, 0.0, w, h);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	if let Some(idx) = state.hover.node {
		draw_tooltip(state, ctx, idx);
	}
}

fn draw_edges(state: &GraphSessionState, ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (8.0, 8.0);
	let dash_offset = -(state.flow_time * 13.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for (resolved, geom) in state.model.edges().iter().zip(&state.layout.edges) {
		let (x1, y1, x2, y2) = (geom.from.x, geom.from.y, geom.to.x, geom.to.y);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted =
			state.is_highlighted(resolved.from) && state.is_highlighted(resolved.to);
		let alpha = if is_highlighted {
			0.8 + 0.2 * t
		} else {
			0.8 - 0.5 * t
		};

		ctx.set_stroke_style_str(&format!("rgba({EDGE_COLOR}, {alpha})"));
		ctx.set_line_width(3.5);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + ARROW_SIZE),
			y2 - uy * (NODE_RADIUS + ARROW_SIZE),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba({EDGE_COLOR}, {alpha})"));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		// hand-off label above the midpoint
		ctx.set_fill_style_str("#22223b");
		ctx.set_font("bold 15px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&resolved.edge.handoff, geom.midpoint.x, geom.midpoint.y - 24.0);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &GraphSessionState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (idx, (node, pos)) in state.model.nodes().iter().zip(&state.layout.nodes).enumerate() {
		let color = Role::from_label(&node.role).color();
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let radius = if state.is_hovered(idx) {
			NODE_RADIUS * (1.0 + 0.08 * t)
		} else {
			NODE_RADIUS
		};
		ctx.set_global_alpha(if dimmed { 1.0 - 0.5 * t } else { 1.0 });

		if let Ok(gradient) =
			ctx.create_radial_gradient(pos.x, pos.y, 0.0, pos.x, pos.y, radius * 1.6)
		{
			let _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.9)");
			let _ = gradient.add_color_stop(1.0, "rgba(224, 231, 239, 0.7)");
			ctx.begin_path();
			let _ = ctx.arc(pos.x, pos.y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(4.0);
		ctx.stroke();

		ctx.begin_path();
		let _ = ctx.arc(pos.x, pos.y, radius - 7.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		ctx.set_text_align("center");
		ctx.set_fill_style_str("#fff");
		ctx.set_font("bold 18px sans-serif");
		let _ = ctx.fill_text(&node.role, pos.x, pos.y - 8.0);
		ctx.set_fill_style_str("#e9ecef");
		ctx.set_font("500 14px sans-serif");
		let _ = ctx.fill_text(&node.name, pos.x, pos.y + 20.0);
		ctx.set_global_alpha(1.0);
	}
}

fn draw_tooltip(state: &GraphSessionState, ctx: &CanvasRenderingContext2d, idx: usize) {
	let (Some(node), Some(pos)) = (state.model.node(idx), state.layout.nodes.get(idx)) else {
		return;
	};
	let top = pos.y - NODE_RADIUS - 78.0;
	ctx.set_fill_style_str("#fff");
	ctx.set_stroke_style_str("#ddd");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.rect(pos.x - 100.0, top, 200.0, 76.0);
	ctx.fill();
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_fill_style_str("#222");
	ctx.set_font("bold 15px sans-serif");
	let _ = ctx.fill_text(&node.name, pos.x, top + 20.0);
	ctx.set_fill_style_str("#555");
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text(&format!("Location: {}", node.location), pos.x, top + 38.0);
	let _ = ctx.fill_text(&format!("Trust: {}", trust_label(node.trust_score)), pos.x, top + 54.0);
	let _ = ctx.fill_text(&format!("Cost: {}", node.cost_per_task), pos.x, top + 70.0);
}
