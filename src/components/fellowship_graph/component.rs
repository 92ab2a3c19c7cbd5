use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::audit::{AuditFormat, AuditTrailClient, ExportNotices};
use super::contract::ContractView;
use super::frame_loop::{AnimationFrames, FrameLoop};
use super::layout::{GraphLayout, NODE_RADIUS};
use super::model::GraphModel;
use super::panels::{ContractModal, ProvenanceModal};
use super::provenance::ProvenanceRecord;
use super::render;
use super::state::{GraphSessionState, Panel};
use crate::api::ApiClient;
use crate::config::use_config;
use crate::download::BrowserDownloader;

const BUTTON_WIDTH: f64 = 90.0;

/// Renders one fellowship graph with its detail panels and audit export.
///
/// Mount a fresh instance per planner result: hover and panel selection live
/// inside the instance and are dropped with it.
#[component]
pub fn FellowshipGraph(model: GraphModel) -> impl IntoView {
	if model.is_empty() {
		return view! { <div class="graph-empty">"No workflow graph to display."</div> }
			.into_any();
	}

	let config = use_config();
	let layout = GraphLayout::compute(&model);
	let (width, height) = (layout.width, layout.height);
	let graph = StoredValue::new(model);
	let (panel, set_panel) = signal(None::<Panel>);
	let (notices, set_notices) = signal(ExportNotices::default());

	let export = move |format: AuditFormat| {
		let config = config.clone();
		spawn_local(async move {
			let client = AuditTrailClient::new(config.clone(), ApiClient::new(config), BrowserDownloader);
			let model = graph.get_value();
			let outcome = client.export(&model, format).await;
			if let Err(err) = &outcome {
				error!("audit export ({format:?}) failed: {err}");
			}
			// the graph may have been replaced while the request was in flight
			let _ = set_notices.try_update(|notices| notices.record(format, &outcome));
		});
	};
	let export_json = export.clone();
	let export_pdf = export;

	let node_buttons = layout
		.nodes
		.iter()
		.enumerate()
		.map(|(i, p)| {
			let left = p.x - BUTTON_WIDTH / 2.0;
			let top = p.y + NODE_RADIUS + 14.0;
			view! {
				<button
					class="graph-button contract-button"
					style={button_style(left, top)}
					on:click=move |_| set_panel.set(Some(Panel::Contract(i)))
				>
					"View Contract"
				</button>
				<button
					class="graph-button provenance-button"
					style={button_style(left, top + 34.0)}
					on:click=move |_| set_panel.set(Some(Panel::NodeProvenance(i)))
				>
					"View Provenance"
				</button>
			}
		})
		.collect_view();

	let edge_buttons = layout
		.edges
		.iter()
		.enumerate()
		.map(|(i, e)| {
			view! {
				<button
					class="graph-button edge-provenance-button"
					style={button_style(e.midpoint.x - BUTTON_WIDTH / 2.0, e.midpoint.y + 30.0)}
					on:click=move |_| set_panel.set(Some(Panel::EdgeProvenance(i)))
				>
					"Edge Provenance"
				</button>
			}
		})
		.collect_view();

	// Views are rebuilt from the model whenever a panel opens.
	let open_panel = move || {
		let selected = panel.get()?;
		let close = Callback::new(move |_: ()| set_panel.set(None));
		graph.with_value(|model| match selected {
			Panel::Contract(i) => {
				let contract = ContractView::project(model.node(i)?.data_contract.as_ref())?;
				Some(view! { <ContractModal contract=contract on_close=close /> }.into_any())
			}
			Panel::NodeProvenance(i) => {
				let record = ProvenanceRecord::from_node(model.node(i)?);
				Some(view! { <ProvenanceModal record=record on_close=close /> }.into_any())
			}
			Panel::EdgeProvenance(i) => {
				let record = ProvenanceRecord::from_edge(&model.edge(i)?.edge);
				Some(view! { <ProvenanceModal record=record on_close=close /> }.into_any())
			}
		})
	};

	view! {
		<div class="fellowship-graph">
			<div class="audit-actions">
				<button class="audit-button" on:click=move |_| export_json(AuditFormat::Json)>
					"Download Audit Log"
				</button>
				<button class="audit-button pdf" on:click=move |_| export_pdf(AuditFormat::Pdf)>
					"Download Audit Log (PDF)"
				</button>
			</div>
			{move || {
				notices
					.get()
					.messages()
					.into_iter()
					.map(|msg| view! { <p class="notice error">{msg}</p> })
					.collect_view()
			}}
			<h4 class="graph-title">"Workflow Visualization"</h4>
			<div
				class="graph-stage"
				style={format!("position: relative; width: {width}px; height: {height}px; margin: 0 auto;")}
			>
				<GraphCanvas graph=graph />
				{node_buttons}
				{edge_buttons}
			</div>
			{open_panel}
		</div>
	}
	.into_any()
}

fn button_style(left: f64, top: f64) -> String {
	format!("position: absolute; left: {left}px; top: {top}px; width: {BUTTON_WIDTH}px;")
}

/// Canvas layer: draws the graph every animation frame and tracks hover.
///
/// The frame callback is owned by a [`FrameLoop`] stored with this component,
/// so unmounting cancels the loop and releases the session state and the
/// 2d context it captured.
#[component]
fn GraphCanvas(graph: StoredValue<GraphModel>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphSessionState>>> = Rc::new(RefCell::new(None));
	let frames: FrameLoop<Closure<dyn FnMut()>, _> = FrameLoop::new(AnimationFrames);
	let frame_handle = frames.handle();
	let _frames = StoredValue::new_local(frames);
	let state_init = state.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let session = GraphSessionState::new(graph.get_value());
		canvas.set_width(session.layout.width as u32);
		canvas.set_height(session.layout.height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("2d context has unexpected type");
					return;
				}
			},
			_ => {
				warn!("canvas 2d context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = Some(session);

		let (state_anim, next_frame) = (state_init.clone(), frame_handle.clone());
		let installed = frame_handle.install(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			next_frame.schedule();
		}));
		if installed {
			frame_handle.schedule();
		}
	});

	let local_position = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
		}
	};

	let state_ml = state;
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="fellowship-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="position: absolute; left: 0; top: 0; display: block; border-radius: 20px;"
		/>
	}
}
