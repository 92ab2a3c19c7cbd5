use leptos::prelude::*;

use super::fellowship_graph::{FellowshipGraph, GraphModel, trust_label};
use crate::api::PlanResponse;

/// Vendors, total cost and the fellowship graph for one planner answer.
#[component]
pub fn PlanResults(plan: PlanResponse) -> impl IntoView {
	let PlanResponse { result, raw } = plan;

	let agents = if result.workflow_agents.is_empty() {
		let pretty = serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string());
		view! { <pre class="raw-result">{pretty}</pre> }.into_any()
	} else {
		let items = result
			.workflow_agents
			.into_iter()
			.map(|agent| {
				view! {
					<li class="agent">
						<strong>{agent.name}</strong>
						" "
						<span class="muted">"(" {agent.location} ")"</span>
						<br />
						<span>"Capabilities: " {agent.capabilities.join(", ")}</span>
						<br />
						<span>"Trust Score: " {trust_label(agent.trust_score)}</span>
					</li>
				}
			})
			.collect_view();
		view! { <ul class="agent-list">{items}</ul> }.into_any()
	};

	let total = result.total_cost.map(|cost| {
		view! {
			<div class="total-cost">
				<span>"Total Cost: "</span>
				<span class="cost">{cost.to_string()}</span>
			</div>
		}
	});

	view! {
		<div class="panel results">
			<h3>"Best Vendors:"</h3>
			{agents}
			{total}
			<FellowshipGraph model=GraphModel::from_optional(result.fellowship_graph) />
		</div>
	}
}
