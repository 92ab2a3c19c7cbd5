use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::api::{AgentSummary, ApiClient, FeedbackRequest};
use crate::config::use_config;

const DEFAULT_RATING: f64 = 0.8;

/// Agent feedback form backed by `/agents` and `/agents/feedback`.
#[component]
pub fn FeedbackForm() -> impl IntoView {
	let config = use_config();
	let (agents, set_agents) = signal(Vec::<AgentSummary>::new());
	let (selected, set_selected) = signal(String::new());
	let (rating, set_rating) = signal(DEFAULT_RATING);
	let (comment, set_comment) = signal(String::new());
	let (loading, set_loading) = signal(false);
	let (outcome, set_outcome) = signal(None::<String>);

	let registry = ApiClient::new(config.clone());
	spawn_local(async move {
		match registry.agents().await {
			Ok(list) => {
				if let Some(id) = list.first().and_then(|a| a.id.clone()) {
					let _ = set_selected.try_set(id);
				}
				let _ = set_agents.try_set(list);
			}
			Err(err) => error!("loading agents failed: {err}"),
		}
	});

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		set_loading.set(true);
		set_outcome.set(None);
		let feedback = FeedbackRequest {
			agent_id: selected.get_untracked(),
			rating: rating.get_untracked(),
			comment: comment.get_untracked(),
		};
		let client = ApiClient::new(config.clone());
		spawn_local(async move {
			let shown = match client.submit_feedback(&feedback).await {
				Ok(body) => serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()),
				Err(err) => {
					error!("feedback for {} failed: {err}", feedback.agent_id);
					serde_json::json!({ "error": err.to_string() }).to_string()
				}
			};
			set_outcome.set(Some(shown));
			set_loading.set(false);
		});
	};

	let options = move || {
		agents
			.get()
			.into_iter()
			.filter_map(|agent| {
				let id = agent.id?;
				let label = format!("{} ({})", agent.name, agent.location);
				let current = id.clone();
				Some(view! {
					<option value=id selected=move || selected.get() == current>
						{label}
					</option>
				})
			})
			.collect_view()
	};

	view! {
		<form class="panel feedback-form" on:submit=on_submit>
			<h2>"Leave Feedback for a Vendor"</h2>
			<label>
				"Select Agent:"
				<select on:change=move |ev| set_selected.set(event_target_value(&ev))>
					{options}
				</select>
			</label>
			<label>
				"Rating: "
				<span class="strong">{move || rating.get().to_string()}</span>
				<input
					type="range"
					min="0"
					max="1"
					step="0.01"
					prop:value=move || rating.get().to_string()
					on:input=move |ev| {
						if let Ok(value) = event_target_value(&ev).parse::<f64>() {
							set_rating.set(value);
						}
					}
				/>
			</label>
			<label>
				"Comment:"
				<textarea
					rows="3"
					placeholder="Describe your experience..."
					prop:value=move || comment.get()
					on:input=move |ev| set_comment.set(event_target_value(&ev))
				></textarea>
			</label>
			<button type="submit" disabled=move || loading.get() || selected.get().is_empty()>
				{move || if loading.get() { "Submitting..." } else { "Submit Feedback" }}
			</button>
			{move || {
				outcome
					.get()
					.map(|text| {
						view! {
							<div class="result">
								<h4>"Result:"</h4>
								<pre>{text}</pre>
							</div>
						}
					})
			}}
		</form>
	}
}
