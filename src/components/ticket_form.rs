use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::api::{ApiClient, PlanResponse, RepairTicket};
use crate::config::use_config;

const LOCATIONS: &[&str] = &[
	"India", "EU", "USA", "Japan", "LATAM", "Asia", "Germany", "Brazil", "Global",
];
const DEFAULT_LOCATION: &str = "Global";
const DEFAULT_BUDGET: f64 = 500.0;

/// Repair request form. Hands each planner answer to `on_results`.
#[component]
pub fn TicketForm(on_results: Callback<PlanResponse>) -> impl IntoView {
	let config = use_config();
	let (location, set_location) = signal(DEFAULT_LOCATION.to_owned());
	let (budget, set_budget) = signal(DEFAULT_BUDGET);
	let (description, set_description) = signal(String::new());
	let (loading, set_loading) = signal(false);
	let (failure, set_failure) = signal(None::<String>);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		set_loading.set(true);
		set_failure.set(None);

		let ticket = RepairTicket::new(
			js_sys::Date::now() as u64,
			&location.get_untracked(),
			&description.get_untracked(),
			budget.get_untracked(),
		);
		let client = ApiClient::new(config.clone());
		spawn_local(async move {
			info!("planning {} for {:?}", ticket.ticket_id, ticket.required_capabilities);
			match client.plan(&ticket).await {
				Ok(plan) => on_results.run(plan),
				Err(err) => {
					error!("planning {} failed: {err}", ticket.ticket_id);
					set_failure.set(Some(format!("Error fetching agents: {err}")));
				}
			}
			set_loading.set(false);
		});
	};

	let options = LOCATIONS
		.iter()
		.map(|&loc| {
			view! {
				<option value=loc selected=move || location.get() == loc>
					{loc}
				</option>
			}
		})
		.collect_view();

	view! {
		<form class="panel ticket-form" on:submit=on_submit>
			<h2>"Request a Repair"</h2>
			<label>
				"Location:"
				<select on:change=move |ev| set_location.set(event_target_value(&ev))>
					{options}
				</select>
			</label>
			<label>
				"Max Budget: "
				<span class="strong">{move || budget.get().to_string()}</span>
				<input
					type="range"
					min="50"
					max="2000"
					step="10"
					prop:value=move || budget.get().to_string()
					on:input=move |ev| {
						if let Ok(value) = event_target_value(&ev).parse::<f64>() {
							set_budget.set(value);
						}
					}
				/>
			</label>
			<label>
				"Problem Description:"
				<textarea
					rows="4"
					placeholder="Describe your issue (e.g., fridge not cooling, need installation, etc.)"
					prop:value=move || description.get()
					on:input=move |ev| set_description.set(event_target_value(&ev))
				></textarea>
			</label>
			<button type="submit" disabled=move || loading.get()>
				{move || if loading.get() { "Finding Vendors..." } else { "Find Vendors" }}
			</button>
			{move || failure.get().map(|msg| view! { <p class="notice error">{msg}</p> })}
		</form>
	}
}
