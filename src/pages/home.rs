use leptos::prelude::*;

use crate::api::PlanResponse;
use crate::components::capability_upload::CapabilitySheetUpload;
use crate::components::feedback_form::FeedbackForm;
use crate::components::plan_results::PlanResults;
use crate::components::ticket_form::TicketForm;

/// Dashboard: ticket intake, plan results, feedback and capability upload.
#[component]
pub fn Home() -> impl IntoView {
	// Replaced wholesale on every submission; the results subtree is rebuilt.
	let (plan, set_plan) = signal(None::<PlanResponse>);
	let on_results = Callback::new(move |response: PlanResponse| set_plan.set(Some(response)));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<header class="page-header">
				<h1>"Fellowship of the Cogs"</h1>
				<p>"Find the best repair vendors worldwide, powered by AI"</p>
			</header>
			<main>
				<TicketForm on_results=on_results />
				{move || plan.get().map(|plan| view! { <PlanResults plan=plan /> })}
				<FeedbackForm />
				<CapabilitySheetUpload />
			</main>
			<footer class="page-footer">
				"© " {js_sys::Date::new_0().get_full_year().to_string()} " Fellowship of the Cogs"
			</footer>
		</ErrorBoundary>
	}
}
