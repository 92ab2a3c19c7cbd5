use leptos::prelude::*;

use super::contract::ContractView;
use super::provenance::ProvenanceRecord;

#[component]
fn ModalBase(on_close: Callback<()>, children: Children) -> impl IntoView {
	view! {
		<div class="modal-backdrop">
			<div class="modal-container">
				<button class="modal-close" on:click=move |_| on_close.run(())>
					"×"
				</button>
				{children()}
			</div>
		</div>
	}
}

#[component]
pub fn ContractModal(contract: ContractView, on_close: Callback<()>) -> impl IntoView {
	view! {
		<ModalBase on_close=on_close>
			<h3 class="modal-title">"Data Sharing Contract"</h3>
			<p><strong>"Applicable Regulations: "</strong>{contract.regulations}</p>
			<p><strong>"Permitted Fields: "</strong>{contract.permitted_fields}</p>
			<p><strong>"Expiry (hours): "</strong>{contract.expiry_hours}</p>
			<p><strong>"Policy: "</strong>{contract.policy}</p>
		</ModalBase>
	}
}

/// Shows a provenance record with its signature shape mark.
///
/// "✔" only says the signature has the expected length; nothing is
/// authenticated here.
#[component]
pub fn ProvenanceModal(record: ProvenanceRecord, on_close: Callback<()>) -> impl IntoView {
	let verdict = record.structural_verdict();
	view! {
		<ModalBase on_close=on_close>
			<h3 class="modal-title">"Provenance Details"</h3>
			<p><strong>"Step ID: "</strong><code>{record.step_id}</code></p>
			<p><strong>"Agent ID: "</strong><code>{record.agent_id}</code></p>
			<p><strong>"Role: "</strong>{record.role}</p>
			<p><strong>"Ticket: "</strong><code>{record.ticket_id}</code></p>
			<p>
				<strong>"Signature: "</strong>
				<code class="break-word">{record.signature.unwrap_or_default()}</code>
				" "
				<span class={verdict.css_class()} title="signature shape check, not authentication">
					{verdict.mark()}
				</span>
			</p>
		</ModalBase>
	}
}
