use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use wasm_bindgen_futures::JsFuture;

use crate::api::ApiClient;
use crate::config::use_config;
use crate::download::trigger_download;
use crate::error::Result;

const SAMPLE_FILE_NAME: &str = "sample_agents.csv";

/// Header plus one example row for the capability sheet format.
pub const SAMPLE_CSV: &str = "name,company,location,jurisdiction,capabilities,skills,cost_per_task,currency,access_type,trust_score,is_ai,wallet_address,openid_token,public_key,public_key_pem,data_needs
ThermoFix AI,FridgeMasters Inc.,Germany,\"[EU]\",\"[diagnosis,cooling_analysis]\",\"[diagnosis,cooling_analysis]\",250.0,EUR,API,0.92,True,0xthermofixai,openid-thermofixai,publickey-thermofixai,-----BEGIN PUBLIC KEY-----THERMOFIXAIKEY-----END PUBLIC KEY-----,\"[EU,India]\"
";

/// Read a picked file fully into memory.
async fn read_file(file: &web_sys::File) -> Result<Vec<u8>> {
	let buffer = JsFuture::from(file.array_buffer()).await?;
	Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Capability sheet sample download and upload.
#[component]
pub fn CapabilitySheetUpload() -> impl IntoView {
	let config = use_config();
	let file_input = NodeRef::<leptos::html::Input>::new();
	let (loading, set_loading) = signal(false);
	let (outcome, set_outcome) = signal(None::<String>);

	let download_sample = move |_: MouseEvent| {
		if let Err(err) = trigger_download(SAMPLE_CSV.as_bytes(), "text/csv", SAMPLE_FILE_NAME) {
			error!("sample download failed: {err}");
		}
	};

	let upload = move |_: MouseEvent| {
		let Some(file) = file_input.get().and_then(|input| input.files()).and_then(|files| files.get(0))
		else {
			return;
		};
		set_loading.set(true);
		set_outcome.set(None);
		let client = ApiClient::new(config.clone());
		spawn_local(async move {
			let name = file.name();
			let result = match read_file(&file).await {
				Ok(bytes) => client.upload_capability_sheet(&name, bytes).await,
				Err(err) => Err(err),
			};
			let shown = match result {
				Ok(body) => serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()),
				Err(err) => {
					error!("uploading {name} failed: {err}");
					serde_json::json!({ "error": err.to_string() }).to_string()
				}
			};
			set_outcome.set(Some(shown));
			set_loading.set(false);
		});
	};

	view! {
		<div class="panel capability-upload">
			<h2>"Upload Agent Capability Sheet"</h2>
			<button type="button" on:click=download_sample>
				"Download Sample CSV"
			</button>
			<input type="file" accept=".csv" node_ref=file_input on:change=move |_| set_outcome.set(None) />
			<button type="button" on:click=upload disabled=move || loading.get()>
				{move || if loading.get() { "Uploading..." } else { "Upload" }}
			</button>
			{move || outcome.get().map(|text| view! { <pre class="result">{text}</pre> })}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::SAMPLE_CSV;

	#[test]
	fn sample_sheet_has_header_and_one_row() {
		let lines: Vec<_> = SAMPLE_CSV.lines().collect();
		assert_eq!(lines.len(), 2);
		assert!(lines[0].starts_with("name,company,location"));
		assert!(lines[1].starts_with("ThermoFix AI,"));
	}
}
