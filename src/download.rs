//! Browser file downloads through a temporary object URL.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::components::fellowship_graph::{Artifact, ArtifactSink};
use crate::error::{DashboardError, Result};

/// Object URL handed to `release` on drop, so every exit path frees it.
struct ObjectUrl<R: FnMut(&str)> {
	url: String,
	release: R,
}

impl<R: FnMut(&str)> Drop for ObjectUrl<R> {
	fn drop(&mut self) {
		(self.release)(&self.url);
	}
}

/// Run `use_url` with `url`, then release the URL whether it succeeded or not.
fn with_object_url<R, F>(url: String, release: R, use_url: F) -> Result<()>
where
	R: FnMut(&str),
	F: FnOnce(&str) -> Result<()>,
{
	let handle = ObjectUrl { url, release };
	use_url(&handle.url)
}

/// Offer `bytes` to the user as a file called `file_name`.
pub fn trigger_download(bytes: &[u8], mime: &str, file_name: &str) -> Result<()> {
	let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| DashboardError::Browser("no document".into()))?;

	let url = Url::create_object_url_with_blob(&blob)?;
	let revoke = |url: &str| {
		let _ = Url::revoke_object_url(url);
	};
	with_object_url(url, revoke, |url| {
		let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(|_| {
			DashboardError::Browser("anchor element has unexpected type".into())
		})?;
		anchor.set_href(url);
		anchor.set_download(file_name);
		anchor.click();
		Ok(())
	})
}

/// [`ArtifactSink`] that saves artifacts through the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDownloader;

impl ArtifactSink for BrowserDownloader {
	fn deliver(&self, artifact: &Artifact) -> Result<()> {
		trigger_download(&artifact.bytes, artifact.mime, &artifact.file_name)
	}
}
