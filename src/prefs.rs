//! Site-wide display preferences, persisted in `localStorage`.

use leptos::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Storage key shared with the rest of the site's settings.
pub const PREFS_KEY: &str = "ui::prefs";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiPrefs {
	/// Soft glow around the landing graph's edges.
	pub web_glow: bool,
}

impl Default for UiPrefs {
	fn default() -> Self {
		Self { web_glow: true }
	}
}

impl UiPrefs {
	/// Parse stored JSON, tolerating unknown keys. Malformed input yields the
	/// defaults.
	pub fn parse(raw: &str) -> Self {
		serde_json::from_str(raw).unwrap_or_else(|err| {
			warn!("ignoring malformed {PREFS_KEY}: {err}");
			Self::default()
		})
	}

	/// Write these prefs into `existing` JSON, keeping keys owned by others.
	pub fn merge_into(&self, existing: Option<&str>) -> Result<String, serde_json::Error> {
		let mut object = match existing.map(serde_json::from_str::<Value>) {
			Some(Ok(Value::Object(map))) => map,
			_ => Map::new(),
		};
		if let Value::Object(ours) = serde_json::to_value(self)? {
			object.extend(ours);
		}
		serde_json::to_string(&Value::Object(object))
	}

	pub fn load() -> Self {
		match storage().and_then(|s| s.get_item(PREFS_KEY)) {
			Ok(Some(raw)) => Self::parse(&raw),
			Ok(None) => Self::default(),
			Err(err) => {
				warn!("could not read {PREFS_KEY}: {err:?}");
				Self::default()
			}
		}
	}

	pub fn save(&self) {
		if let Err(err) = self.try_save() {
			warn!("could not write {PREFS_KEY}: {err:?}");
		}
	}

	fn try_save(&self) -> Result<(), JsValue> {
		let storage = storage()?;
		let existing = storage.get_item(PREFS_KEY)?;
		let json = self
			.merge_into(existing.as_deref())
			.map_err(|err| JsValue::from_str(&err.to_string()))?;
		storage.set_item(PREFS_KEY, &json)
	}
}

fn storage() -> Result<Storage, JsValue> {
	web_sys::window()
		.ok_or_else(|| JsValue::from_str("no window"))?
		.local_storage()?
		.ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Load the prefs into a context signal and persist every later change.
pub fn provide_prefs() -> RwSignal<UiPrefs> {
	let prefs = RwSignal::new(UiPrefs::load());
	provide_context(prefs);
	Effect::new(move |prev: Option<()>| {
		let current = prefs.get();
		if prev.is_some() {
			current.save();
		}
	});
	prefs
}

pub fn use_prefs() -> RwSignal<UiPrefs> {
	use_context::<RwSignal<UiPrefs>>().unwrap_or_else(|| RwSignal::new(UiPrefs::default()))
}
