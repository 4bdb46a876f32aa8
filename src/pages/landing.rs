use leptos::prelude::*;

use crate::components::link_graph::{LinkGraphCanvas, SiteLink};
use crate::prefs::use_prefs;

/// The site map drawn on the landing page, in node order.
const SITE_MAP: &[(&str, &str)] = &[
	("Journal", "/journal"),
	("Calendar", "/calendar"),
	("Library", "/library"),
	("DVDs", "/dvds"),
	("Guestboard", "/message-board"),
	("Creative Home", "/creative"),
	("Photo Sphere", "/sphere"),
	("Rotating Gallery", "/gallery"),
	("Stack Deck", "/stack"),
	("Pro Home", "/"),
	("Academic", "/academic"),
	("Industry", "/industry"),
	("Research", "/research"),
	("Publications", "/publications"),
	("CV", "/cv"),
	("About", "/about"),
];

fn site_links() -> Vec<SiteLink> {
	SITE_MAP
		.iter()
		.map(|&(label, route)| SiteLink::new(label, route))
		.collect()
}

/// Landing page: the link graph plus its glow toggle.
#[component]
pub fn Landing() -> impl IntoView {
	let prefs = use_prefs();
	let glow = Signal::derive(move || prefs.with(|p| p.web_glow));

	view! {
		<div class="web-landing">
			<LinkGraphCanvas links=site_links() glow=glow />
			<label class="glow-toggle">
				<input
					type="checkbox"
					prop:checked=move || glow.get()
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						prefs.update(|p| p.web_glow = on);
					}
				/>
				"Map glow"
			</label>
		</div>
	}
}
