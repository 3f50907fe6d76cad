#![allow(non_snake_case)]
use dioxus::prelude::*;

use shared::clock::next_refresh_delay;

use crate::components::{ConfirmDialog, NoticeBanner, PersonPage, Sidebar, VehicleForm, VehicleTable};
use crate::config::AppConfig;
use crate::services::EngineClient;
use crate::state::{AppState, Page, PersonDraft, VehicleDraft};

#[component]
pub fn App() -> Element {
    let client = use_context::<EngineClient>();
    let config = use_context::<AppConfig>();
    let stylesheet = config.theme.stylesheet();
    let base_interval = client.settings().refresh_interval();

    let mut state = use_context_provider(|| Signal::new(AppState::new(client.now())));
    use_context_provider(|| Signal::new(VehicleDraft::default()));
    use_context_provider(|| Signal::new(PersonDraft::default()));

    // Keeps "now" current; ticks faster around midnight so the date rolls over.
    use_future(move || {
        let client = client.clone();
        async move {
            loop {
                let delay = next_refresh_delay(client.now(), base_interval);
                tokio::time::sleep(delay).await;
                state.write().now = client.now();
            }
        }
    });

    let page = state.read().page;
    let now_label = state.read().now.format("%d/%m/%Y %H:%M").to_string();
    let vehicles_class = if page == Page::Vehicles { "primary" } else { "" };
    let people_class = if page == Page::People { "primary" } else { "" };

    rsx! {
        style { "{stylesheet}" }
        div { class: "layout",
            Sidebar {}
            main { class: "main",
                nav { style: "display: flex; gap: 8px; margin-bottom: 12px;",
                    button { class: vehicles_class, onclick: move |_| state.write().switch_page(Page::Vehicles), "Veículos" }
                    button { class: people_class, onclick: move |_| state.write().switch_page(Page::People), "Pessoas" }
                    span { style: "margin-left: auto;", "Agora: {now_label}" }
                }
                h1 { "{page.title()}" }
                NoticeBanner {}
                if page == Page::Vehicles {
                    VehicleForm {}
                    VehicleTable {}
                } else {
                    PersonPage {}
                }
            }
        }
        ConfirmDialog {}
    }
}
