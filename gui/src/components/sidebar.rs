// Sidebar: live search, click-to-load results, statistics and bulk actions.
#![allow(non_snake_case)]
use dioxus::prelude::*;

use engine::export::ExportFormat;
use shared::plate::display_plate;

use crate::services::EngineClient;
use crate::state::{AppState, Notice, Page, PendingAction, PersonDraft, VehicleDraft};

fn start_export(client: EngineClient, mut state: Signal<AppState>, format: ExportFormat) {
    let term = state.read().search_term.clone();
    spawn(async move {
        let notice = match client.export_vehicles(format, term).await {
            Ok(path) => Notice::info(format!("Relatório salvo em {}", path.display())),
            Err(e) => {
                if !e.is_user_error() {
                    tracing::warn!(%format, error = %e, "Export failed");
                }
                Notice::error(e.to_string())
            }
        };
        state.write().notice = Some(notice);
    });
}

#[component]
pub fn Sidebar() -> Element {
    let client = use_context::<EngineClient>();
    let mut state = use_context::<Signal<AppState>>();
    let mut vehicle_draft = use_context::<Signal<VehicleDraft>>();
    let mut person_draft = use_context::<Signal<PersonDraft>>();

    let page = state.read().page;
    let term = state.read().search_term.clone();
    // Re-read storage whenever a mutation bumps the revision.
    let _revision = state.read().revision;

    let loaded = match page {
        Page::Vehicles => client.search_vehicles("").and_then(|all| {
            let hits = client.search_vehicles(&term)?;
            let rows = hits.into_iter().map(|record| {
                let title = display_plate(&record.plate);
                let subtitle = record.driver.clone();
                let key = record.id.clone();
                rsx! {
                    div {
                        key: "{key}",
                        class: "result",
                        onclick: move |_| vehicle_draft.set(VehicleDraft::from_record(&record)),
                        strong { "{title}" }
                        " {subtitle}"
                    }
                }
            });
            Ok((all.len(), rows.collect::<Vec<_>>()))
        }),
        Page::People => client.search_people("").and_then(|all| {
            let hits = client.search_people(&term)?;
            let rows = hits.into_iter().map(|record| {
                let title = record.name.clone();
                let subtitle = record.document.clone();
                let key = record.id.clone();
                rsx! {
                    div {
                        key: "{key}",
                        class: "result",
                        onclick: move |_| person_draft.set(PersonDraft::from_record(&record)),
                        strong { "{title}" }
                        " {subtitle}"
                    }
                }
            });
            Ok((all.len(), rows.collect::<Vec<_>>()))
        }),
    };
    let (total, results, load_error) = match loaded {
        Ok((total, rows)) => (total, rows, None),
        Err(e) => {
            tracing::error!(page = page.title(), error = %e, "Could not load records for the sidebar");
            (0, Vec::new(), Some(e.to_string()))
        }
    };
    let shown = results.len();

    let export_pdf = {
        let client = client.clone();
        move |_: MouseEvent| start_export(client.clone(), state, ExportFormat::Pdf)
    };
    let export_csv = {
        let client = client.clone();
        move |_: MouseEvent| start_export(client.clone(), state, ExportFormat::Csv)
    };

    rsx! {
        aside { class: "sidebar",
            h2 { "Hotel Parking" }
            input {
                r#type: "search",
                placeholder: "Buscar por nome, placa, documento...",
                value: term.clone(),
                oninput: move |evt| state.write().search_term = evt.value(),
            }
            if !term.is_empty() {
                button { onclick: move |_| state.write().search_term.clear(), "Limpar busca" }
            }
            {load_error.map(|message| rsx! {
                div { class: "notice error", "Erro ao carregar registros: {message}" }
            })}
            div {
                p { "Total de registros: {total}" }
                p { "Resultados: {shown}" }
            }
            div { style: "flex: 1; overflow: auto;",
                {results.into_iter()}
            }
            if page == Page::Vehicles {
                button { class: "primary", disabled: total == 0, onclick: export_pdf, "Exportar PDF" }
                button { class: "primary", disabled: total == 0, onclick: export_csv, "Exportar CSV" }
            }
            button {
                class: "danger",
                disabled: total == 0,
                onclick: move |_| state.write().ask(PendingAction::Purge { page, count: total }),
                "Excluir todos"
            }
        }
    }
}
