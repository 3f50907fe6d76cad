// Notice banner and the confirmation modal for deletes and purges.
#![allow(non_snake_case)]
use dioxus::prelude::*;

use engine::PURGE_PHRASE;

use crate::services::EngineClient;
use crate::state::{AppState, Notice, Page, PendingAction, PersonDraft, VehicleDraft};

#[component]
pub fn NoticeBanner() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let Some(notice) = state.read().notice.clone() else {
        return None;
    };

    rsx! {
        div { class: notice.css_class(),
            span { "{notice.message}" }
            button { style: "float: right;", onclick: move |_| state.write().notice = None, "×" }
        }
    }
}

fn run_pending(
    client: &EngineClient,
    action: &PendingAction,
    confirmation: &str,
    mut vehicle_draft: Signal<VehicleDraft>,
    mut person_draft: Signal<PersonDraft>,
) -> Result<String, String> {
    match action {
        PendingAction::Delete { page: Page::Vehicles, id, label } => {
            client.delete_vehicle(id).map_err(|e| e.to_string())?;
            if vehicle_draft.read().id.as_deref() == Some(id.as_str()) {
                vehicle_draft.set(VehicleDraft::default());
            }
            Ok(format!("Veículo {} excluído.", label))
        }
        PendingAction::Delete { page: Page::People, id, label } => {
            client.delete_person(id).map_err(|e| e.to_string())?;
            if person_draft.read().id.as_deref() == Some(id.as_str()) {
                person_draft.set(PersonDraft::default());
            }
            Ok(format!("Cadastro de {} excluído.", label))
        }
        PendingAction::Purge { page: Page::Vehicles, .. } => {
            let count = client.purge_vehicles(confirmation).map_err(|e| e.to_string())?;
            vehicle_draft.set(VehicleDraft::default());
            Ok(format!("{} veículos excluídos.", count))
        }
        PendingAction::Purge { page: Page::People, .. } => {
            let count = client.purge_people(confirmation).map_err(|e| e.to_string())?;
            person_draft.set(PersonDraft::default());
            Ok(format!("{} cadastros excluídos.", count))
        }
    }
}

#[component]
pub fn ConfirmDialog() -> Element {
    let client = use_context::<EngineClient>();
    let mut state = use_context::<Signal<AppState>>();
    let vehicle_draft = use_context::<Signal<VehicleDraft>>();
    let person_draft = use_context::<Signal<PersonDraft>>();

    let Some(action) = state.read().pending.clone() else {
        return None;
    };
    let purge_input = state.read().purge_input.clone();

    let (title, message, needs_phrase) = match &action {
        PendingAction::Delete { label, .. } => (
            "Confirmar exclusão".to_string(),
            format!("Excluir o registro {}? Esta ação não pode ser desfeita.", label),
            false,
        ),
        PendingAction::Purge { count, .. } => (
            "Excluir todos os registros".to_string(),
            format!("{} registros serão apagados. Digite {} para confirmar.", count, PURGE_PHRASE),
            true,
        ),
    };

    let confirm = move |_: MouseEvent| {
        let confirmation = state.read().purge_input.clone();
        let result = run_pending(&client, &action, &confirmation, vehicle_draft, person_draft);
        let mut state = state.write();
        match result {
            Ok(message) => {
                state.notice = Some(Notice::info(message));
                state.touch();
            }
            Err(message) => {
                tracing::warn!(error = %message, "Confirmed action failed");
                state.notice = Some(Notice::error(message));
            }
        }
        state.dismiss();
    };

    rsx! {
        div { class: "modal",
            div { class: "card",
                h3 { "{title}" }
                p { "{message}" }
                if needs_phrase {
                    input {
                        value: purge_input,
                        placeholder: PURGE_PHRASE,
                        oninput: move |evt| state.write().purge_input = evt.value(),
                    }
                }
                div { style: "display: flex; gap: 8px; justify-content: flex-end; margin-top: 12px;",
                    button { onclick: move |_| state.write().dismiss(), "Cancelar" }
                    button { class: "danger", onclick: confirm, "Confirmar" }
                }
            }
        }
    }
}
