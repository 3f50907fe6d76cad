// Person check-in page: registration form and the list of people on site.
#![allow(non_snake_case)]
use chrono::NaiveDateTime;
use dioxus::prelude::*;

use shared::duration::format_minutes;
use shared::models::{CheckInRecord, LodgingKind, PersonRecord};

use super::vehicle_form::{AttachmentPreview, ContractSelect, DurationSelect};
use super::vehicle_table::entry_label;
use crate::config::AppConfig;
use crate::services::EngineClient;
use crate::state::{AppState, Notice, Page, PendingAction, PersonDraft};

#[component]
fn PersonForm() -> Element {
    let client = use_context::<EngineClient>();
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<PersonDraft>>();
    let d = draft.read().clone();

    let save = {
        let client = client.clone();
        move |_: MouseEvent| {
            let record = match draft.read().to_record() {
                Ok(record) => record,
                Err(message) => {
                    state.write().notice = Some(Notice::error(message));
                    return;
                }
            };
            let editing = !record.id.is_empty();
            match client.submit_person(record) {
                Ok(saved) => {
                    draft.set(PersonDraft::default());
                    let mut state = state.write();
                    let verb = if editing { "atualizado" } else { "realizado" };
                    state.notice = Some(Notice::info(format!("Cadastro de {} {}.", saved.name, verb)));
                    state.touch();
                }
                Err(e) => {
                    if !e.is_user_error() {
                        tracing::warn!(error = %e, "Person not saved");
                    }
                    state.write().notice = Some(Notice::error(e.to_string()));
                }
            }
        }
    };
    let fill_now = {
        let client = client.clone();
        move |_: MouseEvent| draft.write().fill_now(client.clock().as_ref())
    };
    let on_photo = move |evt: FormEvent| {
        let client = client.clone();
        async move {
            let Some(files) = evt.files() else {
                return;
            };
            let Some(name) = files.files().into_iter().next() else {
                return;
            };
            let result = match files.read_file(&name).await {
                Some(bytes) => client.attach(&name, bytes).map_err(|e| e.to_string()),
                None => Err(format!("Não foi possível ler '{}'", name)),
            };
            match result {
                Ok(photo) => draft.write().photo = Some(photo),
                Err(message) => state.write().reject_upload(message),
            }
        }
    };
    let generation = state.read().upload_generation;

    rsx! {
        section { class: "card",
            h3 { if d.is_editing() { "Editar cadastro" } else { "Nova pessoa" } }
            div { class: "grid",
                label { "Nome"
                    input { value: d.name.clone(), oninput: move |evt| draft.write().set_name(&evt.value()) }
                }
                label { "Documento"
                    input { value: d.document.clone(), oninput: move |evt| draft.write().document = evt.value() }
                }
                label { "Telefone"
                    input { value: d.phone.clone(), oninput: move |evt| draft.write().phone = evt.value() }
                }
                label { "Profissão"
                    input { value: d.profession.clone(), oninput: move |evt| draft.write().profession = evt.value() }
                }
                label { "Tipo de imóvel"
                    select {
                        onchange: move |evt| {
                            if let Some(kind) = LodgingKind::from_code(&evt.value()) {
                                draft.write().lodging_kind = kind;
                            }
                        },
                        for kind in LodgingKind::ALL {
                            option { value: kind.code(), selected: kind == d.lodging_kind, "{kind.display_name()}" }
                        }
                    }
                }
                label { "Número"
                    input { value: d.lodging_number.clone(), oninput: move |evt| draft.write().lodging_number = evt.value() }
                }
                label { "Contrato"
                    ContractSelect { value: d.contract, onchange: move |contract| draft.write().set_contract(contract) }
                }
                label { "Tempo permitido"
                    DurationSelect { contract: d.contract, value: d.duration, onchange: move |minutes| draft.write().duration = minutes }
                }
                label { "Foto"
                    for generation in [generation] {
                        input { key: "{generation}", r#type: "file", accept: "image/*", onchange: on_photo.clone() }
                    }
                    {d.photo.clone().map(|attachment| rsx! {
                        AttachmentPreview { attachment }
                        button { onclick: move |_| draft.write().photo = None, "Remover" }
                    })}
                }
                label { "Data de entrada"
                    input { r#type: "date", value: d.date.clone(), oninput: move |evt| draft.write().date = evt.value() }
                }
                label { "Hora de entrada"
                    input { r#type: "time", value: d.time.clone(), oninput: move |evt| draft.write().time = evt.value() }
                }
                label { "\u{00a0}"
                    button { onclick: fill_now, "Agora" }
                }
            }
            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                button { class: "primary", onclick: save, if d.is_editing() { "Atualizar" } else { "Cadastrar" } }
                button { onclick: move |_| draft.set(PersonDraft::default()), "Limpar" }
            }
        }
    }
}

#[component]
fn PersonRow(record: PersonRecord, now: NaiveDateTime) -> Element {
    let client = use_context::<EngineClient>();
    let config = use_context::<AppConfig>();
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<PersonDraft>>();
    let language = config.app.language;

    let (elapsed, overstay, color) = match client.person_overstay(&record, now) {
        Some(result) => (
            result.elapsed_label(language),
            result.label(language),
            config.theme.overstay_color(result.status, result.tier).to_string(),
        ),
        None => ("-".to_string(), "-".to_string(), config.theme.muted.clone()),
    };
    let lodging = if record.lodging_number.is_empty() {
        record.lodging_kind.display_name().to_string()
    } else {
        format!("{} {}", record.lodging_kind.display_name(), record.lodging_number)
    };
    let entry = entry_label(&record);
    let allowed = format_minutes(record.duration_minutes as i64);

    let edit = {
        let record = record.clone();
        move |_: MouseEvent| draft.set(PersonDraft::from_record(&record))
    };
    let delete = {
        let id = record.id.clone();
        let label = record.summary();
        move |_: MouseEvent| {
            state.write().ask(PendingAction::Delete {
                page: Page::People,
                id: id.clone(),
                label: label.clone(),
            })
        }
    };

    rsx! {
        tr {
            td { strong { "{record.name}" } }
            td { "{record.document}" }
            td { "{lodging}" }
            td { "{record.contract.display_name()}" }
            td { "{entry}" }
            td { "{allowed}" }
            td { "{elapsed}" }
            td { style: "color: {color}; font-weight: 600;", "{overstay}" }
            td {
                button { onclick: edit, "Editar" }
                button { class: "danger", onclick: delete, "Excluir" }
            }
        }
    }
}

#[component]
pub fn PersonPage() -> Element {
    let client = use_context::<EngineClient>();
    let state = use_context::<Signal<AppState>>();
    let term = state.read().search_term.clone();
    let now = state.read().now;
    let _revision = state.read().revision;

    let people = match client.search_people(&term) {
        Ok(people) => people,
        Err(e) => {
            tracing::error!(error = %e, "Could not load people");
            return rsx! { div { class: "notice error", "Erro ao carregar cadastros: {e}" } };
        }
    };

    rsx! {
        PersonForm {}
        section { class: "card",
            h3 { "Pessoas cadastradas" }
            if people.is_empty() {
                p { "Nenhum cadastro encontrado." }
            } else {
                table {
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Documento" }
                            th { "Imóvel" }
                            th { "Contrato" }
                            th { "Entrada" }
                            th { "Permitido" }
                            th { "Decorrido" }
                            th { "Excedido" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        for record in people {
                            PersonRow { key: "{record.id}", record: record.clone(), now }
                        }
                    }
                }
            }
        }
    }
}
