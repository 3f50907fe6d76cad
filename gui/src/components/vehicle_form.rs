// Vehicle registration form: plate auto-format, contract-driven durations,
// the "now" button, attachments and the camera.
#![allow(non_snake_case)]
use dioxus::prelude::*;

use engine::media::{CameraSession, Facing};
use shared::duration::{choice_label, duration_choices};
use shared::models::{Attachment, ContractType, VehicleKind};

use crate::services::EngineClient;
use crate::state::{AppState, AttachmentSlot, Notice, VehicleDraft};

/// Options of the duration picker; a stored value outside the list is kept selectable.
pub fn duration_options(contract: ContractType, current: u32) -> Vec<(u32, String)> {
    let mut options: Vec<u32> = duration_choices(contract).to_vec();
    if !options.contains(&current) {
        options.push(current);
        options.sort_unstable();
    }
    options.into_iter().map(|minutes| (minutes, choice_label(minutes))).collect()
}

#[component]
pub fn DurationSelect(contract: ContractType, value: u32, onchange: EventHandler<u32>) -> Element {
    rsx! {
        select {
            onchange: move |evt| {
                if let Ok(minutes) = evt.value().parse::<u32>() {
                    onchange.call(minutes);
                }
            },
            for (minutes, label) in duration_options(contract, value) {
                option { value: "{minutes}", selected: minutes == value, "{label}" }
            }
        }
    }
}

#[component]
pub fn ContractSelect(value: ContractType, onchange: EventHandler<ContractType>) -> Element {
    rsx! {
        select {
            onchange: move |evt| onchange.call(ContractType::from_code(&evt.value())),
            for contract in ContractType::ALL {
                option { value: contract.code(), selected: contract == value, "{contract.display_name()}" }
            }
        }
    }
}

#[component]
pub fn AttachmentPreview(attachment: Attachment) -> Element {
    if attachment.is_pdf() {
        let kb = attachment.byte_len() / 1024;
        return rsx! { span { "PDF anexado ({kb} KB)" } };
    }
    match &attachment {
        Attachment::Inline { .. } => {
            let src = attachment.to_data_url();
            rsx! { img { src: src, style: "max-width: 120px; max-height: 90px; border-radius: 4px;" } }
        }
        Attachment::Reference(reference) => rsx! { span { "{reference}" } },
    }
}

#[component]
fn AttachmentField(slot: AttachmentSlot) -> Element {
    let client = use_context::<EngineClient>();
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<VehicleDraft>>();
    let current = draft.read().attachment(slot).cloned();
    let generation = state.read().upload_generation;

    let on_file = move |evt: FormEvent| {
        let client = client.clone();
        async move {
            let Some(files) = evt.files() else {
                return;
            };
            for name in files.files() {
                let result = match files.read_file(&name).await {
                    Some(bytes) => client.attach(&name, bytes).map_err(|e| e.to_string()),
                    None => Err(format!("Não foi possível ler '{}'", name)),
                };
                match result {
                    Ok(attachment) => draft.write().set_attachment(slot, Some(attachment)),
                    Err(message) => state.write().reject_upload(message),
                }
            }
        }
    };

    rsx! {
        label {
            "{slot.label()}"
            for generation in [generation] {
                input { key: "{generation}", r#type: "file", accept: slot.accept(), onchange: on_file.clone() }
            }
            {current.map(|attachment| rsx! {
                AttachmentPreview { attachment }
                button { onclick: move |_| draft.write().set_attachment(slot, None), "Remover" }
            })}
        }
    }
}

#[component]
fn CameraDialog(session: Signal<Option<CameraSession>>) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<VehicleDraft>>();
    let mut session = session;
    let Some(facing) = session.read().as_ref().map(|s| s.facing()) else {
        return None;
    };
    let facing_label = match facing {
        Facing::User => "frontal",
        Facing::Environment => "traseira",
    };

    let capture = move |_: MouseEvent| {
        let Some(open) = session.write().take() else {
            return;
        };
        match open.capture_and_close() {
            Ok(photo) => draft.write().set_attachment(AttachmentSlot::Photo, Some(photo)),
            Err(e) => state.write().notice = Some(Notice::error(e.to_string())),
        }
    };
    let switch = move |_: MouseEvent| {
        let failed = match session.write().as_mut() {
            Some(open) => open.switch().err(),
            None => None,
        };
        if let Some(e) = failed {
            session.set(None);
            state.write().notice = Some(Notice::error(e.to_string()));
        }
    };

    rsx! {
        div { class: "modal",
            div { class: "card",
                h3 { "Câmera {facing_label}" }
                div { style: "display: flex; gap: 8px;",
                    button { class: "primary", onclick: capture, "Capturar" }
                    button { onclick: switch, "Trocar câmera" }
                    button { onclick: move |_| session.set(None), "Cancelar" }
                }
            }
        }
    }
}

#[component]
pub fn VehicleForm() -> Element {
    let client = use_context::<EngineClient>();
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<VehicleDraft>>();
    let mut camera = use_signal(|| None::<CameraSession>);
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
            match client.submit_vehicle(record) {
                Ok(saved) => {
                    draft.set(VehicleDraft::default());
                    let mut state = state.write();
                    let verb = if editing { "atualizado" } else { "cadastrado" };
                    state.notice = Some(Notice::info(format!("Veículo {} {}.", saved.plate, verb)));
                    state.touch();
                }
                Err(e) => {
                    if !e.is_user_error() {
                        tracing::warn!(error = %e, "Vehicle not saved");
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
    let open_camera = move |_: MouseEvent| match client.open_camera(Facing::default()) {
        Ok(session) => camera.set(Some(session)),
        Err(e) => state.write().notice = Some(Notice::error(e.to_string())),
    };

    rsx! {
        section { class: "card",
            h3 { if d.is_editing() { "Editar veículo" } else { "Novo veículo" } }
            div { class: "grid",
                label { "Tipo"
                    select {
                        onchange: move |evt| {
                            if let Some(kind) = VehicleKind::from_code(&evt.value()) {
                                draft.write().kind = kind;
                            }
                        },
                        for kind in VehicleKind::ALL {
                            option { value: kind.code(), selected: kind == d.kind, "{kind.display_name()}" }
                        }
                    }
                }
                label { "Placa"
                    input { value: d.plate.clone(), maxlength: "8", oninput: move |evt| draft.write().set_plate(&evt.value()) }
                }
                label { "Modelo"
                    input { value: d.model.clone(), oninput: move |evt| draft.write().set_model(&evt.value()) }
                }
                label { "Ano"
                    input { value: d.year.clone(), oninput: move |evt| draft.write().year = evt.value() }
                }
                label { "Cor"
                    input { value: d.color.clone(), oninput: move |evt| draft.write().set_color(&evt.value()) }
                }
                label { "Condutor"
                    input { value: d.driver.clone(), oninput: move |evt| draft.write().set_driver(&evt.value()) }
                }
                label { "Documento"
                    input { value: d.document.clone(), oninput: move |evt| draft.write().document = evt.value() }
                }
                label { "Telefone"
                    input { value: d.phone.clone(), oninput: move |evt| draft.write().phone = evt.value() }
                }
                label { "Profissão"
                    input { value: d.profession.clone(), oninput: move |evt| draft.write().set_profession(&evt.value()) }
                }
                label { "Contrato"
                    ContractSelect { value: d.contract, onchange: move |contract| draft.write().set_contract(contract) }
                }
                label { "Tempo permitido"
                    DurationSelect { contract: d.contract, value: d.duration, onchange: move |minutes| draft.write().duration = minutes }
                }
                label { "Local / Vaga"
                    input { value: d.spot.clone(), oninput: move |evt| draft.write().spot = evt.value() }
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
            h4 { "Anexos" }
            div { class: "grid",
                for slot in AttachmentSlot::VEHICLE_SLOTS {
                    AttachmentField { key: "{slot.label()}", slot }
                }
            }
            div { style: "display: flex; gap: 8px; margin-top: 12px;",
                button { class: "primary", onclick: save, if d.is_editing() { "Atualizar" } else { "Cadastrar" } }
                button { onclick: open_camera, "Tirar foto" }
                button { onclick: move |_| draft.set(VehicleDraft::default()), "Limpar" }
            }
            CameraDialog { session: camera }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_options_keep_current_value() {
        let options = duration_options(ContractType::Hourly, 30);
        assert_eq!(options[0], (30, "30 min".to_string()));
        assert_eq!(options.len(), 6);

        let monthly = duration_options(ContractType::Monthly, 43_200);
        assert_eq!(monthly.last(), Some(&(43_200, "30 dias".to_string())));
        assert_eq!(monthly.len(), 6);
    }
}
