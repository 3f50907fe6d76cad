// Vehicle table with allowed, elapsed and overstay columns coloured by tier.
#![allow(non_snake_case)]
use chrono::NaiveDateTime;
use dioxus::prelude::*;

use shared::duration::format_minutes;
use shared::models::{CheckInRecord, VehicleRecord};
use shared::plate::display_plate;

use crate::config::AppConfig;
use crate::services::EngineClient;
use crate::state::{AppState, Page, PendingAction, VehicleDraft};

/// Entry as shown in tables: `dd/mm/YYYY HH:MM`, date only, or a dash.
pub fn entry_label(record: &impl CheckInRecord) -> String {
    match (record.entry_date(), record.entry_time()) {
        (Some(date), Some(time)) => format!("{} {}", date.format("%d/%m/%Y"), time.format("%H:%M")),
        (Some(date), None) => date.format("%d/%m/%Y").to_string(),
        _ => "-".to_string(),
    }
}

#[component]
fn VehicleRow(record: VehicleRecord, now: NaiveDateTime) -> Element {
    let client = use_context::<EngineClient>();
    let config = use_context::<AppConfig>();
    let mut state = use_context::<Signal<AppState>>();
    let mut draft = use_context::<Signal<VehicleDraft>>();
    let language = config.app.language;

    let (elapsed, overstay, color, status, status_color) = match client.vehicle_overstay(&record, now) {
        Some(result) => {
            let status = result.report_status();
            (
                result.elapsed_label(language),
                result.label(language),
                config.theme.overstay_color(result.status, result.tier).to_string(),
                status.label(),
                config.theme.report_status_color(status).to_string(),
            )
        }
        None => ("-".to_string(), "-".to_string(), config.theme.muted.clone(), "-", config.theme.muted.clone()),
    };
    let plate = display_plate(&record.plate);
    let entry = entry_label(&record);
    let allowed = format_minutes(record.duration_minutes as i64);
    let contract = record.contract.display_name();
    let editing = draft.read().id.as_deref() == Some(record.id.as_str());
    let row_style = if editing { "background: rgba(37, 99, 235, 0.08);" } else { "" };

    let edit = {
        let record = record.clone();
        move |_: MouseEvent| draft.set(VehicleDraft::from_record(&record))
    };
    let delete = {
        let id = record.id.clone();
        let label = record.summary();
        move |_: MouseEvent| {
            state.write().ask(PendingAction::Delete {
                page: Page::Vehicles,
                id: id.clone(),
                label: label.clone(),
            })
        }
    };

    rsx! {
        tr { style: row_style,
            td { strong { "{plate}" } }
            td { "{record.driver}" }
            td { "{record.model}" }
            td { "{contract}" }
            td { "{record.parking_spot}" }
            td { "{entry}" }
            td { "{allowed}" }
            td { "{elapsed}" }
            td { style: "color: {color}; font-weight: 600;", "{overstay}" }
            td { style: "color: {status_color};", "{status}" }
            td {
                button { onclick: edit, "Editar" }
                button { class: "danger", onclick: delete, "Excluir" }
            }
        }
    }
}

#[component]
pub fn VehicleTable() -> Element {
    let client = use_context::<EngineClient>();
    let state = use_context::<Signal<AppState>>();
    let term = state.read().search_term.clone();
    let now = state.read().now;
    let _revision = state.read().revision;

    let records = match client.search_vehicles(&term) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Could not load vehicles");
            return rsx! { div { class: "notice error", "Erro ao carregar veículos: {e}" } };
        }
    };

    rsx! {
        section { class: "card",
            h3 { "Veículos cadastrados" }
            if records.is_empty() {
                p { "Nenhum veículo encontrado." }
            } else {
                table {
                    thead {
                        tr {
                            th { "Placa" }
                            th { "Condutor" }
                            th { "Modelo" }
                            th { "Contrato" }
                            th { "Local" }
                            th { "Entrada" }
                            th { "Permitido" }
                            th { "Decorrido" }
                            th { "Excedido" }
                            th { "Status" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        for record in records {
                            VehicleRow { key: "{record.id}", record: record.clone(), now }
                        }
                    }
                }
            }
        }
    }
}
