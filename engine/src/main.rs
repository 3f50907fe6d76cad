// `parking` command-line tool: check-in records from the terminal.
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::data::Collection;
use engine::export::{export_report, ExportFormat, VehicleReport};
use engine::media::AttachmentLoader;
use engine::{CheckInRegistry, EngineSettings, Registries};
use shared::clock::{Clock, FixedClock, SystemClock};
use shared::duration::{default_duration, format_minutes};
use shared::language::Language;
use shared::models::{Attachment, CheckInRecord, ContractType, LodgingKind, PersonRecord, VehicleKind, VehicleRecord};
use shared::overstay::TolerancePolicy;
use shared::plate::{display_plate, format_plate, PlateFormat};

/// Hotel Parking - cadastro de veículos e pessoas
#[derive(Parser)]
#[command(name = "parking")]
#[command(version)]
#[command(about = "Check-in de veículos e pessoas do Hotel Parking", long_about = None)]
struct Cli {
    /// Arquivo de configuração JSON (opcional)
    #[arg(short = 'c', long, env = "PARKING_CONFIG", default_value = "parking.json", global = true)]
    config: PathBuf,

    /// Diretório de dados (sobrepõe a configuração)
    #[arg(long, env = "PARKING_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Idioma das mensagens de status (pt-BR, en)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Usa um instante fixo como "agora" (formato: "YYYY-MM-DD HH:MM")
    #[arg(long, global = true, value_parser = parse_instant)]
    at: Option<NaiveDateTime>,

    /// Modo verbose para debug
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct Target {
    /// Opera sobre o cadastro de pessoas em vez de veículos
    #[arg(short = 'p', long)]
    people: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cadastra ou edita um veículo
    AddVehicle(VehicleArgs),

    /// Cadastra ou edita uma pessoa
    AddPerson(PersonArgs),

    /// Lista os registros
    List {
        #[command(flatten)]
        target: Target,
    },

    /// Busca por nome, placa, modelo, cor, documento, telefone, profissão ou ano
    Search {
        term: String,
        #[command(flatten)]
        target: Target,
    },

    /// Tempo decorrido e excedido de cada registro
    Status {
        #[command(flatten)]
        target: Target,
    },

    /// Exclui um registro pelo ID
    Delete {
        id: String,
        /// Confirma a exclusão
        #[arg(long)]
        yes: bool,
        #[command(flatten)]
        target: Target,
    },

    /// Exclui todos os registros (exige --confirm "EXCLUIR TUDO")
    Purge {
        #[arg(long, default_value = "")]
        confirm: String,
        #[command(flatten)]
        target: Target,
    },

    /// Exporta o relatório de veículos (pdf ou csv)
    Export {
        #[arg(default_value = "pdf")]
        format: ExportFormat,
        /// Diretório de saída (padrão: export_dir da configuração)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        /// Exporta apenas os resultados desta busca
        #[arg(long)]
        search: Option<String>,
    },

    /// Formata ou valida placas
    Plate {
        #[command(subcommand)]
        action: PlateAction,
    },
}

#[derive(Subcommand)]
enum PlateAction {
    /// Formata a digitação como o campo de placa do formulário
    Format { raw: String },
    /// Verifica se a placa é válida (padrão antigo ou Mercosul)
    Check { plate: String },
}

#[derive(Args)]
struct EntryArgs {
    /// Tipo de contrato: mensalista, por_hora, diaria, pernoite, avulso
    #[arg(long, default_value = "mensalista", value_parser = parse_contract)]
    contract: ContractType,

    /// Data de entrada (YYYY-MM-DD); padrão: hoje
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Hora de entrada (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,

    /// Tempo permitido em minutos; padrão: o do contrato
    #[arg(long)]
    duration: Option<u32>,

    /// ID de um registro existente para editar
    #[arg(long)]
    id: Option<String>,

    /// Foto (imagem ou PDF)
    #[arg(long)]
    photo: Option<PathBuf>,
}

#[derive(Args)]
struct VehicleArgs {
    #[arg(long)]
    plate: String,
    #[arg(long, default_value = "")]
    driver: String,
    /// carro, moto ou caminhao
    #[arg(long, default_value = "carro", value_parser = parse_kind)]
    kind: VehicleKind,
    #[arg(long, default_value = "")]
    model: String,
    #[arg(long, default_value = "")]
    year: String,
    #[arg(long, default_value = "")]
    color: String,
    #[arg(long, default_value = "")]
    document: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    profession: String,
    /// Local de estacionamento
    #[arg(long, default_value = "")]
    spot: String,
    /// Documento do veículo
    #[arg(long)]
    vehicle_document: Option<PathBuf>,
    /// CNH do condutor
    #[arg(long)]
    license: Option<PathBuf>,
    /// Comprovante de endereço
    #[arg(long)]
    proof_of_address: Option<PathBuf>,
    #[command(flatten)]
    entry: EntryArgs,
}

#[derive(Args)]
struct PersonArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    document: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    profession: String,
    /// nenhum, casa, apartamento, quarto ou pousada
    #[arg(long, default_value = "nenhum", value_parser = parse_lodging)]
    lodging: LodgingKind,
    #[arg(long, default_value = "")]
    lodging_number: String,
    #[command(flatten)]
    entry: EntryArgs,
}

fn parse_contract(s: &str) -> Result<ContractType, String> {
    ContractType::ALL
        .into_iter()
        .find(|c| c.code() == s.trim())
        .ok_or_else(|| format!("Contrato desconhecido: {}", s))
}

fn parse_kind(s: &str) -> Result<VehicleKind, String> {
    VehicleKind::from_code(s.trim()).ok_or_else(|| format!("Tipo de veículo desconhecido: {}", s))
}

fn parse_lodging(s: &str) -> Result<LodgingKind, String> {
    LodgingKind::from_code(s.trim()).ok_or_else(|| format!("Tipo de imóvel desconhecido: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("Data inválida '{}': {}", s, e))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| format!("Hora inválida '{}': {}", s, e))
}

fn parse_instant(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M").map_err(|e| format!("Instante inválido '{}': {}", s, e))
}

async fn load_attachment(loader: &AttachmentLoader, path: Option<&Path>) -> Result<Option<Attachment>> {
    match path {
        Some(path) => {
            let attachment = loader
                .load(path)
                .await
                .with_context(|| format!("Falha ao anexar {}", path.display()))?;
            Ok(Some(attachment))
        }
        None => Ok(None),
    }
}

struct App {
    settings: EngineSettings,
    registries: Registries,
    loader: AttachmentLoader,
}

async fn add_vehicle(ctx: &App, args: VehicleArgs) -> Result<()> {
    let entry = &args.entry;
    let mut record = match &entry.id {
        Some(id) => ctx.registries.vehicles.find(id)?,
        None => VehicleRecord::default(),
    };
    record.plate = args.plate.clone();
    record.driver = args.driver.clone();
    record.kind = args.kind;
    record.model = args.model.clone();
    record.year = args.year.clone();
    record.color = args.color.clone();
    record.document = args.document.clone();
    record.phone = args.phone.clone();
    record.profession = args.profession.clone();
    record.parking_spot = args.spot.clone();
    record.contract = entry.contract;
    record.entry_date = entry.date.or(record.entry_date);
    record.entry_time = entry.time.or(record.entry_time);
    record.duration_minutes = entry.duration.unwrap_or_else(|| default_duration(entry.contract));

    if let Some(photo) = load_attachment(&ctx.loader, entry.photo.as_deref()).await? {
        record.photo = Some(photo);
    }
    if let Some(doc) = load_attachment(&ctx.loader, args.vehicle_document.as_deref()).await? {
        record.vehicle_document = Some(doc);
    }
    if let Some(license) = load_attachment(&ctx.loader, args.license.as_deref()).await? {
        record.driver_license = Some(license);
    }
    if let Some(proof) = load_attachment(&ctx.loader, args.proof_of_address.as_deref()).await? {
        record.proof_of_address = Some(proof);
    }

    let editing = entry.id.is_some();
    let stored = ctx.registries.vehicles.submit(record)?;
    if editing {
        println!("Dados atualizados! {}", stored.summary());
    } else {
        println!("Veículo cadastrado! ID {} - {}", stored.id, display_plate(&stored.plate));
    }
    Ok(())
}

async fn add_person(ctx: &App, args: PersonArgs) -> Result<()> {
    let entry = &args.entry;
    let mut record = match &entry.id {
        Some(id) => ctx.registries.people.find(id)?,
        None => PersonRecord::default(),
    };
    record.name = args.name.clone();
    record.document = args.document.clone();
    record.phone = args.phone.clone();
    record.profession = args.profession.clone();
    record.lodging_kind = args.lodging;
    record.lodging_number = args.lodging_number.clone();
    record.contract = entry.contract;
    record.entry_date = entry.date.or(record.entry_date);
    record.entry_time = entry.time.or(record.entry_time);
    record.duration_minutes = entry.duration.unwrap_or_else(|| default_duration(entry.contract));
    if let Some(photo) = load_attachment(&ctx.loader, entry.photo.as_deref()).await? {
        record.photo = Some(photo);
    }

    let editing = entry.id.is_some();
    let stored = ctx.registries.people.submit(record)?;
    if editing {
        println!("Dados atualizados! {}", stored.summary());
    } else {
        println!("Pessoa cadastrada! ID {} - {}", stored.id, stored.name);
    }
    Ok(())
}

fn print_records<R: Collection>(records: &[R]) {
    if records.is_empty() {
        println!("Nenhum registro encontrado.");
        return;
    }
    for record in records {
        let date = record
            .entry_date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        let time = record
            .entry_time()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36}  {:<32}  {:<10}  {} {}",
            record.id(),
            record.summary(),
            record.contract().display_name(),
            date,
            time
        );
    }
    println!("Total: {}", records.len());
}

fn print_status<R: Collection>(
    registry: &CheckInRegistry<R>,
    policy: &TolerancePolicy,
    language: Language,
) -> Result<()> {
    let records = registry.list()?;
    if records.is_empty() {
        println!("Nenhum registro encontrado.");
        return Ok(());
    }
    println!(
        "{:<32}  {:<10}  {:<10}  {:<16}  {:<28}  {}",
        "Registro", "Contrato", "Permitido", "Decorrido", "Excedido", "Nível"
    );
    for record in &records {
        let (elapsed, overstay, tier) = match registry.overstay_of(record, policy) {
            Some(result) => (
                result.elapsed_label(language),
                result.label(language),
                format!("{:?}", result.tier).to_lowercase(),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        println!(
            "{:<32}  {:<10}  {:<10}  {:<16}  {:<28}  {}",
            record.summary(),
            record.contract().display_name(),
            format_minutes(record.duration_minutes() as i64),
            elapsed,
            overstay,
            tier
        );
    }
    Ok(())
}

fn delete<R: Collection>(registry: &CheckInRegistry<R>, id: &str, yes: bool) -> Result<()> {
    let record = registry.find(id)?;
    if !yes {
        bail!(
            "Exclusão não confirmada para {}. Repita o comando com --yes.",
            record.summary()
        );
    }
    let removed = registry.delete(id)?;
    println!("Registro excluído com sucesso: {}", removed.summary());
    Ok(())
}

fn purge<R: Collection>(registry: &CheckInRegistry<R>, confirm: &str) -> Result<()> {
    if registry.list()?.is_empty() {
        println!("Não há dados para excluir!");
        return Ok(());
    }
    let removed = registry.purge(confirm)?;
    println!("Todos os dados foram excluídos com sucesso! Total de {} registro(s) removido(s).", removed);
    Ok(())
}

fn plate(action: PlateAction) -> Result<()> {
    match action {
        PlateAction::Format { raw } => {
            println!("{}", format_plate(&raw));
        }
        PlateAction::Check { plate } => match PlateFormat::detect(&plate) {
            Some(PlateFormat::Legacy) => println!("{}: válida (padrão antigo)", display_plate(&plate)),
            Some(PlateFormat::Mercosul) => println!("{}: válida (Mercosul)", plate),
            None => bail!("Placa inválida '{}'. Formatos aceitos: ABC-1234 ou ABC1D23", plate),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut settings = EngineSettings::load(&cli.config)
        .with_context(|| format!("Falha ao carregar a configuração {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    if let Some(lang) = &cli.lang {
        settings.language = Language::from_code(lang);
    }

    let clock: Arc<dyn Clock> = match cli.at {
        Some(instant) => Arc::new(FixedClock(instant)),
        None => Arc::new(SystemClock),
    };
    info!(data_dir = %settings.data_dir.display(), language = %settings.language.code(), "Starting parking CLI");

    let ctx = App {
        registries: Registries::open(&settings, clock.clone()),
        loader: AttachmentLoader::new(settings.max_attachment_bytes),
        settings,
    };

    match cli.command {
        Commands::AddVehicle(args) => add_vehicle(&ctx, args).await?,
        Commands::AddPerson(args) => add_person(&ctx, args).await?,
        Commands::List { target } => {
            if target.people {
                print_records(&ctx.registries.people.list()?);
            } else {
                print_records(&ctx.registries.vehicles.list()?);
            }
        }
        Commands::Search { term, target } => {
            if target.people {
                print_records(&ctx.registries.people.search(&term)?);
            } else {
                print_records(&ctx.registries.vehicles.search(&term)?);
            }
        }
        Commands::Status { target } => {
            let policy = &ctx.settings.tolerance;
            let language = ctx.settings.language;
            if target.people {
                print_status(&ctx.registries.people, policy, language)?;
            } else {
                print_status(&ctx.registries.vehicles, policy, language)?;
            }
        }
        Commands::Delete { id, yes, target } => {
            if target.people {
                delete(&ctx.registries.people, &id, yes)?;
            } else {
                delete(&ctx.registries.vehicles, &id, yes)?;
            }
        }
        Commands::Purge { confirm, target } => {
            if target.people {
                purge(&ctx.registries.people, &confirm)?;
            } else {
                purge(&ctx.registries.vehicles, &confirm)?;
            }
        }
        Commands::Export { format, out, search } => {
            let records = ctx.registries.vehicles.search(search.as_deref().unwrap_or(""))?;
            let report = VehicleReport::build(
                &records,
                clock.now(),
                &ctx.settings.tolerance,
                ctx.settings.language,
            )?;
            let dir = out.unwrap_or_else(|| ctx.settings.export_dir.clone());
            let path = export_report(&report, format, &dir)?;
            println!(
                "Dados exportados com sucesso! Arquivo: {} - Total de registros: {}",
                path.display(),
                report.len()
            );
        }
        Commands::Plate { action } => plate(action)?,
    }

    Ok(())
}
