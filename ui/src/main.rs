use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use mailroom::app::application_lifecycle::{ApplicationLifecycle, LoopExit};
use mailroom::app::model::Model;
use mailroom::components::common::{DispatchActivityMsg, Msg, SelectionActivityMsg};
use mailroom::config::{self, AppConfig};
use mailroom::dispatch::{DispatchPhase, PrerenderedHtml};
use mailroom::logger::setup_logger;
use mailroom::recipients::SearchController;
use mailroom::templates::{TemplateNotice, TemplateSession};
use mailroom_server::api::{MarketingApi, MarketingApiClient};
use mailroom_server::auth::AuthStateManager;
use mailroom_server::model::{EditorDocument, Recipient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mailroom", version, about = "Email template composer and bulk sender")]
struct Cli {
    /// Configuration file; defaults to ./config.toml or the user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage saved email templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommand,
    },
    /// Look up recipients
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Send rendered HTML to users and/or a filtered audience
    Send(SendArgs),
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// List templates, creating samples when there are none
    List,
    /// Save a document as a new template
    Save {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// JSON file holding the editor document
        #[arg(long)]
        document: PathBuf,
    },
    /// Replace the document of an existing template
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        document: PathBuf,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    Search {
        query: String,
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
}

#[derive(Args)]
struct SendArgs {
    #[arg(long)]
    subject: String,
    /// Pre-rendered email markup
    #[arg(long)]
    html_file: PathBuf,
    /// User id to include; repeatable
    #[arg(long = "user")]
    users: Vec<String>,
    /// Country code filter; only the first is sent
    #[arg(long = "country")]
    countries: Vec<String>,
    #[arg(long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if let Err(e) = setup_logger(config.logging()) {
        eprintln!("Failed to initialize logger: {e}");
    }

    match cli.command {
        Command::Templates { action } => run_templates(&config, action).await,
        Command::Users { action } => run_users(&config, action).await,
        Command::Send(args) => run_send(config, args).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let result = match path {
        Some(path) => {
            dotenv::dotenv().ok();
            config::load_config_from(Some(path))
        }
        None => return config::get_config().config().cloned().map_err(|e| anyhow!(e)),
    };
    result.config().cloned().map_err(|e| anyhow!(e))
}

fn build_client(config: &AppConfig) -> Result<MarketingApiClient> {
    let api = config.api();
    let client = MarketingApiClient::new(api.base_url(), api.request_timeout())?;
    Ok(match api.session() {
        Some(session) => client.with_session(session),
        None => client,
    })
}

fn read_document(path: &Path) -> Result<EditorDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Document {} is not valid JSON", path.display()))?;
    Ok(EditorDocument::new(value))
}

fn print_notice(notice: TemplateNotice) -> Result<()> {
    match notice {
        TemplateNotice::Success(message) => {
            println!("{message}");
            Ok(())
        }
        TemplateNotice::Failure(message) | TemplateNotice::AuthenticationRequired(message) => {
            bail!(message)
        }
    }
}

async fn run_templates(config: &AppConfig, action: TemplateCommand) -> Result<()> {
    let client = build_client(config)?;
    let auth = AuthStateManager::new();
    let mut session = TemplateSession::new();

    match action {
        TemplateCommand::List => {
            if let Some(report) = session.refresh(&client, &auth).await? {
                println!(
                    "Created {} sample templates ({} failed)",
                    report.created.len(),
                    report.failed.len()
                );
            }
            for template in session.templates() {
                println!(
                    "{:>6}  {}  {}",
                    template.id,
                    template.name,
                    template.description.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        TemplateCommand::Save {
            name,
            description,
            document,
        } => {
            session.set_document(read_document(&document)?);
            let notice = session
                .save_as_new(&name, &description, &client, &auth)
                .await?;
            print_notice(notice)
        }
        TemplateCommand::Update { id, document } => {
            session.refresh(&client, &auth).await?;
            session.select(id)?;
            session.set_document(read_document(&document)?);
            let notice = session.update_current(&client, &auth).await?;
            print_notice(notice)
        }
    }
}

async fn run_users(config: &AppConfig, action: UserCommand) -> Result<()> {
    let client = build_client(config)?;
    let UserCommand::Search {
        query,
        page,
        page_size,
    } = action;

    let mut search = SearchController::new(config.page_size(), config.search_debounce());
    if let Some(page_size) = page_size {
        search.set_page_size(page_size)?;
    }
    let mut key = search.search_now(query);
    if page > 0 {
        key = search.set_page(page).or(key);
    }
    let Some(key) = key else {
        println!("{}", search.status_message().unwrap_or_default());
        return Ok(());
    };

    let result = client.search_users(&key.params()).await;
    search.apply_response(&key, result);

    for recipient in search.rows() {
        println!("{:<12} {}", recipient.id, recipient.display_label());
    }
    if let Some(message) = search.status_message() {
        println!("{message}");
    }
    if let Some(label) = search.pagination_label() {
        println!("{label}");
    }
    Ok(())
}

async fn run_send(config: AppConfig, args: SendArgs) -> Result<()> {
    let html = std::fs::read_to_string(&args.html_file)
        .with_context(|| format!("Failed to read {}", args.html_file.display()))?;
    let timeout = config.api().request_timeout() + Duration::from_secs(5);

    let mut model = Model::from_config(config, Arc::new(PrerenderedHtml::new(html)))?;
    model.handle(Msg::DispatchActivity(DispatchActivityMsg::OpenDialog));
    model.handle(Msg::DispatchActivity(DispatchActivityMsg::SubjectChanged(
        args.subject,
    )));
    model.handle(Msg::DispatchActivity(DispatchActivityMsg::CountriesChanged(
        args.countries,
    )));
    model.handle(Msg::DispatchActivity(DispatchActivityMsg::LanguageChanged(
        args.language,
    )));
    for id in args.users {
        let recipient = Recipient::new(id.clone(), id, "");
        model.handle(Msg::SelectionActivity(
            SelectionActivityMsg::RecipientToggled(recipient),
        ));
    }

    if let Some(notice) = model.send_dialog().and_then(|d| d.multi_country_notice()) {
        eprintln!("{notice}");
    }

    model.handle(Msg::DispatchActivity(DispatchActivityMsg::Submit));
    let blocked = model.send_dialog().and_then(|d| {
        d.filter_error()
            .map(ToString::to_string)
            .or_else(|| d.orchestrator().inline_error().map(ToString::to_string))
    });
    if let Some(message) = blocked {
        bail!(message);
    }

    let exit = ApplicationLifecycle::run_until(&mut model, timeout, |model| {
        model.send_dialog().is_none_or(|dialog| {
            matches!(
                dialog.orchestrator().phase(),
                DispatchPhase::Succeeded { .. } | DispatchPhase::Failed { .. }
            )
        })
    })
    .await;

    let outcome = match exit {
        LoopExit::AuthenticationRequired => Err(anyhow!(
            model.auth_required().unwrap_or_default().to_string()
        )),
        LoopExit::TimedOut => Err(anyhow!("Timed out waiting for the send to finish")),
        LoopExit::ConditionMet | LoopExit::Quit => {
            match model.send_dialog().map(|d| d.orchestrator().phase().clone()) {
                Some(DispatchPhase::Succeeded { response, .. }) => {
                    println!("{}", response.summary());
                    Ok(())
                }
                Some(DispatchPhase::Failed { message }) => Err(anyhow!(message)),
                _ => Err(anyhow!("Send did not complete")),
            }
        }
    };

    ApplicationLifecycle::shutdown_application(model);
    outcome
}
