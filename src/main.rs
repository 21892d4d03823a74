use std::{process, time::Duration};

use clap::{Parser, Subcommand};
use person_admin::{
    consts::consts::{PersonId, DEFAULT_API_COMMAND_URL, DEFAULT_API_QUERY_URL},
    http::transport::ReqwestTransport,
    model::person::{CreatePerson, Person, UpdatePerson},
    options::ClientOptions,
    router::router::{PageView, Resolution, Router},
    service::person_service::PersonService,
};
use serde::Serialize;

/// 👤 Person Admin, manages person records through the command and query APIs
#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the command API (create, update, remove)
    #[clap(long, env = "API_COMMAND_URL", default_value = DEFAULT_API_COMMAND_URL)]
    command_url: String,

    /// Base URL of the query API (list, get)
    #[clap(long, env = "API_QUERY_URL", default_value = DEFAULT_API_QUERY_URL)]
    query_url: String,

    /// Gives up on a request after this many seconds. Requests never time out when unset
    #[clap(long)]
    timeout_secs: Option<u64>,

    /// Print raw JSON instead of a table
    #[clap(long)]
    json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every person
    List,
    /// Show a single person
    Get { id: String },
    /// Create a person
    Create {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
    },
    /// Update the given fields of a person
    Update {
        id: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        email: Option<String>,
    },
    /// Remove a person
    Remove { id: String },
    /// Print which page a path resolves to
    Route { path: String },
    /// Resolve a path and render the page it mounts
    Open { path: String },
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let options = ClientOptions::default()
        .set_command_url(args.command_url)
        .set_query_url(args.query_url)
        .set_timeout(args.timeout_secs.map(Duration::from_secs));

    log::debug!("Client options: {:?}", options);

    let service = PersonService::from_options(&options)?;
    let router = Router::persons();
    let json = args.json;

    match args.command {
        Command::List => print_people(&service.list().await?, json)?,
        Command::Get { id } => print_person(&service.get(&PersonId::from(id)).await?, json)?,
        Command::Create { name, email } => {
            let person = service.create(&CreatePerson::new(name, email)).await?;
            print_person(&person, json)?
        }
        Command::Update { id, name, email } => {
            let update = UpdatePerson { name, email };

            if update.is_empty() {
                log::warn!("No fields given, sending an empty update");
            }

            let person = service.update(&PersonId::from(id), &update).await?;
            print_person(&person, json)?
        }
        Command::Remove { id } => print_person(&service.remove(&PersonId::from(id)).await?, json)?,
        Command::Route { path } => print_resolution(&router.resolve(&path)?),
        Command::Open { path } => {
            let resolution = router.resolve(&path)?;
            print_resolution(&resolution);
            open_page(&service, &resolution, json).await?
        }
    }

    Ok(())
}

/// Stands in for the page level views: fetches what the mounted page would show
async fn open_page(
    service: &PersonService<ReqwestTransport>,
    resolution: &Resolution,
    json: bool,
) -> anyhow::Result<()> {
    match resolution.view() {
        PageView::PersonList => print_people(&service.list().await?, json),
        PageView::EditForm(id) => print_person(&service.get(&id).await?, json),
        PageView::CreateForm => {
            println!("name:  ");
            println!("email: ");
            Ok(())
        }
    }
}

fn print_resolution(resolution: &Resolution) {
    if let Some(from) = &resolution.redirected_from {
        println!("{} -> {}", from, resolution.path);
    }

    match resolution.view() {
        PageView::EditForm(id) => println!("{} (edit {})", resolution.page, id),
        PageView::PersonList | PageView::CreateForm => println!("{}", resolution.page),
    }
}

fn print_people(people: &[Person], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&people);
    }

    println!("{:<38} {:<24} {:<32} {}", "ID", "NAME", "EMAIL", "UPDATED");

    for person in people {
        println!(
            "{:<38} {:<24} {:<32} {}",
            person.id, person.name, person.email, person.updated_at
        );
    }

    Ok(())
}

fn print_person(person: &Person, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(person);
    }

    println!("id:         {}", person.id);
    println!("name:       {}", person.name);
    println!("email:      {}", person.email);
    println!("created at: {}", person.created_at);
    println!("updated at: {}", person.updated_at);

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
