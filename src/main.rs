mod area;
mod chat;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use api::types::{CreateCommunityRequest, CreateRecruitmentRequest, SignUpRequest};
use api::{ApiClient, ApiConfig, ApiError, Reload, Upload};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use session::{AuthState, FileStore, Session, View};

use crate::chat::ChatTranscript;

const SESSION_FILE_NAME: &str = ".greenmate-session.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("not logged in; run `greenmate login` or `greenmate sign-up` first")]
    NotLoggedIn,
    #[error("nickname `{0}` is already taken")]
    NicknameTaken(String),
    #[error("could not read {path}: {source}")]
    ReadUpload { path: String, source: io::Error },
    #[error("invalid area: {0}")]
    InvalidArea(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "greenmate", about = "GreenMate community API client")]
struct Cli {
    /// Overrides GREENMATE_API_HOST / GREENMATE_API_PORT.
    #[arg(long, env = "GREENMATE_API_BASE_URL")]
    base_url: Option<String>,

    /// Where the session tokens are kept between invocations.
    #[arg(long, env = "GREENMATE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        email: String,
        #[arg(long, env = "GREENMATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    SignUp(SignUpArgs),
    Logout,
    Whoami,
    NicknameCheck {
        nickname: String,
    },
    Team(TeamCommand),
    Community(CommunityCommand),
    Learning,
    Chat,
}

#[derive(Args, Debug)]
struct SignUpArgs {
    #[arg(long)]
    nickname: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "GREENMATE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    profile_image: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TeamCommand {
    #[command(subcommand)]
    command: TeamSubcommand,
}

#[derive(Subcommand, Debug)]
enum TeamSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, help = "Due date, e.g. 2024-05-15")]
        due_date: String,
        #[arg(long, conflicts_with = "vertex", help = "Circle area as lat,lng,radius_m")]
        circle: Option<String>,
        #[arg(long, help = "Polygon vertex as lat,lng; repeat for each vertex")]
        vertex: Vec<String>,
        #[arg(long)]
        photo: Vec<PathBuf>,
    },
    Join {
        id: i64,
    },
    Comment {
        id: i64,
        content: String,
    },
}

#[derive(Args, Debug)]
struct CommunityCommand {
    #[command(subcommand)]
    command: CommunitySubcommand,
}

#[derive(Subcommand, Debug)]
enum CommunitySubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        photo: Vec<PathBuf>,
    },
    Like {
        id: i64,
    },
    Comment {
        id: i64,
        content: String,
    },
}

/// Drops the in-process login state after the client wiped the session.
#[derive(Default)]
struct CliReload {
    fired: AtomicBool,
}

impl CliReload {
    /// True only for the first call; later reloads stay quiet.
    fn take_notice(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }
}

impl Reload for CliReload {
    fn reload(&self) {
        if self.take_notice() {
            tracing::warn!("session ended by the server; returning to login");
            eprintln!("Your session has ended. Log in again with `greenmate login`.");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = ApiConfig::new(base_url)?.base_url;
    }

    let session_path = cli.session_file.unwrap_or_else(default_session_path);
    let session = Session::new(Arc::new(FileStore::new(session_path)));
    let client = ApiClient::new(&config, session)?.with_reload(Arc::new(CliReload::default()));
    tracing::debug!(base_url = client.base_url(), "api client ready");

    run(&client, cli.command).await
}

fn default_session_path() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(SESSION_FILE_NAME), |home| home.join(SESSION_FILE_NAME))
}

async fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let claims = client.login(&email, &password).await?;
            print_login(claims.as_ref().map(|c| c.nickname.as_str()));
            Ok(())
        }
        Command::SignUp(args) => run_sign_up(client, args).await,
        Command::Logout => {
            client.logout()?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            let state = AuthState::load(client.session()).map_err(ApiError::from)?;
            match (state.view(false), &state.user) {
                (View::Main, Some(user)) => print_json(user),
                _ => Err(CliError::NotLoggedIn),
            }
        }
        Command::NicknameCheck { nickname } => {
            let duplicate = client.check_nickname_duplicate(&nickname).await?;
            print_json(&serde_json::json!({ "nickname": nickname, "isDuplicate": duplicate }))
        }
        Command::Team(team) => {
            require_login(client)?;
            run_team(client, team).await
        }
        Command::Community(community) => {
            require_login(client)?;
            run_community(client, community).await
        }
        Command::Learning => {
            require_login(client)?;
            print_json(&client.learning_list().await?)
        }
        Command::Chat => {
            require_login(client)?;
            run_chat(client).await
        }
    }
}

fn require_login(client: &ApiClient) -> Result<(), CliError> {
    // A token whose payload cannot be decoded still counts; the server decides.
    if client.session().is_authenticated().map_err(ApiError::from)? {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

async fn run_sign_up(client: &ApiClient, args: SignUpArgs) -> Result<(), CliError> {
    if client.check_nickname_duplicate(&args.nickname).await? {
        return Err(CliError::NicknameTaken(args.nickname));
    }
    let profile_image = args.profile_image.as_deref().map(read_upload).transpose()?;
    let request = SignUpRequest { nickname: args.nickname, email: args.email, password: args.password };
    let claims = client.sign_up(&request, profile_image).await?;
    print_login(claims.as_ref().map(|c| c.nickname.as_str()));
    Ok(())
}

async fn run_team(client: &ApiClient, team: TeamCommand) -> Result<(), CliError> {
    match team.command {
        TeamSubcommand::List => print_json(&client.team_list().await?),
        TeamSubcommand::Show { id } => print_json(&client.team_detail(id).await?),
        TeamSubcommand::Create { title, description, due_date, circle, vertex, photo } => {
            let area = match (circle, vertex.is_empty()) {
                (Some(circle), _) => Some(area::parse_circle(&circle).map_err(CliError::InvalidArea)?),
                (None, false) => Some(area::parse_polygon(&vertex).map_err(CliError::InvalidArea)?),
                (None, true) => None,
            };
            let photos = read_uploads(&photo)?;
            let request = CreateRecruitmentRequest { title, description, due_date, area };
            client.create_team_recruitment(&request, photos).await?;
            println!("recruitment created");
            Ok(())
        }
        TeamSubcommand::Join { id } => print_json(&client.join_team(id).await?),
        TeamSubcommand::Comment { id, content } => {
            client.comment_on_team(id, &content).await?;
            println!("comment posted");
            Ok(())
        }
    }
}

async fn run_community(client: &ApiClient, community: CommunityCommand) -> Result<(), CliError> {
    match community.command {
        CommunitySubcommand::List => print_json(&client.community_list().await?),
        CommunitySubcommand::Show { id } => print_json(&client.community_detail(id).await?),
        CommunitySubcommand::Create { title, description, photo } => {
            let photos = read_uploads(&photo)?;
            let request = CreateCommunityRequest { title, description };
            client.create_community_post(&request, photos).await?;
            println!("post created");
            Ok(())
        }
        CommunitySubcommand::Like { id } => print_json(&client.like_community_post(id).await?),
        CommunitySubcommand::Comment { id, content } => {
            client.comment_on_community_post(id, &content).await?;
            println!("comment posted");
            Ok(())
        }
    }
}

async fn run_chat(client: &ApiClient) -> Result<(), CliError> {
    let mut transcript = ChatTranscript::default();
    println!("bot> {}", chat::GREETING);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if !transcript.push_user(&line) {
            continue;
        }

        match client.chat(&transcript.as_requests()).await {
            Ok(reply) => {
                println!("bot> {}", reply.content);
                transcript.push_bot(reply.content);
            }
            Err(e) => match after_chat_error(&e) {
                ChatFlow::Stop => return Err(e.into()),
                ChatFlow::Continue => eprintln!("error: {e}"),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChatFlow {
    Continue,
    Stop,
}

/// A failed turn ends the REPL only when it also ended the session.
fn after_chat_error(err: &ApiError) -> ChatFlow {
    if err.ended_session() { ChatFlow::Stop } else { ChatFlow::Continue }
}

fn read_upload(path: &Path) -> Result<Upload, CliError> {
    Upload::from_path(path).map_err(|source| CliError::ReadUpload { path: path.display().to_string(), source })
}

fn read_uploads(paths: &[PathBuf]) -> Result<Vec<Upload>, CliError> {
    paths.iter().map(|path| read_upload(path)).collect()
}

fn print_login(nickname: Option<&str>) {
    match nickname {
        Some(nickname) => println!("logged in as {nickname}"),
        None => println!("logged in"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
