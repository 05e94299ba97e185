mod render;
mod session;
mod sse;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use futures_util::StreamExt;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use travel::booking::FormError;
use travel::nav::{self, NavMenu, Route};
use travel::{
    AuthEvent, AuthEventKind, Booking, BookingForm, BookingWithDestination, Destination, ErrorBody, Profile,
    ProfileUpdate, SessionUser,
};
use uuid::Uuid;

use crate::session::StoredSession;

/// Message the server uses for a wrong email or password.
const INVALID_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Please login to continue (redirect: {redirect})")]
    LoginRequired { redirect: String },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Form(#[from] FormError),
    #[error("nothing to update; pass --full-name, --email, or --phone")]
    EmptyUpdate,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("session file: {0}")]
    SessionFile(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "wayfarer", about = "Wayfarer travel booking client")]
struct Cli {
    #[arg(long, env = "WAYFARER_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "WAYFARER_SESSION_FILE", default_value = ".wayfarer-session")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server is up.
    Ping,
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    Dashboard,
    /// Search destinations by name or location.
    Search { query: Option<String> },
    Destination { id: Uuid },
    /// Book a destination.
    Book(BookArgs),
    /// List your bookings.
    Bookings,
    Profile(ProfileCommand),
    /// Show the navigation menu for your role.
    Nav,
    /// Follow auth events for the signed-in user.
    Watch,
}

#[derive(Args, Debug)]
struct BookArgs {
    destination_id: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Defaults to the signed-in email.
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    travelers: Option<String>,
    #[arg(long)]
    check_in: String,
    #[arg(long)]
    check_out: String,
    /// upi, card, or wallet.
    #[arg(long)]
    payment: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_file: PathBuf,
    http: reqwest::Client,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, session_file: cli.session_file, http: reqwest::Client::new() };

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Ping => run_ping(ctx).await,
        Command::Register { email, password, full_name } => run_register(ctx, email, password, full_name).await,
        Command::Login { email, password } => run_login(ctx, email, password).await,
        Command::Logout => run_logout(ctx).await,
        Command::Dashboard => run_dashboard(ctx).await,
        Command::Search { query } => run_search(ctx, query.as_deref().unwrap_or("")).await,
        Command::Destination { id } => run_destination(ctx, id).await,
        Command::Book(args) => run_book(ctx, args).await,
        Command::Bookings => run_bookings(ctx).await,
        Command::Profile(profile) => match profile.command {
            ProfileSubcommand::Show => run_profile_show(ctx).await,
            ProfileSubcommand::Update { full_name, email, phone } => {
                run_profile_update(ctx, ProfileUpdate { full_name, email, phone }).await
            }
        },
        Command::Nav => run_nav(ctx).await,
        Command::Watch => run_watch(ctx).await,
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Body returned by sign-up and sign-in.
#[derive(Debug, serde::Deserialize)]
struct SessionResponse {
    user: SessionUser,
    landing: String,
    token: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ProfileResponse {
    profile: Profile,
    is_admin: bool,
}

impl CliContext {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send a request, turning non-2xx replies into [`CliError`]. A 401 on an
    /// authenticated request clears the stored session.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<reqwest::Response, CliError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = response.json::<ErrorBody>().await.ok();
        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            session::clear(&self.session_file).await?;
            let redirect = error.and_then(|e| e.redirect).unwrap_or_else(|| Route::Login.path());
            return Err(CliError::LoginRequired { redirect });
        }
        Err(server_error(status, error))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, CliError> {
        let response = self.send::<Value>(Method::GET, path, Some(token), None).await?;
        Ok(response.json().await?)
    }

    /// Load the stored session and run the route guard for `route`.
    async fn require(&self, route: &Route) -> Result<StoredSession, CliError> {
        session::require(route, session::load(&self.session_file).await)
    }
}

fn server_error(status: StatusCode, body: Option<ErrorBody>) -> CliError {
    let message = body.map_or_else(
        || status.canonical_reason().unwrap_or("request failed").to_owned(),
        |b| b.error,
    );
    CliError::Server { status: status.as_u16(), message }
}

/// Sign-in failures from the server read as a friendlier message.
fn login_error(err: CliError) -> CliError {
    match err {
        CliError::Server { status: 401, ref message } if message.contains(INVALID_CREDENTIALS) => {
            CliError::InvalidCredentials
        }
        other => other,
    }
}

// =============================================================================
// PAGES
// =============================================================================

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    ctx.send::<Value>(Method::GET, "/healthz", None, None).await?;
    println!("ok");
    Ok(())
}

async fn open_session(ctx: &CliContext, response: reqwest::Response) -> Result<SessionResponse, CliError> {
    let body: SessionResponse = response.json().await?;
    let stored = StoredSession {
        token: body.token.clone(),
        user: body.user.clone(),
        landing: Some(body.landing.clone()),
        session_id: body.session_id.clone(),
    };
    session::save(&ctx.session_file, &stored).await?;
    Ok(body)
}

async fn run_register(
    ctx: &CliContext,
    email: String,
    password: String,
    full_name: Option<String>,
) -> Result<(), CliError> {
    let body = json!({ "email": email, "password": password, "full_name": full_name });
    let response = ctx.send(Method::POST, "/api/auth/signup", None, Some(&body)).await?;
    let session = open_session(ctx, response).await?;
    println!("Account created! Signed in as {}", session.user.email);
    println!("-> {}", session.landing);
    Ok(())
}

async fn run_login(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let body = json!({ "email": email, "password": password });
    let response = ctx
        .send(Method::POST, "/api/auth/login", None, Some(&body))
        .await
        .map_err(login_error)?;
    let session = open_session(ctx, response).await?;
    println!("Welcome back!");
    println!("-> {}", session.landing);
    Ok(())
}

async fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Profile).await?;
    ctx.send::<Value>(Method::POST, "/api/auth/logout", Some(&stored.token), None).await?;
    session::clear(&ctx.session_file).await?;
    println!("Logged out successfully");
    println!("-> {}", Route::Login);
    Ok(())
}

const DASHBOARD_POPULAR: usize = 4;

async fn run_dashboard(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Dashboard).await?;
    let destinations: Vec<Destination> = ctx.get("/api/destinations", &stored.token).await?;

    println!("Hello, {}", stored.user.email);
    println!("\nCategories\n{}", render::links(&nav::dashboard_categories()));
    println!("\nQuick links\n{}", render::links(&nav::dashboard_quick_links()));
    println!("\nPopular destinations");
    for d in destinations.iter().take(DASHBOARD_POPULAR) {
        println!("  {}", render::destination_line(d));
    }
    Ok(())
}

async fn run_search(ctx: &CliContext, query: &str) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Search).await?;
    let all: Vec<Destination> = ctx.get("/api/destinations", &stored.token).await?;
    let found = travel::filter_destinations(&all, query);
    if found.is_empty() {
        println!("No destinations found");
    }
    for d in &found {
        println!("{}", render::destination_line(d));
    }
    Ok(())
}

async fn run_destination(ctx: &CliContext, id: Uuid) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Destination(id)).await?;
    let destination: Destination = ctx.get(&format!("/api/destinations/{id}"), &stored.token).await?;
    println!("{}", render::destination_detail(&destination));
    println!("\nBook with: wayfarer book {id} --name <name> --check-in YYYY-MM-DD --check-out YYYY-MM-DD");
    Ok(())
}

fn booking_form(args: BookArgs, session_email: &str) -> BookingForm {
    let mut form = BookingForm::new(session_email);
    form.traveler_name = args.name;
    form.check_in_date = args.check_in;
    form.check_out_date = args.check_out;
    if let Some(age) = args.age {
        form.age = age;
    }
    if let Some(gender) = args.gender {
        form.gender = gender;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(travelers) = args.travelers {
        form.number_of_travelers = travelers;
    }
    if let Some(payment) = args.payment {
        form.payment_method = payment;
    }
    form
}

async fn run_book(ctx: &CliContext, args: BookArgs) -> Result<(), CliError> {
    let destination_id = args.destination_id;
    let stored = ctx.require(&Route::Booking(destination_id)).await?;
    let new_booking = booking_form(args, &stored.user.email).into_new_booking(destination_id)?;

    let destination: Destination = ctx.get(&format!("/api/destinations/{destination_id}"), &stored.token).await?;
    println!(
        "{} to {} ({} nights)",
        new_booking.check_in_date,
        new_booking.check_out_date,
        new_booking.nights()
    );
    if let Some(estimate) = travel::compute_total(destination.price, new_booking.number_of_travelers) {
        println!(
            "{}: {} x {} travelers = {}",
            destination.name,
            render::price_label(destination.price),
            new_booking.number_of_travelers,
            render::amount(estimate)
        );
    }

    let response = ctx
        .send(Method::POST, "/api/bookings", Some(&stored.token), Some(&new_booking))
        .await?;
    let booking: Booking = response.json().await?;
    println!("Booking created successfully!");
    println!("  id: {}  status: {}", booking.id, booking.status);
    println!("-> {}", Route::MyBookings);
    Ok(())
}

async fn run_bookings(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::MyBookings).await?;
    let bookings: Vec<BookingWithDestination> = ctx.get("/api/bookings", &stored.token).await?;
    if bookings.is_empty() {
        println!("No bookings yet");
        println!("Start exploring and book your dream destination!");
        return Ok(());
    }
    let entries: Vec<String> = bookings.iter().map(render::booking_entry).collect();
    println!("{}", entries.join("\n\n"));
    Ok(())
}

/// Fetch the profile and render it with the server's current role lookup.
async fn profile_page(ctx: &CliContext, stored: &StoredSession) -> Result<String, CliError> {
    let body: ProfileResponse = ctx.get("/api/profile", &stored.token).await?;
    Ok(render::profile(&body.profile, &stored.user.email, body.is_admin))
}

async fn run_profile_show(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Profile).await?;
    println!("{}", profile_page(ctx, &stored).await?);
    Ok(())
}

async fn run_profile_update(ctx: &CliContext, update: ProfileUpdate) -> Result<(), CliError> {
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    let stored = ctx.require(&Route::Profile).await?;
    ctx.send(Method::PATCH, "/api/profile", Some(&stored.token), Some(&update)).await?;
    println!("Profile updated successfully!");
    println!("{}", profile_page(ctx, &stored).await?);
    Ok(())
}

async fn run_nav(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Dashboard).await?;
    let menu: NavMenu = ctx.get("/api/nav", &stored.token).await?;
    println!("{}", render::nav_menu(&menu));
    Ok(())
}

/// Follow the auth event stream until this session signs out.
async fn run_watch(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.require(&Route::Dashboard).await?;
    let mut state = session::auth_state(Some(&stored));
    let response = ctx.send::<Value>(Method::GET, "/api/auth/events", Some(&stored.token), None).await?;
    eprintln!("watching auth events for {}", stored.user.email);

    let mut decoder = sse::SseDecoder::default();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        for message in decoder.push(&chunk?) {
            let event: AuthEvent = serde_json::from_str(&message.data)?;
            state.apply(&event);
            println!("{}", event.kind.as_str());

            if event.kind == AuthEventKind::SignedOut && !state.is_authenticated() {
                session::clear(&ctx.session_file).await?;
                println!("-> {}", Route::Login);
                return Ok(());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
