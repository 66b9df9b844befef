//! MovieReviews CLI
//!
//! Terminal front end for the MovieReviews service. Each command is a
//! navigation: it goes through the same route guard as the browser client
//! and renders the view it lands on.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use movie_reviews::catalog::{Category, MovieQuery, SortKey};
use movie_reviews::client::{HttpClient, MovieApi};
use movie_reviews::config::{generate_default_config, Config, LoggingConfig};
use movie_reviews::error::{ClientError, ErrorTreatment};
use movie_reviews::guard::{resolve, Route};
use movie_reviews::models::{Movie, Review};
use movie_reviews::session::{FileStorage, SessionContext, SessionStore};
use movie_reviews::views;
use movie_reviews::views::auth::{self, AuthForm, AuthMode, Field};
use movie_reviews::views::detail::{self, DetailView, ReviewOutcome, NO_REVIEWS};
use movie_reviews::views::home::HomeView;
use movie_reviews::views::movies::{self, MoviesView};

#[derive(Parser)]
#[command(name = "movie-reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse movies and share reviews from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API origin (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate to a path (/, /login, /movies, /movie/<id>)
    Open { path: String },

    /// Landing page with featured movies
    Home {
        #[arg(short, long, default_value = "")]
        search: String,
        /// All, Action, Drama, Comedy, Sci-Fi, Horror or Romance
        #[arg(long, default_value = "All")]
        category: Category,
    },

    /// Log in
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Ask the server who the session cookies belong to
        #[arg(long)]
        refresh: bool,
    },

    /// Search and browse the catalog
    Movies {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, default_value = "All")]
        category: Category,
        /// title or date
        #[arg(long, default_value = "title")]
        sort: SortKey,
    },

    /// Show a movie and its reviews
    Movie { imdb_id: String },

    /// Post a review
    Review {
        imdb_id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging)?;
    tracing::debug!(api = %config.api.base_url, session_dir = ?config.session_dir(), "Starting");

    let ctx = SessionContext::new(SessionStore::new(FileStorage::new(config.session_dir())));
    let api = HttpClient::new(config.http_client_config())?;
    let app = App {
        api,
        ctx,
        format: cli.format,
    };

    match cli.command {
        Commands::Open { path } => app.navigate(Route::parse(&path)).await,
        Commands::Home { search, category } => {
            let query = MovieQuery::new().search(search).category(category);
            app.navigate_with(Route::Home, query).await
        }
        Commands::Login { user_id, password } => {
            let mut form = AuthForm::with_mode(AuthMode::Login);
            form.set_field(Field::UserId, user_id);
            form.set_field(Field::Password, password);
            app.authenticate(form).await
        }
        Commands::Signup {
            name,
            mobile,
            email,
            password,
            confirm_password,
        } => {
            let mut form = AuthForm::with_mode(AuthMode::Register);
            form.set_field(Field::Name, name);
            form.set_field(Field::Mobile, mobile);
            form.set_field(Field::Email, email);
            form.set_field(Field::Password, password);
            form.set_field(Field::ConfirmPassword, confirm_password);
            app.authenticate(form).await
        }
        Commands::Logout => {
            let next = movies::logout(&app.api, &app.ctx).await;
            println!("Logged out");
            app.navigate(next).await
        }
        Commands::Whoami { refresh } => app.whoami(refresh).await,
        Commands::Movies {
            search,
            category,
            sort,
        } => {
            let query = MovieQuery::new().search(search).category(category).sort(sort);
            app.navigate_with(Route::Movies, query).await
        }
        Commands::Movie { imdb_id } => app.navigate(Route::MovieDetail(imdb_id)).await,
        Commands::Review { imdb_id, text } => app.review(imdb_id, text.join(" ")).await,
        Commands::Config { .. } => Ok(()),
    }
}

struct App {
    api: HttpClient,
    ctx: SessionContext<FileStorage>,
    format: OutputFormat,
}

impl App {
    async fn navigate(&self, route: Route) -> anyhow::Result<()> {
        self.navigate_with(route, MovieQuery::default()).await
    }

    /// Run the guard, then render where it lands
    async fn navigate_with(&self, route: Route, query: MovieQuery) -> anyhow::Result<()> {
        let target = resolve(route.clone(), self.ctx.is_signed_in());
        if target != route {
            eprintln!("{} -> {}", route, target);
        }
        let query = if target == route { query } else { MovieQuery::default() };

        match target {
            Route::Home => self.show_home(query).await,
            Route::Login => {
                show_login_help();
                Ok(())
            }
            Route::Movies => self.show_movies(query).await,
            Route::MovieDetail(imdb_id) => self.show_detail(imdb_id).await,
            Route::NotFound => bail!("Page not found: {}", route),
        }
    }

    async fn authenticate(&self, mut form: AuthForm) -> anyhow::Result<()> {
        // The login page itself is anonymous-only
        if self.ctx.is_signed_in() {
            return self.navigate(Route::Login).await;
        }

        match auth::submit(&self.api, &self.ctx, &mut form).await {
            Some(next) => {
                if let Some(message) = &form.success {
                    eprintln!("{}", message);
                }
                self.navigate(next).await
            }
            None => bail!(form.error.unwrap_or_else(|| "Request not sent".to_string())),
        }
    }

    async fn whoami(&self, refresh: bool) -> anyhow::Result<()> {
        if refresh {
            match self.api.current_user().await {
                Ok(user) => {
                    if let Err(e) = self.ctx.sign_in(user) {
                        tracing::warn!("Session not saved: {}", e);
                    }
                }
                Err(e) if e.treatment() == ErrorTreatment::SignIn => {
                    views::expire_session(&self.ctx, &e);
                    eprintln!("Session expired");
                }
                Err(e) => return Err(e.into()),
            }
        }

        match self.ctx.current() {
            Some(session) => match self.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
                OutputFormat::Csv => {
                    let mut wtr = csv::Writer::from_writer(std::io::stdout());
                    wtr.write_record(["id", "name", "email", "mobile"])?;
                    wtr.write_record([
                        session.id.as_str(),
                        session.name.as_str(),
                        session.email.as_deref().unwrap_or_default(),
                        session.mobile.as_deref().unwrap_or_default(),
                    ])?;
                    wtr.flush()?;
                }
                OutputFormat::Table => {
                    println!("{:<8} {}", "Name", session.name);
                    println!("{:<8} {}", "ID", session.id);
                    if let Some(email) = &session.email {
                        println!("{:<8} {}", "Email", email);
                    }
                    if let Some(mobile) = &session.mobile {
                        println!("{:<8} {}", "Mobile", mobile);
                    }
                }
            },
            None => println!("Not logged in"),
        }
        Ok(())
    }

    async fn review(&self, imdb_id: String, text: String) -> anyhow::Result<()> {
        let mut view = DetailView::new(imdb_id);
        view.set_draft(text);

        let outcome = detail::submit_review(&self.api, &self.ctx, &mut view).await;
        match outcome {
            ReviewOutcome::Posted => {
                println!("Review posted");
                self.print_reviews(&view)
            }
            ReviewOutcome::RedirectToLogin => {
                eprintln!("Login required");
                show_login_help();
                Ok(())
            }
            ReviewOutcome::Invalid | ReviewOutcome::Failed => {
                bail!(view.review_error.unwrap_or_default())
            }
        }
    }

    async fn show_home(&self, query: MovieQuery) -> anyhow::Result<()> {
        let mut view = HomeView::new();
        view.query = query;
        view.load(&self.api).await;

        let hero = view.hero();
        match self.format {
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "hero": {"title": hero.title, "poster": hero.poster, "blurb": hero.blurb},
                    "featured": view.visible(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            OutputFormat::Csv => print_movies_csv(&view.visible())?,
            OutputFormat::Table => {
                println!("{}", hero.title);
                println!("{}", hero.blurb);
                println!();
                match view.empty_message() {
                    Some(message) => println!("{}", message),
                    None => print_movies_table(&view.visible()),
                }
                println!();
                println!("Join the community: movie-reviews signup --help");
            }
        }
        Ok(())
    }

    async fn show_movies(&self, query: MovieQuery) -> anyhow::Result<()> {
        let mut view = MoviesView::with_query(query);
        view.load(&self.api).await;

        if let Some(e) = view.movies.error() {
            return Err(self.handle_error(e));
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view.visible())?),
            OutputFormat::Csv => print_movies_csv(&view.visible())?,
            OutputFormat::Table => {
                println!("{}  ({}, {})", view.result_label(), view.query.category, view.query.sort.label());
                match view.empty_message() {
                    Some(message) => println!("{}", message),
                    None => print_movies_table(&view.visible()),
                }
            }
        }
        Ok(())
    }

    async fn show_detail(&self, imdb_id: String) -> anyhow::Result<()> {
        let mut view = DetailView::new(imdb_id);
        detail::load(&self.api, &mut view).await;

        if let Some(e) = view.session_error() {
            return Err(self.handle_error(e));
        }
        if let Some(message) = view.page_error() {
            bail!("{}\nBack to Movies: movie-reviews open {}", message, view.back_route());
        }
        let Some(movie) = view.movie.data() else {
            bail!("Movie not loaded");
        };

        match self.format {
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "movie": movie,
                    "reviews": view.review_list(),
                    "reviewsError": view.reviews_banner(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                Ok(())
            }
            OutputFormat::Csv => print_reviews_csv(view.review_list()),
            OutputFormat::Table => {
                print_movie(movie);
                println!();
                self.print_reviews(&view)
            }
        }
    }

    fn print_reviews(&self, view: &DetailView) -> anyhow::Result<()> {
        if self.format == OutputFormat::Csv {
            return print_reviews_csv(view.review_list());
        }
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(view.review_list())?);
            return Ok(());
        }

        println!("{}", view.review_count_label());
        if let Some(banner) = view.reviews_banner() {
            println!("! {}", banner);
        } else if view.review_list().is_empty() {
            println!("{}", NO_REVIEWS);
        }
        for review in view.review_list() {
            print_review(review);
        }
        Ok(())
    }

    /// Apply the error treatment policy at the CLI edge
    fn handle_error(&self, error: &ClientError) -> anyhow::Error {
        if let Some(next) = views::expire_session(&self.ctx, error) {
            eprintln!("Session expired -> {}", next);
            show_login_help();
        }
        anyhow::anyhow!(error.user_message())
    }
}

fn show_login_help() {
    println!("Log in:          movie-reviews login --user-id <ID> --password <PASSWORD>");
    println!("Create account:  movie-reviews signup --name <NAME> --mobile <MOBILE> --email <EMAIL> --password <PASSWORD> --confirm-password <PASSWORD>");
}

fn print_movies_table(movies: &[&Movie]) {
    println!("{:<12} {:<40} {:<6} {:<28} {}", "IMDb", "Title", "Year", "Genres", "Reviews");
    println!("{}", "-".repeat(100));
    for movie in movies {
        println!(
            "{:<12} {:<40} {:<6} {:<28} {}",
            movie.imdb_id,
            truncate(&movie.title, 40),
            movie
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(&movie.genres.join(", "), 28),
            movie.review_count()
        );
    }
}

fn print_movies_csv(movies: &[&Movie]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["imdb_id", "title", "release_date", "genres", "reviews"])?;
    for movie in movies {
        wtr.write_record([
            movie.imdb_id.clone(),
            movie.title.clone(),
            movie.release_date.clone().unwrap_or_default(),
            movie.genres.join("|"),
            movie.review_count().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_movie(movie: &Movie) {
    println!("{}", movie.title);
    if let Some(year) = movie.release_year() {
        println!("{:<10} {}", "Released", year);
    }
    if !movie.genres.is_empty() {
        println!("{:<10} {}", "Genres", movie.genres.join(", "));
    }
    println!("{:<10} {}", "Poster", movie.poster_or_placeholder());
    if let Some(trailer) = movie.trailer_embed_url() {
        println!("{:<10} {}", "Trailer", trailer);
    }
    println!("{:<10} {}", "Reviews", movie.review_count_label());
}

fn print_review(review: &Review) {
    let date = review
        .created_date()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default();
    println!("[{}] {}  {}", review.initial(), review.author(), date);
    println!("    {}", review.body);
}

fn print_reviews_csv(reviews: &[Review]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["author", "created", "body"])?;
    for review in reviews {
        wtr.write_record([
            review.author(),
            review.created.as_deref().unwrap_or_default(),
            review.body.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("movie_reviews={}", config.level)))
        .unwrap_or_else(|_| EnvFilter::new("movie_reviews=warn"));

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.format == "json" {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry().with(fmt_layer).with(filter).init();
    Ok(())
}
