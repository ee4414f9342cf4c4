// src/main.rs
use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use recipe_client::{
    contact::ContactForm,
    detail::RecipeDetailLoader,
    featured::FeaturedRecipes,
    route::{Navigator, Route},
    signup::SignUpForm,
    telemetry,
    verify::{VerificationState, VerifyEmailHandler, VerifyNotice},
    view, Config, FileStore, HttpApi, RecipeApi, SessionContext,
};

#[derive(Parser)]
#[command(name = "recipe-client")]
#[command(about = "Browse recipes and manage your account from the terminal")]
struct Args {
    /// Backend base url (overrides RECIPE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Where the session token is kept (overrides RECIPE_SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show featured recipes, personalized when signed in
    Featured,
    /// Show one recipe
    Recipe { slug: String },
    /// Send a message to the site owners
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Confirm an email address with the token from the verification link
    Verify { token: String },
    /// Ask for a new verification email
    Resend { email: String },
    /// Store a session token obtained elsewhere
    Login {
        token: String,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Forget the stored session
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing("warn,recipe_client=info");

    let args = Args::parse();
    let mut config = Config::load();
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(path) = args.session_file {
        config.session_file = path;
    }
    info!(api_url = %config.api_url, "starting");

    let store = FileStore::open(&config.session_file)
        .with_context(|| format!("opening session file {}", config.session_file.display()))?;
    let session = SessionContext::new(Arc::new(store));
    let api: Arc<dyn RecipeApi> = Arc::new(HttpApi::new(&config.api_url, config.http_timeout)?);
    let (nav, mut routes) = Navigator::channel();

    match args.command {
        Command::Featured => {
            let mut page = FeaturedRecipes::mount(api, session);
            print!("{}", view::featured(&page.state()));
            let state = page.settled().await;
            print!("{}", view::featured(&state));
        }
        Command::Recipe { slug } => {
            let mut loader = RecipeDetailLoader::open(api, &slug);
            let state = loader.settled().await;
            print!("{}", view::detail(&state));
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let mut form = ContactForm::new(api);
            form.set_field("name", name)?;
            form.set_field("email", email)?;
            form.set_field("message", message)?;
            form.submit().await;
            print!("{}", view::contact(&form));
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let mut form = SignUpForm::new(Arc::clone(&api), nav.clone());
            form.set_field("name", name)?;
            form.set_field("email", email)?;
            form.set_field("password", password)?;
            form.submit().await;
            print!("{}", view::sign_up(&form));
            if let Ok(Route::VerifyNotice { email }) = routes.try_recv() {
                println!("-> {}", Route::VerifyNotice { email: email.clone() });
                print!("{}", view::verify_notice(&VerifyNotice::new(api, email)));
            }
        }
        Command::Verify { token } => {
            let mut handler = VerifyEmailHandler::mount(api, nav.clone(), &token);
            print!("{}", view::verification(handler.state()));
            let state = handler.settled().await;
            print!("{}", view::verification(state));
            drop(nav);
            if state == VerificationState::Verified {
                if let Some(route) = routes.recv().await {
                    println!("-> {route}");
                    print!("{}", view::verified());
                }
            }
        }
        Command::Resend { email } => {
            let notice = VerifyNotice::new(api, email);
            notice.resend().await;
            print!("{}", view::verify_notice(&notice));
        }
        Command::Login { token, user_id } => {
            session.sign_in(&token, user_id.as_deref())?;
            println!("Signed in.");
        }
        Command::Logout => {
            session.clear();
            println!("Signed out.");
        }
    }
    Ok(())
}
