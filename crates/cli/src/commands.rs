//! CLI commands

use anyhow::{Context as _, Result, anyhow, bail};
use clap::Subcommand;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use techhub_storefront::views::{
    AuthTab, AuthView, CartView, HomeView, ProductCard, ProductDetailView, ProductsView,
    ProfileView, Rating, review_form,
};
use techhub_storefront::{
    AuthContext, FileSessionStore, Outcome, Route, SessionStatus, StorefrontConfig,
};
use tracing::{debug, info, warn};

const LOGIN_HINT: &str = "Not signed in. Run `techhub login` first.";

/// Everything a command needs: configuration and the shared auth context
pub struct Context {
    pub config: StorefrontConfig,
    pub data_dir: PathBuf,
    pub auth: AuthContext,
}

impl Context {
    pub fn new(
        config_path: Option<&Path>,
        api_url: Option<String>,
        data_dir: PathBuf,
    ) -> Result<Self> {
        let mut config =
            StorefrontConfig::load(config_path).context("Failed to load configuration")?;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        debug!(api = %config.api_base_url, data_dir = %data_dir.display(), "Resolved configuration");

        let client = config.public_client()?;
        let store = Arc::new(FileSessionStore::new(&data_dir));
        let auth = AuthContext::new(store, client, config.session_failure_policy);

        Ok(Self {
            config,
            data_dir,
            auth,
        })
    }
}

impl Context {
    /// Startup check of the stored token, once per process.
    ///
    /// A token the API no longer accepts is purged here, so later commands
    /// see an anonymous session instead of failing with 401s.
    pub async fn check_session(&self) -> SessionStatus {
        let status = self.auth.initialize().await;
        match status {
            SessionStatus::Purged => warn!("Stored session was rejected and has been removed"),
            SessionStatus::Kept => warn!("Could not verify the stored session; keeping it"),
            _ => debug!(?status, "Session check finished"),
        }
        status
    }
}

/// Data directory from the flag/`TECHHUB_DATA_DIR`, else the platform default
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => ProjectDirs::from("dev", "techhub", "techhub")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| anyhow!("Could not determine a data directory; pass --data-dir")),
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "TECHHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TECHHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Check the stored session and show the signed-in user
    Whoami {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Top-rated products and the category list
    Home,

    /// Product listing
    Products {
        /// Only show products of this category
        #[arg(long)]
        category: Option<i64>,
    },

    /// Product details and reviews
    Product { id: i64 },

    /// Show or change the shopping cart
    Cart {
        #[command(subcommand)]
        command: Option<CartCommands>,
    },

    /// Write, edit or delete a review
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// Your own reviews
    Reviews,
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Add one unit of a product
    Add { product_id: i64 },

    /// Set the quantity of a cart item
    Update {
        item_id: i64,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Remove a cart item
    Remove { item_id: i64 },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Review a product
    Add {
        product_id: i64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        comment: String,
    },

    /// Change one of your reviews
    Edit {
        review_id: i64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        comment: String,
    },

    /// Delete one of your reviews
    Delete { review_id: i64 },
}

impl Commands {
    /// Whether the command runs against the stored session and so needs the
    /// startup check first
    pub fn uses_session(&self) -> bool {
        !matches!(
            self,
            Commands::Register { .. } | Commands::Login { .. } | Commands::Logout
        )
    }

    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Commands::Register {
                email,
                username,
                password,
            } => register(ctx, email, username, password).await,
            Commands::Login { email, password } => login(ctx, email, password).await,
            Commands::Logout => {
                ctx.auth.logout();
                println!("Signed out");
                Ok(())
            }
            Commands::Whoami { json } => whoami(ctx, json).await,
            Commands::Home => home(ctx).await,
            Commands::Products { category } => products(ctx, category).await,
            Commands::Product { id } => product(ctx, id).await,
            Commands::Cart { command: None } => show_cart(ctx).await,
            Commands::Cart {
                command: Some(command),
            } => command.execute(ctx).await,
            Commands::Review { command } => command.execute(ctx).await,
            Commands::Reviews => my_reviews(ctx).await,
        }
    }
}

/// Turn a view outcome into the command result
fn finish(outcome: Outcome, error: Option<&str>) -> Result<()> {
    match outcome {
        Outcome::Updated | Outcome::Redirect(Route::Home) => Ok(()),
        Outcome::Redirect(Route::Auth) => bail!(LOGIN_HINT),
        Outcome::Redirect(route) => bail!("Unexpected redirect to {}", route.path()),
        Outcome::Failed | Outcome::Ignored => {
            bail!("{}", error.unwrap_or("Request failed"))
        }
        Outcome::Discarded => bail!("Request abandoned"),
    }
}

async fn register(
    ctx: &Context,
    email: String,
    username: String,
    password: String,
) -> Result<()> {
    let mut view = AuthView::new(ctx.auth.clone());
    let form = view.register_form_mut();
    form.email = email;
    form.username = username;
    form.password = password;

    let outcome = view.register().await;
    finish(outcome, view.error())?;
    if view.tab() == AuthTab::Login {
        println!("Account created. Sign in with `techhub login`.");
    }
    Ok(())
}

async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let mut view = AuthView::new(ctx.auth.clone());
    view.set_tab(AuthTab::Login);
    let form = view.login_form_mut();
    form.email = email;
    form.password = password;

    let outcome = view.login().await;
    finish(outcome, view.error())?;
    info!(data_dir = %ctx.data_dir.display(), "Session stored");
    println!("Signed in");
    Ok(())
}

async fn whoami(ctx: &Context, json: bool) -> Result<()> {
    if !ctx.auth.is_authenticated() {
        bail!(LOGIN_HINT);
    }
    let Some(user) = ctx.auth.user() else {
        println!("Signed in (profile unavailable)");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!("{} <{}>", user.username, user.email);
    }
    Ok(())
}

fn print_card(card: &ProductCard) {
    println!("#{:<5} {}  {}", card.id, card.name, card.price);
    println!("       ★ {}  {}", card.rating_summary, card.stock);
    if !card.excerpt.is_empty() {
        println!("       {}", card.excerpt);
    }
}

async fn home(ctx: &Context) -> Result<()> {
    let mut view = HomeView::new(ctx.auth.clone(), ctx.config.featured_count);
    let outcome = view.load().await;
    finish(outcome, view.error())?;

    println!("Популярные товары");
    for card in view.featured_cards() {
        print_card(&card);
    }
    println!();
    println!("Категории");
    for category in view.categories() {
        println!("#{:<5} {}", category.id, category.name);
    }
    Ok(())
}

async fn products(ctx: &Context, category: Option<i64>) -> Result<()> {
    let mut view = ProductsView::new(ctx.auth.clone());
    let outcome = match category {
        Some(id) => view.select_category(Some(id)).await,
        None => view.load().await,
    };
    finish(outcome, view.error())?;

    for card in view.cards() {
        print_card(&card);
    }
    Ok(())
}

async fn product(ctx: &Context, id: i64) -> Result<()> {
    let mut view = ProductDetailView::new(ctx.auth.clone(), id);
    if view.load().await != Outcome::Updated {
        bail!("Product {id} not found");
    }
    let Some(product) = view.product() else {
        bail!("Product {id} not found");
    };

    println!("{}", product.name);
    if let Some(category) = &product.category {
        println!("{}", category.name);
    }
    println!(
        "{}  {}",
        view.price().unwrap_or_default(),
        view.stock_label().unwrap_or_default()
    );
    println!("★ {}", ProductCard::from(product).rating_summary);
    println!();
    println!("{}", product.description);
    println!();

    let list = view.review_list();
    println!("{}", list.heading());
    for row in list.rows() {
        println!("[{}] {} · {} · {}/5", row.initial, row.username, row.date, row.rating);
        println!("    {}", row.comment);
    }
    if !view.review_form().is_available() {
        println!();
        println!("{}", review_form::LOGIN_PROMPT);
    }
    Ok(())
}

async fn show_cart(ctx: &Context) -> Result<()> {
    let mut view = CartView::new(ctx.auth.clone());
    let outcome = view.load().await;
    finish(outcome, view.error())?;
    print_cart(&view);
    Ok(())
}

fn print_cart(view: &CartView) {
    if view.is_empty() {
        println!("{}", techhub_storefront::views::cart::EMPTY_MESSAGE);
        return;
    }
    for item in view.items() {
        println!(
            "#{:<5} {} × {}  {}",
            item.id,
            item.product.name,
            item.quantity,
            techhub_storefront::format::price(item.subtotal())
        );
    }
    println!("Итого: {}", view.total_label());
}

impl CartCommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            CartCommands::Add { product_id } => {
                let mut view = ProductDetailView::new(ctx.auth.clone(), product_id);
                if view.load().await != Outcome::Updated {
                    bail!("Product {product_id} not found");
                }
                let outcome = view.add_to_cart().await;
                finish(outcome, view.error())?;
                if let Some(notice) = view.notice() {
                    println!("{notice}");
                }
                Ok(())
            }
            CartCommands::Update { item_id, quantity } => {
                let mut view = CartView::new(ctx.auth.clone());
                let outcome = view.load().await;
                finish(outcome, view.error())?;
                let outcome = view.update_quantity(item_id, quantity).await;
                finish(outcome, view.error())?;
                print_cart(&view);
                Ok(())
            }
            CartCommands::Remove { item_id } => {
                let mut view = CartView::new(ctx.auth.clone());
                let outcome = view.load().await;
                finish(outcome, view.error())?;
                let outcome = view.remove_item(item_id).await;
                finish(outcome, view.error())?;
                print_cart(&view);
                Ok(())
            }
        }
    }
}

impl ReviewCommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            ReviewCommands::Add {
                product_id,
                rating,
                comment,
            } => {
                let mut view = ProductDetailView::new(ctx.auth.clone(), product_id);
                if view.load().await != Outcome::Updated {
                    bail!("Product {product_id} not found");
                }
                let form = view.review_form_mut();
                form.set_rating(Rating::new(rating));
                form.set_comment(comment);

                let outcome = view.submit_review().await;
                finish(outcome, view.review_form().error())?;
                if let Some(notice) = view.review_form().notice() {
                    println!("{notice}");
                }
                Ok(())
            }
            ReviewCommands::Edit {
                review_id,
                rating,
                comment,
            } => {
                let mut view = ProfileView::new(ctx.auth.clone());
                let outcome = view.load().await;
                finish(outcome, view.error())?;
                if !view.begin_edit(review_id) {
                    bail!("Review {review_id} not found among your reviews");
                }
                view.set_edit_rating(Rating::new(rating));
                view.set_edit_comment(comment);

                let outcome = view.submit_edit().await;
                finish(outcome, view.error())?;
                if let Some(notice) = view.notice() {
                    println!("{notice}");
                }
                Ok(())
            }
            ReviewCommands::Delete { review_id } => {
                let mut view = ProfileView::new(ctx.auth.clone());
                let outcome = view.delete_review(review_id).await;
                finish(outcome, view.error())?;
                if let Some(notice) = view.notice() {
                    println!("{notice}");
                }
                Ok(())
            }
        }
    }
}

async fn my_reviews(ctx: &Context) -> Result<()> {
    let mut view = ProfileView::new(ctx.auth.clone());
    let outcome = view.load().await;
    finish(outcome, view.error())?;

    if let Some(user) = view.user() {
        println!("{} <{}>", user.username, user.email);
        println!();
    }

    if view.reviews().is_empty() {
        println!("{}", techhub_storefront::views::profile::NO_REVIEWS);
        return Ok(());
    }

    println!("{}", view.reviews_heading());
    for review in view.reviews() {
        println!(
            "#{:<5} {} · {}/5 · {}",
            review.id,
            review.product.name,
            review.rating,
            techhub_storefront::format::review_date(&review.created_at)
        );
        println!("       {}", review.comment);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_auth_commands_skip_session_check() {
        let login = Commands::Login {
            email: "ann@example.com".into(),
            password: "pw".into(),
        };
        assert!(!login.uses_session());
        assert!(!Commands::Logout.uses_session());
        assert!(Commands::Cart { command: None }.uses_session());
        assert!(Commands::Reviews.uses_session());
    }

    #[tokio::test]
    async fn test_session_check_purges_rejected_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("token"), "expired").unwrap();

        let ctx = Context::new(None, Some(mock_server.uri()), dir.path().to_path_buf()).unwrap();
        assert!(ctx.auth.is_authenticated());

        assert_eq!(ctx.check_session().await, SessionStatus::Purged);
        assert!(!ctx.auth.is_authenticated());
        assert!(!dir.path().join("token").exists());
    }

    #[tokio::test]
    async fn test_session_check_loads_profile() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "email": "ann@example.com",
                "username": "ann"
            })))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("token"), "valid").unwrap();

        let ctx = Context::new(None, Some(mock_server.uri()), dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.check_session().await, SessionStatus::Restored);
        assert_eq!(ctx.auth.user().map(|u| u.username), Some("ann".to_string()));
    }
}
