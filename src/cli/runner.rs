//! CLI runner - executes commands

use crate::analytics::{SharedSink, TracingSink};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ListingMode, SiteConfig};
use crate::detail::{DetailState, PostDetail};
use crate::error::Result;
use crate::fetcher::PostFetcher;
use crate::pagination::{LoadMoreController, ListingOptions, NumberedPagesController};
use crate::present;
use crate::store::{ContentStore, MemoryStore, RestStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Index { page, loads } => self.print_listing(*page, *loads).await,
            Commands::List { page } => self.print_listing(*page, 0).await,
            Commands::Browse { loads } => self.print_listing(1, *loads).await,
            Commands::Show { id } => self.show(id).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load configuration from `--config`, or from the environment
    fn load_config(&self) -> Result<SiteConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                SiteConfig::load(path)
            }
            None => SiteConfig::from_env(),
        }
    }

    /// Remote store, or the fixture file when `--fixtures` is given
    fn build_store(&self, config: &SiteConfig) -> Result<Arc<dyn ContentStore>> {
        if let Some(path) = &self.cli.fixtures {
            info!(path = %path.display(), "serving posts from fixtures");
            let store = MemoryStore::from_json_file(&config.store.table, path)?;
            return Ok(Arc::new(store));
        }
        Ok(Arc::new(RestStore::from_site_config(config)?))
    }

    fn build_fetcher(&self, config: &SiteConfig) -> Result<PostFetcher> {
        let store = self.build_store(config)?;
        Ok(PostFetcher::with_table(store, &config.store.table))
    }

    fn events() -> SharedSink {
        Arc::new(TracingSink)
    }

    /// Count posts of the configured site
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let fetcher = self.build_fetcher(&config)?;

        match fetcher.count_posts(&config.blog.website_id).await {
            Ok(total) => {
                self.output(
                    &json!({
                        "type": "CONNECTION_STATUS",
                        "status": "SUCCEEDED",
                        "website_id": config.blog.website_id,
                        "total_count": total,
                    }),
                    &format!("{} posts for site '{}'", total, config.blog.website_id),
                );
            }
            Err(e) => {
                self.output(
                    &json!({
                        "type": "CONNECTION_STATUS",
                        "status": "FAILED",
                        "message": e.to_string(),
                    }),
                    &format!("Connection failed: {e}"),
                );
            }
        }

        Ok(())
    }

    /// Pagination style for a listing command. `index` follows `blog.mode`.
    fn listing_mode(&self, config: &SiteConfig) -> ListingMode {
        match self.cli.command {
            Commands::List { .. } => ListingMode::NumberedPages,
            Commands::Browse { .. } => ListingMode::LoadMore,
            _ => config.blog.mode,
        }
    }

    /// Print a listing in the mode the command asks for
    async fn print_listing(&self, page: usize, loads: usize) -> Result<()> {
        let config = self.load_config()?;
        let mode = self.listing_mode(&config);
        debug!(?mode, page, loads, "listing posts");

        let (msg, text) = self.listing(&config, mode, page, loads).await?;
        self.output(&msg, &text);
        Ok(())
    }

    /// JSON document and text for a listing
    async fn listing(
        &self,
        config: &SiteConfig,
        mode: ListingMode,
        page: usize,
        loads: usize,
    ) -> Result<(Value, String)> {
        match mode {
            ListingMode::NumberedPages => self.numbered_listing(config, page).await,
            ListingMode::LoadMore => self.load_more_listing(config, loads).await,
        }
    }

    /// Numbered-pages view of `page`
    async fn numbered_listing(&self, config: &SiteConfig, page: usize) -> Result<(Value, String)> {
        let options = ListingOptions::from_config(&config.blog)?;
        let mut controller = NumberedPagesController::new(self.build_fetcher(config)?, options)
            .with_events(Self::events());

        controller.initialize().await;
        if page != 1 && controller.error().is_none() {
            controller.go_to_page(page).await;
            if controller.current_page() != page && controller.error().is_none() {
                info!(
                    page,
                    total_pages = controller.total_pages(),
                    "page out of range, showing page {}",
                    controller.current_page()
                );
            }
        }

        let display = controller.display();
        let header = format!(
            "Page {} of {} ({} posts)\n\n",
            controller.current_page(),
            controller.total_pages(),
            display.total_count
        );
        let msg = json!({
            "type": "LISTING",
            "mode": ListingMode::NumberedPages,
            "current_page": controller.current_page(),
            "total_pages": controller.total_pages(),
            "listing": display,
        });
        Ok((msg, format!("{header}{}", present::render_listing(&display))))
    }

    /// "Load more" view after `loads` presses
    async fn load_more_listing(&self, config: &SiteConfig, loads: usize) -> Result<(Value, String)> {
        let options = ListingOptions::from_config(&config.blog)?;
        let mut controller = LoadMoreController::new(self.build_fetcher(config)?, options)
            .with_events(Self::events());

        controller.initialize().await;
        for _ in 0..loads {
            if !controller.has_more() {
                debug!(shown = controller.posts().len(), "no more posts");
                break;
            }
            controller.load_more().await;
        }

        let display = controller.display();
        let msg = json!({
            "type": "LISTING",
            "mode": ListingMode::LoadMore,
            "listing": display,
        });
        Ok((msg, present::render_listing(&display)))
    }

    /// Single post page
    async fn show(&self, id: &str) -> Result<()> {
        let config = self.load_config()?;
        let mut detail = PostDetail::new(self.build_fetcher(&config)?, &config.blog.website_id)
            .with_events(Self::events());

        detail.load(id).await;

        let state = detail.state();
        if let DetailState::Failed { message } = state {
            debug!(id, error = %message, "post load failed");
        }
        self.output(
            &json!({ "type": "POST", "post": state }),
            &present::render_detail(state),
        );
        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let redacted = config.redacted();
        let pretty = serde_yaml::to_string(&redacted)?;
        self.output(
            &json!({ "type": "CONFIG", "valid": true, "config": redacted }),
            &format!("Configuration is valid\n\n{pretty}"),
        );
        Ok(())
    }

    /// Print `msg` as JSON, or `text` in pretty mode
    fn output(&self, msg: &Value, text: &str) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
            }
        }
    }
}
