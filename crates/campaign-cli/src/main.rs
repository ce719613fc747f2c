//! Campaign CLI: check campaign images, inspect templates and upload media.
//!
//! Configuration comes from the environment (see `Config::from_env`).

use std::path::{Path, PathBuf};

use anyhow::Context;
use campaign_cli::{apply_values, init_tracing, parse_value_pair, read_body};
use campaign_core::constants::DEFAULT_BUSINESS_ID;
use campaign_core::models::{CampaignContext, CampaignTemplate};
use campaign_core::{Config, ErrorMetadata};
use campaign_processing::inspect::content_type_for_path;
use campaign_processing::{
    extract_placeholders, inspect_gateway_image_file, prepare_send, render_preview,
    upload_campaign_media_file, TemplateValues,
};
use campaign_storage::create_storage;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "campaign", about = "Campaign media and template tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an image against the messaging gateway's format rules
    CheckImage {
        /// Path to the image
        file: PathBuf,
        /// Declared content type (guessed from the extension if omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// List the fillable placeholders of a template body
    Placeholders {
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Render a template preview with the given values
    Preview {
        #[command(flatten)]
        body: BodyArgs,
        /// Placeholder value as key=value (repeatable)
        #[arg(long = "value", value_parser = parse_value_pair)]
        values: Vec<(String, String)>,
        #[command(flatten)]
        wallet: WalletArgs,
    },
    /// Validate values and media for a template and print the send payload
    Prepare {
        /// Template JSON file (id, name, message_content, media_required)
        template: PathBuf,
        /// Placeholder value as key=value (repeatable)
        #[arg(long = "value", value_parser = parse_value_pair)]
        values: Vec<(String, String)>,
        /// URL of previously uploaded media
        #[arg(long)]
        media_url: Option<String>,
        #[command(flatten)]
        wallet: WalletArgs,
    },
    /// Validate and upload a campaign image to the configured storage
    Upload {
        /// Path to the image
        file: PathBuf,
        /// Declared content type (guessed from the extension if omitted)
        #[arg(long)]
        content_type: Option<String>,
        /// Owning business
        #[arg(long)]
        business_id: Option<Uuid>,
    },
}

#[derive(Args)]
struct BodyArgs {
    /// Template body text
    #[arg(long, conflicts_with = "template_file")]
    body: Option<String>,
    /// File containing the template body
    #[arg(long)]
    template_file: Option<PathBuf>,
}

#[derive(Args)]
struct WalletArgs {
    /// Treat the campaign as a wallet campaign
    #[arg(long)]
    wallet: bool,
    /// Wallet amount, overriding any wallet_amount value
    #[arg(long, requires = "wallet")]
    wallet_amount: Option<String>,
}

impl WalletArgs {
    fn context(self, currency_symbol: &str) -> CampaignContext {
        let context = if self.wallet {
            CampaignContext::wallet(self.wallet_amount)
        } else {
            CampaignContext::default()
        };
        context.with_currency_symbol(currency_symbol)
    }
}

impl BodyArgs {
    fn read(self) -> anyhow::Result<String> {
        read_body(self.body, self.template_file.as_deref())
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn declared_content_type(file: &Path, content_type: Option<String>) -> anyhow::Result<String> {
    match content_type {
        Some(ct) => Ok(ct),
        None => content_type_for_path(file)
            .map(str::to_string)
            .with_context(|| format!("Cannot guess content type of {}", file.display())),
    }
}

/// Print the operator message and fail with the diagnostic detail.
fn report(err: campaign_core::AppError) -> anyhow::Error {
    eprintln!("{}", err.client_message());
    anyhow::anyhow!(err.detailed_message())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckImage { file, content_type } => {
            let content_type = declared_content_type(&file, content_type)?;
            let (format, bytes) = inspect_gateway_image_file(&file, &content_type)
                .await
                .map_err(report)?;
            tracing::debug!(file = %file.display(), format = ?format, "Image accepted");
            print_json(&serde_json::json!({
                "file": file.display().to_string(),
                "format": format,
                "size_bytes": bytes.len(),
            }))?;
        }
        Commands::Placeholders { body } => {
            let body = body.read()?;
            print_json(&extract_placeholders(&body))?;
        }
        Commands::Preview {
            body,
            values: pairs,
            wallet,
        } => {
            let body = body.read()?;
            let config = Config::from_env()?;
            let context = wallet.context(&config.currency_symbol);

            let keys = extract_placeholders(&body);
            let mut values = TemplateValues::resolve(&keys, None, &config.business_identity());
            apply_values(&mut values, &pairs)?;
            values.apply_context(&context);

            print_json(&serde_json::json!({
                "preview": render_preview(&body, &values, &context),
                "missing": values.missing_required(),
            }))?;
        }
        Commands::Prepare {
            template,
            values: pairs,
            media_url,
            wallet,
        } => {
            let raw = std::fs::read_to_string(&template)
                .with_context(|| format!("Failed to read template {}", template.display()))?;
            let template: CampaignTemplate =
                serde_json::from_str(&raw).context("Invalid template JSON")?;
            let config = Config::from_env()?;
            let context = wallet.context(&config.currency_symbol);

            let keys = extract_placeholders(&template.message_content);
            let mut values = TemplateValues::resolve(&keys, None, &config.business_identity());
            apply_values(&mut values, &pairs)?;

            let payload = prepare_send(&template, &values, &context, media_url.as_deref())
                .map_err(report)?;
            print_json(&payload)?;
        }
        Commands::Upload {
            file,
            content_type,
            business_id,
        } => {
            let content_type = declared_content_type(&file, content_type)?;
            let config = Config::from_env()?;
            let storage = create_storage(&config)
                .await
                .context("Failed to initialize storage")?;
            tracing::debug!(backend = %config.storage_backend, "Storage initialized");

            let upload = upload_campaign_media_file(
                business_id.unwrap_or(DEFAULT_BUSINESS_ID),
                &file,
                &content_type,
                &config,
                storage,
            )
            .await
            .map_err(report)?;
            print_json(&upload)?;
        }
    }

    Ok(())
}
