//! Terminal front-end: an interactive menu plus the one-shot actions behind it.

mod display;

use crate::config::{Credentials, Settings};
use crate::constants::{DESCRIPTION_PREVIEW_CHARS, EMBEDDING_TEXT_PREVIEW_CHARS};
use crate::embedding::{EmbeddingService, OpenAIEmbedder};
use crate::errors::ConfigError;
use crate::pipeline::job_for_similarity;
use crate::recruit::{extract_job_info, RecruitClient};
use crate::text::prepare_embedding_text;
use crate::utils::{start_spinner, truncate_with_ellipsis};
use chrono::Local;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use display::*;
use serde_json::Value;
use tracing::{error, info};

/// Whether the raw API response is printed after a fetch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPanel {
    Ask,
    Show,
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuAction {
    FetchJob,
    EmbedJob,
    FullPipeline,
    ExchangeCode,
    CheckEmbedding,
    ChangeJobId,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::FetchJob,
        MenuAction::EmbedJob,
        MenuAction::FullPipeline,
        MenuAction::ExchangeCode,
        MenuAction::CheckEmbedding,
        MenuAction::ChangeJobId,
        MenuAction::Quit,
    ];

    fn label(self) -> String {
        match self {
            MenuAction::FetchJob => "🔧 Fetch job from Zoho".to_string(),
            MenuAction::EmbedJob => "🧠 Embed job with OpenAI".to_string(),
            MenuAction::FullPipeline => "🎯 Full pipeline (coming soon)".dimmed().to_string(),
            MenuAction::ExchangeCode => "🔄 Exchange authorization code for access token".to_string(),
            MenuAction::CheckEmbedding => "🩺 Test OpenAI connection".to_string(),
            MenuAction::ChangeJobId => "📋 Change job id".to_string(),
            MenuAction::Quit => "🚪 Quit".to_string(),
        }
    }
}

/// Both API clients plus the job id the menu currently works on
pub struct App {
    recruit: RecruitClient,
    embeddings: EmbeddingService<OpenAIEmbedder>,
    job_id: String,
}

impl App {
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self, ConfigError> {
        let recruit = RecruitClient::new(&settings.recruit, credentials)?;
        let embedder = OpenAIEmbedder::new(&credentials.openai_api_key, &settings.embedding);
        let embeddings = EmbeddingService::new(embedder, settings.embedding.dimensions);

        if !recruit.recovers_from_expiry() {
            info!("ZOHO_REFRESH_TOKEN not set, expired access tokens will not be renewed");
        }

        Ok(Self {
            recruit,
            embeddings,
            job_id: settings.default_job_id().to_string(),
        })
    }

    /// Runs the menu until the user quits or the terminal stops answering.
    pub async fn run_interactive(&mut self) {
        Self::display_welcome_message();
        if let Err(e) = self.prompt_job_id() {
            error!("Failed to read input: {}", e);
            return;
        }

        loop {
            println!("\n{} {}", "Current job id:".bold(), self.job_id.yellow());
            let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like to test?")
                .items(&labels)
                .default(0)
                .interact();

            let action = match selection {
                Ok(index) => MenuAction::ALL[index],
                Err(e) => {
                    error!("Failed to read selection: {}", e);
                    return;
                }
            };

            match action {
                MenuAction::FetchJob => {
                    let job_id = self.job_id.clone();
                    self.fetch_job(&job_id, RawPanel::Ask).await;
                }
                MenuAction::EmbedJob => {
                    let job_id = self.job_id.clone();
                    self.embed_job(&job_id).await;
                }
                MenuAction::FullPipeline => {
                    notice("🚧 Full pipeline test: coming after vector store integration!");
                }
                MenuAction::ExchangeCode => match Self::prompt_code() {
                    Ok(code) if !code.trim().is_empty() => {
                        self.exchange_code(&code).await;
                    }
                    Ok(_) => notice("No code entered"),
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        return;
                    }
                },
                MenuAction::CheckEmbedding => {
                    self.check_embedding().await;
                }
                MenuAction::ChangeJobId => {
                    if let Err(e) = self.prompt_job_id() {
                        error!("Failed to read input: {}", e);
                        return;
                    }
                }
                MenuAction::Quit => {
                    println!("{}", "👋 Bye!".cyan());
                    return;
                }
            }
        }
    }

    fn display_welcome_message() {
        display_header("🎯 Zoho API Test - Interactive Job Lookup");
        println!(
            "{}",
            "Fetch a job opening, inspect its fields, and embed it with OpenAI.".yellow()
        );
    }

    fn prompt_job_id(&mut self) -> Result<(), dialoguer::Error> {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("📝 Zoho Job Opening ID")
            .default(self.job_id.clone())
            .interact_text()?;
        let input = input.trim();
        if !input.is_empty() {
            self.job_id = input.to_string();
        }
        Ok(())
    }

    fn prompt_code() -> Result<String, dialoguer::Error> {
        println!(
            "{}",
            "Generate a code in the Zoho API console (Self Client → Generate Code, 10-minute expiry)."
                .dimmed()
        );
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt("🔑 Authorization code")
            .allow_empty(true)
            .interact_text()
    }

    fn show_raw(raw: &Value, panel: RawPanel) {
        let show = match panel {
            RawPanel::Show => true,
            RawPanel::Hide => false,
            RawPanel::Ask => Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("📊 Show raw Zoho API response?")
                .default(false)
                .interact()
                .unwrap_or(false),
        };
        if show {
            subheader("📊 Raw Zoho API Response");
            let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
            println!("{}", pretty.dimmed());
        }
    }

    /// Fetches a job opening and prints its fields. Returns whether a record was shown.
    pub async fn fetch_job(&self, job_id: &str, panel: RawPanel) -> bool {
        display_header(&format!("🔧 Zoho API call for job {}", job_id));

        let spinner = start_spinner(&format!("Fetching job {}...", job_id));
        let result = self.recruit.fetch_job(job_id).await;
        spinner.finish_and_clear();

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                failure("Zoho API call failed");
                failure(&format!("Error: {}", e));
                if let Some(status) = e.status() {
                    failure(&format!("Status code: {}", status));
                }
                return false;
            }
        };

        success(&format!(
            "Zoho API call successful! ({})",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        Self::show_raw(&raw, panel);

        let Some(job) = extract_job_info(&raw) else {
            notice("The response contains no job data");
            return false;
        };

        subheader("🎯 Job Information from Zoho");
        print_table(&job_rows(&job));

        if !job.job_description.is_empty() {
            subheader("📄 Raw Description (with HTML)");
            println!(
                "{}",
                truncate_with_ellipsis(&job.job_description, DESCRIPTION_PREVIEW_CHARS)
            );
        }
        true
    }

    /// Fetches a job opening, embeds it and prints the vector summary and metadata.
    pub async fn embed_job(&self, job_id: &str) -> bool {
        display_header(&format!("🧠 OpenAI embedding for job {}", job_id));

        let spinner = start_spinner(&format!("Fetching job {}...", job_id));
        let result = job_for_similarity(&self.recruit, job_id).await;
        spinner.finish_and_clear();

        let payload = match result {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                failure("Failed to get job data from Zoho: the response contains no job data");
                return false;
            }
            Err(e) => {
                failure(&format!("Failed to get job data from Zoho: {}", e));
                return false;
            }
        };
        success("Job data retrieved from Zoho!");
        println!("{} {}", "Job ID:".bold(), payload.job_id);
        println!("{} {}", "Title:".bold(), payload.title);

        let embedding_text = prepare_embedding_text(&payload);
        subheader("📝 Text Prepared for OpenAI Embedding");
        println!(
            "{}",
            truncate_with_ellipsis(&embedding_text, EMBEDDING_TEXT_PREVIEW_CHARS).dimmed()
        );
        notice(&format!(
            "📏 Character Count: {} characters",
            embedding_text.chars().count()
        ));

        let spinner = start_spinner("Testing OpenAI connection...");
        let connected = self.embeddings.test_connection().await;
        spinner.finish_and_clear();
        if !connected {
            failure("OpenAI API connection failed - check API key");
            return false;
        }
        success("OpenAI API connection successful!");

        let spinner = start_spinner("Creating embedding...");
        let result = self.embeddings.embed_with_metadata(&payload).await;
        spinner.finish_and_clear();
        let Some(result) = result else {
            failure("Failed to create embedding");
            return false;
        };
        success("Job embedding created successfully!");

        subheader("🎯 Embedding Results");
        println!("{} {}", "Vector Dimensions:".bold(), result.vector.len());
        println!("{} {}", "Model Used:".bold(), self.embeddings.model());
        println!(
            "{} {}",
            "Sample Vector (first 10 dimensions):".bold(),
            vector_sample(&result.vector)
        );

        subheader("📊 Metadata for Vector Storage");
        print_table(&result.metadata.display_rows());
        notice("time_to_fill is a random placeholder, not an estimate");
        success(&format!(
            "Vector with {} dimensions and metadata prepared.",
            result.vector.len()
        ));
        true
    }

    /// Exchanges an authorization code and adopts the resulting token for this session.
    pub async fn exchange_code(&self, code: &str) -> bool {
        display_header("🔄 Token Refresh Helper");

        let spinner = start_spinner("Getting fresh access token...");
        let result = self.recruit.exchange_code(code).await;
        spinner.finish_and_clear();

        match result {
            Ok(grant) => {
                success("Fresh access token obtained and in use for this session!");
                subheader("📋 Access Token:");
                println!("{}", grant.access_token.yellow());
                println!(
                    "{} {}",
                    "Expires in:".bold(),
                    grant
                        .expires_in
                        .map(|s| format!("{} seconds", s))
                        .unwrap_or_else(|| "Unknown".to_string())
                );
                if let Some(refresh_token) = grant.refresh_token {
                    println!("{} {}", "New refresh token provided:".bold(), refresh_token.yellow());
                    notice("Set ZOHO_REFRESH_TOKEN to this value to enable automatic renewal.");
                }
                notice("Update ZOHO_ACCESS_TOKEN in your .env to keep using this token after restart.");
                true
            }
            Err(e) => {
                failure("Failed to get fresh access token");
                failure(&format!("Error: {}", e));
                false
            }
        }
    }

    /// Probes the embedding provider.
    pub async fn check_embedding(&self) -> bool {
        let spinner = start_spinner("Testing OpenAI connection...");
        let connected = self.embeddings.test_connection().await;
        spinner.finish_and_clear();
        if connected {
            success(&format!(
                "OpenAI API connection successful ({}, {} dimensions)",
                self.embeddings.model(),
                self.embeddings.dimensions()
            ));
        } else {
            failure("OpenAI API connection failed - check API key");
        }
        connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_action_once() {
        let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), 7);
        assert!(labels.iter().any(|l| l.contains("coming soon")));
        assert_eq!(MenuAction::ALL.last(), Some(&MenuAction::Quit));
    }

    #[test]
    fn app_starts_on_the_default_job() {
        let credentials = Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: None,
            access_token: Some("token".into()),
            openai_api_key: "sk".into(),
        };
        let app = App::new(&Settings::default(), &credentials).unwrap();
        assert_eq!(app.job_id, crate::constants::DEFAULT_JOB_ID);
        assert_eq!(app.embeddings.dimensions(), 1536);
    }
}
