use crate::config::Config;
use crate::protocol::{Request, Response};
use anyhow::Result;
use serde::Serialize;
use skillscope_catalog::CatalogCache;
use skillscope_logging::LogFormat;
use skillscope_matcher::{Recommender, ScoringConfig};
use skillscope_types::MatchContext;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{debug, error, info, warn};

/// Turns request lines into response lines against the cached catalog
pub struct RequestHandler {
    cache: Arc<CatalogCache>,
    scoring: ScoringConfig,
    max_prompt_length: usize,
}

impl RequestHandler {
    pub fn new(cache: Arc<CatalogCache>, scoring: ScoringConfig, max_prompt_length: usize) -> Self {
        Self {
            cache,
            scoring,
            max_prompt_length,
        }
    }

    /// Parse and answer one line. Never fails: errors become error responses.
    pub fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                debug!("Rejecting malformed request: {}", e);
                Response::failure("bad_request", e.to_string())
            }
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Reload => {
                self.cache.reset();
                Response::success(serde_json::json!({ "reloaded": true }))
            }
            Request::Skills {
                prompt,
                open_files,
                working_directory,
            } => {
                let ctx = match MatchContext::with_max_length(
                    &prompt,
                    open_files,
                    working_directory,
                    self.max_prompt_length,
                ) {
                    Ok(ctx) => ctx,
                    Err(e) => return Response::failure(e.kind(), e.to_string()),
                };
                self.with_recommender(|r| to_response(&r.recommend_skills(&ctx)))
            }
            Request::Agents { prompt } => {
                let ctx = match MatchContext::with_max_length(
                    &prompt,
                    Vec::<String>::new(),
                    None,
                    self.max_prompt_length,
                ) {
                    Ok(ctx) => ctx,
                    Err(e) => return Response::failure(e.kind(), e.to_string()),
                };
                self.with_recommender(|r| to_response(&r.recommend_agents(&ctx)))
            }
            Request::Resources(query) => {
                self.with_recommender(|r| to_response(&r.discover_resources(&query)))
            }
        }
    }

    fn with_recommender(&self, f: impl FnOnce(&Recommender) -> Response) -> Response {
        match self.cache.get() {
            Ok(catalog) => f(&Recommender::new(catalog, self.scoring.clone())),
            Err(e) => {
                error!("Failed to load catalog: {:#}", e);
                Response::failure("catalog", format!("{:#}", e))
            }
        }
    }
}

fn to_response(value: &impl Serialize) -> Response {
    match serde_json::to_value(value) {
        Ok(value) => Response::success(value),
        Err(e) => Response::failure("internal", e.to_string()),
    }
}

/// Gateway service - reads JSON lines on stdin, answers on stdout
pub struct GatewayService {
    config: Config,
}

impl GatewayService {
    /// Create a new gateway service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn init(&self) -> Result<Arc<CatalogCache>> {
        let format = LogFormat::parse(&self.config.logging.format)?;
        skillscope_logging::init_logging(&self.config.logging.level, format)?;
        Ok(Arc::new(CatalogCache::new(self.config.catalog.loader())))
    }

    fn handler(&self, cache: Arc<CatalogCache>) -> RequestHandler {
        RequestHandler::new(
            cache,
            self.config.scoring.clone(),
            self.config.limits.max_prompt_length,
        )
    }

    /// Score one prompt for skills and agents, print both responses, exit
    pub fn run_once(self, prompt: &str) -> Result<()> {
        let handler = self.handler(self.init()?);

        for request in [
            Request::Skills {
                prompt: prompt.to_string(),
                open_files: Vec::new(),
                working_directory: None,
            },
            Request::Agents {
                prompt: prompt.to_string(),
            },
        ] {
            println!("{}", serde_json::to_string_pretty(&handler.handle(request))?);
        }
        Ok(())
    }

    /// Run until stdin closes or Ctrl+C
    pub async fn run(self) -> Result<()> {
        let cache = self.init()?;
        info!("Starting Skillscope Gateway Service");

        // Warm the cache so the first request doesn't pay for the load
        match cache.get() {
            Ok(catalog) => {
                info!(
                    "Catalog ready: {} skills, {} agents, {} resources",
                    catalog.skills().len(),
                    catalog.agents().len(),
                    catalog.resources().len()
                );
                debug!("Available skills:\n{}", catalog.skills_summary());
            }
            Err(e) => warn!("Catalog not loaded yet, will retry per request: {:#}", e),
        }

        let handler = self.handler(cache);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        // Setup signal handler for graceful shutdown
        let shutdown = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
            info!("Received shutdown signal");
        };
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let response = handler.handle_line(&line);
                        let mut out = serde_json::to_vec(&response)?;
                        out.push(b'\n');
                        stdout.write_all(&out).await?;
                        stdout.flush().await?;
                    }
                    Ok(None) => {
                        info!("Input closed");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read request: {}", e);
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("Shutting down gracefully...");
                    break;
                }
            }
        }

        info!("Gateway service stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillscope_catalog::{Catalog, Resource, Skill};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handler() -> (Arc<AtomicUsize>, RequestHandler) {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let cache = CatalogCache::with_source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Catalog::builtin()?.merge(Catalog::new(
                vec![Skill::new("extra", "Extra").with_keywords(["zebra"])],
                vec![],
                vec![Resource::new("react-19.2-features.md", "file:///r.md", "")],
            )))
        });
        (
            loads,
            RequestHandler::new(Arc::new(cache), ScoringConfig::default(), 100),
        )
    }

    #[test]
    fn test_skills_request() {
        let (_, handler) = handler();
        let response = handler.handle_line(r#"{"kind":"skills","prompt":"feed the zebra"}"#);

        assert!(response.ok);
        let result = response.result.unwrap();
        assert_eq!(result["matches"][0]["name"], "extra");
        assert_eq!(result["matches"][0]["confidence"], 100);
        assert!(result["totalScanned"].as_u64().unwrap() > 1);
    }

    #[test]
    fn test_agents_request() {
        let (_, handler) = handler();
        let response =
            handler.handle_line(r#"{"kind":"agents","prompt":"review auth for security"}"#);
        let result = response.result.unwrap();
        assert_eq!(result["matches"][0]["name"], "security-reviewer");
        assert_eq!(result["matches"][0]["confidence"], 80);
    }

    #[test]
    fn test_resources_request() {
        let (_, handler) = handler();
        let response = handler.handle_line(r#"{"kind":"resources","topic":"react 19"}"#);
        let result = response.result.unwrap();
        assert_eq!(result[0]["relevance"], 90);
    }

    #[test]
    fn test_invalid_input_and_bad_request() {
        let (_, handler) = handler();

        let response = handler.handle_line(r#"{"kind":"skills","prompt":"   "}"#);
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().kind, "invalid_input");

        let long = "x".repeat(101);
        let response = handler.handle_line(&format!(r#"{{"kind":"agents","prompt":"{long}"}}"#));
        assert_eq!(response.error.unwrap().kind, "invalid_input");

        let response = handler.handle_line("not json");
        assert_eq!(response.error.unwrap().kind, "bad_request");
    }

    #[test]
    fn test_reload_resets_cache() {
        let (loads, handler) = handler();
        handler.handle_line(r#"{"kind":"agents","prompt":"audit"}"#);
        handler.handle_line(r#"{"kind":"agents","prompt":"audit"}"#);
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        let response = handler.handle_line(r#"{"kind":"reload"}"#);
        assert!(response.ok);

        handler.handle_line(r#"{"kind":"agents","prompt":"audit"}"#);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
