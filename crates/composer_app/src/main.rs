mod logging;
mod session;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use client_logging::client_info;
use composer_client::{
    AuthContext, ClientConfig, FlowEvent, Generator, ProgressSink, ReqwestTransport,
};
use composer_core::{GenerationRequest, Platform, Projection};

use crate::logging::{initialize, LogDestination};
use crate::session::{load_session, save_session, GenerationRecord};

fn usage() -> String {
    let platforms: Vec<&str> = Platform::all().iter().map(|p| p.as_str()).collect();
    format!(
        "Usage: composer_app <source_url> <theme> [platform ...]\n\
         Platforms: {} (default: linkedin)\n\
         Set COMPOSER_API_URL to target a different backend.",
        platforms.join(", ")
    )
}

/// Prints each flow milestone as a progress line.
struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn emit(&self, event: FlowEvent) {
        match event {
            FlowEvent::Submitted => println!("Submitting generation request..."),
            FlowEvent::JobAccepted { job_id } => println!("Job {job_id} accepted, polling..."),
            FlowEvent::Progress(step) => println!("  {step}"),
            FlowEvent::FellBack => {
                println!("Async submission unavailable, generating synchronously...")
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<GenerationRequest, String> {
    let (source_url, theme) = match (args.first(), args.get(1)) {
        (Some(url), Some(theme)) => (url.clone(), theme.clone()),
        _ => return Err(usage()),
    };

    let mut request = GenerationRequest::new(source_url, theme);
    if args.len() > 2 {
        let mut platforms = Vec::new();
        for name in &args[2..] {
            match Platform::parse(name) {
                Some(platform) => platforms.push(platform),
                None => return Err(format!("Unknown platform '{name}'.\n{}", usage())),
            }
        }
        request.platforms = platforms;
    }
    if let Err(err) = request.validate() {
        return Err(format!("{err}\n{}", usage()));
    }
    Ok(request)
}

fn print_posts(projection: &Projection) {
    println!(
        "\nGenerated {} post(s) for: {}",
        projection.posts.len(),
        projection.platforms_generated.join(", ")
    );
    for post in &projection.posts {
        println!("\n--- {} ---", post.platform);
        println!("{}", post.content);
        if let Some(image) = &post.image_url {
            println!("[image] {image}");
        }
    }
}

async fn run(request: GenerationRequest) -> anyhow::Result<()> {
    let working_dir = Path::new(".");
    let mut session = load_session(working_dir);

    let config = ClientConfig::from_env();
    let auth = match &session.bearer_token {
        Some(token) => AuthContext::with_token(token.clone()),
        None => AuthContext::anonymous(),
    };
    let transport = ReqwestTransport::new(&config, auth).context("building HTTP client")?;
    let generator = Generator::new(transport, config);

    client_info!(
        "Generating for {} ({} platform(s))",
        request.source_url,
        request.platforms.len()
    );

    let record_base = GenerationRecord {
        at: chrono::Local::now().to_rfc3339(),
        source_url: request.source_url.clone(),
        theme: request.theme.clone(),
        platforms: request.platforms.iter().map(|p| p.as_str().into()).collect(),
        post_count: 0,
    };

    match generator.generate(request, &TerminalProgress).await {
        Ok(projection) => {
            print_posts(&projection);
            session.record(GenerationRecord {
                post_count: projection.posts.len(),
                ..record_base
            });
            save_session(working_dir, &session);
            Ok(())
        }
        Err(kind) => Err(anyhow::anyhow!("{kind}")),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = match parse_args(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    initialize(LogDestination::File);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(request)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
