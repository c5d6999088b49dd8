// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Triton CLI entrypoint.
//!
//! By default this serves MCP over stdio (intended for tool integrations).
//! Use `--http` to serve the HTTP API on port 8000 instead.

use std::error::Error;
use std::sync::Arc;

use triton::config::Config;
use triton::http;
use triton::llm::ChatClient;
use triton::mcp::TritonMcp;
use triton::notion::NotionClient;
use triton::service::ResearchService;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program}          # serve MCP over stdio\n  {program} --http   # serve the HTTP API on port {port}\n\nConfiguration comes from the environment: NOTION_API_KEY and GEMINI_API_KEY are required;\nLLM_BASE_URL, LLM_MODEL and TRITON_LOG are optional.",
        port = http::DEFAULT_HTTP_PORT
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    http: bool,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--http" => {
                if options.http {
                    return Err(());
                }
                options.http = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_tracing(config_filter: Option<&str>) {
    let filter = match config_filter {
        Some(directives) => tracing_subscriber::EnvFilter::try_new(directives)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("triton=info")),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("triton=info")),
    };

    // Logs go to stderr; stdout is the MCP protocol channel in stdio mode.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "triton".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = Config::from_env()?;
        init_tracing(config.log_filter.as_deref());

        let pages = NotionClient::new(&config)?;
        let model = ChatClient::new(&config)?;
        let service = Arc::new(ResearchService::new(Arc::new(pages), Arc::new(model)));

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.http {
            tracing::info!("starting HTTP API server");
            runtime.block_on(http::serve(service, http::DEFAULT_HTTP_PORT))?;
        } else {
            tracing::info!("starting MCP server over stdio");
            runtime.block_on(TritonMcp::new(service).serve_stdio())?;
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("triton: {err}");
        std::process::exit(1);
    }
}
