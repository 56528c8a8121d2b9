//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::loader::{load_service, ServiceDefinition};
use crate::pagination::for_each_page;
use crate::request::PaginatedRequest;
use crate::transport::Transport;
use serde_json::{json, Value};
use std::io::Write;
use std::num::NonZeroUsize;
use tracing::info;

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
            Commands::Operations => self.operations(),
            Commands::Validate => self.validate(),
            Commands::Walk {
                operation,
                params,
                page_size,
                max_pages,
            } => {
                let service = self.load_service()?;
                let transport = service.transport()?;
                let mut stdout = std::io::stdout().lock();
                self.walk(
                    &service,
                    &transport,
                    operation,
                    params,
                    *page_size,
                    *max_pages,
                    &mut stdout,
                )
                .await
            }
        }
    }

    /// Load service definition
    fn load_service(&self) -> Result<ServiceDefinition> {
        let path = self
            .cli
            .service
            .as_ref()
            .ok_or_else(|| Error::config("Service file not specified (use -s flag)"))?;
        load_service(path)
    }

    /// List operations
    fn operations(&self) -> Result<()> {
        let service = self.load_service()?;

        match self.cli.format {
            OutputFormat::Json => {
                let ops: Vec<Value> = service
                    .operations
                    .iter()
                    .map(|op| {
                        json!({
                            "name": op.name,
                            "method": op.method,
                            "path": op.path,
                            "paginated": op.is_paginated(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string(&ops)?);
            }
            OutputFormat::Pretty => {
                println!("Operations of {}:", service.name);
                for op in &service.operations {
                    let marker = if op.is_paginated() { " (paginated)" } else { "" };
                    println!("  {} {} {}{marker}", op.name, op.method, op.path);
                }
            }
        }

        Ok(())
    }

    /// Validate service definition
    fn validate(&self) -> Result<()> {
        let service = self.load_service()?;
        info!(service = %service.name, "Service definition is valid");

        match self.cli.format {
            OutputFormat::Json => println!(
                "{}",
                json!({"status": "valid", "service": service.name, "operations": service.operations.len()})
            ),
            OutputFormat::Pretty => println!(
                "✓ {} is valid ({} operations)",
                service.name,
                service.operations.len()
            ),
        }

        Ok(())
    }

    /// Walk every page of an operation, writing one line per page
    #[allow(clippy::too_many_arguments)]
    pub async fn walk<T, W>(
        &self,
        service: &ServiceDefinition,
        transport: &T,
        operation: &str,
        params: &str,
        page_size: Option<u64>,
        max_pages: Option<NonZeroUsize>,
        out: &mut W,
    ) -> Result<()>
    where
        T: Transport + ?Sized,
        W: Write,
    {
        let operation = service.operation(operation)?;
        let params: Value = serde_json::from_str(params)?;

        let mut request = PaginatedRequest::new(operation.clone(), params);
        if let Some(size) = page_size {
            request = request.with_page_size(size);
        }

        let format = self.cli.format;
        let mut pages = 0usize;
        let mut write_error = None;

        let result = for_each_page(request, transport, |data, is_last| {
            pages += 1;
            let line = json!({"page": pages, "last_page": is_last, "data": data});
            let written = match format {
                OutputFormat::Json => writeln!(out, "{line}"),
                OutputFormat::Pretty => serde_json::to_string_pretty(&line)
                    .map_err(std::io::Error::from)
                    .and_then(|text| writeln!(out, "{text}")),
            };
            if let Err(e) = written {
                write_error = Some(e);
                return false;
            }
            max_pages.map_or(true, |max| pages < max.get())
        })
        .await;

        if let Some(e) = write_error {
            return Err(Error::Io(e));
        }
        result?;

        info!(operation = %operation.name, pages, "Walk finished");
        Ok(())
    }
}
