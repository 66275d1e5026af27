mod commands;
mod manifest;

use clap::{Args, Parser, Subcommand};
use frontstack_config::Overrides;
use frontstack_core::TemplateFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frontstack")]
#[command(about = "Static website delivery stacks (S3 + CloudFront), synthesized from KDL", long_about = None)]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Stack settings; each flag overrides the config file and environment
#[derive(Args, Debug, Clone, Default)]
struct StackArgs {
    /// Config file (default: discovered frontstack.kdl)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Naming prefix
    #[arg(long)]
    prefix: Option<String>,
    /// Account id
    #[arg(long)]
    account: Option<String>,
    /// Region
    #[arg(long)]
    region: Option<String>,
    /// Custom domain
    #[arg(long)]
    domain: Option<String>,
    /// Hosted zone for the domain's alias records
    #[arg(long)]
    hosted_zone_id: Option<String>,
    /// Existing certificate to use instead of issuing one
    #[arg(long)]
    certificate_arn: Option<String>,
}

impl StackArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            prefix: self.prefix.clone(),
            account: self.account.clone(),
            region: self.region.clone(),
            domain: self.domain.clone(),
            hosted_zone_id: self.hosted_zone_id.clone(),
            certificate_arn: self.certificate_arn.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the stack template and manifest
    Synth {
        #[command(flatten)]
        stack: StackArgs,
        /// Template format (json, yaml)
        #[arg(short, long, default_value = "json")]
        format: TemplateFormat,
        /// Output directory
        #[arg(short, long, default_value = "frontstack.out")]
        out: PathBuf,
        /// Print the template to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Apply a naming prefix to an existing template
    Prefix {
        /// Template file (JSON or YAML)
        template: PathBuf,
        /// Naming prefix
        #[arg(short, long)]
        prefix: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (default: same as input)
        #[arg(short, long)]
        format: Option<TemplateFormat>,
    },
    /// Validate the configuration and show what would be synthesized
    Validate {
        #[command(flatten)]
        stack: StackArgs,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout may carry a template
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Synth {
            stack,
            format,
            out,
            stdout,
        } => {
            commands::synth::handle(
                stack.config.as_deref(),
                stack.overrides(),
                format,
                &out,
                stdout,
            )
            .await
        }
        Commands::Prefix {
            template,
            prefix,
            output,
            format,
        } => commands::prefix::handle(&template, &prefix, output.as_deref(), format).await,
        Commands::Validate { stack } => {
            commands::validate::handle(stack.config.as_deref(), stack.overrides()).await
        }
        Commands::Version => {
            println!("frontstack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
