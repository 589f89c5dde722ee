mod commands;
mod preflight;
mod progress;
mod report;
mod utils;

use clap::{Parser, Subcommand};
use stackflow_core::Environment;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "Deploy and tear down the three-tier architecture stacks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy or update the three-tier architecture stack
    Deploy {
        /// Target environment (dev, prod)
        #[arg(short, long)]
        environment: Environment,
        /// Override the computed default stack name
        #[arg(long)]
        stack_name: Option<String>,
        /// Target region
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
    },
    /// Empty the website bucket and delete the three-tier stack
    Cleanup {
        /// Target environment (dev, prod)
        #[arg(short, long)]
        environment: Environment,
        /// Override the computed default stack name
        #[arg(long)]
        stack_name: Option<String>,
        /// Target region
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Deploy the WAF protection stack on top of an existing three-tier stack
    #[command(name = "deploy-waf")]
    DeployWaf {
        /// Target environment (dev, prod)
        #[arg(short, long)]
        environment: Environment,
        /// Three-tier stack whose load balancer the WAF protects
        #[arg(long)]
        three_tier_stack: String,
        /// Override the computed default stack name
        #[arg(long)]
        stack_name: Option<String>,
        /// Target region
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
    },
    /// Delete the WAF dashboard and protection stacks, in that order
    #[command(name = "cleanup-waf")]
    CleanupWaf {
        /// Target environment (dev, prod)
        #[arg(short, long)]
        environment: Environment,
        /// Override the computed default stack name
        #[arg(long)]
        stack_name: Option<String>,
        /// Target region
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            environment,
            stack_name,
            region,
        } => {
            commands::deploy::handle(environment, stack_name, region).await?;
        }
        Commands::Cleanup {
            environment,
            stack_name,
            region,
            force,
        } => {
            commands::cleanup::handle(environment, stack_name, region, force).await?;
        }
        Commands::DeployWaf {
            environment,
            three_tier_stack,
            stack_name,
            region,
        } => {
            commands::deploy_waf::handle(environment, three_tier_stack, stack_name, region)
                .await?;
        }
        Commands::CleanupWaf {
            environment,
            stack_name,
            region,
            force,
        } => {
            commands::cleanup_waf::handle(environment, stack_name, region, force).await?;
        }
    }

    Ok(())
}
