//! CLI entry point for mdxblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdxblog")]
#[command(version)]
#[command(about = "A personal blog engine for MDX content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Create the post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Generate sitemap, robots and feed artifacts
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content (post, draft, category, stats)
    List {
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdxblog=debug,info"
    } else {
        "mdxblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            mdxblog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, draft } => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            mdxblog::commands::new::create_post(&blog, &title, draft)?;
        }

        Commands::Generate => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            tracing::info!("Generating site artifacts...");
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let blog = mdxblog::Blog::new(&base_dir)?;

            // Regenerate derived artifacts before serving
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdxblog::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            mdxblog::commands::list::run(&blog, &r#type)?;
        }

        Commands::Clean => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            blog.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
