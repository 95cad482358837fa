use blogdoc::markdown::{self, NewPost};
use blogdoc::{config, output, site};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blogdoc")]
#[command(about = "Static site generator for a personal blog")]
#[command(long_about = "\
Static site generator for a personal blog

Posts and pages are exported JSON records. Every record becomes one HTML
page; posts are additionally bundled ten at a time into overview pages,
the most recent of which is the blog's index.html.

Source structure:

  site/
  ├── config.toml                  # Site config (optional)
  ├── posts/                       # One JSON record per post
  │   └── 2017-01-03-hello.json
  └── pages/                       # One JSON record per standalone page
      └── about.json

Run 'blogdoc gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and the stylesheet into the output directory
    Build,
    /// Load and render the site without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Create a post record from a Markdown file
    NewPost(NewPostArgs),
}

#[derive(clap::Args)]
struct NewPostArgs {
    /// Markdown file with the post body
    markdown: PathBuf,

    /// Post title; also determines the url slug
    #[arg(long)]
    title: String,

    /// Short description for meta tags; defaults to the first line of text
    #[arg(long, default_value = "")]
    excerpt: String,

    /// Thumbnail url shown on overview tiles
    #[arg(long, default_value = "")]
    thumb: String,

    /// Image url for social meta tags
    #[arg(long, default_value = "")]
    image: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Build => {
            println!("==> Building {} \u{2192} {}", cli.source.display(), cli.output.display());
            let site = site::build(&cli.source, &cli.output)?;
            output::print_site_output(&site, "Generated");
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = site::check(&cli.source)?;
            output::print_site_output(&site, "Checked");
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::NewPost(args) => {
            let config = config::load_config(&cli.source)?;
            let post = NewPost {
                title: args.title,
                markdown: std::fs::read_to_string(&args.markdown)?,
                excerpt: args.excerpt,
                thumb_img: args.thumb,
                post_img: args.image,
            };
            let now = chrono::Local::now().naive_local();
            let (path, record) = markdown::write_new_post(&cli.source, &config, &post, now)?;
            output::print_new_post_output(&path, &record.post.url);
        }
    }

    Ok(())
}
