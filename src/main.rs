use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use community_site::query::{HomeQuery, PageQuery, WorkQuery};
use community_site::{cms, config, generate, logging, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "community-site")]
#[command(about = "Static site generator for the coding&&community website")]
#[command(long_about = "\
Static site generator for the coding&&community website

Page content comes from a headless CMS export; styling and footer links come
from config.toml.

Content structure:

  content/
  ├── cms.json        # CMS query result (see 'community-site query')
  ├── config.toml     # Site config (optional)
  └── assets/         # Static files (favicon, icons, fonts) → copied to output root

Pages:
  Home  index.html       needs a homepage record and the project list
  Work  work/index.html  needs the company list

A page whose data is absent is skipped; the rest of the build still runs.

Run 'community-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page into the output directory
    Build,
    /// Load and render without writing anything
    Check,
    /// Print the GraphQL query a page needs in the CMS export
    Query {
        #[arg(value_enum)]
        page: QueryPage,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum QueryPage {
    Home,
    Work,
}

fn fail_on_pages(failed: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("CMS export does not match the query for: {}", failed.join(", ")).into())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let export = cms::load_export(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &site_config, &export)?;
            output::print_build_output(&report);
            fail_on_pages(&report.failed_pages())?;
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            let export = cms::load_export(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let stylesheet = generate::Stylesheet::build(&site_config);
            let site = generate::SiteContext {
                config: &site_config,
                stylesheet_href: stylesheet.href(),
            };
            let pages = generate::render_site(&export, &site);
            output::print_check_output(&pages);
            fail_on_pages(&generate::failed_pages(&pages))?;
            println!("==> Content is valid");
        }
        Command::Query { page } => {
            let graphql = match page {
                QueryPage::Home => HomeQuery::GRAPHQL,
                QueryPage::Work => WorkQuery::GRAPHQL,
            };
            print!("{}", graphql);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
