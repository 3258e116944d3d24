use std::path::PathBuf;

use anyhow::{Context, Result};
use book_catalog::handlers::ListQuery;
use book_catalog::models::{BookId, BookView, ReadingList};
use book_catalog_client::{BookUpload, CatalogClient, DEFAULT_BASE_URL};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

/// catalog - command-line client for the book catalog service
#[derive(Parser)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Versioned API base URL
    #[arg(long, global = true, env = "BOOK_CATALOG_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books with optional filters, ordering and paging
    List {
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long, value_parser = parse_list)]
        list: Option<ReadingList>,
        /// Field to sort by (author, title, subtitle, list)
        #[arg(long)]
        order_by: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        page_size: Option<i64>,
    },
    /// Show one book
    Get { id: BookId },
    /// Download a cover image
    Cover {
        id: BookId,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Add a book
    Create(BookArgs),
    /// Replace an existing book
    Update {
        id: BookId,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Remove a book
    Delete { id: BookId },
    /// Show every book on a reading list
    ReadingList {
        #[arg(value_parser = parse_list)]
        list: ReadingList,
    },
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    title: String,
    /// to-read, reading-now or already-read
    #[arg(long, value_parser = parse_list)]
    list: ReadingList,
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    summary: Option<String>,
    /// Image file to upload as the cover
    #[arg(long)]
    cover: Option<PathBuf>,
}

impl BookArgs {
    async fn into_upload(self, id: BookId) -> Result<BookUpload> {
        let mut upload = BookUpload::new(self.title, self.list).with_id(id);
        upload.subtitle = self.subtitle;
        upload.author = self.author;
        upload.summary = self.summary;
        if let Some(path) = self.cover {
            upload = upload
                .with_cover_file(&path)
                .await
                .with_context(|| format!("Failed to read cover {}", path.display()))?;
        }
        Ok(upload)
    }
}

fn parse_list(s: &str) -> std::result::Result<ReadingList, String> {
    s.parse().map_err(|e: book_catalog::models::UnknownReadingList| e.to_string())
}

fn print_book(book: &BookView) {
    println!("{} {}", format!("#{}", book.id).cyan(), book.title.bold());
    if let Some(subtitle) = &book.subtitle {
        println!("    {}", subtitle);
    }
    if let Some(author) = &book.author {
        println!("    by {}", author);
    }
    println!("    {} {}", "list:".dimmed(), book.list);
}

async fn execute(cli: Cli) -> Result<()> {
    let client = CatalogClient::new(cli.base_url);

    match cli.command {
        Commands::List {
            author,
            title,
            subtitle,
            list,
            order_by,
            page,
            page_size,
        } => {
            let query = ListQuery {
                author,
                title,
                subtitle,
                list: list.map(|l| l.to_string()),
                order_by,
                page: page.map(|p| p.to_string()),
                page_size: page_size.map(|p| p.to_string()),
            };
            let page = client.list_books(&query).await?;
            for book in &page.results {
                print_book(book);
            }
            println!(
                "\n{}",
                format!(
                    "page {} of {} ({} books)",
                    page.page, page.total_pages, page.total
                )
                .dimmed()
            );
        }
        Commands::Get { id } => print_book(&client.get_book(id).await?),
        Commands::Cover { id, output } => {
            let bytes = client.get_cover(id).await?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "{} Saved cover of #{} to {}",
                "✓".green(),
                id,
                output.display()
            );
        }
        Commands::Create(args) => {
            let book = client.create_book(&args.into_upload(0).await?).await?;
            println!("{} Created book #{}", "✓".green(), book.id);
            print_book(&book);
        }
        Commands::Update { id, book } => {
            let book = client.update_book(&book.into_upload(id).await?).await?;
            println!("{} Updated book #{}", "✓".green(), book.id);
            print_book(&book);
        }
        Commands::Delete { id } => {
            client.delete_book(id).await?;
            println!("{} Deleted book #{}", "✓".green(), id);
        }
        Commands::ReadingList { list } => {
            let view = client.reading_list(list).await?;
            println!("{}", view.list.to_string().bold().underline());
            for book in &view.books {
                print_book(book);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            if let Some(body) = e
                .downcast_ref::<book_catalog_client::ClientError>()
                .and_then(|e| e.error_response())
            {
                for field in body.errors {
                    eprintln!("  {} {}: {}", "-".yellow(), field.field, field.message);
                }
            } else if let Some(source) = e.source() {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
