mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use dominance_matrix::classify::Aggregation;
use dominance_matrix::config::EngineConfig;
use dominance_matrix::posts_client::PostsClient;
use dominance_matrix::{
    classify_with_config, format_float, format_number, DensityFilter, DurationFilter,
    PlatformFamily, Post, Quadrant,
};

#[derive(Parser)]
#[command(name = "dominance-matrix", about = "Social post dominance matrix classifier")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Classify(ClassifyArgs),
    Fetch(FetchArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ClassifyArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value = "tiktok")]
    platform: String,
    #[arg(long, default_value = "all")]
    duration: String,
    #[arg(long, default_value = "top")]
    density: String,
    #[arg(long)]
    details: bool,
}

impl Default for ClassifyArgs {
    fn default() -> Self {
        Self {
            input: None,
            platform: "tiktok".to_string(),
            duration: "all".to_string(),
            density: "top".to_string(),
            details: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long, default_value = "tiktok")]
    platform: String,
    #[arg(long, default_value = "all")]
    duration: String,
    #[arg(long, default_value = "top")]
    density: String,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or(Command::Classify(ClassifyArgs::default()));

    match command {
        Command::Classify(args) => run_classify(args),
        Command::Fetch(args) => run_fetch(args).await,
        Command::Serve(args) => server::serve(args).await,
    }
}

fn run_classify(args: ClassifyArgs) -> Result<(), String> {
    let (family, duration, density) = parse_filters(&args.platform, &args.duration, &args.density)?;
    let posts = read_posts(args.input.as_deref())?;
    let (config, _) = EngineConfig::load(None)?;

    let aggregation = classify_with_config(&posts, family, duration, density, &config);
    print_aggregation(family, &aggregation, args.details);
    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<(), String> {
    let (family, duration, density) = parse_filters(&args.platform, &args.duration, &args.density)?;
    let (mut config, _) = EngineConfig::load(None)?;
    if let Some(endpoint) = args.endpoint {
        config.backend.endpoint = endpoint;
    }

    let client = PostsClient::from_config(&config)?;
    tracing::info!(endpoint = %config.backend.endpoint, "fetching posts");
    let posts = client.fetch_posts().await?;
    tracing::info!(count = posts.len(), "fetched posts");

    let aggregation = classify_with_config(&posts, family, duration, density, &config);
    print_aggregation(family, &aggregation, args.details);
    Ok(())
}

fn parse_filters(
    platform: &str,
    duration: &str,
    density: &str,
) -> Result<(PlatformFamily, DurationFilter, DensityFilter), String> {
    let family = PlatformFamily::from_str(platform)
        .ok_or_else(|| format!("invalid platform: {}", platform))?;
    let duration = DurationFilter::from_str(duration)
        .ok_or_else(|| format!("invalid duration filter: {}", duration))?;
    let density = DensityFilter::from_str(density)
        .ok_or_else(|| format!("invalid density filter: {}", density))?;
    Ok((family, duration, density))
}

fn read_posts(path: Option<&Path>) -> Result<Vec<Post>, String> {
    let payload = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err("missing posts: pass --input or pipe a JSON array".to_string());
    }
    serde_json::from_str(trimmed).map_err(|err| format!("failed to parse posts: {}", err))
}

fn print_aggregation(family: PlatformFamily, aggregation: &Aggregation, details: bool) {
    println!("Platform: {}", family.label());
    println!(
        "Totals: views {} | likes {} | comments {} | shares {}",
        format_number(aggregation.totals.views),
        format_number(aggregation.totals.likes),
        format_number(aggregation.totals.comments),
        format_number(aggregation.totals.shares)
    );
    println!(
        "Viral score: {} shares per 1k views",
        format_float(aggregation.viral_score, 2)
    );
    println!(
        "Community index: {} comments per 1k views",
        format_float(aggregation.community_index, 2)
    );
    println!(
        "Conversion rate: {}%",
        format_float(aggregation.conversion_rate, 3)
    );
    if let Some(retention) = aggregation.mean_retention {
        println!("Average retention: {}%", format_float(retention, 1));
    }
    if let Some(seo) = aggregation.seo_score {
        println!("SEO score: {}", seo);
    }
    println!(
        "Median center: {} views / {} quality",
        format_number(aggregation.median_x),
        format_float(aggregation.median_y, 1)
    );
    println!("Plotted points: {}", aggregation.points.len());
    if let Some(best) = aggregation.best_post.as_ref() {
        println!("Best post: {}", best);
    }

    let mut viral_engaged = 0usize;
    let mut loyal = 0usize;
    let mut controversy = 0usize;
    let mut laboratory = 0usize;
    let mut super_viral = 0usize;
    for point in &aggregation.points {
        match point.quadrant {
            Quadrant::ViralEngaged => viral_engaged += 1,
            Quadrant::LoyalCommunity => loyal += 1,
            Quadrant::Controversy => controversy += 1,
            Quadrant::Laboratory => laboratory += 1,
            Quadrant::SuperViral => super_viral += 1,
        }
    }
    println!(
        "Quadrants: viral&engaged {} | loyal {} | controversy {} | laboratory {} | super-viral {}",
        viral_engaged, loyal, controversy, laboratory, super_viral
    );

    if !aggregation.top_tags.is_empty() {
        let tags: Vec<String> = aggregation
            .top_tags
            .iter()
            .take(10)
            .map(|tag| format!("{} ({})", tag.name, tag.count))
            .collect();
        println!("Top tags: {}", tags.join(", "));
    }

    if details {
        println!("\nTop points by relevance:");
        for point in aggregation.points.iter().take(10) {
            println!(
                "  {} [{}] views {} | quality {} | viral ratio {}",
                point.post_id,
                point.quadrant.label(),
                format_number(point.x),
                format_float(point.y, 1),
                format_float(point.viral_ratio, 2)
            );
        }
    }
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
