use clap::{Parser, Subcommand};
use reqwest::Client;

use digibloom_core::protocol::{ApiError, CreateFlower};
use digibloom_core::{Flower, FlowerKind, Slug};

const DEFAULT_BASE_URL: &str = "http://localhost:8787";

#[derive(Parser)]
#[command(name = "digibloom-cli", version, about = "Admin tools for the DigiBloom garden")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Flowers {
        #[command(subcommand)]
        command: FlowerCommand,
    },
}

#[derive(Subcommand)]
enum FlowerCommand {
    /// List planted flowers, optionally bounded on absolute X.
    List {
        #[arg(long, env = "BLOOM_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long)]
        min_x: Option<i64>,
        #[arg(long)]
        max_x: Option<i64>,
    },
    /// Fetch one flower by its slug.
    Get {
        slug: String,
        #[arg(long, env = "BLOOM_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Plant a single flower.
    Plant {
        #[arg(long, env = "BLOOM_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, value_parser = parse_kind, default_value = "yellow-sunflower")]
        kind: FlowerKind,
    },
    /// Plant a spaced-out row of sample flowers into an empty garden.
    Seed {
        #[arg(long, env = "BLOOM_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, default_value_t = 6)]
        count: usize,
    },
}

fn parse_kind(raw: &str) -> Result<FlowerKind, String> {
    FlowerKind::from_tag(raw).ok_or_else(|| {
        let known: Vec<&str> = FlowerKind::ALL.iter().map(|kind| kind.tag()).collect();
        format!("unknown flower kind '{raw}'; known kinds: {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Flowers { command } => match command {
            FlowerCommand::List {
                base_url,
                min_x,
                max_x,
            } => {
                let mut request = client.get(format!("{base_url}/api/flowers"));
                if let Some(min_x) = min_x {
                    request = request.query(&[("minX", min_x)]);
                }
                if let Some(max_x) = max_x {
                    request = request.query(&[("maxX", max_x)]);
                }
                let response = request.send().await?;
                if !response.status().is_success() {
                    return Err(api_error(response).await);
                }
                let flowers: Vec<Flower> = response.json().await?;
                println!("{} flowers", flowers.len());
                for flower in flowers {
                    print_flower(&flower);
                }
            }
            FlowerCommand::Get { slug, base_url } => {
                let slug = Slug::parse(&slug)?;
                let response = client
                    .get(format!("{base_url}/api/flowers/{slug}"))
                    .send()
                    .await?;
                if !response.status().is_success() {
                    return Err(api_error(response).await);
                }
                let flower: Flower = response.json().await?;
                print_flower(&flower);
            }
            FlowerCommand::Plant {
                base_url,
                title,
                message,
                author,
                x,
                y,
                kind,
            } => {
                let body = CreateFlower {
                    title,
                    message,
                    author,
                    x,
                    y,
                    flower: kind,
                };
                body.validate()?;
                let flower = plant(&client, &base_url, &body).await?;
                println!("planted:");
                print_flower(&flower);
            }
            FlowerCommand::Seed { base_url, count } => {
                let count = count.min(SEED_MESSAGES.len());
                for (index, (title, message, author)) in
                    SEED_MESSAGES.iter().take(count).enumerate()
                {
                    let kind = FlowerKind::ALL[index % FlowerKind::ALL.len()];
                    let body = CreateFlower {
                        title: title.to_string(),
                        message: message.to_string(),
                        author: author.map(str::to_string),
                        // Keep every plot beyond the minimum plant distance.
                        x: 200.0 + index as f64 * 180.0,
                        y: 420.0 + (index % 3) as f64 * 90.0,
                        flower: kind,
                    };
                    let flower = plant(&client, &base_url, &body).await?;
                    println!("seeded {} at ({}, {})", flower.slug, flower.x, flower.y);
                }
            }
        },
    }

    Ok(())
}

async fn plant(
    client: &Client,
    base_url: &str,
    body: &CreateFlower,
) -> Result<Flower, Box<dyn std::error::Error>> {
    let response = client
        .post(format!("{base_url}/api/flowers"))
        .json(body)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

async fn api_error(response: reqwest::Response) -> Box<dyn std::error::Error> {
    let status = response.status();
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => "unexpected response".to_string(),
    };
    format!("request failed ({status}): {message}").into()
}

fn print_flower(flower: &Flower) {
    let author = flower.author.as_deref().unwrap_or("anonymous");
    println!(
        "  {} [{}] ({}, {}) \"{}\" by {}",
        flower.slug,
        flower.kind.tag(),
        flower.x,
        flower.y,
        flower.title,
        author
    );
}

const SEED_MESSAGES: &[(&str, &str, Option<&str>)] = &[
    (
        "Hope for Tomorrow",
        "Whatever today looked like, tomorrow is unwritten.",
        None,
    ),
    (
        "You Are Enough",
        "Exactly as you are, right now. Keep going.",
        Some("Zoe"),
    ),
    (
        "Small Steps",
        "Growth is quiet. One small step today still counts.",
        None,
    ),
    (
        "For a Stranger",
        "Someone you will never meet is rooting for you.",
        Some("a friend"),
    ),
    (
        "Breathe",
        "Take one slow breath. The garden is not going anywhere.",
        None,
    ),
    (
        "Stay Strong",
        "Storms water the flowers too.",
        Some("gardener"),
    ),
];
