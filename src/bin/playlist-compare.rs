use clap::{Parser, Subcommand, ValueEnum};
use playlist_compare::{
    analysis::{analyze, CompareOptions},
    api::parse_playlist_id,
    report, ClientCredentials, ComparisonConfig, PlaylistComparison, SpotifyApi,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playlist-compare")]
#[command(
    about = "Compare Spotify-curated playlists with popular user playlists",
    long_about = None
)]
struct Cli {
    /// Spotify client id (can also be set via SPOTIFY_CLIENT_ID env var)
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// Spotify client secret (can also be set via SPOTIFY_CLIENT_SECRET env var)
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare curated playlists against discovered user playlists
    Compare {
        /// Curated playlist id, URI or URL (repeatable; defaults to a built-in set)
        #[arg(short, long = "curated")]
        curated: Vec<String>,

        /// Search term used to discover user playlists (repeatable)
        #[arg(short, long = "search-term")]
        search_terms: Vec<String>,

        /// User playlists need more followers than this
        #[arg(long, default_value_t = 10_000)]
        min_followers: u64,

        /// Number of user playlists to compare
        #[arg(long, default_value_t = 5)]
        max_user_playlists: usize,

        /// Also aggregate acousticness and instrumentalness per group
        #[arg(long)]
        all_audio_features: bool,
    },
    /// Analyze a single playlist
    Analyze {
        /// Playlist id, URI or URL
        playlist: String,

        /// Treat the playlist as user-created
        #[arg(long)]
        user: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("playlist_compare=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let credentials = ClientCredentials::new(cli.client_id, cli.client_secret)?;
    let api = SpotifyApi::new(credentials)?;

    match cli.command {
        Commands::Compare {
            curated,
            search_terms,
            min_followers,
            max_user_playlists,
            all_audio_features,
        } => {
            let mut config = ComparisonConfig {
                min_followers,
                max_user_playlists,
                compare_options: CompareOptions {
                    include_all_audio_features: all_audio_features,
                },
                ..Default::default()
            };
            if !curated.is_empty() {
                config.curated_playlist_ids = curated
                    .iter()
                    .map(|c| parse_playlist_id(c))
                    .collect::<Result<_, _>>()?;
            }
            if !search_terms.is_empty() {
                config.search_terms = search_terms;
            }

            let comparison = PlaylistComparison::new(api, config);
            tracing::debug!("Comparison settings: {:?}", comparison.config());
            let result = comparison.run().await?;
            match cli.format {
                Format::Text => print!("{}", report::render_comparison(&result)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Commands::Analyze { playlist, user } => {
            let id = parse_playlist_id(&playlist)?;
            let snapshot = api.get_playlist_snapshot(&id).await?;
            let features = api.get_audio_features(&snapshot.track_ids()).await?;
            let metrics = analyze(&snapshot, &features, !user);

            match cli.format {
                Format::Text => print!("{}", report::render_playlist(&metrics)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
            }
        }
    }

    Ok(())
}
