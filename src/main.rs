use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, warn, Level};

use lyricforge::{
    config::Config,
    lyrics::{cache::LyricsCache, LyricsFetcher},
    models::{
        GenerationMode, LyricsRecord, RewriteRequest, SongQuery, Theme, DEFAULT_SEED, MAX_SEED,
        MIN_SEED,
    },
    output::{genre_text, OutputWriter},
    provider_factory,
    providers::genius::GeniusProvider,
    rewrite::prompt::{build_prompt, build_request_prompt},
};

const EXAMPLE_SONGS: [(&str, &str); 3] = [
    ("Bohemian Rhapsody", "Queen"),
    ("Yesterday", "The Beatles"),
    ("Shape of You", "Ed Sheeran"),
];

#[derive(Debug, Parser)]
#[command(name = "lyricforge", version, about = "Rewrite song lyrics in a new theme")]
struct Cli {
    /// Show debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct SongArgs {
    /// Song title.
    #[arg(short, long)]
    title: String,
    /// Artist name.
    #[arg(short, long)]
    artist: String,
}

#[derive(Debug, Args)]
struct StyleArgs {
    /// Mood of the rewrite: same, happy, sad, angry, romantic, motivational.
    #[arg(long, default_value = "same")]
    theme: Theme,
    /// replace: new lyrics in place of the original; extend: new sections only.
    #[arg(long, default_value = "replace")]
    mode: GenerationMode,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch and print the cleaned lyrics of a song.
    Fetch {
        #[command(flatten)]
        song: SongArgs,
        /// Also write the genre and raw lyric files.
        #[arg(long)]
        save: bool,
    },
    /// Fetch a song and generate rewritten lyrics.
    Generate {
        #[command(flatten)]
        song: SongArgs,
        #[command(flatten)]
        style: StyleArgs,
        /// Same seed and prompt give the same lyrics.
        #[arg(long, default_value_t = DEFAULT_SEED, value_parser = clap::value_parser!(u64).range(MIN_SEED..=MAX_SEED))]
        seed: u64,
        /// Skip writing output files.
        #[arg(long)]
        no_save: bool,
    },
    /// Print the prompt that would be sent for a song.
    Prompt {
        #[command(flatten)]
        song: SongArgs,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Print the cache file used for a song.
    CachePath {
        #[command(flatten)]
        song: SongArgs,
    },
    /// List a few songs to try.
    Examples,
}

fn main() {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    if let Err(err) = run(cli.command, &config) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Fetch { song, save } => {
            let record = fetch_record(config, &song)?;
            print_record(&record);

            if save {
                let writer = OutputWriter::new(&config.raw_output_dir, &config.generated_output_dir);
                if let Err(e) = writer.save_original(&record) {
                    error!("Error saving files: {e:#}");
                }
            }
        }
        Command::Generate {
            song,
            style,
            seed,
            no_save,
        } => {
            let record = fetch_record(config, &song)?;

            let Some(client) = provider_factory::create_rewrite_client(config) else {
                bail!("Failed to set up Groq client: GROQ_API_KEY is not set");
            };

            let request = RewriteRequest::new(record.raw_lyrics.clone())
                .with_theme(style.theme)
                .with_mode(style.mode)
                .with_seed(seed);
            let prompt = build_request_prompt(&request);
            let result = client.generate(&prompt, request.seed);
            if result.is_empty() {
                bail!("Failed to generate new lyrics.");
            }

            println!("=== Original Lyrics ===\n{}\n", record.raw_lyrics);
            println!("=== Generated Lyrics ===\n{}\n", result.lyrics);
            println!("=== Song Information ===");
            println!("Genre: {}", result.genre);
            println!("Theme: {}", request.theme);
            println!("Mode: {}", request.mode);
            println!("Seed: {}", request.seed);
            println!("Title: {}", record.title);
            println!("Artist: {}", record.artist);

            if !no_save {
                let writer = OutputWriter::new(&config.raw_output_dir, &config.generated_output_dir);
                if let Err(e) = writer.save_original(&record) {
                    error!("Error saving files: {e:#}");
                }
                if let Err(e) = writer.save_generated(&record.title, &result) {
                    error!("Error saving files: {e:#}");
                }
            }
        }
        Command::Prompt { song, style } => {
            let record = fetch_record(config, &song)?;
            println!("{}", build_prompt(&record.raw_lyrics, style.theme, style.mode));
        }
        Command::CachePath { song } => {
            let cache = LyricsCache::new(&config.cache_dir);
            let path = cache.path_for(&SongQuery::new(song.title, song.artist));
            println!("{}", path.display());
        }
        Command::Examples => {
            for (title, artist) in EXAMPLE_SONGS {
                println!("{title} - {artist}");
            }
        }
    }

    Ok(())
}

fn genius_fetcher(config: &Config) -> Result<LyricsFetcher<GeniusProvider>> {
    match provider_factory::create_lyrics_fetcher(config)? {
        Some(fetcher) => Ok(fetcher),
        None => bail!("GENIUS_ACCESS_TOKEN is not set"),
    }
}

fn fetch_record(config: &Config, song: &SongArgs) -> Result<LyricsRecord> {
    if song.title.trim().is_empty() || song.artist.trim().is_empty() {
        bail!("Please enter both song title and artist name.");
    }

    let fetcher = genius_fetcher(config)?;
    match fetcher.fetch(&song.title, &song.artist) {
        Some(record) => Ok(record),
        None => {
            warn!(title = %song.title, artist = %song.artist, "No lyrics available");
            bail!("Could not find lyrics for the given song.")
        }
    }
}

fn print_record(record: &LyricsRecord) {
    println!("Title: {}", record.title);
    println!("Artist: {}", record.artist);
    println!("URL: {}", record.url);
    println!("Genres: {}", genre_text(record));
    println!();
    println!("{}", record.raw_lyrics);
}
