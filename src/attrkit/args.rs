use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("ATTRKIT_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("ATTRKIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("ATTRKIT_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "attrkit", bin_name = "attrkit", version = get_version())]
#[command(about = "Infer, convert and order typed attribute values", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding config.json (defaults to $ATTRKIT_HOME, then the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the type of each text
    #[command(alias = "p")]
    Parse {
        /// Texts to parse
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        texts: Vec<String>,
    },

    /// Parse a text and cast it to another type
    #[command(alias = "c")]
    Cast {
        /// Text to parse
        #[arg(allow_negative_numbers = true)]
        text: String,

        /// Target type (e.g. INTEGER, point3d, url)
        #[arg(short, long)]
        to: String,
    },

    /// Compare two texts after parsing them
    Compare {
        #[arg(allow_negative_numbers = true)]
        left: String,
        #[arg(allow_negative_numbers = true)]
        right: String,
    },

    /// Parse and sort texts
    Sort {
        /// Items are name=value pairs, ordered by name then value
        #[arg(long)]
        named: bool,

        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        items: Vec<String>,
    },

    /// List every attribute type with its default value
    Types,

    /// Show or set configuration
    Config {
        /// Key to show or set
        key: Option<String>,

        /// New value
        value: Option<String>,
    },
}
