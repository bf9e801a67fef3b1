use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum PaletteCommands {
    /// List catalog palettes (default)
    #[command(alias = "ls")]
    List {
        /// Only palettes in this hub (e.g. green, pastel, dark)
        #[arg(long)]
        hub: Option<String>,

        /// Match against palette names and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Show only builtin palettes
        #[arg(long, conflicts_with = "user")]
        builtin: bool,

        /// Show only user palettes
        #[arg(long)]
        user: bool,
    },

    /// Show a palette with its derived roles and accessibility score
    Show { id: String },

    /// Print the user palettes directory
    #[command(alias = "dir")]
    Path,
}
