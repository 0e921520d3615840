use clap::Parser;
use miette::Result;
use fha::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Terminate quietly on a closed pipe (`fha list | head`)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let default_filter = if global.verbose { "fha=debug" } else { "fha=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("FHA_LOG").unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init(args) => fha::cli::commands::init::run(args),
        Commands::New(args) => fha::cli::commands::new::run(args, &global),
        Commands::Import(args) => fha::cli::commands::import::run(args, &global),
        Commands::Export(args) => fha::cli::commands::export::run(args, &global),
        Commands::List(args) => fha::cli::commands::list::run(args, &global),
        Commands::Add(args) => fha::cli::commands::add::run(args, &global),
        Commands::Update(args) => fha::cli::commands::update::run(args, &global),
        Commands::Delete(args) => fha::cli::commands::delete::run(args, &global),
        Commands::Wizard(args) => fha::cli::commands::wizard::run(args, &global),
        Commands::Dashboard(args) => fha::cli::commands::dashboard::run(args, &global),
        Commands::Vocab => fha::cli::commands::vocab::run(&global),
        Commands::Config(cmd) => fha::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => fha::cli::commands::completions::run(args),
    }
}
