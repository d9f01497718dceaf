use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptforge::Domain;
use promptforge::cli::commands;
use promptforge::cli::commands::generate::GenerateOptions;

/// Parse domain from string
fn parse_domain(s: &str) -> Result<Domain, String> {
    s.parse::<Domain>().map_err(|e| e.to_string())
}

/// Parse complexity level from string
fn parse_complexity(s: &str) -> Result<u8, String> {
    match s.parse::<u8>() {
        Ok(level @ 1..=5) => Ok(level),
        _ => Err(format!(
            "Invalid complexity '{}'. Valid values: 1, 2, 3, 4, 5",
            s
        )),
    }
}

#[derive(Parser)]
#[command(name = "promptforge")]
#[command(
    version,
    about = "Domain-aware prompt generator with templates, techniques and evaluation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a structured prompt for an objective
    Generate {
        #[arg(help = "What the prompt should accomplish")]
        objective: String,
        #[arg(long, short, value_parser = parse_domain, help = "Domain override (detected when omitted)")]
        domain: Option<Domain>,
        #[arg(long, short, value_parser = parse_complexity, help = "Complexity override, 1-5")]
        complexity: Option<u8>,
        #[arg(long = "component", help = "Component the prompt should cover (repeatable)")]
        components: Vec<String>,
        #[arg(long = "tag", help = "Template tag preference (repeatable)")]
        tags: Vec<String>,
        #[arg(long = "technique", short = 't', help = "Technique to apply (repeatable)")]
        techniques: Vec<String>,
        #[arg(long, help = "Use this template instead of ranking")]
        template: Option<String>,
        #[arg(long, help = "Select techniques automatically")]
        auto_techniques: bool,
        #[arg(long, help = "Extract context values from the objective")]
        extract: bool,
        #[arg(long, value_name = "KEY=VALUE", help = "Context value (repeatable)")]
        set: Vec<String>,
        #[arg(long, help = "Extra directory of YAML templates")]
        templates_dir: Option<PathBuf>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
        #[arg(long, short, help = "Evaluate the generated prompt")]
        evaluate: bool,
        #[arg(long, help = "Do not record this generation in history")]
        no_history: bool,
        #[arg(long, env = "PROMPTFORGE_LLM_COMMAND", help = "Model command used to sample responses")]
        llm_command: Option<String>,
    },

    /// Detect the domain of a text
    Classify {
        text: String,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Estimate the complexity of an objective
    Analyze {
        objective: String,
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Score a prompt and suggest improvements
    Evaluate {
        #[arg(help = "Prompt text (read from --file or stdin when omitted)")]
        prompt: Option<String>,
        #[arg(long, conflicts_with = "prompt")]
        file: Option<PathBuf>,
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(long, env = "PROMPTFORGE_LLM_COMMAND", help = "Model command used to sample responses")]
        llm_command: Option<String>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Rank several prompts by quality
    Compare {
        prompts: Vec<String>,
        #[arg(long = "file", help = "Prompt file (repeatable)")]
        files: Vec<PathBuf>,
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Analyze an existing prompt and add missing sections
    Refine {
        #[arg(help = "Prompt text (read from --file or stdin when omitted)")]
        prompt: Option<String>,
        #[arg(long, conflicts_with = "prompt")]
        file: Option<PathBuf>,
        #[arg(long, short, help = "Objective to state in the Context section")]
        objective: Option<String>,
        #[arg(
            long,
            help = "Only make this improvement (repeatable): missing_context, vague_instructions, \
                    missing_examples, missing_output_format, no_sections, add_examples, add_constraints"
        )]
        improve: Vec<String>,
        #[arg(long, help = "List suggestions without rewriting the prompt")]
        suggest_only: bool,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Browse prompt templates
    Templates {
        #[command(subcommand)]
        action: TemplatesAction,
    },

    /// Browse prompt techniques
    Techniques {
        #[command(subcommand)]
        action: TechniquesAction,
    },

    /// Inspect generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TemplatesAction {
    /// List available templates
    List {
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(long, help = "Extra directory of YAML templates")]
        templates_dir: Option<PathBuf>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Show one template
    Show {
        name: String,
        #[arg(long, help = "Extra directory of YAML templates")]
        templates_dir: Option<PathBuf>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json, yaml")]
        format: String,
    },
}

#[derive(Subcommand)]
enum TechniquesAction {
    /// List available techniques
    List {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Show one technique
    Show {
        name: String,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Suggest techniques for an objective
    Suggest {
        objective: String,
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(long, short, value_parser = parse_complexity)]
        complexity: Option<u8>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recent generations
    List {
        #[arg(long, short = 'n', help = "Show only the most recent N entries")]
        limit: Option<usize>,
        #[arg(long, short, value_parser = parse_domain)]
        domain: Option<Domain>,
        #[arg(long, help = "Minimum quality score")]
        min_quality: Option<f64>,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Highest quality generations
    Best {
        #[arg(long, short = 'n', default_value = "5")]
        limit: usize,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Per-domain statistics
    Stats {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Remove all history
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Edit configuration file with $EDITOR
    Edit {
        #[arg(long, short, help = "Edit global config")]
        global: bool,
    },
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mpromptforge encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/junyeong-ai/promptforge/issues");
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log filter when RUST_LOG is unset
fn default_filter(cli: &Cli) -> String {
    if cli.verbose {
        "debug".to_string()
    } else if cli.quiet {
        "error".to_string()
    } else {
        // Invalid config surfaces later, when the command loads it
        promptforge::ConfigLoader::load()
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| "warn".to_string())
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = default_filter(&cli);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            objective,
            domain,
            complexity,
            components,
            tags,
            techniques,
            template,
            auto_techniques,
            extract,
            set,
            templates_dir,
            format,
            evaluate,
            no_history,
            llm_command,
        } => {
            commands::generate::run(GenerateOptions {
                objective,
                domain,
                complexity,
                components,
                tags,
                techniques,
                template,
                auto_techniques,
                extract,
                set,
                templates_dir,
                format,
                evaluate,
                no_history,
                llm_command,
            })?;
        }
        Commands::Classify { text, format } => {
            commands::classify::run(&text, &format)?;
        }
        Commands::Analyze {
            objective,
            domain,
            format,
        } => {
            commands::analyze::run(&objective, domain, &format)?;
        }
        Commands::Evaluate {
            prompt,
            file,
            domain,
            llm_command,
            format,
        } => {
            commands::evaluate::run(
                prompt.as_deref(),
                file.as_deref(),
                domain,
                llm_command.as_deref(),
                &format,
            )?;
        }
        Commands::Compare {
            prompts,
            files,
            domain,
            format,
        } => {
            commands::compare::run(prompts, &files, domain, &format)?;
        }
        Commands::Refine {
            prompt,
            file,
            objective,
            improve,
            suggest_only,
            format,
        } => {
            commands::refine::run(
                prompt.as_deref(),
                file.as_deref(),
                objective.as_deref(),
                &improve,
                suggest_only,
                &format,
            )?;
        }
        Commands::Templates { action } => match action {
            TemplatesAction::List {
                domain,
                templates_dir,
                format,
            } => {
                commands::templates::list(domain, templates_dir.as_deref(), &format)?;
            }
            TemplatesAction::Show {
                name,
                templates_dir,
                format,
            } => {
                commands::templates::show(&name, templates_dir.as_deref(), &format)?;
            }
        },
        Commands::Techniques { action } => match action {
            TechniquesAction::List { format } => {
                commands::techniques::list(&format)?;
            }
            TechniquesAction::Show { name, format } => {
                commands::techniques::show(&name, &format)?;
            }
            TechniquesAction::Suggest {
                objective,
                domain,
                complexity,
                format,
            } => {
                commands::techniques::suggest(&objective, domain, complexity, &format)?;
            }
        },
        Commands::History { action } => match action {
            HistoryAction::List {
                limit,
                domain,
                min_quality,
                format,
            } => {
                commands::history::list(limit, domain, min_quality, &format)?;
            }
            HistoryAction::Best { limit, format } => {
                commands::history::best(limit, &format)?;
            }
            HistoryAction::Stats { format } => {
                commands::history::stats(&format)?;
            }
            HistoryAction::Clear => {
                commands::history::clear()?;
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Edit { global } => {
                commands::config::edit(global)?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    commands::config::init_global(force)?;
                } else {
                    commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
