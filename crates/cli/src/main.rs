use clap::{Parser, Subcommand};
use drills_core::seed::{builtin_drills, parse_drill_yaml};
use drills_core::{
    Answer, AttemptService, CoreConfig, DrillService, FileStore, NewUser, ShardableUuid,
    UserService, DEFAULT_DATA_DIR, DEFAULT_HISTORY_LIMIT,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "drills")]
#[command(about = "Interview drills operator CLI")]
struct Cli {
    /// Directory holding drill, attempt and user documents
    #[arg(long, env = "DRILLS_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the built-in sample drills (existing titles are skipped)
    Seed,
    /// Create a drill from a YAML file
    CreateDrill {
        /// Path to a YAML drill document
        file: PathBuf,
    },
    /// List all drills, newest first
    List,
    /// Show one drill with its questions
    Show {
        /// Drill id
        id: String,
    },
    /// Register a user, or update the user with the same email
    RegisterUser {
        email: String,
        name: String,
        /// Profile picture URL (optional)
        #[arg(long)]
        picture: Option<String>,
    },
    /// Score answers against a drill without storing an attempt
    Score {
        /// Drill id
        drill_id: String,
        /// Path to a YAML list of `{qid, text}` answers
        answers: PathBuf,
    },
    /// Show a user's most recent attempts
    History {
        /// User id
        user_id: String,
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
}

struct Services {
    drills: DrillService,
    attempts: AttemptService,
    users: UserService,
}

impl Services {
    fn open(data_dir: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let cfg = Arc::new(CoreConfig::with_data_dir(data_dir)?);
        let store = Arc::new(FileStore::open(cfg.clone())?);
        Ok(Self {
            drills: DrillService::from_config(store.clone(), &cfg),
            attempts: AttemptService::new(store.clone()),
            users: UserService::new(store),
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("No command provided. Use --help for usage information.");
        return Ok(());
    };
    let services = Services::open(cli.data_dir)?;

    match command {
        Commands::Seed => {
            let outcome = services.drills.seed(builtin_drills()?)?;
            for drill in &outcome.created {
                println!("Created drill {} ({})", drill.title, drill.id);
            }
            for title in &outcome.skipped {
                println!("Skipped existing drill {}", title);
            }
        }
        Commands::CreateDrill { file } => {
            let yaml = std::fs::read_to_string(&file)?;
            match services.drills.create_drill(parse_drill_yaml(&yaml)?) {
                Ok(drill) => println!("Created drill {} with id: {}", drill.title, drill.id),
                Err(e) => eprintln!("Error creating drill: {}", e),
            }
        }
        Commands::List => {
            let drills = services.drills.list_drills()?;
            if drills.is_empty() {
                println!("No drills found.");
            } else {
                for drill in drills {
                    println!(
                        "ID: {}, Title: {}, Difficulty: {}, Tags: {}",
                        drill.id,
                        drill.title,
                        drill.difficulty,
                        drill.tags.join(", ")
                    );
                }
            }
        }
        Commands::Show { id } => match services.drills.get_drill(&id) {
            Ok(drill) => {
                println!("{} [{}]", drill.title, drill.difficulty);
                println!("Tags: {}", drill.tags.join(", "));
                for question in &drill.questions {
                    println!("  {}: {}", question.id, question.prompt);
                    println!("      keywords: {}", question.keywords.join(", "));
                }
            }
            Err(e) => eprintln!("Error showing drill: {}", e),
        },
        Commands::RegisterUser {
            email,
            name,
            picture,
        } => {
            let new = NewUser {
                email,
                name,
                picture,
                provider: None,
            };
            match services.users.register(new) {
                Ok(user) => println!("Registered {} with id: {}", user.email, user.id),
                Err(e) => eprintln!("Error registering user: {}", e),
            }
        }
        Commands::Score { drill_id, answers } => {
            let yaml = std::fs::read_to_string(&answers)?;
            let answers: Vec<Answer> = serde_yaml::from_str(&yaml)?;
            match services.attempts.preview(&drill_id, &answers) {
                Ok(report) => {
                    for detail in &report.details {
                        println!("  {}: {}", detail.qid, detail.details);
                    }
                    println!(
                        "Score: {}% ({} of {} keywords)",
                        report.score, report.matched_keywords, report.total_keywords
                    );
                }
                Err(e) => eprintln!("Error scoring answers: {}", e),
            }
        }
        Commands::History { user_id, limit } => {
            let user_id = ShardableUuid::parse(&user_id)?;
            let entries = services.attempts.history(&user_id, limit)?;
            if entries.is_empty() {
                println!("No attempts found.");
            }
            for entry in entries {
                let drill = entry
                    .drill
                    .map(|d| format!("{} [{}]", d.title, d.difficulty))
                    .unwrap_or_else(|| "(deleted drill)".into());
                println!(
                    "{}  {:>3}%  {}  ({})",
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.score,
                    drill,
                    entry.id
                );
            }
        }
    }

    Ok(())
}
