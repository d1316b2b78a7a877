use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use unidocs_cli::seeder::{self, People, SeedConfig, Structure};
use unidocs_config::JwtConfig;
use unidocs_models::AccountType;
use unidocs_models::ids::UserId;

#[derive(Parser)]
#[command(name = "unidocs-cli")]
#[command(about = "unidocs CLI - Administrative tools for the unidocs API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Owner,
    Admin,
}

impl From<Role> for AccountType {
    fn from(role: Role) -> Self {
        match role {
            Role::Owner => AccountType::Owner,
            Role::Admin => AccountType::Admin,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an owner or admin account
    CreateUser {
        /// Account type of the new user
        #[arg(short = 'r', long, value_enum, default_value = "owner")]
        role: Role,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Family name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Mint a development bearer token for an existing user
    Token {
        /// Email of the user the token is issued for
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Seed the database with fake universities, staff and students
    Seed {
        /// Number of universities to create
        #[arg(short = 'u', long, default_value = "3")]
        universities: usize,

        /// Number of faculties per university
        #[arg(long, default_value = "3")]
        faculties: usize,

        /// Number of departments per faculty
        #[arg(long, default_value = "2")]
        departments: usize,

        /// Number of classrooms per department
        #[arg(long, default_value = "3")]
        classrooms: usize,

        /// Number of professors per university
        #[arg(long, default_value = "5")]
        professors: usize,

        /// Number of courses per classroom
        #[arg(long, default_value = "6")]
        courses: usize,

        /// Number of students per classroom
        #[arg(long, default_value = "20")]
        students: usize,
    },
    /// Clear all seeded data (accounts on the seed email domain)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateUser {
            role,
            email,
            first_name,
            name,
            password,
        } => handle_create_user(&pool, role, email, first_name, name, password).await,
        Commands::Token { email } => handle_token(&pool, email).await,
        Commands::Seed {
            universities,
            faculties,
            departments,
            classrooms,
            professors,
            courses,
            students,
        } => {
            let config = SeedConfig::new(universities)
                .with_structure(Structure {
                    faculties,
                    departments_per_faculty: departments,
                    classrooms_per_department: classrooms,
                })
                .with_people(People {
                    professors_per_university: professors,
                    students_per_classroom: students,
                    courses_per_classroom: courses,
                });
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_user(
    pool: &PgPool,
    role: Role,
    email: Option<String>,
    first_name: Option<String>,
    name: Option<String>,
    password: Option<String>,
) {
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let first_name = first_name.unwrap_or_else(|| prompt("First name"));
    let name = name.unwrap_or_else(|| prompt("Name"));

    let password = match password {
        Some(password) => password,
        None => match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    let account_type = AccountType::from(role);
    match create_user_internal(pool, account_type, &email, &first_name, &name, &password).await {
        Ok(user_id) => {
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user_id);
            println!("   Email: {}", email.trim().to_lowercase());
            println!("   Name: {} {}", first_name, name);
            println!("   Account type: {}", account_type);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_token(pool: &PgPool, email: Option<String>) {
    let email = email
        .unwrap_or_else(|| prompt("Email address"))
        .trim()
        .to_lowercase();

    match mint_token_internal(pool, &email).await {
        Ok(token) => {
            println!("{}", token);
        }
        Err(e) => {
            eprintln!("❌ Error creating token: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}

async fn create_user_internal(
    db: &PgPool,
    account_type: AccountType,
    email: &str,
    first_name: &str,
    name: &str,
    password: &str,
) -> Result<UserId, Box<dyn std::error::Error>> {
    let email = email.trim().to_lowercase();
    let username = email.split('@').next().unwrap_or_default().to_string();

    let hashed_password = unidocs_core::hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (username, email, password_hash, account_type, first_name, name)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hashed_password)
    .bind(account_type)
    .bind(first_name)
    .bind(name)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| "User with this email already exists".into())
}

async fn mint_token_internal(db: &PgPool, email: &str) -> Result<String, Box<dyn std::error::Error>> {
    let user_id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| format!("No user found with email {}", email))?;

    let token = unidocs_auth::create_dev_token(user_id.into_inner(), Some(email), &JwtConfig::from_env())
        .map_err(|e| format!("{}", e.error))?;

    Ok(token)
}
