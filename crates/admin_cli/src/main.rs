use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::Money;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub email: String,
        pub phone: String,
        pub balance_minor: i64,
        pub preferences: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod funds {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "funds")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub minimum_subscription_minor: i64,
        pub category: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "fondo_admin")]
#[command(about = "Admin utilities for Fondo (bootstrap users/funds)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./fondo.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the demo user and the initial fund catalog.
    Seed,
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    /// Generated when omitted.
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// Opening balance, decimal ("500000.00").
    #[arg(long, default_value = "500000.00")]
    balance: String,
    /// Comma-joined channels ("email,sms").
    #[arg(long, default_value = "email,sms")]
    preferences: String,
}

const FUND_CATALOG: [(&str, &str, i64, &str); 5] = [
    ("fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000, "FPV"),
    ("fund_2", "FPV_BTG_PACTUAL_ECOPETROL", 12_500_000, "FPV"),
    ("fund_3", "DEUDAPRIVADA", 5_000_000, "FIC"),
    ("fund_4", "FDO-ACCIONES", 25_000_000, "FIC"),
    ("fund_5", "FPV_BTG_PACTUAL_DINAMICA", 10_000_000, "FPV"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;
    migration::Migrator::up(&db, None).await?;

    match cli.command {
        Command::Seed => seed(&db).await?,
        Command::User(user) => match user.command {
            UserCommand::Create(args) => create_user(&db, args).await?,
        },
    }

    Ok(())
}

async fn seed(db: &DatabaseConnection) -> Result<(), Box<dyn Error + Send + Sync>> {
    for (id, name, minimum_minor, category) in FUND_CATALOG {
        if funds::Entity::find_by_id(id).one(db).await?.is_some() {
            println!("fund {id} already present, skipping");
            continue;
        }
        let fund = funds::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            minimum_subscription_minor: Set(minimum_minor),
            category: Set(category.to_string()),
        };
        funds::Entity::insert(fund).exec(db).await?;
        println!("inserted fund {id} ({name})");
    }

    if users::Entity::find().one(db).await?.is_some() {
        println!("a user already exists, skipping demo user");
        return Ok(());
    }

    let demo = UserCreateArgs {
        id: None,
        name: "Emmanuel".to_string(),
        email: "emmanuel@example.com".to_string(),
        phone: "+573043543065".to_string(),
        balance: "500000.00".to_string(),
        preferences: "email,sms".to_string(),
    };
    create_user(db, demo).await
}

async fn create_user(
    db: &DatabaseConnection,
    args: UserCreateArgs,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let balance: Money = args.balance.parse()?;
    let id = args.id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let user = users::ActiveModel {
        id: Set(id.clone()),
        name: Set(args.name),
        email: Set(args.email),
        phone: Set(args.phone),
        balance_minor: Set(balance.minor()),
        preferences: Set(args.preferences),
    };
    users::Entity::insert(user).exec(db).await?;
    println!("created user {id} with balance {balance}");

    Ok(())
}
