//! Subcommand definitions and dispatch.

use std::path::PathBuf;

use clap::Subcommand;

use api_types::{
    Category,
    auth::{AuthResponse, UserLogin, UserRegister},
    expense::{ExpenseNew, ExpenseUpdate},
    export::ExportFormat,
};
use client::{Client, ExpenseQuery, Session};
use engine::{FilterCriteria, filter};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    output,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and store the session.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in account.
    Whoami,
    /// Record a new expense.
    Add {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        description: String,
        /// ISO date YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// List expenses, optionally narrowed.
    List {
        /// Substring matched against description and category name.
        #[arg(long)]
        search: Option<String>,
        /// Category name, or "all" for no constraint.
        #[arg(long)]
        category: Option<String>,
        /// Inclusive start date YYYY-MM-DD.
        #[arg(long)]
        from: Option<String>,
        /// Inclusive end date YYYY-MM-DD.
        #[arg(long)]
        to: Option<String>,
        /// Restrict to one month (YYYY-MM).
        #[arg(long, conflicts_with_all = ["from", "to"])]
        month: Option<String>,
    },
    /// Update fields of an expense.
    Edit {
        id: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense.
    Rm { id: String },
    /// Show the monthly summary; defaults to the current month.
    Summary {
        #[arg(long)]
        month: Option<String>,
    },
    /// Download a month's report.
    Export {
        #[arg(long)]
        month: Option<String>,
        #[arg(long, value_enum, default_value = "pdf")]
        format: Format,
        /// Output file; defaults to expenses_<month>.<ext> in the
        /// current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Pdf,
    Excel,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => Self::Pdf,
            Format::Excel => Self::Excel,
        }
    }
}

pub async fn run(command: Command, config: AppConfig) -> Result<()> {
    match command {
        Command::Register { name, email } => register(&config, name, email).await,
        Command::Login { email } => login(&config, email).await,
        Command::Logout => {
            Session::clear(&config.session_path)?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => whoami(&config).await,
        Command::Add {
            amount,
            category,
            description,
            date,
        } => add(&config, amount, category, description, date).await,
        Command::List {
            search,
            category,
            from,
            to,
            month,
        } => list(&config, search, category, from, to, month).await,
        Command::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => edit(&config, id, amount, category, description, date).await,
        Command::Rm { id } => {
            api_client(&config)?.delete_expense(&id).await?;
            println!("Deleted {id}");
            Ok(())
        }
        Command::Summary { month } => summary(&config, month).await,
        Command::Export { month, format, out } => export(&config, month, format, out).await,
    }
}

/// Builds a client, attaching the stored token when a session exists.
fn api_client(config: &AppConfig) -> Result<Client> {
    let mut client = Client::new(&config.base_url)?;
    if let Some(session) = Session::load(&config.session_path)? {
        client.set_token(session.token);
    }
    Ok(client)
}

// Passwords are prompted, never taken as arguments.
fn prompt_password() -> Result<String> {
    Ok(rpassword::prompt_password("Password: ")?)
}

fn store_session(config: &AppConfig, auth: &AuthResponse) -> Result<()> {
    Session {
        token: auth.token.clone(),
        email: auth.user.email.clone(),
    }
    .save(&config.session_path)?;
    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

async fn register(config: &AppConfig, name: String, email: String) -> Result<()> {
    let password = prompt_password()?;
    let client = Client::new(&config.base_url)?;
    let auth = client
        .register(&UserRegister {
            name,
            email,
            password,
        })
        .await?;
    store_session(config, &auth)?;
    println!("Registered and logged in as {} <{}>", auth.user.name, auth.user.email);
    Ok(())
}

async fn login(config: &AppConfig, email: String) -> Result<()> {
    let password = prompt_password()?;
    let client = Client::new(&config.base_url)?;
    let auth = client.login(&UserLogin { email, password }).await?;
    store_session(config, &auth)?;
    println!("Logged in as {} <{}>", auth.user.name, auth.user.email);
    Ok(())
}

async fn whoami(config: &AppConfig) -> Result<()> {
    let user = api_client(config)?.me().await?;
    println!("{} <{}>", user.name, user.email);
    Ok(())
}

async fn add(
    config: &AppConfig,
    amount: f64,
    category: Category,
    description: String,
    date: Option<String>,
) -> Result<()> {
    let expense = api_client(config)?
        .create_expense(&ExpenseNew {
            amount,
            category,
            description,
            date: date.unwrap_or_else(today),
        })
        .await?;
    println!("Recorded: {}", output::expense_line(&expense));
    Ok(())
}

async fn list(
    config: &AppConfig,
    search: Option<String>,
    category: Option<String>,
    from: Option<String>,
    to: Option<String>,
    month: Option<String>,
) -> Result<()> {
    // Empty strings and the "all" sentinel are normalized away here, at
    // the boundary; the filter itself never sees them.
    let criteria = FilterCriteria::from_raw(
        search.as_deref().unwrap_or(""),
        category.as_deref().unwrap_or(""),
        from.as_deref().unwrap_or(""),
        to.as_deref().unwrap_or(""),
    )?;

    let client = api_client(config)?;
    let expenses = match &month {
        Some(selector) => client.expenses_for_month(selector).await?,
        None => {
            let query = ExpenseQuery {
                category: criteria.category,
                start_date: criteria.start_date.clone(),
                end_date: criteria.end_date.clone(),
            };
            client.expenses(&query).await?
        }
    };

    // The server already narrows by category and dates; the search term
    // only exists client-side. Running everything through the filter keeps
    // the semantics in one place.
    let expenses = filter::apply(expenses, &criteria);
    print!("{}", output::expense_table(&expenses));
    Ok(())
}

async fn edit(
    config: &AppConfig,
    id: String,
    amount: Option<f64>,
    category: Option<Category>,
    description: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let update = ExpenseUpdate {
        amount,
        category,
        description,
        date,
    };
    if update.amount.is_none()
        && update.category.is_none()
        && update.description.is_none()
        && update.date.is_none()
    {
        return Err(AppError::Usage(
            "nothing to update: pass at least one of --amount, --category, --description, --date"
                .to_string(),
        ));
    }

    let expense = api_client(config)?.update_expense(&id, &update).await?;
    println!("Updated: {}", output::expense_line(&expense));
    Ok(())
}

async fn summary(config: &AppConfig, month: Option<String>) -> Result<()> {
    let selector = month.unwrap_or_else(current_month);
    let summary = api_client(config)?.monthly_summary(&selector).await?;
    print!("{}", output::summary_text(&selector, &summary));
    Ok(())
}

async fn export(
    config: &AppConfig,
    month: Option<String>,
    format: Format,
    out: Option<PathBuf>,
) -> Result<()> {
    let selector = month.unwrap_or_else(current_month);
    let format = ExportFormat::from(format);
    let bytes = api_client(config)?.export(&selector, format).await?;

    let out = out.unwrap_or_else(|| {
        PathBuf::from(format!("expenses_{selector}.{}", format.extension()))
    });
    std::fs::write(&out, bytes)?;
    println!("Saved {}", out.display());
    Ok(())
}
