use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vacancy_etl::{config::Config, error::Error, AppState};

#[derive(Parser)]
#[command(author, version, about = "Loads hh.ru employers and vacancies into PostgreSQL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database if needed, fetch employers and vacancies, and load them
    Load,
    /// Companies with the number of stored vacancies
    Companies,
    /// Every vacancy with its company, salary range and link
    Vacancies,
    /// Average lower and upper salary bounds
    AvgSalary,
    /// Vacancies paying more than the average lower bound
    AboveAverage,
    /// Vacancies whose title, description or town contains the keyword
    Search { keyword: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let state = AppState::new(config)?;

    match run(&state, cli.command).await {
        Ok(()) => Ok(()),
        Err(Error::Connection(e)) => {
            error!(error = ?e, "Database connection failed");
            eprintln!("Could not connect to the database, check DB_PASSWORD and try again: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(state: &AppState, command: Commands) -> vacancy_etl::error::Result<()> {
    let reports = &state.report_service;

    match command {
        Commands::Load => {
            let report = state.sync_service.run().await?;
            info!(
                "Stored {} employers and {} vacancies",
                report.employers, report.vacancies
            );
        }
        Commands::Companies => {
            for row in reports.companies_with_vacancy_counts().await? {
                println!("{}: {}", row.employer_name, row.total);
            }
        }
        Commands::Vacancies => {
            for row in reports.all_vacancies_summary().await? {
                println!("{} | {} | {} | {}", row.employer_name, row.title, row.salary, row.url);
            }
        }
        Commands::AvgSalary => {
            let avg = reports.average_salary().await?;
            println!(
                "from {} to {}",
                avg.salary_from.map_or_else(|| "-".to_string(), |v| v.to_string()),
                avg.salary_to.map_or_else(|| "-".to_string(), |v| v.to_string()),
            );
        }
        Commands::AboveAverage => {
            for row in reports.vacancies_above_average_salary().await? {
                println!("{} | {} | {} | {}", row.employer_name, row.title, row.salary_from, row.url);
            }
        }
        Commands::Search { keyword } => {
            let rows = reports.vacancies_matching_keyword(&keyword).await?;
            if rows.is_empty() {
                println!("No vacancies match {:?}", keyword);
            }
            for row in rows {
                println!(
                    "{} | {} | {} | {} | {} | {}",
                    row.employer_name,
                    row.title,
                    row.salary_from,
                    row.town,
                    row.url,
                    row.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
