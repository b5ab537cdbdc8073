// Import database types directly from the database crate
use database::repository::DbRepository;
use database::{connect, ensure_schema, seed_if_empty, table_structure};
use reports::{Report, build_cross_tab};
use tracing_subscriber::EnvFilter;

/// The subject the parameterized performance report is run for.
const PERFORMANCE_SUBJECT: &str = "Databases";

/// The main entry point for the registrar reporting application.
///
/// There are no command-line flags: a run provisions the schema, seeds the
/// store if it is empty, and prints the three table structures, the three
/// tables' contents, and the six reports, in that fixed order. Any store
/// error aborts the run with the underlying error surfaced.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if one is present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = configuration::load_config()?;
    let pool = connect(&settings.database.connection_string()).await?;
    tracing::info!(
        host = %settings.database.host,
        database = %settings.database.database_name,
        "Connected to the store."
    );

    ensure_schema(&pool).await?;
    seed_if_empty(&pool).await?;

    let repo = DbRepository::new(pool.clone());

    for table in ["students", "subjects", "exams"] {
        let columns = table_structure(&pool, table).await?;
        Report::from_rows(format!("Structure of table {table}"), &columns).print();
    }

    Report::from_rows("Contents of table students", &repo.students().await?).print();
    Report::from_rows("Contents of table subjects", &repo.subjects().await?).print();
    Report::from_rows("Contents of table exams", &repo.exams().await?).print();

    Report::from_rows("Group headmen (alphabetical)", &repo.headmen().await?).print();
    Report::from_rows("Average grade per student", &repo.average_grades().await?).print();
    Report::from_rows("Total hours per subject", &repo.subject_hours().await?).print();
    Report::from_rows(
        format!("Performance in '{PERFORMANCE_SUBJECT}'"),
        &repo.subject_performance(PERFORMANCE_SUBJECT).await?,
    )
    .print();
    Report::from_rows("Students per faculty", &repo.students_per_faculty().await?).print();

    let triples = repo.grade_triples().await?;
    build_cross_tab("Grades per student per subject (cross-tab)", &triples).print();

    Ok(())
}
