use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use patientor_client::{HttpClient, PatientApi, PatientDetailPage, PatientListPage, SubmitOutcome};
use patientor_core::{
    ClientConfig, EntryError, EntryForm, EntryKind, FormField, Gender, PatientFormValues,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient records client")]
struct Cli {
    /// API base URL, overriding PATIENTOR_API_BASE_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Create a patient
    CreatePatient {
        name: String,
        ssn: String,
        /// Date of birth (YYYY-MM-DD)
        date_of_birth: String,
        occupation: String,
        /// male, female or other
        gender: Gender,
    },
    /// Show a patient with all entries
    Show {
        /// Patient id
        id: String,
    },
    /// List the diagnosis codes known to the server
    Diagnoses,
    /// Add an entry to a patient
    AddEntry {
        /// Patient id
        id: String,
        #[command(flatten)]
        entry: EntryArgs,
    },
}

#[derive(Args)]
struct EntryArgs {
    /// HealthCheck, OccupationalHealthcare or Hospital
    #[arg(long, default_value = "HealthCheck")]
    kind: EntryKind,
    #[arg(long, default_value = "")]
    description: String,
    /// Entry date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    specialist: String,
    /// Diagnosis code; repeat for several
    #[arg(long = "diagnosis-code")]
    diagnosis_codes: Vec<String>,
    /// Health check rating, 0-3 or its name
    #[arg(long)]
    rating: Option<String>,
    #[arg(long)]
    employer: Option<String>,
    #[arg(long)]
    sick_leave_start: Option<String>,
    #[arg(long)]
    sick_leave_end: Option<String>,
    #[arg(long)]
    discharge_date: Option<String>,
    #[arg(long)]
    discharge_criteria: Option<String>,
}

impl EntryArgs {
    /// Fill `form` the way a user would fill the modal.
    fn fill(self, form: &mut EntryForm) {
        form.set_kind(self.kind);
        form.set_field(FormField::Description, self.description);
        form.set_field(FormField::Date, self.date);
        form.set_field(FormField::Specialist, self.specialist);
        for code in &self.diagnosis_codes {
            form.add_diagnosis_code(code);
        }

        let optional = [
            (FormField::HealthCheckRating, self.rating),
            (FormField::EmployerName, self.employer),
            (FormField::SickLeaveStartDate, self.sick_leave_start),
            (FormField::SickLeaveEndDate, self.sick_leave_end),
            (FormField::DischargeDate, self.discharge_date),
            (FormField::DischargeCriteria, self.discharge_criteria),
        ];
        for (field, value) in optional
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
        {
            form.set_field(field, value);
        }
    }
}

/// Entry point for the `patientor` command line client.
///
/// # Environment Variables
/// - `PATIENTOR_API_BASE_URL`: API base URL (default: "http://localhost:3001/api")
/// - `PATIENTOR_ERROR_BANNER_SECS`: how long request errors stay visible (default: 5)
/// - `PATIENTOR_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 10)
/// - `RUST_LOG`: extra tracing directives
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut cfg = ClientConfig::from_env().context("reading configuration")?;
    if let Some(url) = cli.api_url {
        cfg = cfg.with_api_base_url(url)?;
    }
    tracing::debug!("using API at {}", cfg.api_base_url());

    let api = HttpClient::new(&cfg)?;

    match cli.command {
        Some(Commands::List) => {
            let mut page = PatientListPage::new(api, &cfg);
            let patients = page.load().await?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for p in patients {
                println!("{}  {} {}  {}", p.id, p.name, p.gender.symbol(), p.occupation);
            }
        }
        Some(Commands::CreatePatient {
            name,
            ssn,
            date_of_birth,
            occupation,
            gender,
        }) => {
            let values = PatientFormValues {
                name,
                ssn,
                date_of_birth,
                occupation,
                gender,
            };
            let mut page = PatientListPage::new(api, &cfg);
            let patient = page.create_patient(&values).await?;
            println!("Created patient with id: {}", patient.id);
        }
        Some(Commands::Show { id }) => {
            let mut page = PatientDetailPage::new(api, id, &cfg);
            page.mount().await;
            if page.patient().is_none() {
                bail!("could not load patient {}", page.patient_id());
            }
            println!("{}", page.view());
        }
        Some(Commands::Diagnoses) => {
            for d in api.get_diagnoses().await? {
                match &d.latin {
                    Some(latin) => println!("{}  {} ({latin})", d.code, d.name),
                    None => println!("{}  {}", d.code, d.name),
                }
            }
        }
        Some(Commands::AddEntry { id, entry }) => {
            let mut page = PatientDetailPage::new(api, id, &cfg);
            page.mount().await;
            if page.patient().is_none() {
                bail!("could not load patient {}", page.patient_id());
            }

            entry.fill(page.open_entry_form());
            match page.submit_entry().await {
                SubmitOutcome::Added => println!("{}", page.view()),
                SubmitOutcome::Invalid(EntryError::Validation(e)) => {
                    bail!("{}: {e}", e.field().label())
                }
                SubmitOutcome::Invalid(e) => bail!(e),
                SubmitOutcome::Failed(message) => bail!("{message}"),
                SubmitOutcome::FormClosed => bail!("no entry form open"),
            }
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(())
}
