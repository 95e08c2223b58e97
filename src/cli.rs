//! Drives the command-line program.

use crate::client::{Error, MissionControl};
use crate::conf::{HOST_SETTING, PORT_SETTING, Settings, TIMEOUT_SETTING};
use crate::validation::VALIDATION_MESSAGE_OK;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use indoc::indoc;

/// Exit code when validation succeeds or a listing is printed.
pub const EXIT_OK: i32 = 0;

/// Exit code when validation fails.
pub const EXIT_INVALID: i32 = 1;

/// Exit code when the program is misconfigured.
pub const EXIT_CONFIG: i32 = 2;

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(
    about = "Validates OpenShift and GitHub names against Mission Control",
    long_about = indoc! {"
        Validates OpenShift and GitHub names against Mission Control.

        Validation commands print a message and exit with status 0 if the
        input is acceptable, or 1 if it is not. Listing commands print one
        item per line and print nothing if Mission Control cannot be reached.
    "}
)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Value of the Authorization header sent to Mission Control
    #[arg(long, env = "MISSION_CONTROL_AUTH", hide_env_values = true)]
    auth: String,

    /// Mission Control host [default: launchpad-missioncontrol]
    #[arg(long, global = true)]
    host: Option<String>,

    /// Mission Control port [default: 8080]
    #[arg(long, global = true)]
    port: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    timeout: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Settings built from the command line, falling back to the
    /// environment for anything that was not given.
    pub fn settings(&self) -> Settings {
        let overrides = [
            (HOST_SETTING, &self.host),
            (PORT_SETTING, &self.port),
            (TIMEOUT_SETTING, &self.timeout),
        ];
        overrides
            .into_iter()
            .fold(Settings::new(), |settings, (name, value)| match value {
                Some(value) => settings.with_override(name, value),
                None => settings,
            })
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that a name or token is acceptable
    #[command(subcommand)]
    Validate(ValidateCommand),

    /// List the OpenShift clusters available to the user
    Clusters,

    /// List the user's OpenShift projects
    Projects {
        /// Only list projects on this cluster
        #[arg(long)]
        cluster: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ValidateCommand {
    /// Check that no OpenShift project with this name exists
    Project {
        /// OpenShift project name
        name: String,

        /// Check the project on this cluster
        #[arg(long)]
        cluster: Option<String>,
    },

    /// Check that no GitHub repository with this name exists
    Repository {
        /// GitHub repository name
        name: String,
    },

    /// Check that the user has an OpenShift token
    OpenshiftToken {
        /// Check for a token for this cluster
        #[arg(long)]
        cluster: Option<String>,
    },

    /// Check that the user has a GitHub token
    GithubToken,
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    mission_control: MissionControl,
}

impl Runner {
    /// Create a new program runner using the given `config`.
    ///
    /// Returns an error if Mission Control's address is misconfigured.
    pub fn new(config: Config) -> Result<Runner, Error> {
        let mission_control = MissionControl::from_settings(&config.settings())?;
        Ok(Self {
            config,
            mission_control,
        })
    }

    /// Run the command-line program using its stored configuration options
    /// and return the program's exit code.
    pub async fn run(&self) -> i32 {
        match &self.config.command {
            Command::Validate(command) => self.run_validate(command).await,
            Command::Clusters => self.run_clusters().await,
            Command::Projects { cluster } => self.run_projects(cluster.as_deref()).await,
        }
    }

    async fn run_validate(&self, command: &ValidateCommand) -> i32 {
        let auth = &self.config.auth;
        let mc = &self.mission_control;
        let message = match command {
            ValidateCommand::Project { name, cluster } => {
                mc.validate_openshift_project_exists(auth, name, cluster.as_deref())
                    .await
            }
            ValidateCommand::Repository { name } => {
                mc.validate_github_repository_exists(auth, name).await
            }
            ValidateCommand::OpenshiftToken { cluster } => {
                mc.validate_openshift_token_exists(auth, cluster.as_deref())
                    .await
            }
            ValidateCommand::GithubToken => mc.validate_github_token_exists(auth).await,
        };
        println!("{message}");
        exit_code(&message)
    }

    async fn run_clusters(&self) -> i32 {
        let clusters = self
            .mission_control
            .get_openshift_clusters(&self.config.auth)
            .await;
        print_items(&clusters);
        EXIT_OK
    }

    async fn run_projects(&self, cluster: Option<&str>) -> i32 {
        let projects = self
            .mission_control
            .get_projects(&self.config.auth, cluster)
            .await;
        print_items(&projects);
        EXIT_OK
    }
}

fn exit_code(message: &str) -> i32 {
    if message == VALIDATION_MESSAGE_OK {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

fn print_items(items: &[String]) {
    for item in items {
        println!("{item}");
    }
}

/// Runs the command-line program with `config` and returns its exit code.
pub async fn run(config: Config) -> i32 {
    match Runner::new(config) {
        Ok(runner) => runner.run().await,
        Err(err) => {
            eprintln!("{err}");
            EXIT_CONFIG
        }
    }
}
