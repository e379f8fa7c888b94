/*!
# webapitest - Postman collections as scene/case test suites

webapitest turns an exported Postman collection into a directory of scene files
(one url and method, a list of named parameter sets) and back. Scenes run against
a live server, case parameters can be edited as csv, and users logged in by a
login scene keep their session cookie between runs.

## Usage Examples
webapitest parse deal.collection.json --casedir cases
webapitest parse2postmanfile cases --postmanfile deal.json
webapitest runcase cases
webapitest createcsv cases
webapitest resetjsonbycsv cases
*/

use anyhow::Context;
use clap::Parser;
use webapitest::cli::{CliParameters, CliTools, Command};
use webapitest::config::ProjectConfig;
use webapitest::executor::{all_successful, print_execution_results};
use webapitest::lifecycle::{Lifecycle, ShellLifecycle};
use webapitest::logger;
use webapitest::project::{parse_collection_to_scene_dir, parse_scene_dir_to_collection, Project};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    // Parse command line arguments
    let args = CliParameters::parse();
    if let Err(validation_error) = args.validate() {
        CliTools::print_red(&validation_error.to_string());
        return Err(validation_error.into());
    }

    let mut config = ProjectConfig::load(args.config.as_deref()).context("Failed to load project config")?;
    if let Some(casedir) = args.command.casedir() {
        config = config.with_path(CliTools::absolute_path(casedir)?);
    }

    match args.command {
        Command::Parse { path, casedir } => {
            let collection = parse_collection_to_scene_dir(&path, &casedir)
                .with_context(|| format!("Failed to convert collection '{}'", path.display()))?;
            CliTools::print_green(&format!(
                "Collection '{}' written to {}",
                collection.info.name,
                casedir.display()
            ));
        }
        Command::Parse2PostmanFile {
            casedir,
            postmanfile,
            name,
        } => {
            let collection = parse_scene_dir_to_collection(&casedir, &postmanfile, name.as_deref())
                .with_context(|| format!("Failed to convert scene directory '{}'", casedir.display()))?;
            CliTools::print_green(&format!(
                "Collection '{}' written to {}",
                collection.info.name,
                postmanfile.display()
            ));
        }
        Command::RunCase { .. } => {
            let mut project = Project::new(config)?;
            project.load_cookie().await.context("Failed to log users in")?;

            let results = project.run().await?;
            print_execution_results(&results);
            if !all_successful(&results) {
                anyhow::bail!("Some cases failed");
            }
        }
        Command::CreateCsv { .. } => {
            Project::new(config)?.create_csv().context("Failed to create csv files")?;
            CliTools::print_green("createcsv done");
        }
        Command::CheckCsv { .. } => {
            Project::new(config)?.check_csv().context("Invalid csv file")?;
            CliTools::print_green("checkcsv done");
        }
        Command::ResetJsonByCsv { .. } => {
            Project::new(config)?
                .reset_json_by_csv()
                .context("Failed to reset scene files from csv")?;
            CliTools::print_green("resetjsonbycsv done");
        }
        Command::CleanDb => ShellLifecycle::new(config.shell, &config.root).clean()?,
        Command::InitDb => ShellLifecycle::new(config.shell, &config.root).init()?,
        Command::StartWebServer => ShellLifecycle::new(config.shell, &config.root).start()?,
    }

    Ok(())
}
