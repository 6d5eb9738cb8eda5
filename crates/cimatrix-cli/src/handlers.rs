//! Command handlers.

use crate::commands::VersionArgs;
use crate::config::{CliConfig, OutputFormat};
use cimatrix_core::{
    CombinedMatrix, JobKind, JobMatrixDocument, PartitionModule, PartitionPackage, Verbosity,
};
use cimatrix_planner::{
    Classifier, MatrixBuilder, MatrixCombiner, MatrixRequest, PartitionPlanner,
    VersionSetResolver,
};
use cimatrix_runner::{GoDiscovery, GotestsumOracle};
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Options of `generate-matrix` after argument parsing.
pub struct GenerateMatrixArgs {
    pub kind: String,
    pub fast: bool,
    pub partition_module: Vec<String>,
    pub partition_package: Vec<String>,
    pub platform: Vec<String>,
    pub versions: VersionArgs,
}

/// Build the job matrix and print it.
pub async fn generate_matrix(
    config: &CliConfig,
    args: GenerateMatrixArgs,
    verbosity: Verbosity,
    format: OutputFormat,
) -> HandlerResult {
    let request = matrix_request(config, &args)?;

    let discovery = Arc::new(GoDiscovery::new(config.discovery.clone()));
    let oracle = Arc::new(GotestsumOracle::new(config.oracle.clone(), verbosity));
    let planner = PartitionPlanner::new(
        oracle,
        Classifier::new(config.classifier.clone()),
        verbosity,
    );
    let builder = MatrixBuilder::new(discovery, planner, config.makefile_tests.clone());

    let document = builder.build(&request).await?;
    summarize(&document);
    print(&document, format)
}

/// Validate every argument before any external tool runs.
pub fn matrix_request(
    config: &CliConfig,
    args: &GenerateMatrixArgs,
) -> Result<MatrixRequest, Box<dyn std::error::Error>> {
    let kind: JobKind = args.kind.parse()?;

    let named = args.versions.named_sets();
    let version_sets =
        VersionSetResolver::new().resolve(named.as_slice(), args.versions.versions.as_slice())?;

    let partition_modules = args
        .partition_module
        .chunks_exact(2)
        .map(|chunk| PartitionModule::new(&chunk[0], parse_count(&chunk[1])?))
        .collect::<Result<Vec<_>, _>>()?;

    let partition_packages = args
        .partition_package
        .chunks_exact(3)
        .map(|chunk| PartitionPackage::new(&chunk[0], &chunk[1], parse_count(&chunk[2])?))
        .collect::<Result<Vec<_>, _>>()?;

    let platforms = config.check_platforms(&args.platform)?;

    Ok(MatrixRequest {
        kind,
        fast: args.fast,
        partition_modules,
        partition_packages,
        platforms,
        version_sets,
    })
}

fn parse_count(raw: &str) -> cimatrix_core::Result<i64> {
    raw.parse()
        .map_err(|_| cimatrix_core::Error::Config(format!("partition count {:?} is not a number", raw)))
}

/// Resolve exactly one version set and print it.
pub fn generate_version_set(versions: &VersionArgs, format: OutputFormat) -> HandlerResult {
    let named = versions.named_sets();
    let set = VersionSetResolver::new()
        .resolve_single(named.as_slice(), versions.versions.as_slice())?;
    info!(version_set = %set.to_spec(), "Resolved version set");
    print(&set, format)
}

/// Expand matrices into a flat include list and print it.
pub fn combine_matrices(matrices: &[String], format: OutputFormat) -> HandlerResult {
    let include = MatrixCombiner::new().combine_json(matrices)?;
    print(&CombinedMatrix { include }, format)
}

/// Print the JSON schema of the matrix document.
pub fn schema() -> HandlerResult {
    let schema = JobMatrixDocument::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Show configuration.
pub fn show_config(config: &CliConfig) -> HandlerResult {
    eprintln!("{}", style("Current configuration:").bold());
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

/// Print the user configuration path.
pub fn config_path() -> HandlerResult {
    println!("{}", CliConfig::config_path()?.display());
    Ok(())
}

fn summarize(document: &JobMatrixDocument) {
    eprintln!(
        "{} {} test suites × {} platforms × {} version sets",
        style("✓").green(),
        style(document.test_suite.len()).bold(),
        document.platform.len(),
        document.version_set.len()
    );
}

fn print<T: Serialize>(value: &T, format: OutputFormat) -> HandlerResult {
    let rendered = render(value, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cimatrix_core::VersionSet;

    fn args() -> GenerateMatrixArgs {
        GenerateMatrixArgs {
            kind: "unit-test".to_string(),
            fast: false,
            partition_module: vec![],
            partition_package: vec![],
            platform: vec![],
            versions: VersionArgs::default(),
        }
    }

    #[test]
    fn test_matrix_request_defaults() {
        let request = matrix_request(&CliConfig::default(), &args()).unwrap();
        assert_eq!(request.kind, JobKind::UnitTest);
        assert_eq!(request.platforms.len(), 3);
        assert_eq!(request.version_sets, vec![VersionSet::minimum()]);
    }

    #[test]
    fn test_matrix_request_parses_partitions() {
        let mut args = args();
        args.partition_module = ["pkg", "3", "sdk", "1"].map(String::from).to_vec();
        args.partition_package = ["example.com/tests/integration", "tests/integration", "8"]
            .map(String::from)
            .to_vec();

        let request = matrix_request(&CliConfig::default(), &args).unwrap();

        assert_eq!(
            request.partition_modules,
            vec![
                PartitionModule::new("pkg", 3).unwrap(),
                PartitionModule::new("sdk", 1).unwrap(),
            ]
        );
        assert_eq!(request.partition_packages[0].package_dir, "tests/integration");
        assert_eq!(request.partition_packages[0].partitions, 8);
    }

    #[test]
    fn test_matrix_request_rejects_bad_configuration() {
        let mut bad_count = args();
        bad_count.partition_module = ["pkg", "0"].map(String::from).to_vec();
        assert!(matrix_request(&CliConfig::default(), &bad_count).is_err());

        let mut not_a_number = args();
        not_a_number.partition_module = ["pkg", "three"].map(String::from).to_vec();
        assert!(matrix_request(&CliConfig::default(), &not_a_number).is_err());

        let mut bad_set = args();
        bad_set.versions.version_set = vec!["latest".to_string()];
        assert!(matrix_request(&CliConfig::default(), &bad_set).is_err());

        let mut bad_kind = args();
        bad_kind.kind = "smoke-test".to_string();
        assert!(matrix_request(&CliConfig::default(), &bad_kind).is_err());
    }

    #[test]
    fn test_custom_versions_replace_default_set() {
        let mut args = args();
        args.versions.versions = vec!["go=1.20.x".to_string()];
        let request = matrix_request(&CliConfig::default(), &args).unwrap();
        assert_eq!(request.version_sets.len(), 1);
        assert_eq!(request.version_sets[0].go, "1.20.x");
    }

    #[test]
    fn test_render_formats() {
        let set = VersionSet::current();
        let json = render(&set, OutputFormat::Json).unwrap();
        assert!(json.starts_with(r#"{"name":"current""#));
        let yaml = render(&set, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("go: 1.19.x"));
    }
}
