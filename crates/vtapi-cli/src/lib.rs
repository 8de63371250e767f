//! Command-line front end for the transcoding providers.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use vtapi_models::{JobSpec, Preset};
use vtapi_provider::{ProviderRegistry, ProviderResult, TranscodingProvider};

/// Command-line arguments for the `vtapi` tool.
#[derive(Parser, Debug)]
#[command(name = "vtapi")]
#[command(version)]
#[command(about = "Drive a video transcoding provider from the command line")]
#[command(long_about = "Runs one provider operation and prints the result as JSON.\n\n\
    Provider settings are read from the environment (and a .env file).\n\n\
    EXAMPLES:\n    \
    vtapi mediaconvert capabilities\n    \
    vtapi elementalconductor submit s3://in/video.mp4 preset-720p preset-1080p\n    \
    vtapi elementalconductor status 1234")]
pub struct Cli {
    /// Registered provider name (elementalconductor, mediaconvert)
    pub provider: String,

    #[command(subcommand)]
    pub command: Command,
}

/// A provider operation.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the formats and destinations the provider supports
    Capabilities,
    /// Check that the provider backend is reachable
    Healthcheck,
    /// Submit a transcoding job
    Submit {
        /// Source media URI
        source: String,
        /// Provider preset ids, one output per preset
        #[arg(required = true)]
        presets: Vec<String>,
    },
    /// Poll the normalized status of a job
    Status { job_id: String },
    /// Request cancellation of a job
    Cancel { job_id: String },
    /// Create a preset from a JSON file
    CreatePreset { path: PathBuf },
    /// Fetch a preset by id
    GetPreset { preset_id: String },
    /// Delete a preset by id
    DeletePreset { preset_id: String },
}

/// Registry with every built-in provider.
pub fn builtin_registry() -> ProviderResult<ProviderRegistry> {
    ProviderRegistry::new()
        .with(vtapi_elemental::NAME, vtapi_elemental::factory)?
        .with(vtapi_mediaconvert::NAME, vtapi_mediaconvert::factory)
}

/// Run a command and return its JSON result.
pub async fn execute(provider: &dyn TranscodingProvider, command: Command) -> anyhow::Result<Value> {
    let value = match command {
        Command::Capabilities => serde_json::to_value(provider.capabilities())?,
        Command::Healthcheck => {
            provider.healthcheck().await?;
            json!({ "provider": provider.name(), "healthy": true })
        }
        Command::Submit { source, presets } => {
            let status = provider.submit(&JobSpec::new(source, presets)).await?;
            serde_json::to_value(status)?
        }
        Command::Status { job_id } => serde_json::to_value(provider.poll_status(&job_id).await?)?,
        Command::Cancel { job_id } => {
            provider.cancel(&job_id).await?;
            json!({ "provider_job_id": job_id, "cancel_requested": true })
        }
        Command::CreatePreset { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let preset: Preset =
                serde_json::from_str(&raw).with_context(|| format!("invalid preset in {}", path.display()))?;
            let preset_id = provider.create_preset(&preset).await?;
            json!({ "preset_id": preset_id })
        }
        Command::GetPreset { preset_id } => serde_json::to_value(provider.get_preset(&preset_id).await?)?,
        Command::DeletePreset { preset_id } => {
            provider.delete_preset(&preset_id).await?;
            json!({ "preset_id": preset_id, "deleted": true })
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use vtapi_models::{Capabilities, JobStatus, RemotePreset};
    use vtapi_provider::{ProviderConfig, ProviderError};

    use super::*;

    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("vtapi").chain(args.iter().copied()))
    }

    #[derive(Default)]
    struct RecordingProvider {
        submitted: Mutex<Vec<JobSpec>>,
        presets: Mutex<Vec<Preset>>,
    }

    #[async_trait]
    impl TranscodingProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn submit(&self, job: &JobSpec) -> ProviderResult<JobStatus> {
            self.submitted.lock().unwrap().push(job.clone());
            Ok(JobStatus::queued("recording", "job-1"))
        }

        async fn poll_status(&self, provider_job_id: &str) -> ProviderResult<JobStatus> {
            Err(ProviderError::backend_request("recording", Some(404), format!("{} not found", provider_job_id)))
        }

        async fn cancel(&self, _provider_job_id: &str) -> ProviderResult<()> {
            Ok(())
        }

        async fn create_preset(&self, preset: &Preset) -> ProviderResult<String> {
            self.presets.lock().unwrap().push(preset.clone());
            Ok(preset.name.clone())
        }

        async fn get_preset(&self, preset_id: &str) -> ProviderResult<RemotePreset> {
            Err(ProviderError::backend_request("recording", Some(404), preset_id))
        }

        async fn delete_preset(&self, _preset_id: &str) -> ProviderResult<()> {
            Ok(())
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::from_static(&["h264"], &["mp4"], &["s3"])
        }

        async fn healthcheck(&self) -> ProviderResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_submit() {
        let cli = parse(&["mediaconvert", "submit", "s3://in/a.mp4", "p1", "p2"]).unwrap();
        assert_eq!(cli.provider, "mediaconvert");
        assert_eq!(
            cli.command,
            Command::Submit {
                source: "s3://in/a.mp4".into(),
                presets: vec!["p1".into(), "p2".into()],
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["mediaconvert"]).is_err());
        assert!(parse(&["mediaconvert", "submit"]).is_err());
        assert!(parse(&["mediaconvert", "submit", "s3://in/a.mp4"]).is_err());
        assert!(parse(&["mediaconvert", "status"]).is_err());
        assert!(parse(&["mediaconvert", "status", "a", "b"]).is_err());
        assert!(parse(&["mediaconvert", "transcode"]).is_err());
    }

    #[test]
    fn test_help_is_not_taken_as_an_argument() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);

        let err = parse(&["mediaconvert", "submit", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("<SOURCE>"));
    }

    #[test]
    fn test_parse_single_argument_commands() {
        let cases = [
            ("status", Command::Status { job_id: "x".into() }),
            ("cancel", Command::Cancel { job_id: "x".into() }),
            ("get-preset", Command::GetPreset { preset_id: "x".into() }),
            ("delete-preset", Command::DeletePreset { preset_id: "x".into() }),
            ("create-preset", Command::CreatePreset { path: PathBuf::from("x") }),
        ];
        for (name, expected) in cases {
            assert_eq!(parse(&["p", name, "x"]).unwrap().command, expected);
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_builtin_registry_names() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.names(), vec!["elementalconductor", "mediaconvert"]);
        assert!(registry
            .resolve("zencoder", &ProviderConfig::default())
            .err()
            .unwrap()
            .to_string()
            .contains("zencoder"));
    }

    #[tokio::test]
    async fn test_execute_submit_and_status() {
        let provider = RecordingProvider::default();

        let value = execute(
            &provider,
            Command::Submit {
                source: "s3://in/a.mp4".into(),
                presets: vec!["p1".into()],
            },
        )
        .await
        .unwrap();
        assert_eq!(value["status"], "queued");
        assert_eq!(value["provider_job_id"], "job-1");
        assert_eq!(provider.submitted.lock().unwrap()[0].presets, vec!["p1"]);

        let err = execute(&provider, Command::Status { job_id: "nope".into() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope not found"));
    }

    #[tokio::test]
    async fn test_execute_create_preset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "720p", "container": "mp4",
                "video": {{"codec": "h264", "bitrate": 2500000}},
                "audio": {{"codec": "aac", "bitrate": 128000}}}}"#
        )
        .unwrap();

        let provider = RecordingProvider::default();
        let value = execute(
            &provider,
            Command::CreatePreset {
                path: file.path().to_path_buf(),
            },
        )
        .await
        .unwrap();

        assert_eq!(value["preset_id"], "720p");
        assert_eq!(provider.presets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_capabilities() {
        let value = execute(&RecordingProvider::default(), Command::Capabilities)
            .await
            .unwrap();
        assert_eq!(value["output_formats"][0], "mp4");
    }
}
