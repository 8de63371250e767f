//! Job request construction.
//!
//! Turns a [`JobSpec`] into the Conductor job envelope. Outputs and stream
//! assemblies are two separate lists joined by the `stream_<i>` name, one
//! pair per preset in the order the presets were given.

use vtapi_models::JobSpec;
use vtapi_provider::{output_base_path, ElementalConductorConfig};

use crate::types::{FileGroupSettings, Input, Job, Location, Output, OutputGroup, StreamAssembly};

pub const DEFAULT_JOB_PRIORITY: u32 = 50;
pub const DEFAULT_OUTPUT_GROUP_ORDER: u32 = 1;
pub const DEFAULT_EXTENSION: &str = ".mp4";
pub const FILE_GROUP_TYPE: &str = "file_group_settings";

/// Destination and location credentials used when building jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub destination: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl From<&ElementalConductorConfig> for JobSettings {
    fn from(config: &ElementalConductorConfig) -> Self {
        Self {
            destination: config.destination.clone(),
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
        }
    }
}

impl JobSettings {
    fn location(&self, uri: String) -> Location {
        Location {
            uri,
            username: self.access_key_id.clone(),
            password: self.secret_access_key.clone(),
        }
    }
}

/// Name shared by the output and stream assembly at `index`.
pub fn stream_assembly_name(index: usize) -> String {
    format!("stream_{}", index)
}

/// Build the job envelope for `job`.
///
/// Never fails: an empty preset list or an odd source yields a request with
/// no outputs or an odd destination, and the backend decides whether to
/// accept it.
pub fn build_job(job: &JobSpec, settings: &JobSettings) -> Job {
    let (outputs, stream_assemblies) = build_outputs_and_stream_assemblies(&job.presets);

    Job {
        input: Input {
            file_input: settings.location(job.source.clone()),
        },
        priority: DEFAULT_JOB_PRIORITY,
        output_group: OutputGroup {
            order: DEFAULT_OUTPUT_GROUP_ORDER,
            file_group_settings: FileGroupSettings {
                destination: settings.location(output_base_path(job, &settings.destination)),
            },
            group_type: FILE_GROUP_TYPE.to_string(),
            outputs,
        },
        stream_assemblies,
    }
}

fn build_outputs_and_stream_assemblies(presets: &[String]) -> (Vec<Output>, Vec<StreamAssembly>) {
    presets
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            let name = stream_assembly_name(index);
            let output = Output {
                stream_assembly_name: name.clone(),
                order: index as u32,
                extension: DEFAULT_EXTENSION.to_string(),
            };
            let assembly = StreamAssembly {
                name,
                preset: preset.clone(),
            };
            (output, assembly)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JobSettings {
        JobSettings {
            destination: "s3://bucket/out/".into(),
            access_key_id: "AKIA".into(),
            secret_access_key: "s3cr3t".into(),
        }
    }

    #[test]
    fn test_outputs_pair_with_stream_assemblies() {
        let presets: Vec<String> = (0..5).map(|i| format!("preset-{}", i)).collect();
        let job = build_job(&JobSpec::new("s3://in/video.mp4", presets.clone()), &settings());

        assert_eq!(job.output_group.outputs.len(), 5);
        assert_eq!(job.stream_assemblies.len(), 5);
        for (i, (output, assembly)) in job
            .output_group
            .outputs
            .iter()
            .zip(&job.stream_assemblies)
            .enumerate()
        {
            assert_eq!(output.stream_assembly_name, format!("stream_{}", i));
            assert_eq!(assembly.name, output.stream_assembly_name);
            assert_eq!(assembly.preset, presets[i]);
            assert_eq!(output.order, i as u32);
            assert_eq!(output.extension, DEFAULT_EXTENSION);
        }
    }

    #[test]
    fn test_credentials_on_both_locations() {
        let job = build_job(&JobSpec::new("/a/b/clip.mov", ["p"]), &settings());

        let input = &job.input.file_input;
        let output = &job.output_group.file_group_settings.destination;
        assert_eq!(input.uri, "/a/b/clip.mov");
        assert_eq!(output.uri, "s3://bucket/out/clip");
        for location in [input, output] {
            assert_eq!(location.username, "AKIA");
            assert_eq!(location.password, "s3cr3t");
        }
    }

    #[test]
    fn test_envelope_constants() {
        let job = build_job(&JobSpec::new("s3://in/video.mp4", ["p"]), &settings());
        assert_eq!(job.priority, DEFAULT_JOB_PRIORITY);
        assert_eq!(job.output_group.order, DEFAULT_OUTPUT_GROUP_ORDER);
        assert_eq!(job.output_group.group_type, "file_group_settings");
    }

    #[test]
    fn test_empty_presets_build_degenerate_job() {
        let job = build_job(&JobSpec::new("s3://in/video.mp4", Vec::<String>::new()), &settings());
        assert!(job.output_group.outputs.is_empty());
        assert!(job.stream_assemblies.is_empty());
        assert_eq!(job.output_group.file_group_settings.destination.uri, "s3://bucket/out/video");
    }

    #[test]
    fn test_build_is_deterministic() {
        let spec = JobSpec::new("s3://in/video.mp4", ["preset-a", "preset-b"]);
        assert_eq!(build_job(&spec, &settings()), build_job(&spec, &settings()));
    }

    #[test]
    fn test_serialized_xml_shape() {
        let job = build_job(&JobSpec::new("s3://in/video.mp4", ["preset-a", "preset-b"]), &settings());
        let xml = quick_xml::se::to_string(&job).unwrap();

        assert!(xml.starts_with("<job>"));
        assert!(xml.contains("<type>file_group_settings</type>"));
        assert!(xml.contains("<priority>50</priority>"));
        assert_eq!(xml.matches("<output>").count(), 2);
        assert_eq!(xml.matches("<stream_assembly>").count(), 2);
        assert!(xml.contains("<stream_assembly><name>stream_1</name><preset>preset-b</preset></stream_assembly>"));
    }

    #[test]
    fn test_location_without_credentials_omits_them() {
        let mut settings = settings();
        settings.access_key_id.clear();
        settings.secret_access_key.clear();

        let xml = quick_xml::se::to_string(&build_job(&JobSpec::new("s3://in/a.mp4", ["p"]), &settings)).unwrap();
        assert!(!xml.contains("<username>"));
        assert!(!xml.contains("<password>"));
    }
}
