//! Job request construction.

use vtapi_models::JobSpec;
use vtapi_provider::{output_base_path, MediaConvertConfig};

use crate::api::{JobRequest, OutputRequest};

/// Name modifier appended to the output file of preset `index`.
pub fn name_modifier(index: usize) -> String {
    format!("_stream_{}", index)
}

/// Build the `CreateJob` request for `job`: one input, one file group with
/// an output per preset in order.
pub fn build_job_request(job: &JobSpec, config: &MediaConvertConfig) -> JobRequest {
    let outputs = job
        .presets
        .iter()
        .enumerate()
        .map(|(index, preset)| OutputRequest {
            preset: preset.clone(),
            name_modifier: name_modifier(index),
        })
        .collect();

    JobRequest {
        role: config.role_arn.clone(),
        queue: config.queue().map(str::to_string),
        input_file: job.source.clone(),
        destination: format!("{}/", output_base_path(job, &config.destination)),
        outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MediaConvertConfig {
        MediaConvertConfig {
            access_key_id: "AKIA".into(),
            secret_access_key: "s3cr3t".into(),
            region: String::new(),
            endpoint: "https://abcd.mediaconvert.us-east-1.amazonaws.com".into(),
            queue_arn: String::new(),
            role_arn: "arn:aws:iam::123:role/mc".into(),
            destination: "s3://bucket/out".into(),
        }
    }

    #[test]
    fn test_outputs_follow_preset_order() {
        let request = build_job_request(
            &JobSpec::new("s3://in/video.mp4", ["preset-a", "preset-b", "preset-c"]),
            &config(),
        );

        let outputs: Vec<(&str, &str)> = request
            .outputs
            .iter()
            .map(|o| (o.preset.as_str(), o.name_modifier.as_str()))
            .collect();
        assert_eq!(
            outputs,
            vec![
                ("preset-a", "_stream_0"),
                ("preset-b", "_stream_1"),
                ("preset-c", "_stream_2"),
            ]
        );
        assert_eq!(request.destination, "s3://bucket/out/video/");
        assert_eq!(request.input_file, "s3://in/video.mp4");
        assert_eq!(request.role, "arn:aws:iam::123:role/mc");
    }

    #[test]
    fn test_queue_is_optional() {
        let spec = JobSpec::new("s3://in/video.mp4", ["p"]);
        assert_eq!(build_job_request(&spec, &config()).queue, None);

        let mut config = config();
        config.queue_arn = "arn:aws:mediaconvert:us-east-1:123:queues/Default".into();
        assert_eq!(
            build_job_request(&spec, &config).queue.as_deref(),
            Some("arn:aws:mediaconvert:us-east-1:123:queues/Default")
        );
    }

    #[test]
    fn test_empty_presets_and_determinism() {
        let spec = JobSpec::new("s3://in/video.mp4", Vec::<String>::new());
        let request = build_job_request(&spec, &config());
        assert!(request.outputs.is_empty());
        assert_eq!(request, build_job_request(&spec, &config()));
    }
}
