//! Output placement.

use vtapi_models::JobSpec;

/// Output base path for a job: the destination root with its trailing
/// separators removed, followed by the source filename without extension.
///
/// Jobs sharing a root land in distinct subpaths as long as their sources
/// have distinct filenames.
pub fn output_base_path(job: &JobSpec, destination_root: &str) -> String {
    format!("{}/{}", destination_root.trim_end_matches('/'), job.source_stem())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(source: &str) -> JobSpec {
        JobSpec::new(source, Vec::<String>::new())
    }

    #[test]
    fn test_output_base_path() {
        assert_eq!(
            output_base_path(&job("/a/b/clip.mov"), "s3://bucket/out/"),
            "s3://bucket/out/clip"
        );
        assert_eq!(
            output_base_path(&job("s3://in/video.mp4"), "s3://bucket/out"),
            "s3://bucket/out/video"
        );
        assert_eq!(
            output_base_path(&job("s3://in/video.mp4"), "s3://bucket/out///"),
            "s3://bucket/out/video"
        );
    }

    #[test]
    fn test_output_base_path_is_stable() {
        let spec = job("http://cdn.example.com/media/trailer.final.mov");
        let first = output_base_path(&spec, "s3://bucket/out/");
        assert_eq!(first, output_base_path(&spec, "s3://bucket/out/"));
        assert_eq!(first, "s3://bucket/out/trailer.final");
    }

    #[test]
    fn test_output_base_path_degenerate_source() {
        assert_eq!(output_base_path(&job(""), "s3://bucket/out/"), "s3://bucket/out/");
    }
}
