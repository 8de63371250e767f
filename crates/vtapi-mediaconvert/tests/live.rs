//! MediaConvert integration tests.

use vtapi_provider::ProviderConfig;

/// Test MediaConvert connectivity.
#[tokio::test]
#[ignore = "requires MediaConvert credentials"]
async fn test_mediaconvert_healthcheck() {
    dotenvy::dotenv().ok();

    let provider = vtapi_mediaconvert::factory(&ProviderConfig::from_env()).expect("Failed to create provider");
    provider.healthcheck().await.expect("Healthcheck failed");
}

/// Test polling a job that does not exist.
#[tokio::test]
#[ignore = "requires MediaConvert credentials"]
async fn test_mediaconvert_unknown_job() {
    dotenvy::dotenv().ok();

    let provider = vtapi_mediaconvert::factory(&ProviderConfig::from_env()).expect("Failed to create provider");
    let err = provider
        .poll_status("0000000000000-missing")
        .await
        .expect_err("unknown job should fail");
    println!("Backend error: {}", err);
}
