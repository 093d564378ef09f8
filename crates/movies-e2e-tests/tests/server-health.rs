use movies_e2e_tests::{extend_url, prepare_env, spawn_server};
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_health() {
    let (args, _config_guard) = prepare_env("test_health").await.unwrap();

    let base_url = spawn_server(args).await.unwrap();

    let client = reqwest::Client::new();

    let response = client
        .get(extend_url(&base_url, "health"))
        .send()
        .await
        .unwrap();
    info!("Response: {:#?}", response);
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "ok");
}
