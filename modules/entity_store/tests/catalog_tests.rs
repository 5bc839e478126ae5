//! Application catalog behavior through the native client

mod common;

use common::{memory_client, sample_app};
use entity_store::contract::data_type;
use entity_store::{AppPatch, ExecutionStatus, StoreError};

const P: &str = "global";

#[tokio::test]
async fn created_app_is_readable_and_listed_once() {
    let client = memory_client();

    let id = client.create_app(P, sample_app("a1", "u1")).await.unwrap();
    assert_eq!(id, "a1");

    let app = client.get_app(P, "a1").await.unwrap();
    assert_eq!(app.name, "App a1");
    assert_eq!(app.created_by, "u1");
    assert_eq!(app.description.as_deref(), Some("generated"));
    assert_eq!(app.config, Some(serde_json::json!({"theme": "dark", "pages": 2})));
    assert!(!app.is_published);
    assert_eq!(app.created_at, app.updated_at);

    let owned = client.list_apps(P, "u1").await.unwrap();
    assert_eq!(owned.iter().filter(|a| a.id == "a1").count(), 1);
    assert!(client.list_apps(P, "u2").await.unwrap().is_empty());
}

#[tokio::test]
async fn apps_are_listed_newest_first() {
    let client = memory_client();
    for id in ["first", "second", "third"] {
        client.create_app(P, sample_app(id, "u1")).await.unwrap();
    }

    let ids: Vec<String> = client
        .list_apps(P, "u1")
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, ["third", "second", "first"]);
}

#[tokio::test]
async fn duplicate_id_conflicts_and_keeps_original() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    let mut clash = sample_app("a1", "intruder");
    clash.name = "Replacement".to_string();
    let err = client.create_app(P, clash).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict { .. }));

    let app = client.get_app(P, "a1").await.unwrap();
    assert_eq!(app.name, "App a1");
    assert_eq!(app.created_by, "u1");
}

#[tokio::test]
async fn create_requires_non_empty_fields() {
    let client = memory_client();

    let mut no_owner = sample_app("a1", "u1");
    no_owner.created_by = "  ".to_string();
    assert!(matches!(
        client.create_app(P, no_owner).await,
        Err(StoreError::InvalidArgument { .. })
    ));

    let mut no_prompt = sample_app("a2", "u1");
    no_prompt.prompt = String::new();
    assert!(matches!(
        client.create_app(P, no_prompt).await,
        Err(StoreError::InvalidArgument { .. })
    ));

    // Ids must stay addressable as one path segment
    assert!(matches!(
        client.create_app(P, sample_app("a/b", "u1")).await,
        Err(StoreError::InvalidArgument { .. })
    ));
    assert!(client.list_apps(P, "u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_app_is_not_found() {
    let client = memory_client();
    let err = client.get_app(P, "ghost").await.unwrap_err();
    assert_eq!(err, StoreError::not_found("app", "ghost"));
}

#[tokio::test]
async fn empty_owner_is_invalid_argument() {
    let client = memory_client();
    assert!(matches!(
        client.list_apps(P, "").await,
        Err(StoreError::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn publishing_refreshes_updated_at() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();
    let before = client.get_app(P, "a1").await.unwrap();

    let patch = AppPatch {
        is_published: Some(true),
        ..AppPatch::default()
    };
    let updated = client.update_app(P, "a1", patch).await.unwrap();
    assert!(updated.is_published);
    assert!(updated.updated_at > before.updated_at);

    let after = client.get_app(P, "a1").await.unwrap();
    assert!(after.is_published);
    assert_eq!(after.name, before.name);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn empty_patch_only_touches_timestamp() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();
    let before = client.get_app(P, "a1").await.unwrap();

    let after = client
        .update_app(P, "a1", AppPatch::default())
        .await
        .unwrap();
    assert!(after.updated_at > before.updated_at);
    assert_eq!(
        (after.name, after.prompt, after.config),
        (before.name, before.prompt, before.config)
    );
}

#[tokio::test]
async fn description_can_be_cleared() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    let keep = AppPatch {
        name: Some("Renamed".to_string()),
        ..AppPatch::default()
    };
    let kept = client.update_app(P, "a1", keep).await.unwrap();
    assert_eq!(kept.description.as_deref(), Some("generated"));

    let clear = AppPatch {
        description: Some(None),
        ..AppPatch::default()
    };
    let cleared = client.update_app(P, "a1", clear).await.unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(client.get_app(P, "a1").await.unwrap().description, None);
}

#[tokio::test]
async fn updating_missing_app_is_not_found() {
    let client = memory_client();
    let err = client
        .update_app(P, "ghost", AppPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn delete_cascades_to_data_and_executions() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();
    client.create_app(P, sample_app("a2", "u1")).await.unwrap();
    for app in ["a1", "a2"] {
        client
            .save_app_data(P, app, data_type::USER_INPUT, "hello".to_string())
            .await
            .unwrap();
        client
            .record_execution(P, app, "ok", 12, ExecutionStatus::Success)
            .await
            .unwrap();
    }

    assert!(client.delete_app(P, "a1").await.unwrap());

    assert!(matches!(
        client.get_app(P, "a1").await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(client.list_app_data(P, "a1", None).await.unwrap().is_empty());
    assert!(client.list_executions(P, "a1", 10).await.unwrap().is_empty());

    // Siblings are untouched
    assert_eq!(client.list_app_data(P, "a2", None).await.unwrap().len(), 1);
    assert_eq!(client.list_executions(P, "a2", 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_missing_app_is_idempotent() {
    let client = memory_client();
    assert!(!client.delete_app(P, "ghost").await.unwrap());
    assert!(!client.delete_app(P, "ghost").await.unwrap());
}

#[tokio::test]
async fn data_records_get_unique_ids_and_filter_by_type() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(
            client
                .save_app_data(P, "a1", data_type::USER_INPUT, format!("input {}", i))
                .await
                .unwrap(),
        );
    }
    client
        .save_performance_metric(P, "a1", "latency_ms", 42.0)
        .await
        .unwrap();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.iter().all(|id| id.starts_with("a1-user_input-")));

    let inputs = client
        .list_app_data(P, "a1", Some(data_type::USER_INPUT))
        .await
        .unwrap();
    assert_eq!(inputs.len(), 5);
    assert_eq!(inputs[0].content, "input 4");

    let metrics = client
        .list_app_data(P, "a1", Some(data_type::PERFORMANCE_METRIC))
        .await
        .unwrap();
    assert_eq!(metrics.len(), 1);
    let metric: serde_json::Value = serde_json::from_str(&metrics[0].content).unwrap();
    assert_eq!(metric["metric_name"], "latency_ms");

    assert_eq!(client.list_app_data(P, "a1", None).await.unwrap().len(), 6);
}

#[tokio::test]
async fn data_for_missing_app_is_rejected() {
    let client = memory_client();
    let err = client
        .save_app_data(P, "ghost", "note", "x".to_string())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("app", "ghost"));
}

#[tokio::test]
async fn executions_are_capped_newest_first() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();
    for i in 0..5 {
        client
            .record_execution(P, "a1", &format!("run-{}", i), i * 10, ExecutionStatus::Success)
            .await
            .unwrap();
    }

    let latest = client.list_executions(P, "a1", 2).await.unwrap();
    let results: Vec<&str> = latest.iter().map(|e| e.execution_result.as_str()).collect();
    assert_eq!(results, ["run-4", "run-3"]);
    assert_eq!(latest[0].execution_time, 40);
    assert!(latest[0].id.starts_with("exec-a1-"));
}

#[tokio::test]
async fn execution_validation() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    assert!(matches!(
        client
            .record_execution(P, "a1", "boom", -1, ExecutionStatus::Error)
            .await,
        Err(StoreError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client
            .record_execution(P, "ghost", "ok", 1, ExecutionStatus::Pending)
            .await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        client.list_executions(P, "a1", 0).await,
        Err(StoreError::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn app_run_records_input_execution_and_metric() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    let input = serde_json::json!({"question": "2+2"});
    let execution_id = client
        .save_app_run(P, "a1", &input, "4", 35, ExecutionStatus::Success)
        .await
        .unwrap();

    let executions = client.list_executions(P, "a1", 10).await.unwrap();
    assert_eq!(executions.len(), 1);
    assert_eq!(executions[0].id, execution_id);
    assert_eq!(executions[0].status, ExecutionStatus::Success);

    let inputs = client
        .list_app_data(P, "a1", Some(data_type::USER_INPUT))
        .await
        .unwrap();
    assert_eq!(inputs[0].content, input.to_string());

    let metrics = client
        .list_app_data(P, "a1", Some(data_type::PERFORMANCE_METRIC))
        .await
        .unwrap();
    let metric: serde_json::Value = serde_json::from_str(&metrics[0].content).unwrap();
    assert_eq!(metric["metric_name"], "execution_time_ms");
    assert_eq!(metric["metric_value"], 35.0);
}

#[tokio::test]
async fn typed_reads_decode_inputs_and_metrics() {
    let client = memory_client();
    client.create_app(P, sample_app("a1", "u1")).await.unwrap();

    client
        .save_user_input(P, "a1", &serde_json::json!({"city": "Oslo"}))
        .await
        .unwrap();
    client
        .save_app_data(P, "a1", data_type::USER_INPUT, "plain text".to_string())
        .await
        .unwrap();
    client
        .save_performance_metric(P, "a1", "render_ms", 12.5)
        .await
        .unwrap();
    client
        .save_app_data(P, "a1", data_type::PERFORMANCE_METRIC, "{}".to_string())
        .await
        .unwrap();

    let inputs = client.list_user_inputs(P, "a1").await.unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].input_data, serde_json::json!("plain text"));
    assert_eq!(inputs[1].input_data, serde_json::json!({"city": "Oslo"}));
    assert!(inputs.iter().all(|i| i.app_id == "a1"));

    let metrics = client.list_performance_metrics(P, "a1").await.unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].metric_name, "render_ms");
    assert_eq!(metrics[0].metric_value, 12.5);

    assert!(matches!(
        client.list_user_inputs(P, "ghost").await,
        Err(StoreError::NotFound { .. })
    ));
}
