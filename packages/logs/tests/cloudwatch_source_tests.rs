// ABOUTME: Integration tests for the CloudWatch Logs source against replayed HTTP traffic
// ABOUTME: Tests that one query follows nextToken through every page

use aws_sdk_cloudwatchlogs::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_cloudwatchlogs::{Client, Config};
use aws_smithy_http_client::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_types::body::SdkBody;
use pretty_assertions::assert_eq;

use berth_logs::{CloudWatchLogSource, LogError, LogSource, LogTarget};

fn page(body: &'static str) -> ReplayEvent {
    ReplayEvent::new(
        http::Request::builder()
            .uri("https://logs.us-east-1.amazonaws.com/")
            .body(SdkBody::empty())
            .unwrap(),
        http::Response::builder()
            .status(200)
            .header("content-type", "application/x-amz-json-1.1")
            .body(SdkBody::from(body))
            .unwrap(),
    )
}

fn source_replaying(events: Vec<ReplayEvent>) -> (CloudWatchLogSource, StaticReplayClient) {
    let http_client = StaticReplayClient::new(events);
    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKID", "SECRET", None, None, "test"))
        .http_client(http_client.clone())
        .build();
    (
        CloudWatchLogSource::from_client(Client::from_conf(config)),
        http_client,
    )
}

#[tokio::test]
async fn test_query_drains_every_page() {
    let (source, http_client) = source_replaying(vec![
        page(
            r#"{"events":[
                {"eventId":"1","logStreamName":"ecs/web/abc","timestamp":100,"ingestionTime":101,"message":"a"},
                {"eventId":"2","logStreamName":"ecs/web/abc","timestamp":150,"ingestionTime":151,"message":"b"}
            ],"nextToken":"page-2"}"#,
        ),
        page(
            r#"{"events":[
                {"eventId":"3","logStreamName":"ecs/web/abc","timestamp":150,"ingestionTime":152,"message":"c"}
            ]}"#,
        ),
    ]);

    let target = LogTarget::new("/ecs/web").with_stream_prefix("ecs/web");
    let records = source.query(&target, 100).await.unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(records[2].message, "c");

    let requests: Vec<String> = http_client
        .actual_requests()
        .map(|request| {
            String::from_utf8_lossy(request.body().bytes().unwrap_or_default()).to_string()
        })
        .collect();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains(r#""logGroupName":"/ecs/web""#));
    assert!(requests[0].contains(r#""startTime":100"#));
    assert!(!requests[0].contains("nextToken"));
    assert!(requests[1].contains(r#""nextToken":"page-2""#));
}

#[tokio::test]
async fn test_empty_group_is_rejected_without_a_request() {
    let (source, http_client) = source_replaying(Vec::new());

    let err = source.query(&LogTarget::new(""), 0).await.unwrap_err();

    assert!(matches!(err, LogError::InvalidTarget(_)));
    assert_eq!(http_client.actual_requests().count(), 0);
}
