//! Per-request orchestration.
//!
//! All requests funnel through [`dispatch`]: match the route, fetch the
//! issue's comments, replay them through a request-scoped delivery
//! channel, score the bodies, render the report. Every branch writes
//! exactly one status and one fixed body, and logs exactly one outcome
//! line.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;
use http::{Method, StatusCode};

use super::error::ServiceError;
use super::report::render_report;
use super::router::{RouteError, route};
use crate::github::{CommentGateway, IssueComment, IssueLocator};
use crate::relay::{RelayEvent, ReplayChannel};
use crate::topics::{Document, TopicExtractor};

/// Body returned for any internal failure.
const INTERNAL_ERROR_BODY: &str = "an error occurred while processing the request";

/// Shared collaborators handed to every request task.
#[derive(Clone)]
pub struct AppState {
    /// Comment source.
    pub gateway: Arc<dyn CommentGateway>,
    /// Topic scorer.
    pub extractor: Arc<dyn TopicExtractor>,
}

impl AppState {
    /// Bundles the two collaborators.
    #[must_use]
    pub fn new(gateway: Arc<dyn CommentGateway>, extractor: Arc<dyn TopicExtractor>) -> Self {
        Self { gateway, extractor }
    }
}

/// Why a request did not produce a report.
#[derive(Debug)]
enum RequestFailure {
    Route(RouteError),
    Service(ServiceError),
}

impl RequestFailure {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Route(RouteError::NotFound) => StatusCode::NOT_FOUND,
            Self::Route(RouteError::InvalidParameters) => StatusCode::BAD_REQUEST,
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn body(&self) -> &'static str {
        match self {
            Self::Route(RouteError::NotFound) => "unknown route",
            Self::Route(RouteError::InvalidParameters) => "invalid request parameters",
            Self::Service(_) => INTERNAL_ERROR_BODY,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Route(error) => error.to_string(),
            Self::Service(error) => error.to_string(),
        }
    }
}

/// Handles one HTTP request from routing through response assembly.
///
/// A panic escaping the orchestration is caught here and converted into
/// the generic 500 response, so a faulted request still produces a
/// response and a log line.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let outcome = AssertUnwindSafe(handle(&state, &method, &path))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(report)) => {
            tracing::info!(%method, %path, "request completed");
            (StatusCode::OK, report).into_response()
        }
        Ok(Err(failure)) => {
            tracing::warn!(%method, %path, failure = %failure.message(), "request failed");
            (failure.status(), failure.body()).into_response()
        }
        Err(_panic) => {
            tracing::error!(%method, %path, "request handler panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
) -> Result<String, RequestFailure> {
    let matched = route(method, path).map_err(RequestFailure::Route)?;
    let locator = IssueLocator::from_parts(&matched.owner, &matched.repo, matched.issue_number)
        .map_err(|_| RequestFailure::Route(RouteError::InvalidParameters))?;

    let comments = state
        .gateway
        .issue_comments(&locator)
        .await
        .map_err(|error| RequestFailure::Service(ServiceError::Fetch(error)))?;

    deliver_comments(&comments).map_err(RequestFailure::Service)?;

    let documents: Vec<Document> = comments
        .iter()
        .map(|comment| Document::new(comment.body.clone()))
        .collect();
    let results = state
        .extractor
        .extract_topics(&documents)
        .await
        .map_err(|error| RequestFailure::Service(ServiceError::Extract(error)))?;

    Ok(render_report(&comments, &results))
}

/// Replays the fetched comments through a request-scoped channel.
///
/// The channel lives only for this invocation; the attached listener
/// logs the terminal event and exits once the channel closes.
fn deliver_comments(comments: &[IssueComment]) -> Result<(), ServiceError> {
    let channel = ReplayChannel::new();
    let mut subscription = channel.subscribe();
    tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            match event {
                RelayEvent::Next(_) => {}
                RelayEvent::Completed => tracing::debug!("all comments delivered"),
                RelayEvent::Failed(message) => {
                    tracing::warn!(%message, "comment delivery failed");
                }
            }
        }
    });

    for comment in comments {
        channel.emit(comment.clone())?;
    }
    channel.complete()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::extract::{Request, State};
    use http::{Method, StatusCode};
    use mockall::predicate::eq;

    use super::{AppState, dispatch};
    use crate::github::{FetchError, IssueComment, IssueLocator, MockCommentGateway};
    use crate::topics::{MockTopicExtractor, TopicVector};

    fn request(method: Method, path: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("request should build")
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
    }

    fn state_with(gateway: MockCommentGateway, extractor: MockTopicExtractor) -> AppState {
        AppState::new(Arc::new(gateway), Arc::new(extractor))
    }

    #[tokio::test]
    async fn success_path_renders_comments_and_topics() {
        let mut gateway = MockCommentGateway::new();
        let locator =
            IssueLocator::from_parts("octo", "demo", 42).expect("locator should be valid");
        gateway
            .expect_issue_comments()
            .with(eq(locator))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    IssueComment {
                        id: 1,
                        author: "alice".to_owned(),
                        body: "hi".to_owned(),
                    },
                    IssueComment {
                        id: 2,
                        author: "bob".to_owned(),
                        body: "thanks".to_owned(),
                    },
                ])
            });

        let mut extractor = MockTopicExtractor::new();
        extractor.expect_extract_topics().times(1).returning(|documents| {
            Ok(documents
                .iter()
                .map(|document| TopicVector {
                    source_text: document.text.clone(),
                    scores: vec![0.25, 0.75],
                })
                .collect())
        });

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::GET, "/octo/demo/42"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("commented by alice: hi"), "body: {body}");
        assert!(body.contains("commented by bob: thanks"), "body: {body}");
        assert_eq!(body.matches("  Topic 0:").count(), 2, "body: {body}");
        assert_eq!(body.matches("  Topic 1:").count(), 2, "body: {body}");
    }

    #[tokio::test]
    async fn invalid_issue_number_is_rejected_before_the_gateway() {
        let mut gateway = MockCommentGateway::new();
        gateway.expect_issue_comments().never();
        let mut extractor = MockTopicExtractor::new();
        extractor.expect_extract_topics().never();

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::GET, "/octo/demo/notanumber"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "invalid request parameters");
    }

    #[tokio::test]
    async fn post_to_the_endpoint_is_unknown() {
        let mut gateway = MockCommentGateway::new();
        gateway.expect_issue_comments().never();
        let extractor = MockTopicExtractor::new();

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::POST, "/octo/demo/42"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "unknown route");
    }

    #[tokio::test]
    async fn gateway_failure_maps_to_generic_500() {
        let mut gateway = MockCommentGateway::new();
        gateway.expect_issue_comments().times(1).returning(|_| {
            Err(FetchError::Network {
                message: "connection reset".to_owned(),
            })
        });
        let mut extractor = MockTopicExtractor::new();
        extractor.expect_extract_topics().never();

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::GET, "/octo/demo/42"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "an error occurred while processing the request"
        );
    }

    #[tokio::test]
    async fn extractor_failure_maps_to_the_same_500() {
        let mut gateway = MockCommentGateway::new();
        gateway.expect_issue_comments().times(1).returning(|_| {
            Ok(vec![IssueComment {
                id: 1,
                author: "alice".to_owned(),
                body: "hi".to_owned(),
            }])
        });
        let mut extractor = MockTopicExtractor::new();
        extractor.expect_extract_topics().times(1).returning(|_| {
            Err(crate::topics::ExtractError::Analysis {
                message: "model unavailable".to_owned(),
            })
        });

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::GET, "/octo/demo/42"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "an error occurred while processing the request"
        );
    }

    #[tokio::test]
    async fn empty_issue_still_renders_a_report() {
        let mut gateway = MockCommentGateway::new();
        gateway
            .expect_issue_comments()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let mut extractor = MockTopicExtractor::new();
        extractor
            .expect_extract_topics()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let response = dispatch(
            State(state_with(gateway, extractor)),
            request(Method::GET, "/octo/demo/42"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.starts_with("Comments:\n"), "body: {body}");
    }

    #[tokio::test]
    async fn a_panicking_collaborator_becomes_a_500() {
        struct PanickingGateway;

        #[async_trait::async_trait]
        impl crate::github::CommentGateway for PanickingGateway {
            async fn issue_comments(
                &self,
                _locator: &IssueLocator,
            ) -> Result<Vec<IssueComment>, FetchError> {
                panic!("gateway exploded");
            }
        }

        let extractor = MockTopicExtractor::new();
        let state = AppState::new(Arc::new(PanickingGateway), Arc::new(extractor));

        let response = dispatch(State(state), request(Method::GET, "/octo/demo/42")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "an error occurred while processing the request"
        );
    }
}
