use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tokio_util::sync::CancellationToken;

use crate::core::library::{LibraryError, LibraryResult};
use crate::covers::domain::CoverProvider;
use crate::covers::domain::model::{Cover, CoverFetchFailure};

// HttpCoverProvider downloads covers from `{base_url}/api/bookcovers/{name}`,
// the response body is the cover itself.
#[derive(Debug, Clone)]
pub struct HttpCoverProvider {
    client: Client,
    base_url: Url,
}

impl HttpCoverProvider {
    pub(crate) fn new(base_url: &str) -> LibraryResult<Self> {
        let invalid = |reason: String| LibraryError::validation(
            format!("invalid cover provider url {}: {}", base_url, reason).as_str(), Some("url".to_string()));
        let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    // the name is pushed as a single encoded segment
    fn cover_url(&self, name: &str) -> Result<Url, CoverFetchFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoverFetchFailure::provider(format!("cannot build cover url for {}", name).as_str()))?
            .pop_if_empty()
            .extend(["api", "bookcovers", name]);
        Ok(url)
    }

    async fn download(&self, name: &str) -> Result<Cover, CoverFetchFailure> {
        let res = self.client.get(self.cover_url(name)?).send().await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoverFetchFailure::NotFound);
        }
        if !status.is_success() {
            return Err(CoverFetchFailure::provider(
                format!("cover provider returned {} for {}", status, name).as_str()));
        }
        let bytes = res.bytes().await?;
        Ok(Cover::new(name, bytes.to_vec()))
    }
}

#[async_trait]
impl CoverProvider for HttpCoverProvider {
    async fn fetch(&self, name: &str, cancel: &CancellationToken) -> Result<Cover, CoverFetchFailure> {
        if cancel.is_cancelled() {
            return Err(CoverFetchFailure::Cancelled);
        }
        // dropping the request future aborts the underlying connection
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(cover = name, "http cover fetch cancelled");
                Err(CoverFetchFailure::Cancelled)
            }
            res = self.download(name) => res,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::covers::domain::CoverProvider;
    use crate::covers::domain::model::CoverFetchFailure;
    use crate::core::library::LibraryError;
    use crate::covers::provider::http_cover_provider::HttpCoverProvider;

    async fn mount(server: &MockServer, cover: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/api/bookcovers/{}", cover)))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_should_download_cover() {
        let server = MockServer::start().await;
        mount(&server, "book-front", ResponseTemplate::new(200).set_body_bytes(vec![7u8, 8, 9])).await;
        let sut = HttpCoverProvider::new(format!("{}/", server.uri()).as_str()).expect("should build provider");

        let cover = sut.fetch("book-front", &CancellationToken::new()).await.expect("should fetch cover");
        assert_eq!("book-front", cover.name.as_str());
        assert_eq!(vec![7u8, 8, 9], cover.bytes);
    }

    #[tokio::test]
    async fn test_should_map_not_found() {
        let server = MockServer::start().await;
        mount(&server, "book-back", ResponseTemplate::new(404)).await;
        let sut = HttpCoverProvider::new(server.uri().as_str()).expect("should build provider");

        let res = sut.fetch("book-back", &CancellationToken::new()).await;
        assert_eq!(Err(CoverFetchFailure::NotFound), res);
    }

    #[tokio::test]
    async fn test_should_map_server_errors() {
        let server = MockServer::start().await;
        mount(&server, "book-dummycover", ResponseTemplate::new(500)).await;
        let sut = HttpCoverProvider::new(server.uri().as_str()).expect("should build provider");

        let res = sut.fetch("book-dummycover", &CancellationToken::new()).await;
        assert!(matches!(res, Err(CoverFetchFailure::ProviderError { .. })));
    }

    #[tokio::test]
    async fn test_should_map_unreachable_provider() {
        let sut = HttpCoverProvider::new("http://127.0.0.1:1").expect("should build provider");
        let res = sut.fetch("book-front", &CancellationToken::new()).await;
        assert!(matches!(res, Err(CoverFetchFailure::ProviderError { .. })));
    }

    #[tokio::test]
    async fn test_should_cancel_slow_download() {
        let server = MockServer::start().await;
        mount(&server, "book-front", ResponseTemplate::new(200)
            .set_body_bytes(vec![1u8])
            .set_delay(Duration::from_secs(5))).await;
        let sut = HttpCoverProvider::new(server.uri().as_str()).expect("should build provider");

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });
        let started = Instant::now();
        let res = sut.fetch("book-front", &cancel).await;
        assert_eq!(Err(CoverFetchFailure::Cancelled), res);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_should_encode_cover_name_as_one_segment() {
        let server = MockServer::start().await;
        mount(&server, "book-front%2Fold%3Fv=1%23top", ResponseTemplate::new(200).set_body_bytes(vec![4u8])).await;
        let sut = HttpCoverProvider::new(server.uri().as_str()).expect("should build provider");

        let cover = sut.fetch("book-front/old?v=1#top", &CancellationToken::new()).await.expect("should fetch cover");
        assert_eq!("book-front/old?v=1#top", cover.name.as_str());
        assert_eq!(vec![4u8], cover.bytes);
    }

    #[tokio::test]
    async fn test_should_keep_base_path_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/covers/api/bookcovers/book-back"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![5u8]))
            .mount(&server)
            .await;
        let sut = HttpCoverProvider::new(format!("{}/covers/", server.uri()).as_str()).expect("should build provider");

        let cover = sut.fetch("book-back", &CancellationToken::new()).await.expect("should fetch cover");
        assert_eq!(vec![5u8], cover.bytes);
    }

    #[tokio::test]
    async fn test_should_not_call_provider_when_already_cancelled() {
        let server = MockServer::start().await;
        mount(&server, "book-front", ResponseTemplate::new(200).set_body_bytes(vec![1u8])).await;
        let sut = HttpCoverProvider::new(server.uri().as_str()).expect("should build provider");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let res = sut.fetch("book-front", &cancel).await;
        assert_eq!(Err(CoverFetchFailure::Cancelled), res);
        let received = server.received_requests().await.map(|reqs| reqs.len()).unwrap_or_default();
        assert_eq!(0, received);
    }

    #[test]
    fn test_should_reject_invalid_base_url() {
        let res = HttpCoverProvider::new("not a url");
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        let res = HttpCoverProvider::new("mailto:covers@example.com");
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }
}
