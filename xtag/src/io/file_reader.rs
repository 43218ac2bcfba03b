// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Readers for configuration and graph artifacts.
//!
//! Artifacts live either on the local filesystem or in an S3 bucket; both are read through
//! the [`FileReader`] trait and picked by path with [`select_reader`].

use std::fs::File;
use std::future::Future;
use std::io::Read;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

use crate::io::FileReaderResult;

const S3_SCHEME: &str = "s3://";

/// Trait defining the interface for reading files from different storage types
pub trait FileReader {
    /// Reads the content of a file as a String
    fn read_string<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<String>> + Send + 'a>>;

    /// Reads the content of a file as bytes
    fn read_bytes<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<Vec<u8>>> + Send + 'a>>;
}

pub fn is_s3_path(path: &str) -> bool {
    path.starts_with(S3_SCHEME)
}

/// Picks the reader able to serve `path`.
pub fn select_reader<'r>(
    path: &str,
    local: &'r LocalReader,
    s3: &'r S3Reader,
) -> &'r (dyn FileReader + Sync) {
    if is_s3_path(path) {
        s3
    } else {
        local
    }
}

/// Reader for local filesystem files
#[derive(Debug, Default)]
pub struct LocalReader;

impl LocalReader {
    pub fn new() -> Self {
        LocalReader
    }
}

impl FileReader for LocalReader {
    fn read_string<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<String>> + Send + 'a>> {
        Box::pin(async move {
            debug!(path, "reading local file");
            let mut file = File::open(path)?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(content)
        })
    }

    fn read_bytes<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(path, "reading local file");
            let mut file = File::open(path)?;
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            Ok(content)
        })
    }
}

/// Reader for files stored in S3
#[derive(Debug)]
pub struct S3Reader {
    client: Arc<aws_sdk_s3::Client>,
}

impl S3Reader {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3Reader {
            client: Arc::new(client),
        }
    }

    /// Splits "s3://bucket-name/key/path" into bucket and key.
    fn parse_s3_path(s3_path: &str) -> FileReaderResult<(String, String)> {
        let path = s3_path
            .strip_prefix(S3_SCHEME)
            .ok_or("S3 path must start with s3://")?;
        let mut parts = path.splitn(2, '/');

        let bucket = parts
            .next()
            .filter(|bucket| !bucket.is_empty())
            .ok_or("Invalid S3 path format, missing bucket name")?;
        let key = parts
            .next()
            .filter(|key| !key.is_empty())
            .ok_or("Invalid S3 path format, missing key")?;

        Ok((bucket.to_string(), key.to_string()))
    }

    async fn fetch(&self, path: &str) -> FileReaderResult<Vec<u8>> {
        let (bucket, key) = Self::parse_s3_path(path)?;
        debug!(bucket = %bucket, key = %key, "reading S3 object");
        let s3_response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        let bytes = s3_response.body.collect().await?;
        Ok(bytes.into_bytes().to_vec())
    }
}

impl FileReader for S3Reader {
    fn read_string<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<String>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = self.fetch(path).await?;
            Ok(String::from_utf8(bytes)?)
        })
    }

    fn read_bytes<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = FileReaderResult<Vec<u8>>> + Send + 'a>> {
        Box::pin(self.fetch(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    fn create_temp_file(content: &str, file_name: &str) -> PathBuf {
        let file_path = env::temp_dir().join(file_name);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    fn offline_s3_reader() -> S3Reader {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .build();
        S3Reader::new(aws_sdk_s3::Client::from_conf(config))
    }

    #[tokio::test]
    async fn test_local_reader_read_string() {
        let file_path = create_temp_file(r#"{"model_id": "xtag"}"#, "xtag_reader_string.json");

        let content = LocalReader::new()
            .read_string(file_path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(content, r#"{"model_id": "xtag"}"#);
        fs::remove_file(file_path).unwrap();
    }

    #[tokio::test]
    async fn test_local_reader_read_bytes() {
        let file_path = create_temp_file("graph bytes", "xtag_reader_bytes.onnx");

        let bytes = LocalReader::new()
            .read_bytes(file_path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(bytes, b"graph bytes");
        fs::remove_file(file_path).unwrap();
    }

    #[tokio::test]
    async fn test_local_reader_file_not_found() {
        let result = LocalReader::new()
            .read_string("non_existent_xtag_config.json")
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_s3_parse_path() {
        let (bucket, key) = S3Reader::parse_s3_path("s3://xtag-models/graphs/da.onnx").unwrap();
        assert_eq!(bucket, "xtag-models");
        assert_eq!(key, "graphs/da.onnx");

        assert!(S3Reader::parse_s3_path("invalid-path").is_err());
        assert!(S3Reader::parse_s3_path("s3://bucket-only").is_err());
        assert!(S3Reader::parse_s3_path("s3:///key").is_err());
    }

    #[tokio::test]
    async fn test_s3_reader_rejects_local_path() {
        let reader = offline_s3_reader();
        assert!(reader.read_bytes("data/da.onnx").await.is_err());
    }

    #[tokio::test]
    async fn test_select_reader_by_scheme() {
        let file_path = create_temp_file("local", "xtag_reader_select.txt");
        let local = LocalReader::new();
        let s3 = offline_s3_reader();

        assert!(is_s3_path("s3://xtag-models/da.onnx"));
        assert!(!is_s3_path(file_path.to_str().unwrap()));

        let reader = select_reader(file_path.to_str().unwrap(), &local, &s3);
        assert_eq!(
            reader.read_string(file_path.to_str().unwrap()).await.unwrap(),
            "local"
        );
        fs::remove_file(file_path).unwrap();
    }
}
