//! Object storage for avatars and résumés. Single put, no chunking or resume.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;

/// Uploads `body` to `bucket/key`.
pub async fn put_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: Bytes,
    content_type: Option<&str>,
) -> Result<(), AppError> {
    let size = body.len();
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .set_content_type(content_type.map(String::from))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("upload to {bucket}/{key} failed: {e}")))?;

    info!("Uploaded {size} bytes to s3://{bucket}/{key}");
    Ok(())
}

/// Public URL of an object, e.g. `https://storage.example.com/avatars/<key>`.
pub fn public_url(config: &Config, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", config.s3_public_url, bucket, key)
}

/// Object key for a user upload: `<user_id>/<unix_millis>.<ext>`.
/// The extension is taken from the uploaded file name; names without one get `bin`.
pub fn object_key(user_id: Uuid, file_name: &str, unix_millis: i64) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin")
        .to_ascii_lowercase();
    format!("{user_id}/{unix_millis}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        let user_id = Uuid::nil();
        assert_eq!(
            object_key(user_id, "Resume.Final.PDF", 1_700_000_000_000),
            format!("{user_id}/1700000000000.pdf")
        );
    }

    #[test]
    fn test_public_url_joins_base_bucket_and_key() {
        let config = Config::for_tests();
        assert_eq!(
            public_url(&config, "avatars", "u/1.png"),
            "http://localhost:9000/avatars/u/1.png"
        );
    }

    #[test]
    fn test_object_key_without_extension() {
        let user_id = Uuid::nil();
        assert_eq!(object_key(user_id, "avatar", 5), format!("{user_id}/5.bin"));
        assert_eq!(object_key(user_id, "weird.", 5), format!("{user_id}/5.bin"));
        assert_eq!(object_key(user_id, "x.p/df", 5), format!("{user_id}/5.bin"));
    }
}
