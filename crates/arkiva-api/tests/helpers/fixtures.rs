//! Test fixtures: decodable image bytes and MinIO notification payloads.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;

/// Encode a solid-color PNG of the given dimensions.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode test PNG");
    buf
}

/// Minimal valid PDF.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF"
        .to_vec()
}

/// A MinIO bucket notification with a single object-created record.
pub fn minio_notification(bucket: &str, key: &str, content_type: &str) -> serde_json::Value {
    json!({
        "EventName": "s3:ObjectCreated:Put",
        "Key": format!("{}/{}", bucket, key),
        "Records": [
            {
                "eventVersion": "2.0",
                "eventSource": "minio:s3",
                "awsRegion": "",
                "eventTime": "2021-11-06T09:10:22.920Z",
                "eventName": "s3:ObjectCreated:Put",
                "userIdentity": {"principalId": "minioadmin"},
                "requestParameters": {
                    "principalId": "minioadmin",
                    "region": "",
                    "sourceIPAddress": "172.18.0.9"
                },
                "responseElements": {
                    "x-amz-request-id": "16B4C31725A9A3A3",
                    "x-minio-deployment-id": "c6c30e91-b2a6-4ddf-981c-89ba0056a42b"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "Config",
                    "bucket": {
                        "name": bucket,
                        "ownerIdentity": {"principalId": "minioadmin"},
                        "arn": format!("arn:aws:s3:::{}", bucket)
                    },
                    "object": {
                        "key": key,
                        "size": 1305107,
                        "eTag": "47e4fa9eb0b0e4ccf0a4b0e0a9a5a9c7",
                        "contentType": content_type,
                        "userMetadata": {"content-type": content_type},
                        "sequencer": "16B4C317267B9999"
                    }
                },
                "source": {
                    "host": "172.18.0.9",
                    "port": "",
                    "userAgent": "MinIO (linux; amd64) minio-go/v7.0.15"
                }
            }
        ]
    })
}
