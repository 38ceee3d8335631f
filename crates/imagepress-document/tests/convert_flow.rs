// SPDX-License-Identifier: MIT
//
// End-to-end conversion flow: two drops, a deletion, then generation.

use chrono::DateTime;
use imagepress_core::ImagepressError;
use imagepress_core::human_errors::{Severity, humanize_error};
use imagepress_document::{ConverterService, IncomingFile};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn png_file(name: &str, secs: i64, side: u32) -> IncomingFile {
    let img = image::RgbImage::from_pixel(side, side, image::Rgb([70, 70, 220]));
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("encode png");

    IncomingFile {
        name: Some(name.to_string()),
        media_type: "image/png".into(),
        last_modified: Some(DateTime::from_timestamp(secs, 0).expect("valid timestamp")),
        bytes,
    }
}

fn names(service: &ConverterService) -> Vec<String> {
    service
        .previews()
        .iter()
        .map(|p| p.name().expect("named").to_string())
        .collect()
}

#[tokio::test]
async fn two_drops_then_delete_then_generate() {
    init_logging();
    let service = ConverterService::new();

    // First drop arrives unsorted; it is sorted by timestamp on append.
    service
        .add_batch(vec![png_file("t5.png", 5, 4), png_file("t1.png", 1, 4)])
        .expect("first drop");
    // Second drop appends after the first, never re-sorting across drops.
    service
        .add_batch(vec![png_file("t3.png", 3, 4)])
        .expect("second drop");

    assert_eq!(names(&service), vec!["t1.png", "t5.png", "t3.png"]);

    // User deletes the middle thumbnail.
    service.remove_at(1);
    assert_eq!(names(&service), vec!["t1.png", "t3.png"]);

    let document = service.generate().await.expect("generate");
    assert_eq!(document.page_count(), 2);

    let parsed = lopdf::Document::load_mem(document.bytes()).expect("valid PDF");
    assert_eq!(parsed.get_pages().len(), 2);
}

#[tokio::test]
async fn a_corrupt_image_surfaces_its_position_to_the_user() {
    init_logging();
    let service = ConverterService::new();

    service
        .add_batch(vec![png_file("good.png", 1, 4)])
        .expect("good file");
    service
        .add_batch(vec![IncomingFile {
            name: Some("broken.png".into()),
            media_type: "image/png".into(),
            last_modified: Some(DateTime::from_timestamp(2, 0).expect("valid timestamp")),
            bytes: b"not really a png".to_vec(),
        }])
        .expect("broken file passes the boundary; it decodes later");

    let err = service.generate().await.expect_err("decode must fail");
    assert!(matches!(err, ImagepressError::Decode { index: 1, .. }));

    let human = humanize_error(&err);
    assert_eq!(human.message, "Image 2 couldn't be read.");
    assert_eq!(human.severity, Severity::Permanent);

    // Nothing was produced; the user can drop the bad image and retry.
    service.remove_at(1);
    let document = service.generate().await.expect("retry succeeds");
    assert_eq!(document.page_count(), 1);
}
